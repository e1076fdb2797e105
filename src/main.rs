//! `daily_facts` entrypoint: print what happened on this day in history.

use chrono::Local;
use clap::{ArgAction, Parser};
use daily_facts::{QueryRunner, SparqlClient, DEFAULT_TIMEOUT, WIKIDATA_ENDPOINT};
use log::debug;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io;
use std::time::Duration;

/// Fetch up to five historical events that happened on today's date from Wikidata
#[derive(Parser)]
#[command(name = "daily_facts", version, long_about = None)]
struct Cli {
    /// Print diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Silence all diagnostics, including warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Give up on the request after this many seconds (0 waits forever)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Query another SPARQL endpoint (for tests)
    #[arg(long, hide = true, default_value = WIKIDATA_ENDPOINT)]
    endpoint: String,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn timeout(&self) -> Option<Duration> {
        match self.timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries the report.
    if let Err(e) = TermLogger::init(
        cli.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("cannot initialize logger: {}", e);
    }

    let client = SparqlClient::new(&cli.endpoint).with_timeout(cli.timeout());
    let today = Local::now().date_naive();
    debug!("looking up {} on {}", today, client.endpoint());

    let stdout = io::stdout();
    QueryRunner::new(client, today).run(&mut stdout.lock())
}
