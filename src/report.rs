//! Rendering of fetched rows on standard output.
use std::fmt;
use std::io::{self, Write};

pub const SUCCESS_LINE: &str = "Successfully fetched data!";
pub const SEPARATOR: &str = "---";

/// One printable result: the English label of an event and its point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub label: Option<String>,
    pub date: Option<String>,
}

/// Displays the wrapped value, or `None` when absent.
struct OrNone<'a>(Option<&'a str>);

impl fmt::Display for OrNone<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.unwrap_or("None"))
    }
}

/// Write the success line followed by one label/date/separator block per row.
pub fn write_rows<W: Write>(out: &mut W, rows: &[ResultRow]) -> io::Result<()> {
    writeln!(out, "{}", SUCCESS_LINE)?;
    for row in rows {
        writeln!(out, "Label: {}", OrNone(row.label.as_deref()))?;
        writeln!(out, "Date: {}", OrNone(row.date.as_deref()))?;
        writeln!(out, "{}", SEPARATOR)?;
    }
    Ok(())
}

pub fn write_error<W: Write, E: fmt::Display>(out: &mut W, err: E) -> io::Result<()> {
    writeln!(out, "Error: {}", err)
}
