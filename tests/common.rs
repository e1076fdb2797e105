#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use mockito::ServerGuard;

pub fn daily_facts() -> Command {
    cargo_bin_cmd!("daily_facts")
}

/// `daily_facts` pointed at the `/sparql` path of a mock server, logging silenced.
pub fn against(server: &ServerGuard) -> Command {
    let mut cmd = daily_facts();
    cmd.args(["--quiet", "--endpoint", &format!("{}/sparql", server.url())]);
    cmd
}
