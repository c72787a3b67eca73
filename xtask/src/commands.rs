use anyhow::Result;
use clap::Subcommand;
use xshell::Shell;

pub mod checks;
pub mod ci;
pub mod demo;

#[derive(Subcommand)]
pub enum Command {
    /// Run CI checks (fmt, clippy, test). Runs all if no subcommand specified.
    Ci(ci::Ci),
    /// Sample every job file under demos/ through the CLI
    Demo(demo::Demo),
    /// Apply rustfmt to all files
    Fmt,
    /// Run tests
    Test(test::Test),
}

impl Command {
    pub fn run(self, sh: &Shell) -> Result<()> {
        match self {
            Command::Ci(cmd) => cmd.run(sh),
            Command::Demo(cmd) => cmd.run(sh),
            Command::Fmt => checks::fmt(sh),
            Command::Test(cmd) => cmd.run(sh),
        }
    }
}
