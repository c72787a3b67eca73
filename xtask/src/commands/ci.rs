use anyhow::Result;
use clap::{Args, Subcommand};
use xshell::Shell;

use super::{checks, test::Test};

#[derive(Args)]
pub struct Ci {
    #[command(subcommand)]
    command: Option<CiCommand>,
}

#[derive(Subcommand)]
pub enum CiCommand {
    /// Run cargo fmt check
    Fmt,
    /// Run cargo clippy
    Clippy,
    /// Run cargo test
    Test(Test),
}

impl Ci {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match &self.command {
            Some(cmd) => cmd.run(sh),
            None => {
                checks::fmt_check(sh)?;
                checks::clippy(sh)?;
                Test::default().run(sh)
            }
        }
    }
}

impl CiCommand {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match self {
            CiCommand::Fmt => checks::fmt_check(sh),
            CiCommand::Clippy => checks::clippy(sh),
            CiCommand::Test(test) => test.run(sh),
        }
    }
}
