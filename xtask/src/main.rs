use anyhow::Result;
use clap::Parser;
use xshell::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "xtask", about = "Stride workspace automation")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    // Always operate from the workspace root
    sh.change_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/.."));

    cli.command.run(&sh)
}
