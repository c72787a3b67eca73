use anyhow::Result;
use clap::{Parser, Subcommand};
use stride::Format;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Move(args) => args.run(cli.format),
        Command::Turn(args) => args.run(cli.format),
        Command::Accelerate(args) => args.run(cli.format),
        Command::Rotate(args) => args.run(cli.format),
        Command::Run(args) => args.run(cli.format),
    }
}

// Logs go to stderr so stdout only ever carries samples.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "stride", about = "Sample motion trajectories at fixed time steps")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output encoding [default: json, or the job file's `output.format`].
    #[arg(long, global = true, value_enum)]
    format: Option<Format>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Move in a straight line at constant speed.
    Move(cli::sample::MoveArgs),
    /// Ramp a heading between two angles (degrees) at constant angular speed.
    Turn(cli::sample::TurnArgs),
    /// Move in a straight line under a trapezoidal speed profile.
    Accelerate(cli::sample::AccelerateArgs),
    /// Rotate a 3D vector by Euler angles.
    Rotate(cli::sample::RotateArgs),
    /// Run every job in a TOML or JSON job file.
    Run(cli::run::RunArgs),
}
