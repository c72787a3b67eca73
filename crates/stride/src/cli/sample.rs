use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use stride::{Format, Motion, Point, output::write_trajectory};
use stride_core::{AccelerationConfig, EulerAngles};

#[derive(Args)]
pub struct MoveArgs {
    /// Start position, `x,y` or `x,y,z`.
    #[arg(long, allow_hyphen_values = true)]
    pub from: Point,

    /// End position, same dimensionality as `--from`.
    #[arg(long, allow_hyphen_values = true)]
    pub to: Point,

    /// Seconds between samples.
    #[arg(long)]
    pub interval: f64,

    /// Units per second.
    #[arg(long)]
    pub speed: f64,
}

impl MoveArgs {
    pub fn run(&self, format: Option<Format>) -> Result<()> {
        emit(
            &Motion::Move {
                from: self.from,
                to: self.to,
                interval: self.interval,
                speed: self.speed,
            },
            format,
        )
    }
}

#[derive(Args)]
pub struct TurnArgs {
    /// Starting heading in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub from: f64,

    /// Final heading in degrees; the ramp runs in the direction of `to - from`.
    #[arg(long, allow_hyphen_values = true)]
    pub to: f64,

    /// Seconds between samples.
    #[arg(long)]
    pub interval: f64,

    /// Degrees per second.
    #[arg(long)]
    pub speed: f64,
}

impl TurnArgs {
    pub fn run(&self, format: Option<Format>) -> Result<()> {
        emit(
            &Motion::Turn {
                from: self.from,
                to: self.to,
                interval: self.interval,
                speed: self.speed,
            },
            format,
        )
    }
}

#[derive(Args)]
pub struct AccelerateArgs {
    /// Start position, `x,y` or `x,y,z`.
    #[arg(long, allow_hyphen_values = true)]
    pub from: Point,

    /// End position, same dimensionality as `--from`.
    #[arg(long, allow_hyphen_values = true)]
    pub to: Point,

    /// Seconds between samples.
    #[arg(long)]
    pub interval: f64,

    /// Floor speed held before the ramp-up.
    #[arg(long)]
    pub speed: f64,

    /// Cruise speed reached after the ramp-up.
    #[arg(long)]
    pub max_speed: f64,

    /// Ramp-up rate.
    #[arg(long)]
    pub acceleration: f64,

    /// Braking rate.
    #[arg(long)]
    pub deceleration: f64,

    /// Time the ramp-up begins.
    #[arg(long)]
    pub start: f64,

    /// Time braking begins.
    #[arg(long)]
    pub end: f64,
}

impl AccelerateArgs {
    pub fn run(&self, format: Option<Format>) -> Result<()> {
        emit(
            &Motion::Accelerate {
                from: self.from,
                to: self.to,
                interval: self.interval,
                profile: AccelerationConfig {
                    speed: self.speed,
                    start: self.start,
                    acceleration: self.acceleration,
                    max_speed: self.max_speed,
                    end: self.end,
                    deceleration: self.deceleration,
                },
            },
            format,
        )
    }
}

#[derive(Args)]
pub struct RotateArgs {
    /// Vector to rotate, `x,y,z`.
    #[arg(long, allow_hyphen_values = true)]
    pub vector: Point,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub alpha: f64,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub beta: f64,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub gamma: f64,

    /// Read the angles as degrees instead of radians.
    #[arg(long)]
    pub degrees: bool,
}

impl RotateArgs {
    pub fn run(&self, format: Option<Format>) -> Result<()> {
        let Point::Spatial(vector) = self.vector else {
            anyhow::bail!("--vector needs three coordinates");
        };
        emit(
            &Motion::Rotate {
                vector,
                angles: EulerAngles::new(self.alpha, self.beta, self.gamma),
                degrees: self.degrees,
            },
            format,
        )
    }
}

fn emit(motion: &Motion, format: Option<Format>) -> Result<()> {
    let format = format.unwrap_or_default();
    let trajectory = motion.run(None)?;
    tracing::debug!(records = trajectory.len(), "trajectory ready");

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_trajectory(&mut out, &trajectory, format, None)?;
    out.flush()?;
    Ok(())
}
