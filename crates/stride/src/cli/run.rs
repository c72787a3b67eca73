use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use stride::{Destination, Format, JobFile};

#[derive(Args)]
pub struct RunArgs {
    /// Path to the job file (TOML or JSON).
    pub jobs: PathBuf,

    /// Directory for per-job output files; overrides `output.directory`.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    pub fn run(&self, format: Option<Format>) -> Result<()> {
        let file = JobFile::from_file(&self.jobs)?;
        file.validate()?;

        tracing::info!(
            "running {} job(s) from {}",
            file.jobs.len(),
            self.jobs.display()
        );

        let format = format.unwrap_or(file.output.format);
        let destination =
            Destination::from_option(self.output.clone().or(file.output.directory.clone()));

        let results = file.run()?;
        destination
            .emit(&results, format)
            .context("failed to write samples")
    }
}
