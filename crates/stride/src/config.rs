use crate::{
    job::{Job, Trajectory},
    output::Format,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path, path::PathBuf};

/// A batch of trajectories to sample, loaded from TOML or JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    /// Where and how samples are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Upper bound on samples per job (the library default applies when unset)
    #[serde(default)]
    pub max_samples: Option<usize>,

    /// Jobs, run in file order
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Encoding of the samples
    #[serde(default)]
    pub format: Format,

    /// Directory receiving one file per job; stdout when unset
    pub directory: Option<PathBuf>,
}

impl JobFile {
    /// Load a job file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());

        match extension {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => {
                // Try TOML first (preferred), fall back to JSON
                Self::from_toml(&content).or_else(|_| Self::from_json(&content))
            }
        }
    }

    /// Parse a job file from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse job file as TOML")
    }

    /// Parse a job file from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse job file as JSON")
    }

    /// Validate the job file
    ///
    /// Motion parameters are checked by the stepper when each job runs;
    /// this only covers what is wrong regardless of the numbers.
    pub fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            anyhow::bail!("job file defines no jobs");
        }

        if self.max_samples == Some(0) {
            anyhow::bail!("max_samples must be at least 1");
        }

        let mut seen = HashSet::new();
        for job in &self.jobs {
            if job.name.trim().is_empty() {
                anyhow::bail!("job names cannot be empty");
            }
            // names become `<name>.<ext>` inside the output directory
            let as_path = Path::new(&job.name);
            if job.name.contains(['/', '\\'])
                || as_path.file_name() != Some(as_path.as_os_str())
            {
                anyhow::bail!("job name `{}` must be a plain file name", job.name);
            }
            if !seen.insert(job.name.as_str()) {
                anyhow::bail!("duplicate job name `{}`", job.name);
            }
            job.motion
                .check_dimensions()
                .with_context(|| format!("job `{}`", job.name))?;
        }

        if self
            .output
            .directory
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            anyhow::bail!("output.directory cannot be empty");
        }

        Ok(())
    }

    /// Run every job in order, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<(String, Trajectory)>> {
        self.jobs
            .iter()
            .map(|job| {
                let trajectory = job
                    .motion
                    .run(self.max_samples)
                    .with_context(|| format!("job `{}` failed", job.name))?;
                tracing::debug!(job = %job.name, records = trajectory.len(), "job finished");
                Ok((job.name.clone(), trajectory))
            })
            .collect()
    }
}
