// Sample encoders and destinations

use crate::job::Trajectory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One pretty-printed JSON document
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Jsonl => "jsonl",
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    job: &'a str,
    #[serde(flatten)]
    record: &'a T,
}

#[derive(Serialize)]
struct Named<'a> {
    name: &'a str,
    samples: &'a Trajectory,
}

/// Encode `trajectory` into `out`. When `job` is set, JSON Lines records
/// carry it as a `job` field so several trajectories can share one stream.
pub fn write_trajectory<W: Write>(
    out: &mut W,
    trajectory: &Trajectory,
    format: Format,
    job: Option<&str>,
) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, trajectory)?;
            writeln!(out)?;
        }
        Format::Jsonl => match trajectory {
            Trajectory::Planar(samples) => write_lines(out, samples, job)?,
            Trajectory::Spatial(samples) => write_lines(out, samples, job)?,
            Trajectory::Heading(samples) => write_lines(out, samples, job)?,
            Trajectory::Rotated(vector) => write_lines(out, std::slice::from_ref(vector), job)?,
        },
    }
    Ok(())
}

fn write_lines<W: Write, T: Serialize>(out: &mut W, records: &[T], job: Option<&str>) -> Result<()> {
    for record in records {
        match job {
            Some(job) => serde_json::to_writer(&mut *out, &Tagged { job, record })?,
            None => serde_json::to_writer(&mut *out, record)?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Where finished trajectories go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    /// One `<job>.<ext>` file per trajectory
    Directory(PathBuf),
}

impl Destination {
    pub fn from_option(directory: Option<PathBuf>) -> Self {
        directory.map_or(Destination::Stdout, Destination::Directory)
    }

    /// Write a batch of named trajectories.
    ///
    /// On stdout a JSON batch becomes a single array of `{name, samples}`
    /// objects; JSON Lines records are tagged with their job name.
    pub fn emit(&self, results: &[(String, Trajectory)], format: Format) -> Result<()> {
        match self {
            Destination::Stdout => {
                let stdout = io::stdout();
                let mut out = io::BufWriter::new(stdout.lock());
                write_batch(&mut out, results, format)?;
                out.flush()?;
            }
            Destination::Directory(dir) => {
                fs::create_dir_all(dir).with_context(|| {
                    format!("failed to create output directory {}", dir.display())
                })?;
                for (name, trajectory) in results {
                    let path = dir.join(format!("{name}.{}", format.extension()));
                    let file = fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    let mut out = io::BufWriter::new(file);
                    write_trajectory(&mut out, trajectory, format, None)
                        .and_then(|()| out.flush().map_err(Into::into))
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(job = %name, path = %path.display(), "wrote samples");
                }
            }
        }
        Ok(())
    }
}

/// Encode several named trajectories into one stream.
pub fn write_batch<W: Write>(
    out: &mut W,
    results: &[(String, Trajectory)],
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let named: Vec<Named<'_>> = results
                .iter()
                .map(|(name, samples)| Named {
                    name: name.as_str(),
                    samples,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &named)?;
            writeln!(out)?;
        }
        Format::Jsonl => {
            for (name, trajectory) in results {
                write_trajectory(out, trajectory, format, Some(name.as_str()))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use stride_core::{AngleSample, Point2, Point3, Sample};

    fn render(trajectory: &Trajectory, format: Format, job: Option<&str>) -> String {
        let mut buf = Vec::new();
        write_trajectory(&mut buf, trajectory, format, job).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_array_of_flat_samples() {
        let trajectory = Trajectory::Planar(vec![
            Sample::new(Point2::new(1.0, 1.0), 0.0),
            Sample::new(Point2::new(2.0, 1.0), 0.5),
        ]);
        let value: Value = serde_json::from_str(&render(&trajectory, Format::Json, None)).unwrap();
        assert_eq!(
            value,
            json!([{"x": 1.0, "y": 1.0, "t": 0.0}, {"x": 2.0, "y": 1.0, "t": 0.5}])
        );
    }

    #[test]
    fn jsonl_one_record_per_line() {
        let trajectory = Trajectory::Heading(vec![
            AngleSample { angle: 40.0, t: 0.0 },
            AngleSample { angle: 10.0, t: 0.5 },
        ]);
        let text = render(&trajectory, Format::Jsonl, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [r#"{"angle":40.0,"t":0.0}"#, r#"{"angle":10.0,"t":0.5}"#]);
    }

    #[test]
    fn jsonl_records_carry_job_name() {
        let trajectory = Trajectory::Rotated(Point3::new(1.0, 2.0, 3.0));
        let text = render(&trajectory, Format::Jsonl, Some("tilt"));
        assert_eq!(text, "{\"job\":\"tilt\",\"x\":1.0,\"y\":2.0,\"z\":3.0}\n");
    }

    #[test]
    fn json_batch_names_each_trajectory() {
        let results = vec![
            ("a".to_string(), Trajectory::Rotated(Point3::new(0.0, 0.0, 1.0))),
            (
                "b".to_string(),
                Trajectory::Spatial(vec![Sample::new(Point3::new(0.0, 0.0, 0.0), 0.0)]),
            ),
        ];
        let mut buf = Vec::new();
        write_batch(&mut buf, &results, Format::Json).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(
            value,
            json!([
                {"name": "a", "samples": {"x": 0.0, "y": 0.0, "z": 1.0}},
                {"name": "b", "samples": [{"x": 0.0, "y": 0.0, "z": 0.0, "t": 0.0}]}
            ])
        );
    }

    #[test]
    fn destination_defaults_to_stdout() {
        assert_eq!(Destination::from_option(None), Destination::Stdout);
        assert_eq!(
            Destination::from_option(Some(PathBuf::from("out"))),
            Destination::Directory(PathBuf::from("out"))
        );
    }
}
