//! Job files, job execution and sample encoding behind the `stride` binary.

pub mod config;
pub mod job;
pub mod output;

pub use config::{JobFile, OutputConfig};
pub use job::{Job, Motion, Point, Trajectory};
pub use output::{Destination, Format};
