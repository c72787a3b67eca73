//! Motion sampling primitives shared across Stride components.
//!
//! Every operation here is a pure function of its inputs: no clocks, no
//! I/O, no retained state between calls.

pub mod error;
pub mod motion;
pub mod rotation;
pub mod sample;
pub mod stepper;
pub mod vector;

pub use error::{Error, Result};
pub use motion::{AccelerationConfig, ConstantSpeed, MotionModel, TrapezoidProfile};
pub use rotation::{EulerAngles, RotationMatrix};
pub use sample::{AngleSample, Sample};
pub use stepper::{Stepper, normalize_angle};
pub use vector::{Point2, Point3, Vector};
