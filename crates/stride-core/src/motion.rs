// Speed models the stepper can sample

pub mod constant;
pub mod trapezoid;

pub use constant::ConstantSpeed;
pub use trapezoid::{AccelerationConfig, TrapezoidProfile};

use crate::error::Result;

/// Cumulative distance as a function of elapsed time.
///
/// The stepper walks time in fixed increments and asks the model how far
/// the object has travelled; the model never sees positions.
pub trait MotionModel {
    /// Rejects parameters that would break termination or monotonicity.
    fn validate(&self) -> Result<()>;

    /// Distance covered `t` seconds after departure. Non-decreasing in `t`.
    fn distance_at(&self, t: f64) -> f64;

    /// Largest distance the model ever covers.
    fn reach(&self) -> f64 {
        f64::INFINITY
    }

    /// Exact time at which `distance` is first covered, when the model can
    /// invert itself. Models returning `None` get their last sample clamped
    /// to the target at the overshooting time step instead.
    fn crossing_time(&self, _distance: f64) -> Option<f64> {
        None
    }
}
