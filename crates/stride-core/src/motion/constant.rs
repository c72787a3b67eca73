// Constant-speed travel

use crate::{
    error::{Result, ensure_positive},
    motion::MotionModel,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantSpeed {
    /// Distance units (or degrees) per second
    pub speed: f64,
}

impl ConstantSpeed {
    pub const fn new(speed: f64) -> Self {
        Self { speed }
    }
}

impl MotionModel for ConstantSpeed {
    fn validate(&self) -> Result<()> {
        ensure_positive("speed", self.speed)
    }

    fn distance_at(&self, t: f64) -> f64 {
        self.speed * t.max(0.0)
    }

    fn crossing_time(&self, distance: f64) -> Option<f64> {
        Some(distance / self.speed)
    }
}
