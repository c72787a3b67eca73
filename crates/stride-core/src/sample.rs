use serde::{Deserialize, Serialize};

/// One emitted point of a trajectory: where the object is `t` seconds
/// after departure.
///
/// Serializes flat, e.g. `{"x": 1.0, "y": 1.0, "t": 0.5}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample<V> {
    #[serde(flatten)]
    pub position: V,
    pub t: f64,
}

impl<V> Sample<V> {
    pub const fn new(position: V, t: f64) -> Self {
        Self { position, t }
    }
}

/// One emitted rotation of a scalar angle ramp, in degrees within `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub angle: f64,
    pub t: f64,
}
