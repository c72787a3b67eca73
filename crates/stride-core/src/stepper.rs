//! Fixed-interval trajectory sampling.
//!
//! A [`Stepper`] walks elapsed time in increments of its `interval`, asks a
//! [`MotionModel`] how far the object has travelled, and projects that
//! distance onto the straight segment between the two endpoints. The same
//! loop serves planar, spatial and scalar (angle) positions.
//!
//! The final sample always sits exactly on the target. Models that can
//! invert their distance function (constant speed) place it at the exact
//! crossing time; the others (trapezoid) clamp it at the first time step
//! that reaches or passes the target, so its `t` is only accurate to one
//! `interval`.

use crate::{
    error::{Error, Result, ensure_finite, ensure_positive},
    motion::{AccelerationConfig, ConstantSpeed, MotionModel, TrapezoidProfile},
    sample::{AngleSample, Sample},
    vector::{Vector, project},
};

const DEFAULT_SAMPLE_LIMIT: usize = 1_000_000;
// Relative slack when deciding whether a step landed on the target.
const REACH_TOLERANCE: f64 = 1e-12;
const FULL_TURN: f64 = 360.0;

/// Map any angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid may round tiny negative inputs up to the modulus itself
    if wrapped >= FULL_TURN {
        0.0
    } else {
        // folds -0.0 into 0.0
        wrapped + 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stepper {
    interval: f64,
    sample_limit: usize,
}

impl Stepper {
    /// A stepper emitting one sample every `interval` seconds.
    pub fn new(interval: f64) -> Result<Self> {
        ensure_positive("interval", interval)?;
        Ok(Self {
            interval,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        })
    }

    /// Cap on the number of samples a single call may produce.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit.max(1);
        self
    }

    /// Straight-line travel at a constant `speed`.
    pub fn move_to<V: Vector>(&self, from: V, to: V, speed: f64) -> Result<Vec<Sample<V>>> {
        self.sample(from, to, &ConstantSpeed::new(speed))
    }

    /// Rotate a scalar heading from `from` to `to` degrees at `speed`
    /// degrees per second. Every emitted angle is normalized into
    /// `[0, 360)`; the stepping direction follows the sign of `to - from`
    /// without taking the shorter way around.
    pub fn turn_to(&self, from: f64, to: f64, speed: f64) -> Result<Vec<AngleSample>> {
        ensure_finite("from", from)?;
        ensure_finite("to", to)?;
        let samples = self.sample(from, to, &ConstantSpeed::new(speed))?;
        Ok(samples
            .into_iter()
            .map(|sample| AngleSample {
                angle: normalize_angle(sample.position),
                t: sample.t,
            })
            .collect())
    }

    /// Straight-line travel following a trapezoidal speed profile.
    pub fn speed_up_to<V: Vector>(
        &self,
        from: V,
        to: V,
        config: &AccelerationConfig,
    ) -> Result<Vec<Sample<V>>> {
        let profile = TrapezoidProfile::new(*config)?;
        self.sample(from, to, &profile)
    }

    /// Sample the segment `from -> to` under an arbitrary motion model.
    pub fn sample<V, M>(&self, from: V, to: V, model: &M) -> Result<Vec<Sample<V>>>
    where
        V: Vector,
        M: MotionModel,
    {
        model.validate()?;
        let distance = from.distance_to(to);
        ensure_finite("distance", distance)?;

        if distance == 0.0 {
            return Ok(vec![Sample::new(from, 0.0)]);
        }

        let tolerance = distance * REACH_TOLERANCE;
        let reach = model.reach();
        if reach < distance - tolerance {
            return Err(Error::UnreachableTarget {
                target: distance,
                reach,
            });
        }

        let mut samples = match model.crossing_time(distance) {
            Some(arrival) => {
                let needed = (arrival / self.interval).ceil() + 1.0;
                if needed > self.sample_limit as f64 {
                    return Err(Error::TooManySamples {
                        limit: self.sample_limit,
                    });
                }
                Vec::with_capacity(needed as usize)
            }
            None => Vec::new(),
        };

        for step in 0u64.. {
            if samples.len() >= self.sample_limit {
                return Err(Error::TooManySamples {
                    limit: self.sample_limit,
                });
            }

            let t = step as f64 * self.interval;
            let travelled = model.distance_at(t);
            if travelled >= distance - tolerance {
                let t = if travelled > distance + tolerance {
                    model.crossing_time(distance).unwrap_or(t)
                } else {
                    t
                };
                samples.push(Sample::new(to, t));
                break;
            }
            samples.push(Sample::new(project(from, to, travelled, distance), t));
        }

        tracing::debug!(
            samples = samples.len(),
            distance,
            interval = self.interval,
            "sampled trajectory"
        );
        Ok(samples)
    }
}
