//! Trapezoidal velocity profile.
//!
//! The object travels at a floor `speed` until `start`, ramps up at
//! `acceleration` until it reaches `max_speed`, cruises until `end`, then
//! brakes at `deceleration` back down to the floor speed. Once braking is
//! over the covered distance stays at its final value: the profile does
//! not resume floor-speed travel.
//!
//! ```text
//!  v
//!  max_speed      ____________
//!                /            \
//!  speed  ______/              \______ (plateau: distance frozen)
//!              start  accel   end   decel
//! ```

use crate::{
    error::{Error, Result, ensure_finite, ensure_positive},
    motion::MotionModel,
};
use serde::{Deserialize, Serialize};

/// Parameters of a trapezoidal profile. Every field is required.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccelerationConfig {
    /// Floor speed, held before `start` and added on top of the ramp.
    pub speed: f64,
    /// Time the ramp-up begins.
    pub start: f64,
    /// Ramp-up rate, speed units per second.
    pub acceleration: f64,
    /// Cruise speed reached at the end of the ramp-up.
    #[serde(alias = "maxSpeed")]
    pub max_speed: f64,
    /// Time braking begins.
    pub end: f64,
    /// Braking rate, speed units per second.
    pub deceleration: f64,
}

impl AccelerationConfig {
    /// Check the ordering `start <= acceleration_time <= end <= deceleration_time`
    /// along with the sign of every rate.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("speed", self.speed)?;
        if self.speed < 0.0 {
            return Err(Error::InvalidArgument {
                name: "speed",
                value: self.speed,
                reason: "must not be negative",
            });
        }
        ensure_finite("max_speed", self.max_speed)?;
        if self.max_speed < self.speed {
            return Err(Error::InvalidArgument {
                name: "max_speed",
                value: self.max_speed,
                reason: "must not be below the floor speed",
            });
        }
        ensure_positive("acceleration", self.acceleration)?;
        ensure_positive("deceleration", self.deceleration)?;
        ensure_finite("start", self.start)?;
        if self.start < 0.0 {
            return Err(Error::InvalidArgument {
                name: "start",
                value: self.start,
                reason: "must not be negative",
            });
        }
        ensure_finite("end", self.end)?;
        if self.end < self.start {
            return Err(Error::InvalidArgument {
                name: "end",
                value: self.end,
                reason: "must not precede start",
            });
        }

        let acceleration_time = self.start + self.speed_gain() / self.acceleration;
        if acceleration_time > self.end {
            return Err(Error::InvalidProfile {
                reason: format!(
                    "ramp-up finishes at {acceleration_time} but braking begins at {}",
                    self.end
                ),
            });
        }
        Ok(())
    }

    fn speed_gain(&self) -> f64 {
        self.max_speed - self.speed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Floor,
    Accelerating,
    Cruising,
    Decelerating,
    Done,
}

/// A validated [`AccelerationConfig`] with its phase boundaries resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrapezoidProfile {
    config: AccelerationConfig,
    acceleration_time: f64,
    deceleration_time: f64,
    ramp_up_distance: f64,
    cruise_distance: f64,
    ramp_down_distance: f64,
}

impl TrapezoidProfile {
    pub fn new(config: AccelerationConfig) -> Result<Self> {
        config.validate()?;

        let gain = config.speed_gain();
        let acceleration_time = config.start + gain / config.acceleration;
        let deceleration_time = config.end + gain / config.deceleration;

        Ok(Self {
            config,
            acceleration_time,
            deceleration_time,
            ramp_up_distance: gain * gain / (2.0 * config.acceleration),
            cruise_distance: (config.end - acceleration_time) * gain,
            ramp_down_distance: gain * gain / (2.0 * config.deceleration),
        })
    }

    pub fn config(&self) -> &AccelerationConfig {
        &self.config
    }

    /// Time the cruise speed is reached.
    pub fn acceleration_time(&self) -> f64 {
        self.acceleration_time
    }

    /// Time braking completes and the distance freezes.
    pub fn deceleration_time(&self) -> f64 {
        self.deceleration_time
    }

    pub(crate) fn phase(&self, t: f64) -> Phase {
        if t < self.config.start {
            Phase::Floor
        } else if t < self.acceleration_time {
            Phase::Accelerating
        } else if t < self.config.end {
            Phase::Cruising
        } else if t < self.deceleration_time {
            Phase::Decelerating
        } else {
            Phase::Done
        }
    }

    /// Distance at `t` using the formula of `phase`, regardless of whether
    /// `t` actually falls inside that phase. Adjacent phases agree at their
    /// shared boundary.
    pub(crate) fn distance_in(&self, phase: Phase, t: f64) -> f64 {
        let c = &self.config;
        let gain = c.speed_gain();
        let floor = c.speed * t;
        match phase {
            Phase::Floor => floor,
            Phase::Accelerating => {
                let span = t - c.start;
                floor + 0.5 * c.acceleration * span * span
            }
            Phase::Cruising => floor + self.ramp_up_distance + (t - self.acceleration_time) * gain,
            Phase::Decelerating => {
                let span = t - c.end;
                floor
                    + self.ramp_up_distance
                    + self.cruise_distance
                    + gain * span
                    - 0.5 * c.deceleration * span * span
            }
            Phase::Done => self.reach(),
        }
    }
}

impl MotionModel for TrapezoidProfile {
    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn distance_at(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        self.distance_in(self.phase(t), t)
    }

    fn reach(&self) -> f64 {
        self.config.speed * self.deceleration_time
            + self.ramp_up_distance
            + self.cruise_distance
            + self.ramp_down_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // speedUpTo example profile: floor 1, cruise 5, ramps of 2 s.
    fn demo() -> AccelerationConfig {
        AccelerationConfig {
            speed: 1.0,
            start: 5.0,
            acceleration: 2.0,
            max_speed: 5.0,
            end: 15.0,
            deceleration: 2.0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn resolves_phase_boundaries() {
        let profile = TrapezoidProfile::new(demo()).unwrap();
        assert_eq!(profile.acceleration_time(), 7.0);
        assert_eq!(profile.deceleration_time(), 17.0);
        assert_eq!(profile.phase(4.9), Phase::Floor);
        assert_eq!(profile.phase(5.0), Phase::Accelerating);
        assert_eq!(profile.phase(7.0), Phase::Cruising);
        assert_eq!(profile.phase(15.0), Phase::Decelerating);
        assert_eq!(profile.phase(17.0), Phase::Done);
    }

    #[test]
    fn distance_in_each_phase() {
        let profile = TrapezoidProfile::new(demo()).unwrap();
        assert_eq!(profile.distance_at(2.0), 2.0);
        // 6 s of floor travel plus half of 2 * 1^2
        assert_eq!(profile.distance_at(6.0), 7.0);
        // 10 floor + 4 ramp + 3 s of extra 4 units/s
        assert_eq!(profile.distance_at(10.0), 26.0);
        // 16 floor + 4 ramp + 32 cruise + (4 * 1 - 1)
        assert_eq!(profile.distance_at(16.0), 55.0);
        assert_eq!(profile.distance_at(17.0), 57.0);
    }

    #[test]
    fn plateau_after_braking() {
        let profile = TrapezoidProfile::new(demo()).unwrap();
        assert_eq!(profile.reach(), 57.0);
        assert_eq!(profile.distance_at(100.0), 57.0);
    }

    #[test]
    fn reach_sums_phase_contributions() {
        let profile = TrapezoidProfile::new(demo()).unwrap();
        let floor = 1.0 * profile.deceleration_time();
        let sum = floor
            + profile.ramp_up_distance
            + profile.cruise_distance
            + profile.ramp_down_distance;
        assert!(close(profile.distance_in(Phase::Decelerating, 17.0), sum));
    }

    #[test]
    fn flat_profile_never_ramps() {
        let profile = TrapezoidProfile::new(AccelerationConfig {
            max_speed: 1.0,
            ..demo()
        })
        .unwrap();
        assert_eq!(profile.acceleration_time(), 5.0);
        assert_eq!(profile.deceleration_time(), 15.0);
        assert_eq!(profile.distance_at(10.0), 10.0);
        assert_eq!(profile.reach(), 15.0);
    }

    #[test]
    fn rejects_non_positive_rates() {
        for acceleration in [0.0, -2.0] {
            let err = AccelerationConfig {
                acceleration,
                ..demo()
            }
            .validate()
            .unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidArgument {
                    name: "acceleration",
                    ..
                }
            ));
        }
        let err = AccelerationConfig {
            deceleration: 0.0,
            ..demo()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "deceleration",
                ..
            }
        ));
    }

    #[test]
    fn rejects_cruise_below_floor() {
        let err = TrapezoidProfile::new(AccelerationConfig {
            max_speed: 0.5,
            ..demo()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "max_speed",
                ..
            }
        ));
    }

    #[test]
    fn rejects_end_before_start() {
        let err = AccelerationConfig {
            start: 10.0,
            end: 5.0,
            ..demo()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "end", .. }));
    }

    #[test]
    fn rejects_overlapping_ramps() {
        // ramp-up needs 2 s but braking starts 1 s after start
        let err = AccelerationConfig { end: 6.0, ..demo() }
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProfile { .. }));
    }

    #[test]
    fn parses_camel_case_cruise_speed() {
        let json = r#"{"speed":1,"maxSpeed":5,"acceleration":2,"deceleration":2,"start":5,"end":15}"#;
        let config: AccelerationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, demo());
    }

    fn arbitrary_config(input: &(u8, u8, u8, u8, u8, u8)) -> AccelerationConfig {
        let (speed, gain, acceleration, deceleration, start, cruise) = *input;
        let speed = f64::from(speed) / 8.0;
        let max_speed = speed + f64::from(gain) / 8.0;
        let acceleration = 0.25 + f64::from(acceleration) / 16.0;
        let deceleration = 0.25 + f64::from(deceleration) / 16.0;
        let start = f64::from(start) / 8.0;
        let end = start + (max_speed - speed) / acceleration + f64::from(cruise) / 8.0;
        AccelerationConfig {
            speed,
            start,
            acceleration,
            max_speed,
            end,
            deceleration,
        }
    }

    #[test]
    fn phases_meet_at_their_boundaries() {
        bolero::check!()
            .with_type::<(u8, u8, u8, u8, u8, u8)>()
            .for_each(|input| {
                let profile = TrapezoidProfile::new(arbitrary_config(input)).unwrap();
                let start = profile.config().start;
                let end = profile.config().end;
                let pairs = [
                    (Phase::Floor, Phase::Accelerating, start),
                    (Phase::Accelerating, Phase::Cruising, profile.acceleration_time()),
                    (Phase::Cruising, Phase::Decelerating, end),
                    (Phase::Decelerating, Phase::Done, profile.deceleration_time()),
                ];
                for (before, after, at) in pairs {
                    let left = profile.distance_in(before, at);
                    let right = profile.distance_in(after, at);
                    assert!(close(left, right), "{before:?}/{after:?} at {at}: {left} != {right}");
                }
            });
    }

    #[test]
    fn distance_never_decreases() {
        bolero::check!()
            .with_type::<(u8, u8, u8, u8, u8, u8)>()
            .for_each(|input| {
                let profile = TrapezoidProfile::new(arbitrary_config(input)).unwrap();
                let horizon = profile.deceleration_time() + 1.0;
                let mut previous = 0.0;
                for step in 0..=400 {
                    let t = horizon * f64::from(step) / 400.0;
                    let travelled = profile.distance_at(t);
                    assert!(travelled + 1e-9 >= previous, "dropped at t={t}");
                    previous = travelled;
                }
                assert!(close(previous, profile.reach()));
            });
    }
}
