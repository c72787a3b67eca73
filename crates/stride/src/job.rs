use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use stride_core::{
    AccelerationConfig, AngleSample, ConstantSpeed, EulerAngles, MotionModel, Point2, Point3,
    Sample, Stepper, TrapezoidProfile,
};
use thiserror::Error;

/// A planar or spatial endpoint.
///
/// Job files spell these as `{ x = 1, y = 2 }` or `{ x = 1, y = 2, z = 3 }`;
/// the command line takes `1,2` or `1,2,3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Point {
    Spatial(Point3),
    Planar(Point2),
}

#[derive(Debug, Error, PartialEq)]
pub enum PointParseError {
    #[error("expected 2 or 3 comma-separated coordinates, got {count}")]
    Arity { count: usize },

    #[error("invalid coordinate '{raw}'")]
    Coordinate {
        raw: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split(',')
            .map(|raw| {
                let raw = raw.trim();
                raw.parse::<f64>().map_err(|source| PointParseError::Coordinate {
                    raw: raw.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match coords[..] {
            [x, y] => Ok(Point::Planar(Point2::new(x, y))),
            [x, y, z] => Ok(Point::Spatial(Point3::new(x, y, z))),
            _ => Err(PointParseError::Arity {
                count: coords.len(),
            }),
        }
    }
}

/// One named entry of a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,

    #[serde(flatten)]
    pub motion: Motion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    /// Constant-speed straight line
    Move {
        from: Point,
        to: Point,
        interval: f64,
        speed: f64,
    },
    /// Constant-speed heading ramp, in degrees
    Turn {
        from: f64,
        to: f64,
        interval: f64,
        speed: f64,
    },
    /// Straight line under a trapezoidal speed profile
    Accelerate {
        from: Point,
        to: Point,
        interval: f64,
        profile: AccelerationConfig,
    },
    /// Single Euler rotation of a vector
    Rotate {
        vector: Point3,
        angles: EulerAngles,
        /// Treat `angles` as degrees rather than radians
        #[serde(default)]
        degrees: bool,
    },
}

/// Result of running one [`Motion`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Trajectory {
    Planar(Vec<Sample<Point2>>),
    Spatial(Vec<Sample<Point3>>),
    Heading(Vec<AngleSample>),
    Rotated(Point3),
}

impl Trajectory {
    /// Number of emitted records.
    pub fn len(&self) -> usize {
        match self {
            Trajectory::Planar(samples) => samples.len(),
            Trajectory::Spatial(samples) => samples.len(),
            Trajectory::Heading(samples) => samples.len(),
            Trajectory::Rotated(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Motion {
    /// Reject segments whose endpoints disagree on dimensionality.
    pub fn check_dimensions(&self) -> Result<()> {
        match self {
            Motion::Move { from, to, .. } | Motion::Accelerate { from, to, .. } => {
                if std::mem::discriminant(from) != std::mem::discriminant(to) {
                    bail!("`from` and `to` must both be 2D or both be 3D");
                }
                Ok(())
            }
            Motion::Turn { .. } | Motion::Rotate { .. } => Ok(()),
        }
    }

    pub fn run(&self, sample_limit: Option<usize>) -> Result<Trajectory> {
        let stepper = |interval: f64| -> Result<Stepper> {
            let stepper = Stepper::new(interval)?;
            Ok(match sample_limit {
                Some(limit) => stepper.with_sample_limit(limit),
                None => stepper,
            })
        };

        match *self {
            Motion::Move {
                from,
                to,
                interval,
                speed,
            } => sample_segment(&stepper(interval)?, from, to, &ConstantSpeed::new(speed)),
            Motion::Turn {
                from,
                to,
                interval,
                speed,
            } => Ok(Trajectory::Heading(
                stepper(interval)?.turn_to(from, to, speed)?,
            )),
            Motion::Accelerate {
                from,
                to,
                interval,
                profile,
            } => {
                let profile = TrapezoidProfile::new(profile)?;
                sample_segment(&stepper(interval)?, from, to, &profile)
            }
            Motion::Rotate {
                vector,
                angles,
                degrees,
            } => {
                let angles = if degrees {
                    EulerAngles::from_degrees(angles.alpha, angles.beta, angles.gamma)
                } else {
                    angles
                };
                Ok(Trajectory::Rotated(angles.rotate(vector)))
            }
        }
    }
}

fn sample_segment<M: MotionModel>(
    stepper: &Stepper,
    from: Point,
    to: Point,
    model: &M,
) -> Result<Trajectory> {
    match (from, to) {
        (Point::Planar(from), Point::Planar(to)) => {
            Ok(Trajectory::Planar(stepper.sample(from, to, model)?))
        }
        (Point::Spatial(from), Point::Spatial(to)) => {
            Ok(Trajectory::Spatial(stepper.sample(from, to, model)?))
        }
        _ => bail!("`from` and `to` must both be 2D or both be 3D"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_planar_and_spatial_points() {
        assert_eq!(
            "1,1".parse::<Point>().unwrap(),
            Point::Planar(Point2::new(1.0, 1.0))
        );
        assert_eq!(
            " 1.5, -2 ,8".parse::<Point>().unwrap(),
            Point::Spatial(Point3::new(1.5, -2.0, 8.0))
        );
    }

    #[test]
    fn rejects_malformed_points() {
        assert_eq!(
            "1".parse::<Point>().unwrap_err(),
            PointParseError::Arity { count: 1 }
        );
        assert_eq!(
            "1,2,3,4".parse::<Point>().unwrap_err(),
            PointParseError::Arity { count: 4 }
        );
        assert!(matches!(
            "1,north".parse::<Point>().unwrap_err(),
            PointParseError::Coordinate { .. }
        ));
    }

    #[test]
    fn runs_planar_move() {
        let motion = Motion::Move {
            from: "1,1".parse().unwrap(),
            to: "12,1".parse().unwrap(),
            interval: 0.5,
            speed: 2.0,
        };
        let Trajectory::Planar(samples) = motion.run(None).unwrap() else {
            panic!("expected planar samples");
        };
        assert_eq!(samples.len(), 12);
        assert_eq!(samples[11], Sample::new(Point2::new(12.0, 1.0), 5.5));
    }

    #[test]
    fn mixed_dimensions_fail() {
        let motion = Motion::Move {
            from: "0,0".parse().unwrap(),
            to: "1,1,1".parse().unwrap(),
            interval: 1.0,
            speed: 1.0,
        };
        assert!(motion.check_dimensions().is_err());
        assert!(motion.run(None).is_err());
    }

    #[test]
    fn rotation_in_degrees() {
        let motion = Motion::Rotate {
            vector: Point3::new(1.0, 0.0, 0.0),
            angles: EulerAngles::new(90.0, 0.0, 0.0),
            degrees: true,
        };
        let Trajectory::Rotated(v) = motion.run(None).unwrap() else {
            panic!("expected a rotated vector");
        };
        assert!(v.x.abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12 && v.z == 0.0);
    }

    #[test]
    fn sample_limit_is_forwarded() {
        let motion = Motion::Turn {
            from: 0.0,
            to: 3600.0,
            interval: 0.1,
            speed: 1.0,
        };
        let err = motion.run(Some(50)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<stride_core::Error>(),
            Some(&stride_core::Error::TooManySamples { limit: 50 })
        );
    }
}
