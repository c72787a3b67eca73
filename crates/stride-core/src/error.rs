use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid {name} {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid acceleration profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("target distance {target} is beyond the profile reach of {reach}")]
    UnreachableTarget { target: f64, reach: f64 },

    #[error("trajectory needs more than {limit} samples")]
    TooManySamples { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects values that are zero, negative, NaN or infinite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    tracing::trace!(name, value, "rejecting non-positive argument");
    Err(Error::InvalidArgument {
        name,
        value,
        reason: "must be a finite value greater than zero",
    })
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        return Ok(());
    }
    tracing::trace!(name, value, "rejecting non-finite argument");
    Err(Error::InvalidArgument {
        name,
        value,
        reason: "must be finite",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass() {
        assert!(ensure_positive("speed", 0.25).is_ok());
    }

    #[test]
    fn rejects_zero_negative_and_nan() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ensure_positive("speed", value).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { name: "speed", .. }));
        }
    }

    #[test]
    fn message_names_the_argument() {
        let err = ensure_positive("interval", -2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid interval -2: must be a finite value greater than zero"
        );
    }
}
