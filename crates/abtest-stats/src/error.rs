/// Errors raised by the statistical routines in this crate.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("{test} requires at least {required} observations, got {actual}")]
    InsufficientData {
        test: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("{test} received a non-finite observation ({value})")]
    NonFinite { test: &'static str, value: f64 },
    #[display("{test} is undefined when all observations are equal")]
    ZeroRange { test: &'static str },
    #[display("{test} is undefined when both samples have zero variance")]
    ZeroVariance { test: &'static str },
    #[display("invalid distribution parameters: {message}")]
    Distribution { message: String },
}

impl StatsError {
    pub(crate) fn distribution<E>(err: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Distribution {
            message: err.to_string(),
        }
    }
}

/// Rejects empty-ish or non-finite input with a test-specific error.
pub(crate) fn check_sample(
    test: &'static str,
    values: &[f64],
    required: usize,
) -> Result<(), StatsError> {
    if values.len() < required {
        return Err(StatsError::InsufficientData {
            test,
            required,
            actual: values.len(),
        });
    }
    if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
        return Err(StatsError::NonFinite { test, value });
    }
    Ok(())
}
