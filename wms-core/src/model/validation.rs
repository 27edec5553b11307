//! Validation error types

use std::fmt;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Numeric field outside its inclusive range (NaN is always outside)
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Numeric field that must be a finite, non-negative quantity
    Negative { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} has to be in the range [{}, {}]", field, min, max)
            }
            Self::Negative { field } => {
                write!(f, "{} has to be a non-negative number", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every failing field of one entity, reported together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn require_non_empty(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(ValidationError::Empty { field });
        }
    }

    pub(crate) fn require_range(&mut self, field: &'static str, value: f64, min: f64, max: f64) {
        // NaN fails both comparisons, so it lands here too
        if !(value >= min && value <= max) {
            self.0.push(ValidationError::OutOfRange { field, min, max });
        }
    }

    pub(crate) fn require_non_negative(&mut self, field: &'static str, value: f64) {
        if !(value.is_finite() && value >= 0.0) {
            self.0.push(ValidationError::Negative { field });
        }
    }

    pub(crate) fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "latitude",
            min: -90.0,
            max: 90.0,
        };
        assert_eq!(err.to_string(), "latitude has to be in the range [-90, 90]");
    }

    #[test]
    fn collected_errors_join_with_commas() {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("name", "  ");
        errors.require_range("longitude", 200.0, -180.0, 180.0);

        assert_eq!(
            errors.to_string(),
            "name cannot be empty, longitude has to be in the range [-180, 180]"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn nan_is_out_of_range() {
        let mut errors = ValidationErrors::default();
        errors.require_range("latitude", f64::NAN, -90.0, 90.0);
        errors.require_non_negative("mrp", f64::NAN);
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut errors = ValidationErrors::default();
        errors.require_range("latitude", 90.0, -90.0, 90.0);
        errors.require_range("latitude", -90.0, -90.0, 90.0);
        errors.require_non_negative("weight", 0.0);
        assert!(errors.is_empty());
    }
}
