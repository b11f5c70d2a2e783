//! Guards for required call parameters.
//!
//! Resource handles run these before composing a path or body, so an invalid
//! call never reaches the network.

use crate::error::ApiError;

/// Fail with `missing <name> parameter` when `value` is empty.
pub fn validate_required(value: &str, name: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::missing_param(name));
    }
    Ok(())
}

/// Check `(name, value)` pairs in slice order and report the first empty one.
pub fn validate_required_all(params: &[(&str, &str)]) -> Result<(), ApiError> {
    params
        .iter()
        .try_for_each(|(name, value)| validate_required(value, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_names_parameter() {
        let err = validate_required("", "vhost").unwrap_err();
        assert!(err.to_string().contains("vhost"));
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn non_empty_value_passes() {
        assert!(validate_required("x", "vhost").is_ok());
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert!(validate_required(" ", "queue").is_ok());
    }

    #[test]
    fn all_reports_first_empty_in_order() {
        let err = validate_required_all(&[("vhost", "/"), ("exchange", ""), ("queue", "")])
            .unwrap_err();
        assert_eq!(err.to_string(), "missing exchange parameter");
    }

    #[test]
    fn all_passes_when_every_value_present() {
        assert!(validate_required_all(&[("vhost", "/"), ("queue", "q")]).is_ok());
        assert!(validate_required_all(&[]).is_ok());
    }
}
