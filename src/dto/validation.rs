//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dao::object_id::{OBJECT_ID_HEX_LEN, is_object_id_hex};

/// Validates that an identifier is exactly 24 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```ignore
/// validate_object_id("64c3cdfbd54e7b39dc4b1d74") // Ok
/// validate_object_id("64C3CDFBD54E7B39DC4B1D74") // Err - uppercase
/// validate_object_id("64c3cdfb")                 // Err - too short
/// ```
pub fn validate_object_id(id: &str) -> Result<(), ValidationError> {
    if id.len() != OBJECT_ID_HEX_LEN {
        let mut err = ValidationError::new("object_id_length");
        err.message = Some(
            format!(
                "Identifier must be exactly {OBJECT_ID_HEX_LEN} characters (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !is_object_id_hex(id) {
        let mut err = ValidationError::new("object_id_format");
        err.message = Some("Identifier must contain only lowercase hexadecimal characters".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_object_id_valid() {
        assert!(validate_object_id("64c3cdfbd54e7b39dc4b1d74").is_ok());
        assert!(validate_object_id("000000000000000000000000").is_ok());
    }

    #[test]
    fn test_validate_object_id_invalid_length() {
        assert!(validate_object_id("64c3cdfbd54e7b39dc4b1d7").is_err()); // too short
        assert!(validate_object_id("64c3cdfbd54e7b39dc4b1d741").is_err()); // too long
        assert!(validate_object_id("").is_err()); // empty
    }

    #[test]
    fn test_validate_object_id_invalid_format() {
        assert!(validate_object_id("64C3CDFBD54E7B39DC4B1D74").is_err()); // uppercase
        assert!(validate_object_id("64c3cdfbd54e7b39dc4b1d7z").is_err()); // invalid hex
        assert!(validate_object_id("64c3cdfbd54e7b39 c4b1d74").is_err()); // space
    }
}
