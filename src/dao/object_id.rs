//! Codec for the 24-character hexadecimal identifiers used by games, tips and reports.

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Number of hexadecimal characters in a textual document identifier.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Raised when a textual identifier is not exactly 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{raw}` is not a valid identifier (expected 24 lowercase hexadecimal characters)")]
pub struct InvalidIdError {
    raw: String,
}

impl InvalidIdError {
    /// The rejected input.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Whether `raw` has the exact shape of a document identifier.
pub fn is_object_id_hex(raw: &str) -> bool {
    raw.len() == OBJECT_ID_HEX_LEN
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Convert a textual identifier into an [`ObjectId`].
pub fn parse_id(raw: &str) -> Result<ObjectId, InvalidIdError> {
    if !is_object_id_hex(raw) {
        return Err(InvalidIdError {
            raw: raw.to_owned(),
        });
    }

    ObjectId::parse_str(raw).map_err(|_| InvalidIdError {
        raw: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_hex() {
        let id = parse_id("64c3cdfbd54e7b39dc4b1d74").unwrap();
        assert_eq!(id.to_hex(), "64c3cdfbd54e7b39dc4b1d74");
        assert!(parse_id("000000000000000000000000").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_id("").is_err());
        assert!(parse_id("64c3cdfbd54e7b39dc4b1d7").is_err()); // 23
        assert!(parse_id("64c3cdfbd54e7b39dc4b1d740").is_err()); // 25
    }

    #[test]
    fn rejects_non_hex_and_uppercase() {
        assert!(parse_id("64c3cdfbd54e7b39dc4b1d7g").is_err());
        assert!(parse_id("64C3CDFBD54E7B39DC4B1D74").is_err());
        assert!(parse_id("64c3cdfbd54e7b39 c4b1d74").is_err());
    }

    #[test]
    fn error_keeps_raw_input() {
        let err = parse_id("nope").unwrap_err();
        assert_eq!(err.raw(), "nope");
        assert!(err.to_string().contains("`nope`"));
    }
}
