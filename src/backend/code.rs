//! Redemption codes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Every code starts with this
pub const CODE_PREFIX: &str = "HONEY-";
/// Characters the player types after the prefix
pub const CODE_SUFFIX_LEN: usize = 5;

/// A full `HONEY-XXXXX` code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedemptionCode(String);

impl RedemptionCode {
    /// Build a code from the five characters the player typed
    ///
    /// Surrounding whitespace is ignored. Case is kept; the server matches
    /// codes case-insensitively.
    pub fn from_suffix(input: &str) -> Result<Self, ValidationError> {
        let suffix = input.trim();
        if suffix.chars().count() != CODE_SUFFIX_LEN {
            return Err(ValidationError::Malformed);
        }
        Ok(Self(format!("{CODE_PREFIX}{suffix}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedemptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_added() {
        let code = RedemptionCode::from_suffix("  A1B2C ").unwrap();
        assert_eq!(code.as_str(), "HONEY-A1B2C");
        assert_eq!(code.to_string(), "HONEY-A1B2C");
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            RedemptionCode::from_suffix("ABCD"),
            Err(ValidationError::Malformed)
        );
        assert_eq!(
            RedemptionCode::from_suffix("ABCDEF"),
            Err(ValidationError::Malformed)
        );
        assert_eq!(
            RedemptionCode::from_suffix("     "),
            Err(ValidationError::Malformed)
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let code = RedemptionCode::from_suffix("ZZZZZ").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"HONEY-ZZZZZ\"");
    }
}
