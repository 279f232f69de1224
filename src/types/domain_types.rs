// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// API key for Notion API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        write!(f, "{}...", &self.0[..10])
    }
}

/// A Docusaurus locale code such as `fr`, `es` or `zh-cn`.
///
/// Stored lowercase; image captions name locales by their two-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim().to_lowercase();
        let well_formed = (2..=8).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !code.starts_with('-');
        if !well_formed {
            return Err(ValidationError::InvalidLocale(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LocaleCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_requires_known_prefix() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(ApiKey::new("token_abcdefghijklmnopqrstuvwxyz").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn locale_codes_are_lowercased() {
        assert_eq!(LocaleCode::new("FR").unwrap().as_str(), "fr");
        assert_eq!("zh-CN".parse::<LocaleCode>().unwrap().as_str(), "zh-cn");
        assert!(LocaleCode::new("x").is_err());
        assert!(LocaleCode::new("f r").is_err());
    }
}
