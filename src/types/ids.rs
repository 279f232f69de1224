// src/types/ids.rs
//! Strongly typed Notion identifiers.
//!
//! The API delivers ids hyphenated (`8-4-4-4-12`) while links inside page
//! content usually carry the compact 32-character form. An `Id` keeps the
//! form it was created from; `compact()` gives the hyphen-free spelling used
//! for anchors, link matching and notion.so URLs.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseMarker;

/// Type aliases for specific ID types
pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type DatabaseId = Id<DatabaseMarker>;

static URL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[/-]|^)([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)",
    )
    .expect("notion id pattern is valid")
});

impl<T> Id<T> {
    /// Parse an id, a hyphenated UUID, or a notion.so URL into the
    /// hyphenated lowercase form the API uses.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');
        if cleaned.is_empty() {
            return Err(ValidationError::EmptyField("notion id"));
        }

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(Self::from_api(uuid.as_hyphenated().to_string()));
        }

        let captures = URL_ID
            .captures(cleaned)
            .and_then(|c| c.get(1))
            .ok_or_else(|| ValidationError::InvalidId(format!("No valid ID found in: {}", input)))?;

        Uuid::parse_str(captures.as_str())
            .map(|uuid| Self::from_api(uuid.as_hyphenated().to_string()))
            .map_err(|e| ValidationError::InvalidId(format!("{}: {}", input, e)))
    }

    /// Wrap an id exactly as the API delivered it.
    pub fn from_api(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        Self::from_api(Uuid::new_v4().as_hyphenated().to_string())
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The id with every hyphen removed.
    pub fn compact(&self) -> String {
        self.value.replace('-', "")
    }

    /// Get the ID with dashes for API calls
    pub fn to_dashed(&self) -> String {
        if self.value.len() == 32 && !self.value.contains('-') {
            format!(
                "{}-{}-{}-{}-{}",
                &self.value[0..8],
                &self.value[8..12],
                &self.value[12..16],
                &self.value[16..20],
                &self.value[20..32]
            )
        } else {
            self.value.clone()
        }
    }

    /// Reinterpret the same identifier as another kind of object.
    ///
    /// Notion pages are also blocks; their content is listed through the
    /// block-children endpoint using the page id.
    pub fn retag<U>(&self) -> Id<U> {
        Id::from_api(self.value.clone())
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_api(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = PageId::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");

        let id = PageId::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");

        let id = PageId::parse("https://www.notion.so/Test-Page-550e8400e29b41d4a716446655440000")
            .unwrap();
        assert_eq!(id.compact(), "550e8400e29b41d4a716446655440000");

        let id = PageId::parse("https://www.notion.so/acme/550e8400e29b41d4a716446655440000?pvs=4")
            .unwrap();
        assert_eq!(id.compact(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(PageId::parse("too-short").is_err());
        assert!(PageId::parse("not-hex-chars-00000000000000000").is_err());
        assert!(PageId::parse("").is_err());
    }

    #[test]
    fn api_form_is_kept_verbatim() {
        let id = BlockId::from_api("abc-123");
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.compact(), "abc123");
        let page: PageId = id.retag();
        assert_eq!(page.as_str(), "abc-123");
    }

    #[test]
    fn test_to_dashed() {
        let id = PageId::from_api("550e8400e29b41d4a716446655440000");
        assert_eq!(id.to_dashed(), "550e8400-e29b-41d4-a716-446655440000");
    }
}
