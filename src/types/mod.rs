// src/types/mod.rs
//! Validated newtypes and the rich-text vocabulary shared by every layer.

use thiserror::Error;

mod domain_types;
mod ids;
mod rich_text;

pub use domain_types::*;
pub use ids::*;
pub use rich_text::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid locale code: {0}")]
    InvalidLocale(String),
}
