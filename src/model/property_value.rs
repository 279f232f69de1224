// src/model/property_value.rs
use crate::types::{plain_text_of, RichTextItem};
use chrono::NaiveDate;

/// A page property value, reduced to the shapes page metadata needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    Select(Option<String>),
    Status(Option<String>),
    MultiSelect(Vec<String>),
    Date(Option<DateValue>),
    Number(Option<f64>),
    Checkbox(bool),
    Url(Option<String>),
    /// A property type that carries nothing docs output uses; keeps the type name.
    Other(String),
}

/// Date property as Notion sends it: ISO date or date-time strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DateValue {
    pub start: String,
    pub end: Option<String>,
}

impl DateValue {
    /// The calendar day of `start`, ignoring any time component.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let day = self.start.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

impl PropertyValue {
    /// Plain text for text-like properties.
    pub fn as_plain_text(&self) -> Option<String> {
        match self {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => Some(plain_text_of(runs)),
            PropertyValue::Url(url) => url.clone(),
            _ => None,
        }
    }

    /// Option name for select and status properties.
    pub fn as_select(&self) -> Option<&str> {
        match self {
            PropertyValue::Select(name) | PropertyValue::Status(name) => name.as_deref(),
            _ => None,
        }
    }
}
