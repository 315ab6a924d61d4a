// src/types/options.rs
//! Generation configuration passed verbatim to a capability.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which generative primitive serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Summarizer,
    Writer,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summarizer => write!(f, "Summarizer"),
            Self::Writer => write!(f, "Writer"),
        }
    }
}

/// Shape of the summary the model is asked for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    #[default]
    Tldr,
    KeyPoints,
    Teaser,
    Headline,
}

impl SummaryType {
    /// Direction phrase used when prompting the model.
    pub fn direction(&self) -> &'static str {
        match self {
            Self::Tldr => "a short overview (TL;DR)",
            Self::KeyPoints => "a list of the key points",
            Self::Teaser => "an intriguing teaser that makes the reader want more",
            Self::Headline => "a single headline capturing the main point",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Tldr => "tldr",
            Self::KeyPoints => "key-points",
            Self::Teaser => "teaser",
            Self::Headline => "headline",
        }
    }
}

/// Markup of the generated text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    PlainText,
}

impl OutputFormat {
    pub fn direction(&self) -> &'static str {
        match self {
            Self::Markdown => "Format the answer as Markdown.",
            Self::PlainText => "Answer in plain text without any Markdown.",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::PlainText => "plain-text",
        }
    }
}

/// Requested output length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn direction(&self) -> &'static str {
        match self {
            Self::Short => "Keep it short, about three sentences or bullet points.",
            Self::Medium => "Use a medium length, about five sentences or bullet points.",
            Self::Long => "Be thorough, up to seven sentences or bullet points.",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

macro_rules! display_and_parse {
    ($ty:ty, $field:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case(<$ty>::$variant.as_str()) {
                        return Ok(<$ty>::$variant);
                    }
                )+
                Err(ValidationError::UnknownVariant {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

display_and_parse!(SummaryType, "type", [Tldr, KeyPoints, Teaser, Headline]);
display_and_parse!(OutputFormat, "format", [Markdown, PlainText]);
display_and_parse!(SummaryLength, "length", [Short, Medium, Long]);

/// Configuration for one capability call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub shared_context: String,
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    pub format: OutputFormat,
    pub length: SummaryLength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl GenerationOptions {
    pub fn new(shared_context: impl Into<String>) -> Self {
        Self {
            shared_context: shared_context.into(),
            summary_type: SummaryType::default(),
            format: OutputFormat::default(),
            length: SummaryLength::default(),
            instructions: None,
        }
    }

    pub fn with_type(mut self, summary_type: SummaryType) -> Self {
        self.summary_type = summary_type;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_length(mut self, length: SummaryLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_change(self, change: OptionChange) -> Self {
        match change {
            OptionChange::Type(summary_type) => self.with_type(summary_type),
            OptionChange::Format(format) => self.with_format(format),
            OptionChange::Length(length) => self.with_length(length),
        }
    }
}

/// One summary option picked by the user, written `<field> <value>`
/// (for example `type key-points` or `length=long`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionChange {
    Type(SummaryType),
    Format(OutputFormat),
    Length(SummaryLength),
}

impl fmt::Display for OptionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(value) => write!(f, "type {}", value),
            Self::Format(value) => write!(f, "format {}", value),
            Self::Length(value) => write!(f, "length {}", value),
        }
    }
}

impl FromStr for OptionChange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, value) = s
            .split_once(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or((s, ""));
        let value = value.trim();

        match field.to_ascii_lowercase().as_str() {
            "type" => required(value, "type")?.parse().map(Self::Type),
            "format" => required(value, "format")?.parse().map(Self::Format),
            "length" => required(value, "length")?.parse().map(Self::Length),
            _ => Err(ValidationError::UnknownVariant {
                field: "option",
                value: field.to_string(),
            }),
        }
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TLDR".parse::<SummaryType>().unwrap(), SummaryType::Tldr);
        assert_eq!(
            "plain-text".parse::<OutputFormat>().unwrap(),
            OutputFormat::PlainText
        );
        assert_eq!("Long".parse::<SummaryLength>().unwrap(), SummaryLength::Long);
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "essay".parse::<SummaryType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown type value: essay");
    }

    #[test]
    fn option_changes_parse_and_apply() {
        let change: OptionChange = "length long".parse().unwrap();
        assert_eq!(change, OptionChange::Length(SummaryLength::Long));
        assert_eq!(
            "Type=key-points".parse::<OptionChange>().unwrap(),
            OptionChange::Type(SummaryType::KeyPoints)
        );

        let options = GenerationOptions::new("ctx").with_change(change);
        assert_eq!(options.length, SummaryLength::Long);
        assert_eq!(options.summary_type, SummaryType::Tldr);
        assert_eq!(change.to_string(), "length long");
    }

    #[test]
    fn option_changes_reject_bad_input() {
        assert_eq!(
            "colour red".parse::<OptionChange>().unwrap_err().to_string(),
            "Unknown option value: colour"
        );
        assert!(matches!(
            "format".parse::<OptionChange>(),
            Err(ValidationError::EmptyField("format"))
        ));
        assert!("length huge".parse::<OptionChange>().is_err());
    }

    #[test]
    fn serializes_like_the_capability_options_object() {
        let options = GenerationOptions::new("ctx")
            .with_type(SummaryType::KeyPoints)
            .with_format(OutputFormat::PlainText)
            .with_length(SummaryLength::Medium);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sharedContext": "ctx",
                "type": "key-points",
                "format": "plain-text",
                "length": "medium"
            })
        );
    }
}
