//! Catalogue of model identifiers the policy may be configured with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Supported completion models. Every entry is addressed through the
/// chat-completions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelName {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "babbage-002")]
    Babbage002,
    #[serde(rename = "davinci-002")]
    Davinci002,
    #[serde(rename = "text-davinci-003")]
    TextDavinci003,
    #[serde(rename = "text-davinci-002")]
    TextDavinci002,
    #[serde(rename = "davinci")]
    Davinci,
    #[serde(rename = "curie")]
    Curie,
    #[serde(rename = "babbage")]
    Babbage,
    #[serde(rename = "ada")]
    Ada,
}

impl ModelName {
    pub const ALL: [ModelName; 10] = [
        ModelName::Gpt4,
        ModelName::Gpt35Turbo,
        ModelName::Babbage002,
        ModelName::Davinci002,
        ModelName::TextDavinci003,
        ModelName::TextDavinci002,
        ModelName::Davinci,
        ModelName::Curie,
        ModelName::Babbage,
        ModelName::Ada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt4 => "gpt-4",
            ModelName::Gpt35Turbo => "gpt-3.5-turbo",
            ModelName::Babbage002 => "babbage-002",
            ModelName::Davinci002 => "davinci-002",
            ModelName::TextDavinci003 => "text-davinci-003",
            ModelName::TextDavinci002 => "text-davinci-002",
            ModelName::Davinci => "davinci",
            ModelName::Curie => "curie",
            ModelName::Babbage => "babbage",
            ModelName::Ada => "ada",
        }
    }
}

impl FromStr for ModelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelName::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnsupportedModel(wanted.to_string()))
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
