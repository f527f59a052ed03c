//! Portfolio data the assistant talks about.
//!
//! The built-in [`Portfolio::default`] mirrors the content shown on the site.
//! A TOML file with the same shape can replace it at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistantError, Result};

mod defaults;

/// Everything the system context is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub other_roles: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub education: Vec<TimelineItem>,
    #[serde(default)]
    pub experience: Vec<TimelineItem>,
    /// Support link appended to assistant replies.
    pub support_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub bio: String,
    /// How greetings refer to the owner's work, e.g. "her". When unset the
    /// first name is used ("Ada's").
    #[serde(default)]
    pub possessive: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub level: String,
}

/// An education or experience entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineItem {
    pub period: String,
    pub title: String,
    pub institution: String,
    pub description: String,
}

impl Default for Portfolio {
    fn default() -> Self {
        defaults::builtin()
    }
}

impl Portfolio {
    /// Parse portfolio data from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load portfolio data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading portfolio data");
        let source = std::fs::read_to_string(path).map_err(|e| {
            AssistantError::Configuration(format!(
                "cannot read portfolio data at {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&source)
    }

    /// Load from `path` when given, otherwise use the built-in data.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// First name, used in the greeting and assistant persona.
    pub fn first_name(&self) -> &str {
        self.personal
            .name
            .split_whitespace()
            .next()
            .unwrap_or(&self.personal.name)
    }

    /// Possessive used in the greeting and support line.
    pub fn possessive(&self) -> String {
        match self.personal.possessive.as_deref().map(str::trim) {
            Some(word) if !word.is_empty() => word.to_string(),
            _ => format!("{}'s", self.first_name()),
        }
    }
}
