use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::Blueprint;

/// Errors returned when a [`Blueprint`] is malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("server at index {0} has an empty name")]
    EmptyServerName(usize),

    #[error("server name {0:?} must be a single path segment without separators, whitespace or URL-reserved characters")]
    InvalidServerName(String),

    #[error("server {0:?} has an empty location")]
    EmptyServerLocation(String),

    #[error("person at index {1} on server {0:?} has an empty id")]
    EmptyPersonId(String, usize),

    #[error("person id {0:?} must be a single path segment without separators, whitespace or URL-reserved characters")]
    InvalidPersonId(String),

    #[error("person {0:?} has an empty name")]
    EmptyPersonName(String),
}

/// Errors returned when blueprint text cannot be decoded at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON blueprint: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML blueprint: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Encoding of a blueprint document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintFormat {
    Json,
    Yaml,
}

impl BlueprintFormat {
    /// `.yaml` and `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => BlueprintFormat::Yaml,
            _ => BlueprintFormat::Json,
        }
    }
}

/// Decode a blueprint without validating it.
pub fn parse_blueprint(text: &str, format: BlueprintFormat) -> Result<Blueprint, ParseError> {
    Ok(match format {
        BlueprintFormat::Json => serde_json::from_str(text)?,
        BlueprintFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Validate a [`Blueprint`] before any person is registered.
///
/// Returns the first [`ValidationError`] in declaration order. Duplicate
/// person ids and unknown friend ids are deliberately not checked here: the
/// registry and the resolver own those cases.
pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), ValidationError> {
    for (si, server) in blueprint.servers.iter().enumerate() {
        if server.name.is_empty() {
            return Err(ValidationError::EmptyServerName(si));
        }
        if !is_path_segment(&server.name) {
            return Err(ValidationError::InvalidServerName(server.name.clone()));
        }
        if server.location.is_empty() {
            return Err(ValidationError::EmptyServerLocation(server.name.clone()));
        }

        for (pi, person) in server.people.iter().enumerate() {
            if person.id.is_empty() {
                return Err(ValidationError::EmptyPersonId(server.name.clone(), pi));
            }
            if !is_path_segment(&person.id) {
                return Err(ValidationError::InvalidPersonId(person.id.clone()));
            }
            if person.name.is_empty() {
                return Err(ValidationError::EmptyPersonName(person.id.clone()));
            }
        }
    }

    Ok(())
}

// --- helpers -----------------------------------------------------------------

fn is_path_segment(s: &str) -> bool {
    s != "." && s != ".." && SEGMENT_RE.is_match(s)
}

// Separators, whitespace and controls would split the directory path; the
// rest would break the WebID (fragment, query, or characters outside IRIREF).
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^/\\#?<>"{}|^`\s\p{Cc}]+$"#).expect("invalid segment regex")
});

// --- tests -------------------------------------------------------------------
