//! Request validation for application names.
//!
//! This is the only place the 1–3 bound and duplicate rejection are enforced;
//! the synthesizer accepts whatever list it is given.

use serde::Serialize;

/// Maximum number of applications per multi-app request.
pub const MAX_APPS: usize = 3;

/// Application-name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one app name is required")]
    NoApps,

    #[error("At most {max} app names are allowed, got {0}", max = MAX_APPS)]
    TooManyApps(usize),

    #[error("App name at position {0} must not be blank")]
    BlankName(usize),

    #[error("Duplicate app names are not allowed: {0}")]
    DuplicateName(String),
}

/// A validated, ordered list of 1–3 distinct, non-blank application names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppNames(Vec<String>);

impl AppNames {
    pub fn parse(names: Vec<String>) -> Result<Self, ValidationError> {
        if names.is_empty() {
            return Err(ValidationError::NoApps);
        }
        if names.len() > MAX_APPS {
            return Err(ValidationError::TooManyApps(names.len()));
        }
        for (index, name) in names.iter().enumerate() {
            validate_app_name(name, index)?;
            if names[..index].contains(name) {
                return Err(ValidationError::DuplicateName(name.clone()));
            }
        }
        Ok(Self(names))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reject blank names; `position` is reported in the error.
pub fn validate_app_name(name: &str, position: usize) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::BlankName(position))
    } else {
        Ok(())
    }
}
