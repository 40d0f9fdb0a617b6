use serde::{Deserialize, Serialize};

/// Message shown when the required identity fields are missing.
pub const MISSING_IDENTITY_MESSAGE: &str = "Company name and contact person are required.";

/// A person submitting data on behalf of the company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

impl Uploader {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }

    /// Parse `NAME` or `NAME=CONTACT`. Values are kept verbatim.
    pub fn parse(input: &str) -> Self {
        match input.split_once('=') {
            Some((name, contact)) => Self::new(name, contact),
            None => Self::new(input, ""),
        }
    }
}

/// Scalar (non-file) form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub company: String,
    #[serde(default)]
    pub uploaders: Vec<Uploader>,
}

impl FormFields {
    pub fn new(company: impl Into<String>, uploaders: Vec<Uploader>) -> Self {
        Self {
            company: company.into(),
            uploaders,
        }
    }

    /// The first uploader; sent as the `manager` field.
    pub fn primary_uploader(&self) -> Option<&Uploader> {
        self.uploaders.first()
    }

    pub fn manager_name(&self) -> &str {
        self.primary_uploader().map(|u| u.name.as_str()).unwrap_or("")
    }

    /// Company and primary uploader name must be non-blank.
    pub fn validate_identity(&self) -> Result<(), String> {
        if self.company.trim().is_empty() || self.manager_name().trim().is_empty() {
            return Err(MISSING_IDENTITY_MESSAGE.to_string());
        }
        Ok(())
    }
}
