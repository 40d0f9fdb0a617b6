//! Configuration module
//!
//! Runtime settings come from the environment (optionally a `.env` file). The
//! ingestion endpoint is configured out-of-band and is the only required value
//! for submitting; everything else has a default.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::{IntakeError, IntakeResult};
use crate::session::SessionOptions;

const DEFAULT_DRAFT_DIR: &str = ".datadrop";

#[derive(Clone, Debug)]
pub struct IntakeConfig {
    /// Ingestion endpoint receiving the multipart POST.
    pub endpoint_url: Option<String>,
    /// Directory holding the local draft.
    pub draft_dir: PathBuf,
    /// Optional JSON catalog replacing the builtin one.
    pub catalog_path: Option<PathBuf>,
    pub require_identity: bool,
    pub environment: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            draft_dir: PathBuf::from(DEFAULT_DRAFT_DIR),
            catalog_path: None,
            require_identity: true,
            environment: "development".to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, value: &str) -> IntakeResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(IntakeError::Config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

fn validate_endpoint_url(url: &str) -> IntakeResult<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(IntakeError::Config(format!(
            "DATADROP_ENDPOINT_URL must be an http(s) URL, got '{}'",
            url
        )));
    }

    let parsed = Url::parse(url).map_err(|e| {
        IntakeError::Config(format!(
            "DATADROP_ENDPOINT_URL is not a valid URL ('{}'): {}",
            url, e
        ))
    })?;

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(IntakeError::Config(format!(
            "DATADROP_ENDPOINT_URL must have a host, got '{}'",
            url
        )));
    }
    Ok(())
}

impl IntakeConfig {
    pub fn from_env() -> IntakeResult<Self> {
        dotenvy::dotenv().ok();

        let endpoint_url =
            non_empty_var("DATADROP_ENDPOINT_URL").or_else(|| non_empty_var("ENDPOINT_URL"));

        let draft_dir = non_empty_var("DATADROP_DRAFT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DRAFT_DIR));

        let catalog_path = non_empty_var("DATADROP_CATALOG_PATH").map(PathBuf::from);

        let require_identity = match non_empty_var("DATADROP_REQUIRE_IDENTITY") {
            Some(v) => parse_bool("DATADROP_REQUIRE_IDENTITY", &v)?,
            None => true,
        };

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let config = Self {
            endpoint_url,
            draft_dir,
            catalog_path,
            require_identity,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IntakeResult<()> {
        if let Some(url) = &self.endpoint_url {
            validate_endpoint_url(url)?;
        }
        Ok(())
    }

    /// The endpoint, or a configuration error naming the variable to set.
    pub fn require_endpoint(&self) -> IntakeResult<&str> {
        self.endpoint_url.as_deref().ok_or_else(|| {
            IntakeError::Config(
                "Missing ingestion endpoint. Set DATADROP_ENDPOINT_URL or ENDPOINT_URL".to_string(),
            )
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            require_identity: self.require_identity,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }
}
