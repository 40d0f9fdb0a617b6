pub mod file_source;
pub mod identity;
pub mod render;

use datadrop_core::{ErrorMetadata, IntakeError, LogLevel};

pub use file_source::{parse_file_arg, sources_by_section, PathFileSource};
pub use identity::IdentityArgs;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Log a failed command at the level the error asks for.
pub fn log_error(err: &IntakeError) {
    let code = err.error_code();
    let recoverable = err.is_recoverable();
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %err, code, recoverable, "Command failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %err, code, recoverable, "Command failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %err, code, recoverable, "Command failed");
        }
    }
}
