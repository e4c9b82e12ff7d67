use crate::cli::command::Cli;
use crate::errors::AppError;
use crate::storage::remote::is_valid_url;
use crate::storage::{BackendKind, file::DEFAULT_DATA_PATH};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything needed to pick and build a contact backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub data_path: PathBuf,
    pub remote_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Json,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            remote_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let kind = BackendKind::from(&cli.backend)?;

        let remote_url = cli
            .remote_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = remote_url
            && !is_valid_url(url)
        {
            return Err(AppError::Config(format!("'{}' is not a valid url", url)));
        }

        if cli.timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            kind,
            data_path: cli.data_path.clone(),
            remote_url: remote_url.map(str::to_string),
            api_key: cli.api_key.clone().filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["rusty-sos"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn builds_remote_config() -> Result<(), AppError> {
        let cli = parse(&[
            "--backend",
            "remote",
            "--remote-url",
            "https://contacts.example.com",
            "--api-key",
            "secret",
            "list",
        ]);

        let config = BackendConfig::from_cli(&cli)?;

        assert_eq!(config.kind, BackendKind::Remote);
        assert_eq!(config.remote_url.as_deref(), Some("https://contacts.example.com"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        Ok(())
    }

    #[test]
    fn rejects_invalid_url_and_backend() {
        let bad_url = parse(&["--backend", "remote", "--remote-url", "nope", "list"]);
        assert!(matches!(
            BackendConfig::from_cli(&bad_url),
            Err(AppError::Config(_))
        ));

        let bad_backend = parse(&["--backend", "carrier-pigeon", "list"]);
        assert!(matches!(
            BackendConfig::from_cli(&bad_backend),
            Err(AppError::Validation(_))
        ));
    }
}
