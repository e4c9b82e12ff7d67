pub mod file;
pub mod memory;
pub mod remote;

use crate::config::BackendConfig;
use crate::prelude::{AppError, Contact, ContactId, UserId};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Remote persistence for personal contacts, keyed by user.
///
/// `update` and `delete` answer with the user's full resulting list, not
/// just the touched record.
#[async_trait]
pub trait ContactBackend: Send + Sync {
    async fn list(&self, user: &UserId) -> Result<Vec<Contact>, AppError>;

    async fn create(&self, user: &UserId, name: &str, phone_number: &str)
    -> Result<Contact, AppError>;

    async fn update(
        &self,
        user: &UserId,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, AppError>;

    async fn delete(&self, user: &UserId, id: &ContactId) -> Result<Vec<Contact>, AppError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Json,
    Remote,
}

impl BackendKind {
    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "json" => Ok(BackendKind::Json),
            "remote" => Ok(BackendKind::Remote),
            _ => Err(AppError::Validation(
                "Not a recognized contact backend".to_string(),
            )),
        }
    }
}

pub fn parse_backend(config: &BackendConfig) -> Result<Arc<dyn ContactBackend>, AppError> {
    match config.kind {
        BackendKind::Memory => Ok(Arc::new(memory::MemoryBackend::new())),
        BackendKind::Json => Ok(Arc::new(file::JsonFileBackend::new(&config.data_path))),
        BackendKind::Remote => {
            let base_url = config
                .remote_url
                .as_deref()
                .ok_or_else(|| AppError::NotFound("Remote backend URL".to_string()))?;

            Ok(Arc::new(remote::RemoteBackend::new(
                base_url,
                config.api_key.clone(),
                config.timeout,
            )?))
        }
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn require_field(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parsing() -> Result<(), AppError> {
        assert_eq!(BackendKind::from("json")?, BackendKind::Json);
        assert_eq!(BackendKind::from(" Remote ")?, BackendKind::Remote);
        assert_eq!(BackendKind::from("mem")?, BackendKind::Memory);
        assert!(BackendKind::from("firebase").is_err());
        Ok(())
    }

    #[test]
    fn remote_backend_requires_url() {
        let config = BackendConfig {
            kind: BackendKind::Remote,
            ..BackendConfig::default()
        };

        let err = parse_backend(&config).err().expect("missing url must fail");
        assert_eq!(err.to_string(), "Remote backend URL Not found");
    }
}
