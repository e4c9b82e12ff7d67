use super::memory::UserBooks;
use super::{AppError, Contact, ContactBackend, ContactId, UserId, create_file_parent};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const DEFAULT_DATA_PATH: &str = "./.instance/contacts.json";

/// Backend persisting every user's contacts in one JSON document:
/// `{ "<user>": [ {contact}, ... ] }`.
pub struct JsonFileBackend {
    pub path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_books(&self) -> Result<UserBooks, AppError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(UserBooks::default());
        }

        let data = tokio::fs::read_to_string(&self.path).await?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(UserBooks::default());
        }

        Ok(serde_json::from_str(&data)?)
    }

    async fn write_books(&self, books: &UserBooks) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let json = serde_json::to_vec_pretty(books)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut UserBooks) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut books = self.read_books().await?;
        let result = change(&mut books)?;
        self.write_books(&books).await?;
        Ok(result)
    }
}

#[async_trait]
impl ContactBackend for JsonFileBackend {
    async fn list(&self, user: &UserId) -> Result<Vec<Contact>, AppError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_books().await?.list(user))
    }

    async fn create(
        &self,
        user: &UserId,
        name: &str,
        phone_number: &str,
    ) -> Result<Contact, AppError> {
        self.modify(|books| books.create(user, name, phone_number))
            .await
    }

    async fn update(
        &self,
        user: &UserId,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, AppError> {
        self.modify(|books| books.update(user, id, name, phone_number))
            .await
    }

    async fn delete(&self, user: &UserId, id: &ContactId) -> Result<Vec<Contact>, AppError> {
        self.modify(|books| books.delete(user, id)).await
    }

    fn get_medium(&self) -> &str {
        "json"
    }
}
