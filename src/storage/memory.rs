use super::{AppError, Contact, ContactBackend, ContactId, UserId, require_field};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Every user's contact list, as a document store would hold it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserBooks {
    pub data: HashMap<UserId, Vec<Contact>>,
}

impl UserBooks {
    pub fn list(&self, user: &UserId) -> Vec<Contact> {
        self.data.get(user).cloned().unwrap_or_default()
    }

    pub fn create(
        &mut self,
        user: &UserId,
        name: &str,
        phone_number: &str,
    ) -> Result<Contact, AppError> {
        require_field(name, "Name")?;
        require_field(phone_number, "Phone number")?;

        let contact = Contact::new(name.to_string(), phone_number.to_string());
        self.data
            .entry(user.clone())
            .or_default()
            .push(contact.clone());
        Ok(contact)
    }

    pub fn update(
        &mut self,
        user: &UserId,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, AppError> {
        require_field(name, "Name")?;
        require_field(phone_number, "Phone number")?;

        let contacts = self
            .data
            .get_mut(user)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        let contact = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        contact.name = name.to_string();
        contact.phone_number = phone_number.to_string();

        Ok(contacts.clone())
    }

    pub fn delete(&mut self, user: &UserId, id: &ContactId) -> Result<Vec<Contact>, AppError> {
        let contacts = self
            .data
            .get_mut(user)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        let index = contacts
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        contacts.remove(index);
        Ok(contacts.clone())
    }
}

/// Process-local backend. Contacts live as long as the backend does.
#[derive(Default)]
pub struct MemoryBackend {
    books: Mutex<UserBooks>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(user: &UserId, contacts: Vec<Contact>) -> Self {
        let mut books = UserBooks::default();
        books.data.insert(user.clone(), contacts);
        Self {
            books: Mutex::new(books),
        }
    }

    fn books(&self) -> std::sync::MutexGuard<'_, UserBooks> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ContactBackend for MemoryBackend {
    async fn list(&self, user: &UserId) -> Result<Vec<Contact>, AppError> {
        Ok(self.books().list(user))
    }

    async fn create(
        &self,
        user: &UserId,
        name: &str,
        phone_number: &str,
    ) -> Result<Contact, AppError> {
        self.books().create(user, name, phone_number)
    }

    async fn update(
        &self,
        user: &UserId,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, AppError> {
        self.books().update(user, id, name, phone_number)
    }

    async fn delete(&self, user: &UserId, id: &ContactId) -> Result<Vec<Contact>, AppError> {
        self.books().delete(user, id)
    }

    fn get_medium(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_ids_and_keeps_order() -> Result<(), AppError> {
        let backend = MemoryBackend::new();
        let user = UserId::new("uid-1");

        let first = backend.create(&user, "Mom", "08123456789").await?;
        let second = backend.create(&user, "Dad", "08198765432").await?;

        assert_ne!(first.id, second.id);
        assert_eq!(backend.list(&user).await?, vec![first, second]);
        Ok(())
    }

    #[tokio::test]
    async fn lists_are_scoped_per_user() -> Result<(), AppError> {
        let backend = MemoryBackend::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        backend.create(&alice, "Mom", "112").await?;

        assert_eq!(backend.list(&alice).await?.len(), 1);
        assert!(backend.list(&bob).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_returns_full_list_in_place() -> Result<(), AppError> {
        let backend = MemoryBackend::new();
        let user = UserId::new("uid-1");
        let a = backend.create(&user, "Mom", "112").await?;
        let b = backend.create(&user, "Dad", "911").await?;

        let updated = backend.update(&user, &a.id, "Mother", "999").await?;

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].id, a.id);
        assert_eq!(updated[0].name, "Mother");
        assert_eq!(updated[0].phone_number, "999");
        assert_eq!(updated[1], b);
        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_remaining_list() -> Result<(), AppError> {
        let backend = MemoryBackend::new();
        let user = UserId::new("uid-1");
        let a = backend.create(&user, "Mom", "112").await?;
        let b = backend.create(&user, "Dad", "911").await?;

        let remaining = backend.delete(&user, &a.id).await?;

        assert_eq!(remaining, vec![b]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_and_blank_fields_are_rejected() -> Result<(), AppError> {
        let backend = MemoryBackend::new();
        let user = UserId::new("uid-1");
        backend.create(&user, "Mom", "112").await?;
        let missing = ContactId::new("missing");

        assert!(matches!(
            backend.update(&user, &missing, "X", "1").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            backend.delete(&user, &missing).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            backend.create(&user, "  ", "112").await,
            Err(AppError::Validation(_))
        ));
        Ok(())
    }
}
