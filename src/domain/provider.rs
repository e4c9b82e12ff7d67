use std::sync::{Arc, PoisonError, RwLock};

use super::contact::{Contact, ContactId, UserId};
use super::session::SessionSource;
use crate::errors::ContactError;
use crate::storage::ContactBackend;

/// Owns the signed-in user's personal contacts and keeps them in step with
/// the backend.
///
/// The list only ever changes to something the backend confirmed: a loaded
/// or returned list replaces it wholesale, a created contact is appended.
/// A failed read leaves the list as it was and is only logged. A failed
/// write is logged and handed back as a [`ContactError`] naming the
/// operation.
pub struct ContactProvider {
    backend: Arc<dyn ContactBackend>,
    session: Arc<dyn SessionSource>,
    state: RwLock<ListState>,
}

#[derive(Default)]
struct ListState {
    // Identity the list belongs to. `None` until the first load or mutation.
    scope: Option<UserId>,
    // Bumped whenever the scope changes; results from an older generation
    // are dropped.
    generation: u64,
    contacts: Arc<Vec<Contact>>,
}

impl ContactProvider {
    /// Builds a provider with an empty list. Nothing is fetched until
    /// [`ContactProvider::load`] runs.
    pub fn new(backend: Arc<dyn ContactBackend>, session: Arc<dyn SessionSource>) -> Self {
        Self {
            backend,
            session,
            state: RwLock::new(ListState::default()),
        }
    }

    /// Builds a provider and performs the initial load.
    pub async fn mount(
        backend: Arc<dyn ContactBackend>,
        session: Arc<dyn SessionSource>,
    ) -> Self {
        let provider = Self::new(backend, session);
        provider.load().await;
        provider
    }

    /// Snapshot of the current list.
    pub fn contacts(&self) -> Arc<Vec<Contact>> {
        Arc::clone(&self.read_state().contacts)
    }

    /// Identity the current list is scoped to.
    pub fn scope(&self) -> Option<UserId> {
        self.read_state().scope.clone()
    }

    pub fn backend_medium(&self) -> &str {
        self.backend.get_medium()
    }

    /// Fetches the list for the signed-in user and replaces the local copy.
    ///
    /// Never fails: without a user this does nothing, and a backend error
    /// leaves the current list untouched.
    pub async fn load(&self) {
        let Some(user) = self.session.current_user() else {
            tracing::debug!("no signed-in user, skipping contact load");
            return;
        };

        let started = {
            let mut state = self.write_state();
            if state.scope.as_ref() != Some(&user) {
                state.scope = Some(user.clone());
                state.contacts = Arc::new(Vec::new());
                state.generation += 1;
            }
            state.generation
        };

        match self.backend.list(&user).await {
            Ok(contacts) => {
                tracing::debug!(user = %user, count = contacts.len(), "loaded personal contacts");
                self.apply(&user, started, "load", |list| *list = contacts);
            }
            Err(e) => {
                tracing::error!(user = %user, error = %e, "failed to load personal contacts");
            }
        }
    }

    /// Reloads when the signed-in user differs from the one the list
    /// belongs to. Signing out empties the list.
    pub async fn refresh_session(&self) {
        let current = self.session.current_user();
        {
            let mut state = self.write_state();
            if state.scope == current {
                return;
            }
            tracing::debug!(
                previous = ?state.scope,
                current = ?current,
                "session identity changed, discarding contact list"
            );
            state.scope = current;
            state.contacts = Arc::new(Vec::new());
            state.generation += 1;
        }

        self.load().await;
    }

    /// Creates a contact and appends the backend's confirmed record.
    pub async fn add_contact(&self, name: &str, phone_number: &str) -> Result<Contact, ContactError> {
        let user = self.require_user()?;
        let started = self.read_state().generation;

        let contact = self
            .backend
            .create(&user, name, phone_number)
            .await
            .map_err(|e| {
                tracing::error!(user = %user, error = %e, "failed to add personal contact");
                ContactError::Add(e)
            })?;

        let created = contact.clone();
        self.apply(&user, started, "add", move |list| {
            match list.iter_mut().find(|c| c.id == created.id) {
                Some(existing) => *existing = created,
                None => list.push(created),
            }
        });
        tracing::debug!(user = %user, id = %contact.id, "added personal contact");

        Ok(contact)
    }

    /// Updates a contact and adopts the full list the backend returns.
    pub async fn update_contact(
        &self,
        id: &ContactId,
        name: &str,
        phone_number: &str,
    ) -> Result<(), ContactError> {
        let user = self.require_user()?;
        let started = self.read_state().generation;

        let contacts = self
            .backend
            .update(&user, id, name, phone_number)
            .await
            .map_err(|e| {
                tracing::error!(user = %user, id = %id, error = %e, "failed to edit personal contact");
                ContactError::Edit(e)
            })?;

        self.apply(&user, started, "edit", |list| *list = contacts);
        tracing::debug!(user = %user, id = %id, "edited personal contact");
        Ok(())
    }

    /// Deletes a contact and adopts the remaining list the backend returns.
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), ContactError> {
        let user = self.require_user()?;
        let started = self.read_state().generation;

        let contacts = self.backend.delete(&user, id).await.map_err(|e| {
            tracing::error!(user = %user, id = %id, error = %e, "failed to delete personal contact");
            ContactError::Delete(e)
        })?;

        self.apply(&user, started, "delete", |list| *list = contacts);
        tracing::debug!(user = %user, id = %id, "deleted personal contact");
        Ok(())
    }

    fn require_user(&self) -> Result<UserId, ContactError> {
        self.session.current_user().ok_or(ContactError::NoSession)
    }

    // Results are dropped once the list belongs to someone else, including
    // nobody after a sign-out.
    fn apply(
        &self,
        user: &UserId,
        started: u64,
        operation: &str,
        update: impl FnOnce(&mut Vec<Contact>),
    ) {
        let mut guard = self.write_state();
        let state = &mut *guard;

        if state.generation != started {
            tracing::warn!(
                user = %user,
                operation,
                "discarding backend result issued before the session changed"
            );
            return;
        }

        match &state.scope {
            Some(scope) if scope != user => {
                tracing::warn!(
                    user = %user,
                    scope = %scope,
                    operation,
                    "discarding backend result for a previous session"
                );
                return;
            }
            Some(_) => {}
            None => state.scope = Some(user.clone()),
        }

        let mut next = state.contacts.as_ref().clone();
        update(&mut next);
        state.contacts = Arc::new(next);
    }

    // The guarded value is swapped in one assignment, so a poisoned lock
    // still holds a complete list.
    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, ListState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, ListState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
