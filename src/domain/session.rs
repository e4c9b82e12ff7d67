use std::sync::{PoisonError, RwLock};

use super::contact::UserId;

/// Supplies the identity of the currently authenticated user.
pub trait SessionSource: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// In-process holder of the signed-in user.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<UserId>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn sign_in(&self, user: UserId) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionSource for Session {
    fn current_user(&self) -> Option<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
