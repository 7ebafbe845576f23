use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use tonecart_catalog::ToneTag;
use tonecart_core::UserId;

/// Role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

/// User record as this core consumes it. User accounts are owned by the
/// auth/profile service; the order core only reads role and skin tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub role: UserRole,
    /// Tone from the personalization questionnaire, if the user answered it.
    pub skin_tone: Option<ToneTag>,
}

/// Read boundary to the external user service.
pub trait UserDirectory: Send + Sync {
    fn get(&self, id: &UserId) -> Option<UserRecord>;
    /// Seed/refresh a record (used by deployments and tests; the directory
    /// itself is not part of this core).
    fn upsert(&self, user: UserRecord);
}

impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    fn get(&self, id: &UserId) -> Option<UserRecord> {
        (**self).get(id)
    }

    fn upsert(&self, user: UserRecord) {
        (**self).upsert(user)
    }
}

/// In-memory user directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get(&self, id: &UserId) -> Option<UserRecord> {
        let users = self.inner.read().ok()?;
        users.get(id).cloned()
    }

    fn upsert(&self, user: UserRecord) {
        if let Ok(mut users) = self.inner.write() {
            users.insert(user.id, user);
        }
    }
}
