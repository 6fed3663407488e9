//! Role-switch session marker. Simulated identity on one machine, not auth.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{Role, User};
use crate::store::KeyValueStore;

const SESSION_KEY: &str = "ems_current_user";

pub struct Sessions {
    current: RwLock<Option<User>>,
    store: Arc<dyn KeyValueStore>,
}

impl Sessions {
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let current = store
            .load(SESSION_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unparseable session marker");
                    None
                }
            });
        Self {
            current: RwLock::new(current),
            store,
        }
    }

    pub fn current(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switches to the demo identity for `role`. A non-blank `name`
    /// overrides the default display name.
    pub fn login(&self, role: Role, name: Option<String>) -> User {
        let (default_id, default_name, email) = match role {
            Role::Organizer => ("org_alice", "Alice Organizer", "alice@ems.local"),
            Role::Consumer => ("con_bob", "Bob Consumer", "bob@ems.local"),
        };
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_name.to_string());
        let user = User {
            id: default_id.to_string(),
            role,
            name,
            email: Some(email.to_string()),
        };

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(user.clone());
        self.persist(current.as_ref());
        user
    }

    pub fn logout(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        self.persist(None);
    }

    fn persist(&self, user: Option<&User>) {
        match serde_json::to_string(&user) {
            Ok(json) => self.store.save(SESSION_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "could not serialize session marker"),
        }
    }
}
