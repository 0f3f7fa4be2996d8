//! User directory.

use std::sync::Arc;

use doc_store::{Collection, DocumentStore, to_fields};
use entities::{NewUser, User, UserRole, UserUpdate};
use tracing::{debug, info};

use crate::{
    CanteenError, CanteenResult, WatchHandle,
    records::{all_users, parse_valid},
};

/// Derives `first.last@<domain>` from a full name and role.
pub fn derive_email(name: &str, role: UserRole) -> CanteenResult<String> {
    let mut parts = name.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(first), Some(last)) => Ok(format!(
            "{}.{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            role.email_domain()
        )),
        _ => Err(CanteenError::invalid_input(format!(
            "full name required, got {name:?}"
        ))),
    }
}

/// Manages user accounts.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn DocumentStore>,
}

impl UserDirectory {
    /// Creates a new user directory.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Lists every user.
    pub async fn all_users(&self) -> CanteenResult<Vec<User>> {
        all_users(self.store.as_ref()).await
    }

    /// Lists users with the employee role.
    pub async fn employees(&self) -> CanteenResult<Vec<User>> {
        let mut users = self.all_users().await?;
        users.retain(User::is_employee);
        Ok(users)
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, id: &str) -> CanteenResult<User> {
        let doc = self
            .store
            .get(Collection::Users, id)
            .await?
            .ok_or_else(|| CanteenError::not_found("User", id))?;
        Ok(doc.parse()?)
    }

    /// Creates a user with a generated ID and a derived email.
    pub async fn add_user(&self, new_user: NewUser) -> CanteenResult<User> {
        let name = new_user.name.trim();
        let email = derive_email(name, new_user.role)?;
        let user = User::with_generated_id(name, email, new_user.role);

        self.insert_user(&user).await?;
        info!(user_id = %user.id, role = %user.role, "User added");
        Ok(user)
    }

    /// Stores a user under its own ID, replacing any existing account.
    pub async fn insert_user(&self, user: &User) -> CanteenResult<()> {
        self.store
            .upsert(Collection::Users, &user.id, to_fields(&user.id, user)?)
            .await?;
        Ok(())
    }

    /// Changes the name, email or role of a user.
    pub async fn update_user(&self, id: &str, update: UserUpdate) -> CanteenResult<User> {
        let mut user = self.get_user(id).await?;
        if update.is_empty() {
            debug!(user_id = id, "Empty user update");
            return Ok(user);
        }

        update.apply(&mut user);
        let doc = self
            .store
            .upsert(Collection::Users, id, to_fields(id, &user)?)
            .await?;
        info!(user_id = id, "User updated");
        Ok(doc.parse()?)
    }

    /// Deletes a user.
    pub async fn delete_user(&self, id: &str) -> CanteenResult<()> {
        if !self.store.delete(Collection::Users, id).await? {
            return Err(CanteenError::not_found("User", id));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Calls `callback` with every user now and after every change.
    pub async fn subscribe_to_users<F>(&self, mut callback: F) -> CanteenResult<WatchHandle>
    where
        F: FnMut(Vec<User>) + Send + 'static,
    {
        let mut subscription = self.store.subscribe(Collection::Users).await?;

        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                callback(parse_valid(Collection::Users, &snapshot.documents));
            }
            debug!("User feed closed");
        });

        Ok(WatchHandle::new(task))
    }
}
