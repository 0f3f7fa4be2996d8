//! User-related entity definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user in the canteen system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular employee who opts into meals.
    #[default]
    Employee,
    /// Canteen staff managing menus and watching live statistics.
    Admin,
    /// Top-level administrator managing user accounts.
    MainAdmin,
}

impl UserRole {
    /// Returns the email domain assigned to accounts with this role.
    pub fn email_domain(&self) -> &'static str {
        match self {
            UserRole::Employee => "karmic.com",
            UserRole::Admin => "canteen.karmic.com",
            UserRole::MainAdmin => "hr.karmic.com",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Employee => "employee",
            UserRole::Admin => "admin",
            UserRole::MainAdmin => "main_admin",
        };
        f.write_str(s)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

impl User {
    /// Creates a user with an explicit ID.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Creates a user with a freshly generated ID.
    pub fn with_generated_id(
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self::new(format!("user-{}", Uuid::new_v4()), name, email, role)
    }

    /// Returns true if this user takes part in meal planning.
    pub fn is_employee(&self) -> bool {
        self.role == UserRole::Employee
    }
}

/// Input for creating a user. The email is derived from the name and role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Full name (first and last).
    pub name: String,
    /// Role.
    #[serde(default)]
    pub role: UserRole,
}

/// Administrative update of a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserUpdate {
    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    /// Applies the update to a user.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("emp123", "Alex Ray", "alex.ray@karmic.com", UserRole::Employee);

        assert_eq!(user.email, "alex.ray@karmic.com");
        assert!(user.is_employee());
    }

    #[test]
    fn test_generated_id_is_unique() {
        let a = User::with_generated_id("A B", "a.b@karmic.com", UserRole::Employee);
        let b = User::with_generated_id("A B", "a.b@karmic.com", UserRole::Employee);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_update_apply() {
        let mut user = User::new("adm1", "Casey Jordan", "casey@canteen.karmic.com", UserRole::Admin);
        UserUpdate {
            role: Some(UserRole::MainAdmin),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.role, UserRole::MainAdmin);
        assert_eq!(user.name, "Casey Jordan");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::MainAdmin).unwrap();
        assert_eq!(json, "\"main_admin\"");
        assert_eq!(UserRole::default(), UserRole::Employee);
    }
}
