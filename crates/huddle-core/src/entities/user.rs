//! User entity - a workspace member

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, UserRole};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub online: bool,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, name: String, email: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            role,
            online: false,
            designation: None,
            phone: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the job designation
    #[must_use]
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    /// Check if user has administrative rights
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the workspace role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Update the online flag
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        self.updated_at = Utc::now();
    }

    /// Avatar URL or a deterministic fallback derived from the user id
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(reference) => format!("/avatars/{}/{reference}.png", self.id),
            None => format!("/avatars/default/{}.png", self.id.into_inner() % 5),
        }
    }
}
