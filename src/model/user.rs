//! Identity supplied by the authentication collaborator.
//!
//! The core never authenticates; it receives an already-resolved
//! [`AuthenticatedUser`] on every call and only authorizes against it.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// The three actors of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Client,
    Owner,
    Delivery,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserRole::Client => "Client",
            UserRole::Owner => "Owner",
            UserRole::Delivery => "Delivery",
        };
        f.write_str(name)
    }
}

/// A caller whose identity and role were established upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn new(id: impl Into<UserId>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn client(id: impl Into<UserId>) -> Self {
        Self::new(id, UserRole::Client)
    }

    pub fn owner(id: impl Into<UserId>) -> Self {
        Self::new(id, UserRole::Owner)
    }

    pub fn driver(id: impl Into<UserId>) -> Self {
        Self::new(id, UserRole::Delivery)
    }
}
