use crate::models::role::Role;
use serde::{Deserialize, Serialize};

/// A user as the backend returns it. Read responses never carry a password.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub age: u32,
    /// Assigned roles; order is irrelevant, treated as a set
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn has_role(&self, role_id: i64) -> bool {
        self.roles.iter().any(|role| role.id == role_id)
    }
}

/// The write shape sent on create and update requests.
///
/// The password travels only here; an empty password on update means
/// "leave unchanged". The id is present on updates and omitted on creates.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: u32,
}
