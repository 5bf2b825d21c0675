use serde::Deserialize;

/// A named permission group assignable to a user.
///
/// Roles are read-only from this client's perspective; the backend owns
/// creation and naming.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

impl Role {
    /// Name with the conventional prefix stripped ("ROLE_ADMIN" -> "ADMIN").
    /// Names without the prefix are shown as-is.
    pub fn display_name<'a>(&'a self, prefix: &str) -> &'a str {
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }
}
