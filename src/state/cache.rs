use crate::models::role::Role;
use crate::models::user::User;

/// In-memory copy of the last successful GET responses.
///
/// Owned by the controller and replaced wholesale after every successful
/// mutation; nothing ever patches a single entry in place. Lists keep the
/// order the server returned them in, which is the order the table renders.
#[derive(Debug, Default)]
pub struct AdminCache {
    users: Vec<User>,
    roles: Vec<Role>,
}

impl AdminCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached user list with a fresh GET response
    pub fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Replace the cached role list with a fresh GET response
    pub fn replace_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn role_by_id(&self, id: i64) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            age: 0,
            roles: Vec::new(),
        }
    }

    #[test]
    fn test_replace_users_is_wholesale() {
        let mut cache = AdminCache::new();
        cache.replace_users(vec![user(1, "alice"), user(2, "bob")]);
        assert_eq!(cache.user_count(), 2);

        cache.replace_users(vec![user(3, "carol")]);
        assert_eq!(cache.user_count(), 1);
        assert!(cache.user_by_id(1).is_none());
        assert_eq!(cache.user_by_id(3).unwrap().username, "carol");
    }

    #[test]
    fn test_users_keep_server_order() {
        let mut cache = AdminCache::new();
        cache.replace_users(vec![user(9, "zoe"), user(1, "alice"), user(5, "mia")]);

        let ids: Vec<i64> = cache.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn test_role_lookup() {
        let mut cache = AdminCache::new();
        cache.replace_roles(vec![
            Role {
                id: 1,
                name: "ROLE_ADMIN".to_string(),
            },
            Role {
                id: 2,
                name: "ROLE_USER".to_string(),
            },
        ]);

        assert_eq!(cache.role_count(), 2);
        assert_eq!(cache.role_by_id(2).unwrap().name, "ROLE_USER");
        assert!(cache.role_by_id(3).is_none());
    }
}
