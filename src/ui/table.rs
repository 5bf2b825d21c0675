use crate::models::user::User;

/// One rendered table row. The id keys the edit/delete actions for the row,
/// so actions dispatch through the controller by id rather than through
/// per-row callbacks.
#[derive(Clone, Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: u32,
    /// Role display names joined with ", ", prefix already stripped
    pub roles: String,
}

/// Text projection of the cached user list, in server order.
#[derive(Debug, Default)]
pub struct UserTable {
    rows: Vec<UserRow>,
}

const HEADERS: [&str; 7] = ["ID", "Username", "First name", "Last name", "Email", "Age", "Roles"];

impl UserTable {
    /// Project the cached users into rows. Deterministic and idempotent:
    /// the same cache always produces the same table.
    pub fn project(users: &[User], role_prefix: &str) -> Self {
        let rows = users
            .iter()
            .map(|user| UserRow {
                id: user.id,
                username: user.username.clone(),
                firstname: user.firstname.clone(),
                lastname: user.lastname.clone(),
                email: user.email.clone(),
                age: user.age,
                roles: user
                    .roles
                    .iter()
                    .map(|role| role.display_name(role_prefix).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as aligned text columns
    pub fn render(&self) -> String {
        let cells: Vec<[String; 7]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.id.to_string(),
                    row.username.clone(),
                    row.firstname.clone(),
                    row.lastname.clone(),
                    row.email.clone(),
                    row.age.to_string(),
                    row.roles.clone(),
                ]
            })
            .collect();

        let mut widths: [usize; 7] = [0; 7];
        for (i, header) in HEADERS.iter().enumerate() {
            widths[i] = header.len();
        }
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let mut out = String::new();
        render_line(&mut out, &HEADERS.map(String::from), &widths);
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
        out.push('\n');

        if cells.is_empty() {
            out.push_str("(no users)\n");
            return out;
        }

        for row in &cells {
            render_line(&mut out, row, &widths);
        }

        out
    }
}

fn render_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // Pad all but the last column
        if i < cells.len() - 1 {
            for _ in cell.len()..widths[i] {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    fn user(id: i64, username: &str, role_names: &[&str]) -> User {
        User {
            id,
            username: username.to_string(),
            firstname: format!("{}-first", username),
            lastname: format!("{}-last", username),
            email: format!("{}@example.com", username),
            age: 30,
            roles: role_names
                .iter()
                .enumerate()
                .map(|(i, name)| Role {
                    id: i as i64 + 1,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_project_strips_role_prefix() {
        let users = vec![user(1, "alice", &["ROLE_ADMIN", "ROLE_USER"])];
        let table = UserTable::project(&users, "ROLE_");

        assert_eq!(table.rows()[0].roles, "ADMIN, USER");
    }

    #[test]
    fn test_project_preserves_server_order() {
        let users = vec![
            user(9, "zoe", &[]),
            user(1, "alice", &[]),
            user(5, "mia", &[]),
        ];
        let table = UserTable::project(&users, "ROLE_");

        let ids: Vec<i64> = table.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn test_project_empty_roles_renders_empty_column() {
        let users = vec![user(2, "bob", &[])];
        let table = UserTable::project(&users, "ROLE_");

        assert_eq!(table.rows()[0].roles, "");
    }

    #[test]
    fn test_render_contains_rows_and_header() {
        let users = vec![
            user(1, "alice", &["ROLE_ADMIN"]),
            user(2, "bob", &[]),
        ];
        let table = UserTable::project(&users, "ROLE_");
        let rendered = table.render();

        assert!(rendered.contains("Username"));
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("ADMIN"));
        assert!(rendered.contains("bob"));
    }

    #[test]
    fn test_render_empty_table() {
        let table = UserTable::project(&[], "ROLE_");
        assert!(table.render().contains("(no users)"));
    }
}
