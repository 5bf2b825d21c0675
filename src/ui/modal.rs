use crate::core::error::FormError;
use crate::models::role::Role;
use crate::models::user::{User, UserPayload};

/// One checkbox in the modal's role list
#[derive(Clone, Debug)]
pub struct RoleCheckbox {
    pub role_id: i64,
    /// Prefix-stripped role name, as shown next to the checkbox
    pub label: String,
    pub checked: bool,
}

/// Field state of the add/edit form.
///
/// The same form backs both flows; a populated id means edit, an empty one
/// means add. All fields are kept as the operator typed them; `age` stays
/// text until serialization.
#[derive(Clone, Debug, Default)]
pub struct ModalForm {
    pub id: Option<i64>,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: String,
    pub password: String,
    pub checkboxes: Vec<RoleCheckbox>,
}

impl ModalForm {
    /// Blank form for the add flow: empty fields, one unchecked checkbox
    /// per known role.
    pub fn for_add(roles: &[Role], prefix: &str) -> Self {
        Self {
            checkboxes: role_checkboxes(roles, prefix, &[]),
            ..Self::default()
        }
    }

    /// Form pre-filled from a freshly fetched user for the edit flow.
    /// Checkboxes are pre-checked for the roles the user currently holds;
    /// the password field starts blank (blank means "unchanged").
    pub fn for_edit(user: &User, roles: &[Role], prefix: &str) -> Self {
        Self {
            id: Some(user.id),
            username: user.username.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            age: if user.age == 0 {
                String::new()
            } else {
                user.age.to_string()
            },
            password: String::new(),
            checkboxes: role_checkboxes(roles, prefix, &user.roles),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Require username, first/last name, email and age to be non-empty.
    /// Reports the first missing field.
    pub fn validate(&self) -> Result<(), FormError> {
        let required: [(&'static str, &String); 5] = [
            ("username", &self.username),
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("email", &self.email),
            ("age", &self.age),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }

        Ok(())
    }

    /// The ids of the checked boxes, deduplicated, in checkbox order
    pub fn checked_role_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        for checkbox in self.checkboxes.iter().filter(|c| c.checked) {
            if !ids.contains(&checkbox.role_id) {
                ids.push(checkbox.role_id);
            }
        }
        ids
    }

    /// Serialize the form for submission. A non-numeric age falls back to 0.
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            id: self.id,
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age.trim().parse().unwrap_or(0),
        }
    }
}

fn role_checkboxes(roles: &[Role], prefix: &str, assigned: &[Role]) -> Vec<RoleCheckbox> {
    roles
        .iter()
        .map(|role| RoleCheckbox {
            role_id: role.id,
            label: role.display_name(prefix).to_string(),
            checked: assigned.iter().any(|r| r.id == role.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: i64, name: &str) -> Role {
        Role {
            id,
            name: name.to_string(),
        }
    }

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            firstname: "Alice".to_string(),
            lastname: "Anders".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
            roles: vec![role(1, "ROLE_ADMIN")],
        }
    }

    fn filled_add_form() -> ModalForm {
        let mut form = ModalForm::for_add(&[role(1, "ROLE_ADMIN")], "ROLE_");
        form.username = "carol".to_string();
        form.firstname = "Carol".to_string();
        form.lastname = "Clark".to_string();
        form.email = "carol@example.com".to_string();
        form.age = "28".to_string();
        form
    }

    #[test]
    fn test_add_form_starts_blank_and_unchecked() {
        let form = ModalForm::for_add(&[role(1, "ROLE_ADMIN"), role(2, "ROLE_USER")], "ROLE_");

        assert!(form.id.is_none());
        assert!(!form.is_edit());
        assert!(form.username.is_empty());
        assert_eq!(form.checkboxes.len(), 2);
        assert!(form.checkboxes.iter().all(|c| !c.checked));
    }

    #[test]
    fn test_edit_form_prechecks_assigned_roles() {
        let roles = [role(1, "ROLE_ADMIN"), role(2, "ROLE_USER")];
        let form = ModalForm::for_edit(&sample_user(), &roles, "ROLE_");

        assert_eq!(form.id, Some(1));
        assert!(form.is_edit());
        assert_eq!(form.username, "alice");
        assert_eq!(form.age, "30");
        assert!(form.password.is_empty());

        assert_eq!(form.checkboxes[0].label, "ADMIN");
        assert!(form.checkboxes[0].checked);
        assert_eq!(form.checkboxes[1].label, "USER");
        assert!(!form.checkboxes[1].checked);
    }

    #[test]
    fn test_edit_form_for_user_without_roles() {
        let mut user = sample_user();
        user.roles.clear();
        let form = ModalForm::for_edit(&user, &[role(1, "ROLE_ADMIN")], "ROLE_");

        assert!(!form.checkboxes[0].checked);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let form = ModalForm::for_add(&[], "ROLE_");
        assert_eq!(form.validate(), Err(FormError::MissingField("username")));
    }

    #[test]
    fn test_validate_each_required_field() {
        for field in ["username", "firstname", "lastname", "email", "age"] {
            let mut form = filled_add_form();
            match field {
                "username" => form.username.clear(),
                "firstname" => form.firstname.clear(),
                "lastname" => form.lastname.clear(),
                "email" => form.email.clear(),
                _ => form.age.clear(),
            }
            assert_eq!(form.validate(), Err(FormError::MissingField(field)));
        }
    }

    #[test]
    fn test_validate_treats_whitespace_as_empty() {
        let mut form = filled_add_form();
        form.email = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingField("email")));
    }

    #[test]
    fn test_validate_passes_with_all_fields() {
        assert_eq!(filled_add_form().validate(), Ok(()));
    }

    #[test]
    fn test_password_not_required() {
        let form = filled_add_form();
        assert!(form.password.is_empty());
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_checked_role_ids_match_checked_set() {
        let mut form = ModalForm::for_add(
            &[role(1, "ROLE_ADMIN"), role(2, "ROLE_USER"), role(3, "ROLE_AUDIT")],
            "ROLE_",
        );
        form.checkboxes[0].checked = true;
        form.checkboxes[2].checked = true;

        assert_eq!(form.checked_role_ids(), vec![1, 3]);
    }

    #[test]
    fn test_checked_role_ids_dedup() {
        let mut form = ModalForm::for_add(&[role(1, "ROLE_ADMIN")], "ROLE_");
        form.checkboxes.push(RoleCheckbox {
            role_id: 1,
            label: "ADMIN".to_string(),
            checked: true,
        });
        form.checkboxes[0].checked = true;

        assert_eq!(form.checked_role_ids(), vec![1]);
    }

    #[test]
    fn test_payload_age_falls_back_to_zero() {
        let mut form = filled_add_form();
        form.age = "not-a-number".to_string();

        assert_eq!(form.to_payload().age, 0);
    }

    #[test]
    fn test_payload_trims_text_fields() {
        let mut form = filled_add_form();
        form.username = "  carol  ".to_string();
        form.age = " 28 ".to_string();

        let payload = form.to_payload();
        assert_eq!(payload.username, "carol");
        assert_eq!(payload.age, 28);
    }
}
