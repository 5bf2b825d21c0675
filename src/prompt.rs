use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::ui::modal::ModalForm;
use crate::ui::table::UserRow;

/// Seam for interactive yes/no confirmation, so the controller can be
/// driven without a TTY in tests.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// dialoguer-backed confirmation for the terminal front end. A prompt that
/// cannot be shown (no TTY, closed stdin) counts as declined.
pub struct TermConfirm;

impl Confirmation for TermConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Refresh,
    AddUser,
    EditUser,
    DeleteUser,
    Quit,
}

const MENU_ITEMS: [&str; 5] = ["Refresh", "Add user", "Edit user", "Delete user", "Quit"];

pub fn main_menu() -> Result<MenuAction> {
    let choice = Select::new()
        .with_prompt("Admin console")
        .items(&MENU_ITEMS)
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => MenuAction::Refresh,
        1 => MenuAction::AddUser,
        2 => MenuAction::EditUser,
        3 => MenuAction::DeleteUser,
        _ => MenuAction::Quit,
    })
}

/// Pick a user from the current table rows; None when the table is empty.
pub fn pick_user(rows: &[UserRow]) -> Result<Option<i64>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = rows
        .iter()
        .map(|row| format!("{}  {}", row.id, row.username))
        .collect();

    let choice = Select::new()
        .with_prompt("Select user")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(rows[choice].id))
}

/// Walk the operator through the modal's fields, current values as
/// defaults, then toggle the role checkboxes through a multi-select.
pub fn edit_form(form: &mut ModalForm) -> Result<()> {
    form.username = Input::new()
        .with_prompt("Username")
        .allow_empty(true)
        .default(form.username.clone())
        .interact_text()?;

    form.firstname = Input::new()
        .with_prompt("First name")
        .allow_empty(true)
        .default(form.firstname.clone())
        .interact_text()?;

    form.lastname = Input::new()
        .with_prompt("Last name")
        .allow_empty(true)
        .default(form.lastname.clone())
        .interact_text()?;

    form.email = Input::new()
        .with_prompt("Email")
        .allow_empty(true)
        .default(form.email.clone())
        .interact_text()?;

    form.age = Input::new()
        .with_prompt("Age")
        .allow_empty(true)
        .default(form.age.clone())
        .interact_text()?;

    let password_prompt = if form.is_edit() {
        "Password (blank keeps current)"
    } else {
        "Password"
    };
    form.password = Input::new()
        .with_prompt(password_prompt)
        .allow_empty(true)
        .default(form.password.clone())
        .interact_text()?;

    if !form.checkboxes.is_empty() {
        let labels: Vec<&str> = form.checkboxes.iter().map(|c| c.label.as_str()).collect();
        let defaults: Vec<bool> = form.checkboxes.iter().map(|c| c.checked).collect();

        let picked = MultiSelect::new()
            .with_prompt("Roles (space toggles, enter confirms)")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        for checkbox in form.checkboxes.iter_mut() {
            checkbox.checked = false;
        }
        for index in picked {
            form.checkboxes[index].checked = true;
        }
    }

    Ok(())
}
