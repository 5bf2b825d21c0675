use tracing::{debug, error, info, warn};

use crate::api::client::AdminApi;
use crate::core::config::UiConfig;
use crate::prompt::Confirmation;
use crate::state::cache::AdminCache;
use crate::ui::alerts::{Alert, AlertLevel, AlertRegion};
use crate::ui::modal::ModalForm;
use crate::ui::table::UserTable;
use crate::utils::time::current_timestamp;

/// The admin console controller.
///
/// Owns the only mutable state: the cache of the last-fetched users and
/// roles, the rendered table, the modal form and the alert region. Every
/// operation funnels its outcome into the alert region, so the console
/// stays usable after any backend failure.
pub struct AdminConsole {
    api: AdminApi,
    cache: AdminCache,
    table: UserTable,
    modal: Option<ModalForm>,
    alerts: AlertRegion,
    confirm: Box<dyn Confirmation>,
    role_prefix: String,
    /// Set while a save request is outstanding; overlapping submissions
    /// are dropped instead of duplicated.
    busy: bool,
}

impl AdminConsole {
    pub fn new(api: AdminApi, ui: &UiConfig, confirm: Box<dyn Confirmation>) -> Self {
        Self {
            api,
            cache: AdminCache::new(),
            table: UserTable::default(),
            modal: None,
            alerts: AlertRegion::new(ui.alert_ttl_secs),
            confirm,
            role_prefix: ui.role_prefix.clone(),
            busy: false,
        }
    }

    /// Startup sequence: roles first so role names are available when the
    /// users render, then the user list. Either fetch may fail without
    /// taking the console down; the failure becomes an alert and whatever
    /// data did arrive is kept.
    pub async fn init(&mut self) {
        self.load_roles().await;
        self.load_users().await;

        info!(
            users = self.cache.user_count(),
            roles = self.cache.role_count(),
            "Admin console initialized"
        );
    }

    /// GET the user collection; on success replace the cache wholesale and
    /// re-render the table, on failure keep the prior cache untouched.
    pub async fn load_users(&mut self) {
        match self.api.fetch_users().await {
            Ok(users) => {
                info!(users = users.len(), "User list fetched");
                self.cache.replace_users(users);
                self.render_table();
            }
            Err(e) => {
                error!(error = %e, "Failed to load users");
                let message = e.ui_message("Error loading users");
                self.push_alert(AlertLevel::Danger, message);
            }
        }
    }

    /// GET the role collection; same success/failure contract as
    /// `load_users`.
    pub async fn load_roles(&mut self) {
        match self.api.fetch_roles().await {
            Ok(roles) => {
                info!(roles = roles.len(), "Role list fetched");
                self.cache.replace_roles(roles);
            }
            Err(e) => {
                error!(error = %e, "Failed to load roles");
                let message = e.ui_message("Error loading roles");
                self.push_alert(AlertLevel::Danger, message);
            }
        }
    }

    /// Rebuild the table from the cache. Idempotent: the same cache always
    /// yields the same rows, in server order.
    pub fn render_table(&mut self) {
        self.table = UserTable::project(self.cache.users(), &self.role_prefix);
    }

    /// Open the modal blank for creating a user
    pub fn open_add_modal(&mut self) {
        self.modal = Some(ModalForm::for_add(self.cache.roles(), &self.role_prefix));
    }

    /// Open the modal for editing. The user is re-fetched first so the
    /// form never trusts the table-age cache; if the fetch fails the modal
    /// stays closed and a danger alert is pushed.
    pub async fn open_edit_modal(&mut self, id: i64) -> bool {
        match self.api.fetch_user(id).await {
            Ok(user) => {
                self.modal = Some(ModalForm::for_edit(
                    &user,
                    self.cache.roles(),
                    &self.role_prefix,
                ));
                true
            }
            Err(e) => {
                error!(user_id = id, error = %e, "Failed to load user for editing");
                let message = e.ui_message("Error loading user data");
                self.push_alert(AlertLevel::Danger, message);
                false
            }
        }
    }

    /// Submit the modal form. Validation failures abort with a single
    /// warning alert and no network call; a save already in flight drops
    /// the attempt. On success the modal closes, the full user list is
    /// reloaded and a success alert names the user. On failure the cache
    /// and the modal are left as they were.
    pub async fn save_user(&mut self) {
        if self.busy {
            warn!("Save already in flight, dropping submission");
            return;
        }

        let (payload, role_ids, user_id) = match &self.modal {
            Some(form) => match form.validate() {
                Ok(()) => (form.to_payload(), form.checked_role_ids(), form.id),
                Err(e) => {
                    warn!(error = %e, "Form validation failed");
                    self.push_alert(AlertLevel::Warning, e.to_string());
                    return;
                }
            },
            None => {
                debug!("Save requested with no open modal");
                return;
            }
        };

        self.busy = true;
        let result = match user_id {
            Some(id) => self.api.update_user(id, &payload, &role_ids).await,
            None => self.api.create_user(&payload, &role_ids).await,
        };
        self.busy = false;

        match result {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "User saved");
                self.modal = None;
                self.load_users().await;

                let verb = if user_id.is_some() { "updated" } else { "created" };
                let message = format!("User {} {} successfully", user.username, verb);
                self.push_alert(AlertLevel::Success, message);
            }
            Err(e) => {
                error!(error = %e, "Failed to save user");
                let fallback = if user_id.is_some() {
                    "Error updating user"
                } else {
                    "Error creating user"
                };
                let message = e.ui_message(fallback);
                self.push_alert(AlertLevel::Danger, message);
            }
        }
    }

    /// Delete a user after interactive confirmation. A declined prompt
    /// means no request and no state change.
    pub async fn delete_user(&mut self, id: i64) {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this user?")
        {
            debug!(user_id = id, "Delete not confirmed");
            return;
        }

        match self.api.delete_user(id).await {
            Ok(()) => {
                info!(user_id = id, "User deleted");
                self.load_users().await;
                self.push_alert(AlertLevel::Success, "User deleted successfully");
            }
            Err(e) => {
                error!(user_id = id, error = %e, "Failed to delete user");
                let message = e.ui_message("Error deleting user");
                self.push_alert(AlertLevel::Danger, message);
            }
        }
    }

    /// Render the alert region and the table for one tick. Expired alerts
    /// are swept first.
    pub fn view(&mut self) -> String {
        self.alerts.prune(current_timestamp());

        let mut out = String::new();
        for alert in self.alerts.active() {
            out.push_str(&alert.text());
            out.push('\n');
        }
        if !self.alerts.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.table.render());
        out
    }

    pub fn dismiss_alert(&mut self, index: usize) -> Option<Alert> {
        self.alerts.dismiss(index)
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.active()
    }

    pub fn cache(&self) -> &AdminCache {
        &self.cache
    }

    pub fn table(&self) -> &UserTable {
        &self.table
    }

    pub fn modal(&self) -> Option<&ModalForm> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut ModalForm> {
        self.modal.as_mut()
    }

    fn push_alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.alerts.push(level, message, current_timestamp());
    }
}
