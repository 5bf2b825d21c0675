use crate::utils::time::is_expired;

/// Severity of an alert banner, mirrored in its rendered tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

/// A transient banner in the alert region
#[derive(Clone, Debug)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    created_at: i64,
}

impl Alert {
    pub fn text(&self) -> String {
        format!("[{}] {}", self.level.as_str(), self.message)
    }
}

/// Holds the currently visible alerts.
///
/// Alerts expire after a fixed TTL and are swept by `prune`, which the view
/// runs on each tick; the operator can dismiss one earlier by index.
#[derive(Debug)]
pub struct AlertRegion {
    alerts: Vec<Alert>,
    ttl_secs: i64,
}

impl AlertRegion {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            alerts: Vec::new(),
            ttl_secs: ttl_secs as i64,
        }
    }

    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>, now: i64) {
        self.alerts.push(Alert {
            level,
            message: message.into(),
            created_at: now,
        });
    }

    /// Sweep alerts older than the TTL. Returns how many were removed.
    pub fn prune(&mut self, now: i64) -> usize {
        let before = self.alerts.len();
        self.alerts
            .retain(|alert| !is_expired(alert.created_at, self.ttl_secs, now));
        before - self.alerts.len()
    }

    /// Dismiss one alert ahead of its TTL
    pub fn dismiss(&mut self, index: usize) -> Option<Alert> {
        if index < self.alerts.len() {
            Some(self.alerts.remove(index))
        } else {
            None
        }
    }

    pub fn active(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
