//! Capability seams for UI integrations. Each integration point is an
//! explicit trait satisfied by a concrete adapter picked at composition
//! time; nothing is discovered at runtime.

use tracing::info;

pub trait ConfirmationProvider: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

pub trait NotificationProvider: Send + Sync {
    fn notify(&self, message: &str);
}

/// Accepts every confirmation prompt.
pub struct AutoConfirm;

impl ConfirmationProvider for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every confirmation prompt.
pub struct DecliningConfirm;

impl ConfirmationProvider for DecliningConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Routes notifications into the log stream.
pub struct TracingNotifier;

impl NotificationProvider for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(%message, "notification");
    }
}

pub struct SilentNotifier;

impl NotificationProvider for SilentNotifier {
    fn notify(&self, _message: &str) {}
}
