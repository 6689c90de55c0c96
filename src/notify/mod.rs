pub mod console;
pub mod template;

use async_trait::async_trait;

pub use template::{Notification, NotificationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Client,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Admin => "admin",
            Audience::Client => "client",
        }
    }
}

/// Delivery collaborator. Receives one fully rendered notification per
/// state-changing ledger operation; delivery is best-effort with no
/// guarantee, and a failure must never unwind the mutation that preceded
/// it.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, note: &Notification) -> anyhow::Result<()>;
}

/// Attempt delivery after the ledger mutation has been committed. A failure
/// is downgraded to a warning string for the caller to surface.
pub async fn dispatch(sink: &dyn NotificationSink, note: Notification) -> Option<String> {
    match sink.deliver(&note).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(kind = note.kind.as_str(), error = %e, "notification delivery failed");
            Some(format!(
                "{} notification could not be delivered",
                note.kind.as_str()
            ))
        }
    }
}
