use async_trait::async_trait;

use super::{Notification, NotificationSink};

/// Simulated delivery: formatted notifications are written to the log
/// instead of a real email/SMS gateway.
pub struct ConsoleSink;

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn deliver(&self, note: &Notification) -> anyhow::Result<()> {
        tracing::info!(
            kind = note.kind.as_str(),
            audience = note.audience.as_str(),
            to = %note.to,
            subject = %note.subject,
            body = %note.body,
            "notification"
        );
        Ok(())
    }
}
