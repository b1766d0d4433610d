use async_trait::async_trait;

use super::{ArchivedRecord, Notification, Result};

/// Durable, ordered log of archived records.
#[async_trait]
pub trait ArchiveLog: Send + Sync {
    /// Appends one record after all existing ones.
    async fn append(&self, record: &ArchivedRecord) -> Result<()> {
        self.append_all(std::slice::from_ref(record)).await
    }

    /// Appends `records` in order as a single write: either all of them land or none do.
    async fn append_all(&self, records: &[ArchivedRecord]) -> Result<()>;

    /// Reads every record in append order.
    async fn read_all(&self) -> Result<Vec<ArchivedRecord>>;
}

/// Delivers notifications, e.g. by email.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Decides who receives creation notifications.
#[async_trait]
pub trait RecipientResolver: Send + Sync {
    async fn recipients(&self) -> Result<Vec<String>>;
}
