//! Entity lifecycle side effects: archival before removal and notification
//! after creation.

mod archive;
mod error;
mod notify;
mod traits;
mod types;
mod watched;

pub use archive::{append_to_archive, decode_archive, encode_archive, format_timestamp, snapshot};
pub use error::{LifecycleError, Result};
pub use notify::creation_notice;
pub use traits::{ArchiveLog, NotificationSink, RecipientResolver};
pub use types::{ArchivedFields, ArchivedRecord, Notification, RecordLabel};
pub use watched::Watched;
