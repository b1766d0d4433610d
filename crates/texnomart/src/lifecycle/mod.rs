//! Lifecycle side effects: the deletion archive file and creation notices.

mod archive;
mod notify;

pub use archive::JsonFileArchive;
pub use notify::{LogSink, Notifier, NotifyMode, StaticRecipients, UserRecipients};

#[cfg(test)]
pub(crate) use notify::testing;
