use serde::{Deserialize, Serialize};

/// Entity-specific label field stored in an archive entry.
///
/// Serialized flattened, so a product contributes `"name": ...` and a
/// category contributes `"title": ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLabel {
    Name(Option<String>),
    Title(Option<String>),
}

impl RecordLabel {
    /// The label text, if set.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Name(value) | Self::Title(value) => value.as_deref(),
        }
    }
}

/// Snapshot of the identifying fields of a removed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedFields {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub label: RecordLabel,
    /// `YYYY-MM-DD HH:MM:SS`, or `None` if never set.
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One entry of the deletion archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedRecord {
    /// Type name of the removed entity, e.g. `"Product"`.
    pub model: String,
    pub data: ArchivedFields,
}

/// A message handed to a notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub recipients: Vec<String>,
}
