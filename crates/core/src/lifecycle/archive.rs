//! Pure functions for building and (de)serializing the deletion archive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{ArchivedFields, ArchivedRecord, LifecycleError, Result, Watched};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> Option<String> {
    timestamp.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
}

/// Captures the archived fields of an entity about to be removed.
pub fn snapshot<W: Watched>(entity: &W) -> ArchivedRecord {
    ArchivedRecord {
        model: W::MODEL.to_string(),
        data: ArchivedFields {
            id: Some(entity.id()),
            label: entity.label(),
            created_at: format_timestamp(entity.created_at()),
            updated_at: format_timestamp(entity.updated_at()),
        },
    }
}

/// Parses archive file contents. Empty or whitespace-only input is an empty archive.
pub fn decode_archive(contents: &str) -> Result<Vec<ArchivedRecord>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(contents).map_err(|e| LifecycleError::MalformedArchive(e.to_string()))
}

/// Renders records as a JSON array indented with 4 spaces.
pub fn encode_archive(records: &[ArchivedRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| LifecycleError::ArchiveWrite(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| LifecycleError::ArchiveWrite(e.to_string()))
}

/// Returns the new file contents after appending `records`, in order, to `contents`.
pub fn append_to_archive(contents: &str, records: &[ArchivedRecord]) -> Result<String> {
    let mut archived = decode_archive(contents)?;
    archived.extend_from_slice(records);
    encode_archive(&archived)
}
