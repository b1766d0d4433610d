use chrono::{DateTime, Utc};

use crate::catalog::{Category, Product};

use super::RecordLabel;

/// An entity whose removal is archived and whose creation is announced.
pub trait Watched {
    /// Type name recorded in archive entries and notification subjects.
    const MODEL: &'static str;

    fn id(&self) -> i64;

    fn label(&self) -> RecordLabel;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

impl Watched for Category {
    const MODEL: &'static str = "Category";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> RecordLabel {
        RecordLabel::Title(Some(self.title.clone()))
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl Watched for Product {
    const MODEL: &'static str = "Product";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> RecordLabel {
        RecordLabel::Name(Some(self.name.clone()))
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}
