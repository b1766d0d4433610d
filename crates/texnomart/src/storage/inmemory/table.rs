//! Auto-increment table used by the in-memory backend.

use std::collections::BTreeMap;

use texnomart_core::storage::{RepositoryError, Result};

/// Rows of one entity type keyed by their ID, assigned on insert.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
    entity_type: &'static str,
}

impl<T: Clone> Table<T> {
    pub fn new(entity_type: &'static str) -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            entity_type,
        }
    }

    /// All rows ordered by ID.
    pub fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Inserts the row built for the next ID and returns it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Replaces an existing row.
    pub fn replace(&mut self, id: i64, row: T) -> Result<()> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(RepositoryError::not_found(self.entity_type, id)),
        }
    }

    pub fn remove(&mut self, id: i64) -> Result<T> {
        self.rows
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(self.entity_type, id))
    }

    /// Removes every row matching `predicate` and returns their IDs.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> Vec<i64> {
        let ids: Vec<i64> = self
            .rows
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.rows.remove(id);
        }
        ids
    }

    /// Fails with `InvalidData` unless a row with `id` exists.
    pub fn ensure_exists(&self, id: i64) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(RepositoryError::InvalidData(format!(
                "{} {id} does not exist",
                self.entity_type
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_sequentially_and_never_reused() {
        let mut table = Table::new("Thing");
        let a = table.insert_with(|id| (id, "a"));
        let b = table.insert_with(|id| (id, "b"));
        table.remove(b.0).unwrap();
        let c = table.insert_with(|id| (id, "c"));

        assert_eq!((a.0, b.0, c.0), (1, 2, 3));
        assert_eq!(table.list(), vec![(1, "a"), (3, "c")]);
    }

    #[test]
    fn replace_and_remove_missing_rows_fail() {
        let mut table: Table<(i64, &str)> = Table::new("Thing");

        assert!(matches!(
            table.replace(9, (9, "x")),
            Err(RepositoryError::NotFound { entity_type: "Thing", .. })
        ));
        assert!(table.remove(9).is_err());
        assert!(matches!(
            table.ensure_exists(9),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn remove_where_returns_removed_ids() {
        let mut table = Table::new("Thing");
        for n in 0..5 {
            table.insert_with(|id| (id, n % 2));
        }

        let removed = table.remove_where(|(_, parity)| *parity == 0);
        assert_eq!(removed, vec![1, 3, 5]);
        assert_eq!(table.list().len(), 2);
    }
}
