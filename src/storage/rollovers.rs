//! Rollover transfer repository for JSON storage
//!
//! Transfers are keyed for replacement by their source month. Incoming
//! lookups filter on the stored destination month.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::MonthwiseError;
use crate::models::{MonthKey, Transfer, TransferId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable rollover data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RolloverData {
    pub transfers: Vec<Transfer>,
}

/// Repository for transfer persistence
pub struct RolloverRepository {
    path: PathBuf,
    transfers: RwLock<HashMap<TransferId, Transfer>>,
}

fn ordered(mut list: Vec<Transfer>) -> Vec<Transfer> {
    list.sort_by(|a, b| {
        (a.source_month, &a.from_category, &a.to_category, a.id)
            .cmp(&(b.source_month, &b.from_category, &b.to_category, b.id))
    });
    list
}

impl RolloverRepository {
    /// Create a new rollover repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transfers: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TransferId, Transfer>>, MonthwiseError> {
        self.transfers
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TransferId, Transfer>>, MonthwiseError> {
        self.transfers
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transfers from disk
    pub fn load(&self) -> Result<(), MonthwiseError> {
        let file_data: RolloverData = read_json(&self.path)?;

        let mut transfers = self.write()?;
        transfers.clear();
        for transfer in file_data.transfers {
            transfers.insert(transfer.id, transfer);
        }

        Ok(())
    }

    /// Save transfers to disk
    pub fn save(&self) -> Result<(), MonthwiseError> {
        let list = ordered(self.read()?.values().cloned().collect());
        write_json_atomic(&self.path, &RolloverData { transfers: list })
    }

    /// Transfers sourced at `month`
    pub fn outgoing(&self, month: MonthKey) -> Result<Vec<Transfer>, MonthwiseError> {
        Ok(ordered(
            self.read()?
                .values()
                .filter(|t| t.source_month == month)
                .cloned()
                .collect(),
        ))
    }

    /// Transfers whose stored destination month is `month`
    pub fn incoming(&self, month: MonthKey) -> Result<Vec<Transfer>, MonthwiseError> {
        Ok(ordered(
            self.read()?
                .values()
                .filter(|t| t.to_month == month)
                .cloned()
                .collect(),
        ))
    }

    /// Replace every transfer sourced at `month`, returning the removed ones
    pub fn replace_outgoing(
        &self,
        month: MonthKey,
        transfers: Vec<Transfer>,
    ) -> Result<Vec<Transfer>, MonthwiseError> {
        let mut map = self.write()?;
        let removed = drain_source(&mut map, month);
        for transfer in transfers {
            map.insert(transfer.id, transfer);
        }
        Ok(removed)
    }

    /// Delete every transfer sourced at `month`, returning the removed ones
    pub fn delete_outgoing(&self, month: MonthKey) -> Result<Vec<Transfer>, MonthwiseError> {
        Ok(drain_source(&mut *self.write()?, month))
    }

    /// All stored transfers
    pub fn all(&self) -> Result<Vec<Transfer>, MonthwiseError> {
        Ok(ordered(self.read()?.values().cloned().collect()))
    }
}

fn drain_source(map: &mut HashMap<TransferId, Transfer>, month: MonthKey) -> Vec<Transfer> {
    let ids: Vec<TransferId> = map
        .values()
        .filter(|t| t.source_month == month)
        .map(|t| t.id)
        .collect();
    ids.iter().filter_map(|id| map.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn create_test_repo() -> (TempDir, RolloverRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = RolloverRepository::new(temp_dir.path().join("rollovers.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_outgoing_and_incoming() {
        let (_temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        let transfer = Transfer::new(jan, "Dining", "Entertainment", Money::new(dec!(50)));

        repo.replace_outgoing(jan, vec![transfer.clone()]).unwrap();

        assert_eq!(repo.outgoing(jan).unwrap(), vec![transfer.clone()]);
        assert_eq!(repo.incoming(month("2025-02")).unwrap(), vec![transfer]);
        assert!(repo.incoming(jan).unwrap().is_empty());
    }

    #[test]
    fn test_replace_outgoing_only_touches_source_month() {
        let (_temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        let feb = month("2025-02");

        repo.replace_outgoing(
            jan,
            vec![Transfer::new(jan, "Dining", "Travel", Money::new(dec!(10)))],
        )
        .unwrap();
        repo.replace_outgoing(
            feb,
            vec![Transfer::new(feb, "Travel", "Dining", Money::new(dec!(5)))],
        )
        .unwrap();

        let removed = repo
            .replace_outgoing(
                jan,
                vec![Transfer::new(jan, "Groceries", "Dining", Money::new(dec!(20)))],
            )
            .unwrap();

        assert_eq!(removed.len(), 1);
        assert_eq!(repo.outgoing(jan).unwrap()[0].from_category, "Groceries");
        assert_eq!(repo.outgoing(feb).unwrap().len(), 1);
        assert_eq!(repo.all().unwrap().len(), 2);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        repo.replace_outgoing(
            jan,
            vec![Transfer::new(jan, "Dining", "Travel", Money::new(dec!(12.50)))],
        )
        .unwrap();
        repo.save().unwrap();

        let repo2 = RolloverRepository::new(temp_dir.path().join("rollovers.json"));
        repo2.load().unwrap();
        let loaded = repo2.outgoing(jan).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, Money::new(dec!(12.50)));

        repo2.delete_outgoing(jan).unwrap();
        assert!(repo2.outgoing(jan).unwrap().is_empty());
    }
}
