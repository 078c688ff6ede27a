//! Budget category repository for JSON storage
//!
//! Categories are month-scoped rows persisted to categories.json. The month
//! is the unit of replacement; single rows are only ever deleted or renamed.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::MonthwiseError;
use crate::models::{BudgetCategory, CategoryId, MonthKey};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<BudgetCategory>,
}

/// Repository for budget category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, BudgetCategory>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<CategoryId, BudgetCategory>>, MonthwiseError> {
        self.categories
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<CategoryId, BudgetCategory>>, MonthwiseError> {
        self.categories
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), MonthwiseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.write()?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk, grouped by month then display order
    pub fn save(&self) -> Result<(), MonthwiseError> {
        let categories = self.read()?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            (a.month, a.category_type, a.sort_order, &a.name)
                .cmp(&(b.month, b.category_type, b.sort_order, &b.name))
        });

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<BudgetCategory>, MonthwiseError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Categories for a month: income before expense, then sort order
    pub fn for_month(&self, month: MonthKey) -> Result<Vec<BudgetCategory>, MonthwiseError> {
        let categories = self.read()?;

        let mut list: Vec<_> = categories
            .values()
            .filter(|c| c.month == month)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            (a.category_type, a.sort_order, &a.name).cmp(&(b.category_type, b.sort_order, &b.name))
        });
        Ok(list)
    }

    /// Check whether a month has at least one category
    pub fn has_month(&self, month: MonthKey) -> Result<bool, MonthwiseError> {
        Ok(self.read()?.values().any(|c| c.month == month))
    }

    /// Distinct months with at least one category, ascending
    pub fn months_with_data(&self) -> Result<Vec<MonthKey>, MonthwiseError> {
        let months: BTreeSet<MonthKey> = self.read()?.values().map(|c| c.month).collect();
        Ok(months.into_iter().collect())
    }

    /// Replace every category of `month` with `categories`.
    ///
    /// Returns the rows that were removed. An incoming id that already
    /// belongs to another month is rejected and nothing changes.
    pub fn replace_month(
        &self,
        month: MonthKey,
        categories: Vec<BudgetCategory>,
    ) -> Result<Vec<BudgetCategory>, MonthwiseError> {
        let mut map = self.write()?;

        for category in &categories {
            if let Some(owner) = map.get(&category.id).filter(|c| c.month != month) {
                return Err(MonthwiseError::Validation(format!(
                    "Category {} belongs to {}, not {}",
                    category.id, owner.month, month
                )));
            }
        }

        let stale: Vec<CategoryId> = map
            .values()
            .filter(|c| c.month == month)
            .map(|c| c.id)
            .collect();
        let removed = stale.iter().filter_map(|id| map.remove(id)).collect();

        for category in categories {
            map.insert(category.id, category);
        }

        Ok(removed)
    }

    /// Insert or update a single category
    pub fn upsert(&self, category: BudgetCategory) -> Result<(), MonthwiseError> {
        self.write()?.insert(category.id, category);
        Ok(())
    }

    /// Delete a category, returning it if it existed
    pub fn delete(&self, id: CategoryId) -> Result<Option<BudgetCategory>, MonthwiseError> {
        Ok(self.write()?.remove(&id))
    }

    /// Count all categories across months
    pub fn count(&self) -> Result<usize, MonthwiseError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use tempfile::TempDir;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.for_month(month("2025-01")).unwrap().is_empty());
    }

    #[test]
    fn test_for_month_orders_income_first() {
        let (_temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");

        let mut rent = BudgetCategory::new(jan, CategoryType::Expense, "Rent");
        rent.sort_order = 0;
        let mut salary = BudgetCategory::new(jan, CategoryType::Income, "Salary");
        salary.sort_order = 5;
        let other = BudgetCategory::new(month("2025-02"), CategoryType::Expense, "Dining");

        repo.upsert(rent).unwrap();
        repo.upsert(salary).unwrap();
        repo.upsert(other).unwrap();

        let names: Vec<_> = repo
            .for_month(jan)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Salary", "Rent"]);
    }

    #[test]
    fn test_replace_month_leaves_other_months() {
        let (_temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        let feb = month("2025-02");

        repo.upsert(BudgetCategory::new(jan, CategoryType::Expense, "Dining"))
            .unwrap();
        repo.upsert(BudgetCategory::new(feb, CategoryType::Expense, "Dining"))
            .unwrap();

        let removed = repo
            .replace_month(jan, vec![BudgetCategory::new(jan, CategoryType::Expense, "Travel")])
            .unwrap();

        assert_eq!(removed.len(), 1);
        assert_eq!(repo.for_month(jan).unwrap()[0].name, "Travel");
        assert_eq!(repo.for_month(feb).unwrap()[0].name, "Dining");
        assert_eq!(repo.months_with_data().unwrap(), vec![jan, feb]);
    }

    #[test]
    fn test_replace_month_rejects_id_from_other_month() {
        let (_temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        let feb = month("2025-02");

        let dining = BudgetCategory::new(jan, CategoryType::Expense, "Dining");
        let travel = BudgetCategory::new(feb, CategoryType::Expense, "Travel");
        repo.upsert(dining.clone()).unwrap();
        repo.upsert(travel.clone()).unwrap();

        let mut moved = travel.clone();
        moved.month = jan;
        let err = repo.replace_month(jan, vec![moved]).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(repo.for_month(jan).unwrap(), vec![dining]);
        assert_eq!(repo.for_month(feb).unwrap(), vec![travel]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let jan = month("2025-01");
        let category = BudgetCategory::new(jan, CategoryType::Expense, "Dining")
            .with_tags(["dining"]);
        let id = category.id;

        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Dining");
        assert_eq!(loaded.tags, vec!["dining"]);
        assert!(repo2.has_month(jan).unwrap());
    }

    #[test]
    fn test_delete_unknown_is_none() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.delete(CategoryId::new()).unwrap().is_none());
    }
}
