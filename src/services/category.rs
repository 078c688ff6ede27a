//! Category store
//!
//! Month-scoped category persistence: replace-all saves, cross-month copy,
//! single-row add/rename/delete, and the month list that drives bootstrap
//! fallback.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetCategory, CategoryId, MonthKey};
use crate::storage::Storage;

/// Service for month-scoped budget categories
pub struct CategoryStore<'a> {
    storage: &'a Storage,
}

/// Result of renaming a category
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub category: BudgetCategory,
    /// Transfers that still name the category by its old name
    pub stale_transfers: usize,
}

impl<'a> CategoryStore<'a> {
    /// Create a new category store
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Categories of `month`, income first, then by sort order
    pub fn load_categories(&self, month: MonthKey) -> MonthwiseResult<Vec<BudgetCategory>> {
        self.storage.categories.for_month(month)
    }

    pub fn has_categories(&self, month: MonthKey) -> MonthwiseResult<bool> {
        self.storage.categories.has_month(month)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> MonthwiseResult<Option<BudgetCategory>> {
        self.storage.categories.get(id)
    }

    /// Replace every category of `month` with `categories`.
    ///
    /// Ids are kept, `month` is forced onto every row and `sort_order`
    /// becomes the list index. Names must be unique within the month
    /// regardless of type, since transfers refer to categories by name.
    /// Returns the rows as persisted.
    pub fn save_all_categories(
        &self,
        month: MonthKey,
        categories: Vec<BudgetCategory>,
    ) -> MonthwiseResult<Vec<BudgetCategory>> {
        let mut prepared = Vec::with_capacity(categories.len());
        for (index, mut category) in categories.into_iter().enumerate() {
            category.month = month;
            category.sort_order = index as i32;
            category.normalize();
            category
                .validate()
                .map_err(|e| MonthwiseError::Validation(e.to_string()))?;
            ensure_unique_name(&prepared, &category.name, None)?;
            prepared.push(category);
        }

        let removed = self
            .storage
            .categories
            .replace_month(month, prepared.clone())?;
        self.storage.categories.save()?;

        self.storage.log_replace(
            EntityType::BudgetMonth,
            month.to_string(),
            &removed,
            &prepared,
            format!("{} -> {} categories", removed.len(), prepared.len()),
        )?;
        info!(%month, before = removed.len(), after = prepared.len(), "saved categories");

        Ok(prepared)
    }

    /// Copy `source`'s categories into `target` under fresh ids.
    ///
    /// Replaces whatever `target` held. Copying an empty month is rejected
    /// so a mistyped source can't wipe the target.
    pub fn copy_from_month(
        &self,
        source: MonthKey,
        target: MonthKey,
    ) -> MonthwiseResult<Vec<BudgetCategory>> {
        if source == target {
            return Err(MonthwiseError::Validation(format!(
                "Cannot copy {} onto itself",
                source
            )));
        }

        let originals = self.load_categories(source)?;
        if originals.is_empty() {
            return Err(MonthwiseError::month_not_found(source.to_string()));
        }

        let copies = originals.iter().map(|c| c.copy_to(target)).collect();
        let saved = self.save_all_categories(target, copies)?;
        info!(%source, %target, count = saved.len(), "copied categories");

        Ok(saved)
    }

    /// Months with at least one category, ascending
    pub fn get_months_with_data(&self) -> MonthwiseResult<Vec<MonthKey>> {
        self.storage.categories.months_with_data()
    }

    /// Delete a single category. Unknown ids return `false`.
    pub fn delete_category(&self, id: CategoryId) -> MonthwiseResult<bool> {
        let Some(removed) = self.storage.categories.delete(id)? else {
            return Ok(false);
        };
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::BudgetCategory,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;
        info!(month = %removed.month, name = %removed.name, "deleted category");

        Ok(true)
    }

    /// Add a category to the end of its type group in `month`
    pub fn add_category(
        &self,
        month: MonthKey,
        mut draft: BudgetCategory,
    ) -> MonthwiseResult<BudgetCategory> {
        draft.month = month;
        draft.normalize();
        draft
            .validate()
            .map_err(|e| MonthwiseError::Validation(e.to_string()))?;

        let existing = self.load_categories(month)?;
        ensure_unique_name(&existing, &draft.name, None)?;

        draft.sort_order = existing
            .iter()
            .filter(|c| c.category_type == draft.category_type)
            .map(|c| c.sort_order + 1)
            .max()
            .unwrap_or(0);

        self.storage.categories.upsert(draft.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::BudgetCategory,
            draft.id.to_string(),
            Some(draft.name.clone()),
            &draft,
        )?;
        info!(%month, name = %draft.name, "added category");

        Ok(draft)
    }

    /// Rename a category in place.
    ///
    /// Transfers reference categories by name and are not rewritten; the
    /// outcome reports how many still carry the old name.
    pub fn rename_category(&self, id: CategoryId, new_name: &str) -> MonthwiseResult<RenameOutcome> {
        let before = self
            .get(id)?
            .ok_or_else(|| MonthwiseError::category_not_found(id.to_string()))?;

        let mut after = before.clone();
        after.name = new_name.trim().to_string();
        after
            .validate()
            .map_err(|e| MonthwiseError::Validation(e.to_string()))?;

        let siblings = self.load_categories(before.month)?;
        ensure_unique_name(&siblings, &after.name, Some(id))?;

        self.storage.categories.upsert(after.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::BudgetCategory,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            Some(format!("name: {} -> {}", before.name, after.name)),
        )?;

        let month = before.month;
        let outgoing = self.storage.rollovers.outgoing(month)?;
        let incoming = self.storage.rollovers.incoming(month)?;
        let stale_transfers = outgoing
            .iter()
            .filter(|t| t.from_category == before.name)
            .chain(incoming.iter().filter(|t| t.to_category == before.name))
            .count();

        if stale_transfers > 0 {
            warn!(
                %month,
                old = %before.name,
                new = %after.name,
                stale_transfers,
                "renamed category still referenced by transfers under its old name"
            );
        } else {
            info!(%month, old = %before.name, new = %after.name, "renamed category");
        }

        Ok(RenameOutcome {
            category: after,
            stale_transfers,
        })
    }
}

// Names are unique per month across income and expense, case-insensitively
fn ensure_unique_name(
    existing: &[BudgetCategory],
    name: &str,
    except: Option<CategoryId>,
) -> MonthwiseResult<()> {
    let clash = existing
        .iter()
        .filter(|c| Some(c.id) != except)
        .any(|c| c.name.eq_ignore_ascii_case(name));

    if clash {
        return Err(MonthwiseError::Duplicate {
            entity_type: "Category",
            identifier: name.to_string(),
        });
    }
    Ok(())
}
