//! Rollover ledger
//!
//! Cross-month transfers keyed by source month. Allocation against a
//! category's variance is reported as a hint and never enforced.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{Money, MonthKey, Transfer};
use crate::storage::Storage;

/// How much of a source variance the transfers account for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationHint {
    pub source_variance: Money,
    pub allocated: Money,
    /// Positive when under-allocated, negative when over-allocated
    pub remaining: Money,
}

impl AllocationHint {
    pub fn is_balanced(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// Service for rollover transfers
pub struct RolloverLedger<'a> {
    storage: &'a Storage,
}

impl<'a> RolloverLedger<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Transfers sourced at `source_month`
    pub fn load_outgoing(&self, source_month: MonthKey) -> MonthwiseResult<Vec<Transfer>> {
        self.storage.rollovers.outgoing(source_month)
    }

    /// Transfers whose stored destination month is `target_month`
    pub fn load_incoming(&self, target_month: MonthKey) -> MonthwiseResult<Vec<Transfer>> {
        self.storage.rollovers.incoming(target_month)
    }

    /// Replace every transfer sourced at `source_month`.
    ///
    /// `to_month` is stamped on each row as given and must come after
    /// `source_month`. A `to_month` other than the following month is
    /// logged but accepted.
    pub fn save_month_rollovers(
        &self,
        source_month: MonthKey,
        to_month: MonthKey,
        transfers: Vec<Transfer>,
    ) -> MonthwiseResult<Vec<Transfer>> {
        if to_month <= source_month {
            return Err(MonthwiseError::Validation(format!(
                "Rollovers from {} must land in a later month, not {}",
                source_month, to_month
            )));
        }
        if to_month != source_month.next() {
            warn!(%source_month, %to_month, "rollover destination is not the following month");
        }

        let mut prepared = Vec::with_capacity(transfers.len());
        for mut transfer in transfers {
            transfer.source_month = source_month;
            transfer.to_month = to_month;
            transfer.from_category = transfer.from_category.trim().to_string();
            transfer.to_category = transfer.to_category.trim().to_string();
            transfer
                .validate()
                .map_err(|e| MonthwiseError::Validation(e.to_string()))?;
            prepared.push(transfer);
        }

        let removed = self
            .storage
            .rollovers
            .replace_outgoing(source_month, prepared.clone())?;
        self.storage.rollovers.save()?;

        self.storage.log_replace(
            EntityType::Transfer,
            source_month.to_string(),
            &removed,
            &prepared,
            format!("{} -> {} transfers", removed.len(), prepared.len()),
        )?;
        info!(
            %source_month,
            %to_month,
            before = removed.len(),
            after = prepared.len(),
            "saved rollovers"
        );

        Ok(prepared)
    }

    /// Delete every transfer sourced at `source_month`, returning how many
    pub fn delete_month_rollovers(&self, source_month: MonthKey) -> MonthwiseResult<usize> {
        let removed = self.storage.rollovers.delete_outgoing(source_month)?;
        self.storage.rollovers.save()?;

        if !removed.is_empty() {
            self.storage.log_replace(
                EntityType::Transfer,
                source_month.to_string(),
                &removed,
                &Vec::<Transfer>::new(),
                format!("{} -> 0 transfers", removed.len()),
            )?;
        }
        info!(%source_month, removed = removed.len(), "deleted rollovers");

        Ok(removed.len())
    }

    /// Compare transfers against the variance they distribute
    pub fn allocation(source_variance: Money, transfers: &[Transfer]) -> AllocationHint {
        let source_variance = source_variance.round_cents();
        let allocated = Money::sum_rounded(transfers.iter().map(|t| t.amount));
        let remaining = (source_variance - allocated).round_cents();

        if !remaining.is_zero() {
            warn!(
                %source_variance,
                %allocated,
                %remaining,
                "transfers do not match the source variance"
            );
        }

        AllocationHint {
            source_variance,
            allocated,
            remaining,
        }
    }

    /// Incoming transfers whose destination category doesn't exist in `month`.
    ///
    /// Reset and rename leave these behind; they are reported, not repaired.
    pub fn orphaned_incoming(&self, month: MonthKey) -> MonthwiseResult<Vec<Transfer>> {
        let names: HashSet<String> = self
            .storage
            .categories
            .for_month(month)?
            .into_iter()
            .map(|c| c.name)
            .collect();

        let orphans: Vec<Transfer> = self
            .load_incoming(month)?
            .into_iter()
            .filter(|t| !names.contains(&t.to_category))
            .collect();

        if !orphans.is_empty() {
            warn!(%month, count = orphans.len(), "incoming transfers reference missing categories");
        }
        Ok(orphans)
    }

    /// Incoming minus outgoing per category name for `month`
    pub fn net_by_category(&self, month: MonthKey) -> MonthwiseResult<BTreeMap<String, Money>> {
        let mut net: BTreeMap<String, Money> = BTreeMap::new();

        for transfer in self.load_incoming(month)? {
            *net.entry(transfer.to_category).or_default() += transfer.amount;
        }
        for transfer in self.load_outgoing(month)? {
            *net.entry(transfer.from_category).or_default() -= transfer.amount;
        }

        for amount in net.values_mut() {
            *amount = amount.round_cents();
        }
        Ok(net)
    }
}
