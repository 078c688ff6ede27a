//! Rollover transfer model
//!
//! A transfer moves part of a category's end-of-month variance into a
//! category of the following month. Both ends are referenced by category
//! name, not id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransferId;
use super::money::Money;
use super::month::MonthKey;

/// A cross-month rollover record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,

    /// Month the variance comes from; storage key
    pub source_month: MonthKey,

    /// Name of the source category in `source_month`
    pub from_category: String,

    /// Name of the destination category in `to_month`
    pub to_category: String,

    /// Destination month, stored redundantly; callers keep it at `source_month.next()`
    pub to_month: MonthKey,

    /// Signed amount moved
    pub amount: Money,
}

impl Transfer {
    /// Create a transfer into the month after `source_month`
    pub fn new(
        source_month: MonthKey,
        from_category: impl Into<String>,
        to_category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: TransferId::new(),
            source_month,
            from_category: from_category.into(),
            to_category: to_category.into(),
            to_month: source_month.next(),
            amount,
        }
    }

    /// Whether `to_month` is the month right after `source_month`
    pub fn is_continuous(&self) -> bool {
        self.to_month == self.source_month.next()
    }

    /// Validate the transfer
    pub fn validate(&self) -> Result<(), TransferValidationError> {
        if self.from_category.trim().is_empty() {
            return Err(TransferValidationError::MissingSource);
        }
        if self.to_category.trim().is_empty() {
            return Err(TransferValidationError::MissingDestination);
        }
        if self.amount.round_cents().is_zero() {
            return Err(TransferValidationError::ZeroAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}: {}",
            self.source_month, self.from_category, self.to_month, self.to_category, self.amount
        )
    }
}

/// Validation errors for transfers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    MissingSource,
    MissingDestination,
    ZeroAmount,
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => write!(f, "Transfer needs a source category"),
            Self::MissingDestination => write!(f, "Transfer needs a destination category"),
            Self::ZeroAmount => write!(f, "Transfer amount cannot be zero"),
        }
    }
}

impl std::error::Error for TransferValidationError {}
