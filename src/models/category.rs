//! Budget category model
//!
//! A budget category is scoped to one month. Its tag set, combined with the
//! all-of/any-of flag and the amount sign, decides which transactions count
//! toward it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::month::MonthKey;

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 60;

/// Whether a category tracks money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    // Declaration order is display order: income before expense
    Income,
    Expense,
}

impl CategoryType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown category type '{}'", other)),
        }
    }
}

/// Which transaction amounts a category counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountSign {
    Positive,
    Negative,
    Any,
}

impl AmountSign {
    /// Income counts inflows, expenses count outflows
    pub fn default_for(category_type: CategoryType) -> Self {
        match category_type {
            CategoryType::Income => Self::Positive,
            CategoryType::Expense => Self::Negative,
        }
    }
}

impl std::str::FromStr for AmountSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "+" => Ok(Self::Positive),
            "negative" | "-" => Ok(Self::Negative),
            "any" => Ok(Self::Any),
            other => Err(format!("unknown amount sign '{}'", other)),
        }
    }
}

/// A month-scoped budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,

    /// Month this row belongs to
    pub month: MonthKey,

    #[serde(rename = "type")]
    pub category_type: CategoryType,

    pub name: String,

    /// Expected amount for the month
    pub expected: Money,

    /// Tags used as the match predicate
    #[serde(default)]
    pub tags: Vec<String>,

    /// Require every tag (true) or any tag (false)
    #[serde(default)]
    pub require_all: bool,

    /// Explicit sign filter; `None` means the default for the type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_sign: Option<AmountSign>,

    /// Display order within its type
    #[serde(default)]
    pub sort_order: i32,
}

impl BudgetCategory {
    /// Create a category with no tags and a zero expected amount
    pub fn new(month: MonthKey, category_type: CategoryType, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            month,
            category_type,
            name: name.into(),
            expected: Money::zero(),
            tags: Vec::new(),
            require_all: false,
            amount_sign: None,
            sort_order: 0,
        }
    }

    pub fn with_expected(mut self, expected: Money) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn with_require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn with_amount_sign(mut self, sign: AmountSign) -> Self {
        self.amount_sign = Some(sign);
        self
    }

    /// The sign filter actually applied when matching transactions
    pub fn effective_sign(&self) -> AmountSign {
        self.amount_sign
            .unwrap_or_else(|| AmountSign::default_for(self.category_type))
    }

    /// Copy this category into another month under a fresh id
    pub fn copy_to(&self, month: MonthKey) -> Self {
        Self {
            id: CategoryId::new(),
            month,
            ..self.clone()
        }
    }

    /// Normalize free-form input: trim the name, normalize tags, round expected
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.tags = normalize_tags(std::mem::take(&mut self.tags));
        self.expected = self.expected.round_cents();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }

        if self.expected.is_negative() {
            return Err(CategoryValidationError::NegativeExpected);
        }

        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Trim, lowercase and dedupe tags, keeping first-seen order
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.into().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// The fixed category set written when no month has any data yet
pub fn default_template(month: MonthKey) -> Vec<BudgetCategory> {
    let income: &[(&str, &[&str])] = &[("Salary", &["salary"]), ("Other Income", &["income"])];
    let expense: &[(&str, &[&str])] = &[
        ("Housing", &["rent", "mortgage"]),
        ("Groceries", &["groceries"]),
        ("Dining", &["dining", "restaurants"]),
        ("Transportation", &["transport", "gas"]),
        ("Utilities", &["utilities"]),
        ("Entertainment", &["entertainment"]),
        ("Shopping", &["shopping"]),
    ];

    let build = |category_type: CategoryType, rows: &[(&str, &[&str])]| {
        rows.iter()
            .enumerate()
            .map(move |(i, (name, tags))| {
                let mut category = BudgetCategory::new(month, category_type, *name)
                    .with_tags(tags.iter().copied());
                category.sort_order = i as i32;
                category
            })
            .collect::<Vec<_>>()
    };

    let mut categories = build(CategoryType::Income, income);
    categories.extend(build(CategoryType::Expense, expense));
    categories
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeExpected,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeExpected => write!(f, "Expected amount cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
