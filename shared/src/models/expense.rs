//! Expense models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordId};

/// Money spent on a farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Weak reference to a farm
    pub farm_id: RecordId,
}

impl Record for Expense {
    const KIND: &'static str = "Expense";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Seeds,
    Fertilizer,
    Pesticides,
    Equipment,
    Fuel,
    Labor,
    Irrigation,
    Maintenance,
    Utilities,
    Insurance,
    Transport,
    Storage,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Seeds => "seeds",
            ExpenseCategory::Fertilizer => "fertilizer",
            ExpenseCategory::Pesticides => "pesticides",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Fuel => "fuel",
            ExpenseCategory::Labor => "labor",
            ExpenseCategory::Irrigation => "irrigation",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Storage => "storage",
            ExpenseCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseCategory::Seeds => write!(f, "Seeds & Plants"),
            ExpenseCategory::Fertilizer => write!(f, "Fertilizer"),
            ExpenseCategory::Pesticides => write!(f, "Pesticides"),
            ExpenseCategory::Equipment => write!(f, "Equipment"),
            ExpenseCategory::Fuel => write!(f, "Fuel"),
            ExpenseCategory::Labor => write!(f, "Labor"),
            ExpenseCategory::Irrigation => write!(f, "Irrigation"),
            ExpenseCategory::Maintenance => write!(f, "Maintenance"),
            ExpenseCategory::Utilities => write!(f, "Utilities"),
            ExpenseCategory::Insurance => write!(f, "Insurance"),
            ExpenseCategory::Transport => write!(f, "Transportation"),
            ExpenseCategory::Storage => write!(f, "Storage"),
            ExpenseCategory::Other => write!(f, "Other"),
        }
    }
}

/// Input for recording an expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseInput {
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub farm_id: Option<RecordId>,
}

impl CreateExpenseInput {
    /// Build the stored record. Callers validate first.
    pub fn into_record(self, id: RecordId, today: NaiveDate) -> Expense {
        Expense {
            id,
            category: self.category.unwrap_or(ExpenseCategory::Other),
            amount: self.amount.unwrap_or(Decimal::ZERO),
            date: self.date.unwrap_or(today),
            description: self.description,
            farm_id: self.farm_id.unwrap_or_default(),
        }
    }
}

/// Input for updating an expense. Omitted fields keep their stored value; an
/// explicit `null` clears `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseInput {
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::types::double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub farm_id: Option<RecordId>,
}

impl UpdateExpenseInput {
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(farm_id) = self.farm_id {
            expense.farm_id = farm_id;
        }
    }
}
