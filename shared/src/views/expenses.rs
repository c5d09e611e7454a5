//! Expense list filters, sorts and category breakdowns

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{farm_name, parse_wire_name, same_month, sorted_by, UnknownSelector};
use crate::models::{Expense, ExpenseCategory, Farm};
use crate::types::DateRange;

/// Label shown for an expense whose farm no longer exists
pub const UNKNOWN_FARM: &str = "Unknown Farm";

/// How many categories the breakdown panel lists
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Which expenses a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpenseFilter {
    #[default]
    All,
    ThisMonth,
    LastMonth,
    Category(ExpenseCategory),
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        match self {
            ExpenseFilter::All => true,
            ExpenseFilter::ThisMonth => DateRange::month_of(today).contains(expense.date),
            ExpenseFilter::LastMonth => DateRange::previous_month_of(today).contains(expense.date),
            ExpenseFilter::Category(category) => expense.category == *category,
        }
    }
}

impl FromStr for ExpenseFilter {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(ExpenseFilter::All),
            "thisMonth" => Ok(ExpenseFilter::ThisMonth),
            "lastMonth" => Ok(ExpenseFilter::LastMonth),
            other => parse_wire_name(other)
                .map(ExpenseFilter::Category)
                .ok_or_else(|| UnknownSelector::new("expense filter", value)),
        }
    }
}

impl std::fmt::Display for ExpenseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseFilter::All => write!(f, "all"),
            ExpenseFilter::ThisMonth => write!(f, "thisMonth"),
            ExpenseFilter::LastMonth => write!(f, "lastMonth"),
            ExpenseFilter::Category(category) => write!(f, "{}", category.as_str()),
        }
    }
}

impl TryFrom<String> for ExpenseFilter {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpenseFilter> for String {
    fn from(filter: ExpenseFilter) -> Self {
        filter.to_string()
    }
}

/// Expense list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpenseSort {
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Largest amount first
    Amount,
    /// Category name, A to Z
    Category,
    /// Farm name, A to Z, with dangling farms sorted as "Unknown Farm"
    Farm,
}

impl FromStr for ExpenseSort {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date" => Ok(ExpenseSort::Newest),
            "oldest" => Ok(ExpenseSort::Oldest),
            "amount" => Ok(ExpenseSort::Amount),
            "category" => Ok(ExpenseSort::Category),
            "farm" => Ok(ExpenseSort::Farm),
            _ => Err(UnknownSelector::new("expense sort", value)),
        }
    }
}

impl std::fmt::Display for ExpenseSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseSort::Newest => write!(f, "date"),
            ExpenseSort::Oldest => write!(f, "oldest"),
            ExpenseSort::Amount => write!(f, "amount"),
            ExpenseSort::Category => write!(f, "category"),
            ExpenseSort::Farm => write!(f, "farm"),
        }
    }
}

impl TryFrom<String> for ExpenseSort {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpenseSort> for String {
    fn from(sort: ExpenseSort) -> Self {
        sort.to_string()
    }
}

pub fn filter_expenses(expenses: &[Expense], filter: ExpenseFilter, today: NaiveDate) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense, today))
        .cloned()
        .collect()
}

/// A reordered copy of `expenses`. `farms` is only consulted for `ExpenseSort::Farm`.
pub fn sort_expenses(expenses: &[Expense], sort: ExpenseSort, farms: &[Farm]) -> Vec<Expense> {
    match sort {
        ExpenseSort::Newest => sorted_by(expenses, |a, b| b.date.cmp(&a.date)),
        ExpenseSort::Oldest => sorted_by(expenses, |a, b| a.date.cmp(&b.date)),
        ExpenseSort::Amount => sorted_by(expenses, |a, b| b.amount.cmp(&a.amount)),
        ExpenseSort::Category => {
            sorted_by(expenses, |a, b| a.category.as_str().cmp(b.category.as_str()))
        }
        ExpenseSort::Farm => {
            let label = |e: &Expense| farm_name(farms, e.farm_id).unwrap_or(UNKNOWN_FARM);
            sorted_by(expenses, |a, b| label(a).cmp(label(b)))
        }
    }
}

/// Sum of expenses dated in the same calendar month and year as `today`
pub fn monthly_total(expenses: &[Expense], today: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| same_month(e.date, today))
        .map(|e| e.amount)
        .sum()
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub count: usize,
}

/// Totals per category, in the order each category first appears
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
                count: 1,
            }),
        }
    }
    totals
}

/// The `limit` largest categories by total. Ties keep first-seen order.
pub fn top_categories(expenses: &[Expense], limit: usize) -> Vec<CategoryTotal> {
    let mut totals = category_totals(expenses);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

/// Numbers shown beside the expense list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    /// Total of the filtered list
    pub filtered_total: Decimal,
    /// Total for the current month across every expense
    pub monthly_total: Decimal,
    /// Number of expenses before filtering
    pub expense_count: usize,
    /// Largest categories of the filtered list
    pub top_categories: Vec<CategoryTotal>,
}

/// Summary over `all` expenses and the `filtered` subset currently shown
pub fn expense_summary(all: &[Expense], filtered: &[Expense], today: NaiveDate) -> ExpenseSummary {
    ExpenseSummary {
        filtered_total: filtered.iter().map(|e| e.amount).sum(),
        monthly_total: monthly_total(all, today),
        expense_count: all.len(),
        top_categories: top_categories(filtered, TOP_CATEGORY_LIMIT),
    }
}

/// An expense row with its farm resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    #[serde(flatten)]
    pub expense: Expense,
    pub farm_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseView {
    pub filter: ExpenseFilter,
    pub sort: ExpenseSort,
    pub expenses: Vec<ExpenseRow>,
    pub summary: ExpenseSummary,
}

pub fn expense_view(
    expenses: &[Expense],
    farms: &[Farm],
    filter: ExpenseFilter,
    sort: ExpenseSort,
    today: NaiveDate,
) -> ExpenseView {
    let filtered = filter_expenses(expenses, filter, today);
    let summary = expense_summary(expenses, &filtered, today);
    let rows = sort_expenses(&filtered, sort, farms)
        .into_iter()
        .map(|expense| ExpenseRow {
            farm_name: farm_name(farms, expense.farm_id)
                .unwrap_or(UNKNOWN_FARM)
                .to_string(),
            expense,
        })
        .collect();

    ExpenseView {
        filter,
        sort,
        expenses: rows,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeUnit;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: u32, category: ExpenseCategory, cents: i64, on: NaiveDate, farm_id: u32) -> Expense {
        Expense {
            id,
            category,
            amount: Decimal::new(cents, 2),
            date: on,
            description: None,
            farm_id,
        }
    }

    fn farm(id: u32, name: &str) -> Farm {
        Farm {
            id,
            name: name.to_string(),
            location: "Somewhere".to_string(),
            size: Decimal::from(10),
            size_unit: SizeUnit::Acres,
            fields: vec![],
        }
    }

    #[test]
    fn test_monthly_total_excludes_previous_month_within_30_days() {
        let today = date(2024, 5, 3);
        let expenses = vec![
            expense(1, ExpenseCategory::Fuel, 12050, date(2024, 5, 1), 1),
            expense(2, ExpenseCategory::Fuel, 5000, date(2024, 5, 31), 1),
            expense(3, ExpenseCategory::Fuel, 9999, date(2024, 4, 28), 1),
            expense(4, ExpenseCategory::Fuel, 100, date(2023, 5, 10), 1),
        ];
        assert_eq!(monthly_total(&expenses, today), Decimal::new(17050, 2));
    }

    #[test]
    fn test_month_filters() {
        let today = date(2024, 1, 20);
        let expenses = vec![
            expense(1, ExpenseCategory::Seeds, 100, date(2024, 1, 2), 1),
            expense(2, ExpenseCategory::Seeds, 100, date(2023, 12, 31), 1),
            expense(3, ExpenseCategory::Seeds, 100, date(2023, 11, 30), 1),
        ];
        let ids = |filter| -> Vec<u32> {
            filter_expenses(&expenses, filter, today).iter().map(|e| e.id).collect()
        };
        assert_eq!(ids(ExpenseFilter::ThisMonth), vec![1]);
        assert_eq!(ids(ExpenseFilter::LastMonth), vec![2]);
        assert_eq!(ids(ExpenseFilter::Category(ExpenseCategory::Seeds)).len(), 3);
    }

    #[test]
    fn test_top_categories_tie_keeps_first_seen() {
        let on = date(2024, 5, 1);
        let expenses = vec![
            expense(1, ExpenseCategory::Labor, 1000, on, 1),
            expense(2, ExpenseCategory::Fuel, 1000, on, 1),
            expense(3, ExpenseCategory::Seeds, 3000, on, 1),
            expense(4, ExpenseCategory::Fuel, 500, on, 1),
            expense(5, ExpenseCategory::Labor, 500, on, 1),
        ];
        let top: Vec<ExpenseCategory> = top_categories(&expenses, 5).iter().map(|t| t.category).collect();
        assert_eq!(
            top,
            vec![ExpenseCategory::Seeds, ExpenseCategory::Labor, ExpenseCategory::Fuel]
        );
        assert_eq!(top_categories(&expenses, 1).len(), 1);
    }

    #[test]
    fn test_farm_sort_uses_unknown_label() {
        let on = date(2024, 5, 1);
        let farms = vec![farm(1, "Willow Creek"), farm(2, "Apple Hill")];
        let expenses = vec![
            expense(1, ExpenseCategory::Fuel, 100, on, 1),
            expense(2, ExpenseCategory::Fuel, 100, on, 99),
            expense(3, ExpenseCategory::Fuel, 100, on, 2),
        ];
        let ids: Vec<u32> = sort_expenses(&expenses, ExpenseSort::Farm, &farms)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_expense_view_resolves_farm_names() {
        let today = date(2024, 5, 10);
        let farms = vec![farm(1, "Willow Creek")];
        let expenses = vec![
            expense(1, ExpenseCategory::Fuel, 2500, date(2024, 5, 2), 1),
            expense(2, ExpenseCategory::Labor, 7500, date(2024, 5, 9), 7),
        ];
        let view = expense_view(&expenses, &farms, ExpenseFilter::All, ExpenseSort::Newest, today);
        assert_eq!(view.expenses[0].expense.id, 2);
        assert_eq!(view.expenses[0].farm_name, UNKNOWN_FARM);
        assert_eq!(view.expenses[1].farm_name, "Willow Creek");
        assert_eq!(view.summary.filtered_total, Decimal::new(10000, 2));
        assert_eq!(view.summary.expense_count, 2);
    }

    #[test]
    fn test_filter_keys() {
        assert_eq!("fertilizer".parse::<ExpenseFilter>(), Ok(ExpenseFilter::Category(ExpenseCategory::Fertilizer)));
        assert_eq!("thisMonth".parse::<ExpenseFilter>(), Ok(ExpenseFilter::ThisMonth));
        assert!("groceries".parse::<ExpenseFilter>().is_err());
        assert_eq!("date".parse::<ExpenseSort>(), Ok(ExpenseSort::Newest));
    }
}
