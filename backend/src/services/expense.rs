//! Expense tracking service

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    expense_view, validate_expense, validate_expense_form, CreateExpenseInput, Expense,
    ExpenseFilter, ExpenseSort, ExpenseView, RecordId, UpdateExpenseInput,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Expense service for recording farm spending
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<Store>,
}

impl ExpenseService {
    /// Create a new ExpenseService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Filtered, sorted expenses with farm names resolved and a summary
    pub async fn get_expense_view(
        &self,
        filter: ExpenseFilter,
        sort: ExpenseSort,
        today: NaiveDate,
    ) -> AppResult<ExpenseView> {
        let (expenses, farms) =
            tokio::join!(self.store.expenses.get_all(), self.store.farms.get_all());
        Ok(expense_view(&expenses, &farms, filter, sort, today))
    }

    pub async fn get_expense(&self, expense_id: RecordId) -> AppResult<Expense> {
        Ok(self.store.expenses.get_by_id(expense_id).await?)
    }

    /// Record an expense. The farm reference is not checked.
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
        today: NaiveDate,
    ) -> AppResult<Expense> {
        validate_expense_form(&input).into_result()?;

        let expense = self.store.expenses.create(|id| input.into_record(id, today)).await?;
        tracing::info!(
            expense_id = expense.id,
            category = expense.category.as_str(),
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        expense_id: RecordId,
        input: UpdateExpenseInput,
    ) -> AppResult<Expense> {
        self.store
            .expenses
            .update(expense_id, |expense| {
                input.apply_to(expense);
                validate_expense(expense).into_result().map_err(AppError::from)
            })
            .await
    }

    pub async fn delete_expense(&self, expense_id: RecordId) -> AppResult<()> {
        self.store.expenses.delete(expense_id).await?;
        tracing::info!(expense_id, "Expense deleted");
        Ok(())
    }
}
