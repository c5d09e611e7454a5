//! HTTP handlers for expense tracking

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{
    CreateExpenseInput, Expense, ExpenseFilter, ExpenseSort, ExpenseView, RecordId,
    UpdateExpenseInput,
};

use super::ListQuery;
use crate::error::AppResult;
use crate::services::{today, ExpenseService};
use crate::AppState;

/// Expense list with summary, e.g. `?filter=lastMonth&sort=amount`
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ExpenseView>> {
    let (filter, sort) = query.selectors::<ExpenseFilter, ExpenseSort>()?;
    let service = ExpenseService::new(state.store);
    let view = service.get_expense_view(filter, sort, today()).await?;
    Ok(Json(view))
}

pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<RecordId>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.store);
    let expense = service.get_expense(expense_id).await?;
    Ok(Json(expense))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    let service = ExpenseService::new(state.store);
    let expense = service.create_expense(input, today()).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<RecordId>,
    Json(input): Json<UpdateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.store);
    let expense = service.update_expense(expense_id, input).await?;
    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<RecordId>,
) -> AppResult<StatusCode> {
    let service = ExpenseService::new(state.store);
    service.delete_expense(expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
