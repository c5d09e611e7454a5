//! Validation utilities for the Farmkeep record keeper
//!
//! Field-level rules plus the form checks run before a record is created or
//! updated. Form checks never touch the store; they only report which fields
//! are wrong and why.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    CreateCropInput, CreateExpenseInput, CreateFarmInput, CreateTaskInput, Crop, Expense, Farm,
    Task,
};

// ============================================================================
// Form Errors
// ============================================================================

/// Field-keyed validation messages for one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FormErrors {
    pub errors: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. A later message for the same field wins.
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate that a value is present and not only whitespace
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("This field is required");
    }
    Ok(())
}

/// Validate minimum length in characters
pub fn validate_min_length(value: &str, min_length: usize) -> Result<(), &'static str> {
    if value.chars().count() < min_length {
        return Err("Value is too short");
    }
    Ok(())
}

/// Validate maximum length in characters
pub fn validate_max_length(value: &str, max_length: usize) -> Result<(), &'static str> {
    if value.chars().count() > max_length {
        return Err("Value is too long");
    }
    Ok(())
}

/// Validate that a string parses as a number
pub fn validate_number(value: &str) -> Result<Decimal, &'static str> {
    Decimal::from_str(value.trim()).map_err(|_| "Value must be a number")
}

/// Validate that a string parses as a number greater than zero
pub fn validate_positive_number(value: &str) -> Result<Decimal, &'static str> {
    let number = validate_number(value)?;
    if number <= Decimal::ZERO {
        return Err("Value must be greater than zero");
    }
    Ok(number)
}

/// Validate that a string parses as a whole number
pub fn validate_integer(value: &str) -> Result<i64, &'static str> {
    let number = validate_number(value).map_err(|_| "Value must be a whole number")?;
    if !number.fract().is_zero() {
        return Err("Value must be a whole number");
    }
    number.to_i64().ok_or("Value is out of range")
}

/// Validate email format: `local@domain.tld` with no whitespace
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    const INVALID: &str = "Invalid email format";

    if email.chars().any(char::is_whitespace) {
        return Err(INVALID);
    }
    let (local, domain) = email.split_once('@').ok_or(INVALID)?;
    if local.is_empty() || domain.contains('@') {
        return Err(INVALID);
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(INVALID),
    }
}

/// Validate a ten-digit phone number
/// Accepts: 5551234567, (555) 123-4567, 555-123-4567, 555.123.4567
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    const INVALID: &str = "Invalid phone number format";

    let mut rest = phone.strip_prefix('(').unwrap_or(phone);
    take_digits(&mut rest, 3).ok_or(INVALID)?;
    rest = rest.strip_prefix(')').unwrap_or(rest);
    skip_separator(&mut rest);
    take_digits(&mut rest, 3).ok_or(INVALID)?;
    skip_separator(&mut rest);
    take_digits(&mut rest, 4).ok_or(INVALID)?;

    if rest.is_empty() {
        Ok(())
    } else {
        Err(INVALID)
    }
}

fn take_digits(rest: &mut &str, count: usize) -> Option<()> {
    let digits = rest.get(..count)?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    *rest = &rest[count..];
    Some(())
}

fn skip_separator(rest: &mut &str) {
    if let Some(stripped) = rest.strip_prefix(['-', '.', ' ']) {
        *rest = stripped;
    }
}

/// Validate an absolute URL of the form `scheme://host...`
pub fn validate_url(url: &str) -> Result<(), &'static str> {
    const INVALID: &str = "Invalid URL";

    let (scheme, rest) = url.split_once("://").ok_or(INVALID)?;
    let mut scheme_chars = scheme.chars();
    let starts_alpha = scheme_chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_ok = scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();

    if starts_alpha && scheme_ok && !host.is_empty() && !url.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(INVALID)
    }
}

/// Validate password strength: at least 8 characters with a lowercase letter,
/// an uppercase letter and a digit; only letters, digits and `@$!%*?&`
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@$!%*?&".contains(c))
    {
        return Err("Password contains unsupported characters");
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err("Password needs an uppercase letter, a lowercase letter and a number");
    }
    Ok(())
}

/// Validate that `start` is not after `end`
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must not be after end date");
    }
    Ok(())
}

// ============================================================================
// Farm Forms
// ============================================================================

fn check_farm(name: &str, location: &str, size: Option<Decimal>) -> FormErrors {
    let mut errors = FormErrors::new();
    if validate_required(name).is_err() {
        errors.add("name", "Farm name is required");
    }
    if validate_required(location).is_err() {
        errors.add("location", "Location is required");
    }
    if !size.is_some_and(|s| s > Decimal::ZERO) {
        errors.add("size", "Please enter a valid size");
    }
    errors
}

/// Validate a new farm submission
pub fn validate_farm_form(input: &CreateFarmInput) -> FormErrors {
    check_farm(&input.name, &input.location, input.size)
}

/// Validate a farm after an update has been merged into it
pub fn validate_farm(farm: &Farm) -> FormErrors {
    check_farm(&farm.name, &farm.location, Some(farm.size))
}

// ============================================================================
// Crop Forms
// ============================================================================

fn check_crop(
    has_type: bool,
    field_id: &str,
    planting_date: Option<NaiveDate>,
    expected_harvest: Option<NaiveDate>,
) -> FormErrors {
    let mut errors = FormErrors::new();
    if !has_type {
        errors.add("type", "Crop type is required");
    }
    if validate_required(field_id).is_err() {
        errors.add("fieldId", "Field selection is required");
    }
    if planting_date.is_none() {
        errors.add("plantingDate", "Planting date is required");
    }
    if let (Some(planted), Some(harvest)) = (planting_date, expected_harvest) {
        if harvest <= planted {
            errors.add(
                "expectedHarvest",
                "Expected harvest date must be after planting date",
            );
        }
    }
    errors
}

/// Validate a new crop submission
pub fn validate_crop_form(input: &CreateCropInput) -> FormErrors {
    check_crop(
        input.crop_type.is_some(),
        &input.field_id,
        input.planting_date,
        input.expected_harvest,
    )
}

/// Validate a crop after an update has been merged into it
pub fn validate_crop(crop: &Crop) -> FormErrors {
    check_crop(
        true,
        &crop.field_id,
        Some(crop.planting_date),
        crop.expected_harvest,
    )
}

// ============================================================================
// Task Forms
// ============================================================================

fn check_task(title: &str, has_type: bool, has_due_date: bool) -> FormErrors {
    let mut errors = FormErrors::new();
    if validate_required(title).is_err() {
        errors.add("title", "Task title is required");
    }
    if !has_type {
        errors.add("type", "Task type is required");
    }
    if !has_due_date {
        errors.add("dueDate", "Due date is required");
    }
    errors
}

/// Validate a new task submission
pub fn validate_task_form(input: &CreateTaskInput) -> FormErrors {
    check_task(
        &input.title,
        input.task_type.is_some(),
        input.due_date.is_some(),
    )
}

/// Validate a task after an update has been merged into it
pub fn validate_task(task: &Task) -> FormErrors {
    check_task(&task.title, true, true)
}

// ============================================================================
// Expense Forms
// ============================================================================

fn check_expense(
    has_category: bool,
    amount: Option<Decimal>,
    has_date: bool,
    farm_id: Option<u32>,
) -> FormErrors {
    let mut errors = FormErrors::new();
    if !has_category {
        errors.add("category", "Category is required");
    }
    if !amount.is_some_and(|a| a > Decimal::ZERO) {
        errors.add("amount", "Please enter a valid amount");
    }
    if !has_date {
        errors.add("date", "Date is required");
    }
    if !farm_id.is_some_and(|id| id > 0) {
        errors.add("farmId", "Farm selection is required");
    }
    errors
}

/// Validate a new expense submission
pub fn validate_expense_form(input: &CreateExpenseInput) -> FormErrors {
    check_expense(
        input.category.is_some(),
        input.amount,
        input.date.is_some(),
        input.farm_id,
    )
}

/// Validate an expense after an update has been merged into it
pub fn validate_expense(expense: &Expense) -> FormErrors {
    check_expense(true, Some(expense.amount), true, Some(expense.farm_id))
}
