use chrono::Utc;
use uuid::Uuid;

use crate::database::{
    DataStore, OrderBy,
    models::{Calculation, LineItemKind, NewLineItem, PayrollLineItem, PayrollSummary},
};
use crate::error::AppError;

/// Employee social-security contribution (INSS), percent of base salary.
pub const INSS_EMPLOYEE_RATE: f64 = 3.0;

/// `round(base * percentage / 100)` in minor units.
pub fn percentage_amount(base_amount: i64, percentage: f64) -> i64 {
    (base_amount as f64 * percentage / 100.0).round() as i64
}

/// Validates the input and freezes its amount. Percentage items keep the
/// base and rate they were computed from, but are never recomputed.
pub fn build_line_item(input: NewLineItem) -> Result<PayrollLineItem, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Line item name is required"));
    }

    let calculation_type = input.calculation.calculation_type();
    let (amount, percentage, base_amount) = match input.calculation {
        Calculation::Fixed { amount } => {
            if amount < 0 {
                return Err(AppError::validation("Amount cannot be negative"));
            }
            (amount, None, None)
        }
        Calculation::Percentage {
            percentage,
            base_amount,
        } => {
            if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
                return Err(AppError::validation(
                    "Percentage must be between 0 and 100",
                ));
            }
            if base_amount < 0 {
                return Err(AppError::validation("Base amount cannot be negative"));
            }
            (
                percentage_amount(base_amount, percentage),
                Some(percentage),
                Some(base_amount),
            )
        }
    };

    Ok(PayrollLineItem {
        id: Uuid::new_v4(),
        kind: input.kind,
        name: name.to_string(),
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        calculation_type,
        amount,
        percentage,
        base_amount,
        created_at: Utc::now(),
    })
}

/// The statutory employee INSS deduction for a base salary.
pub fn statutory_social_security(base_salary: i64) -> NewLineItem {
    NewLineItem {
        kind: LineItemKind::Deduction,
        name: "INSS".to_string(),
        description: Some("Segurança social (contribuição do trabalhador)".to_string()),
        calculation: Calculation::Percentage {
            percentage: INSS_EMPLOYEE_RATE,
            base_amount: base_salary,
        },
    }
}

fn checked_sum(mut amounts: impl Iterator<Item = i64>) -> Result<i64, AppError> {
    amounts
        .try_fold(0i64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(out_of_range)
}

fn out_of_range() -> AppError {
    AppError::validation("Payroll amounts exceed the supported range")
}

pub fn total(items: &[PayrollLineItem]) -> Result<i64, AppError> {
    checked_sum(items.iter().map(|item| item.amount))
}

pub fn total_by_kind(items: &[PayrollLineItem], kind: LineItemKind) -> Result<i64, AppError> {
    checked_sum(
        items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.amount),
    )
}

/// Gross is base plus benefits, net is gross minus deductions. Totals
/// that do not fit in `i64` minor units are a validation error.
pub fn summarize(base_salary: i64, items: &[PayrollLineItem]) -> Result<PayrollSummary, AppError> {
    let benefits = total_by_kind(items, LineItemKind::Benefit)?;
    let deductions = total_by_kind(items, LineItemKind::Deduction)?;
    let gross = base_salary.checked_add(benefits).ok_or_else(out_of_range)?;
    let net = gross.checked_sub(deductions).ok_or_else(out_of_range)?;

    Ok(PayrollSummary {
        base_salary,
        benefits,
        deductions,
        gross,
        net,
    })
}

/// A payslip's line items held in memory by whoever is editing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemList {
    items: Vec<PayrollLineItem>,
}

impl LineItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PayrollLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, input: NewLineItem) -> Result<&PayrollLineItem, AppError> {
        let item = build_line_item(input)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes exactly the item with `id`; the rest keep their order.
    pub fn remove(&mut self, id: Uuid) -> Result<PayrollLineItem, AppError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| AppError::not_found("Payroll line item", id))?;
        Ok(self.items.remove(index))
    }

    pub fn total(&self) -> Result<i64, AppError> {
        total(&self.items)
    }

    pub fn total_by_kind(&self, kind: LineItemKind) -> Result<i64, AppError> {
        total_by_kind(&self.items, kind)
    }

    pub fn summary(&self, base_salary: i64) -> Result<PayrollSummary, AppError> {
        summarize(base_salary, &self.items)
    }
}

impl From<Vec<PayrollLineItem>> for LineItemList {
    fn from(items: Vec<PayrollLineItem>) -> Self {
        Self { items }
    }
}

/// Line items persisted through the data store.
#[derive(Clone)]
pub struct PayrollService<S: DataStore> {
    store: S,
}

impl<S: DataStore> PayrollService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<PayrollLineItem>, AppError> {
        Ok(self
            .store
            .fetch_all::<PayrollLineItem>(Some(&OrderBy::asc("createdAt")))
            .await?)
    }

    pub async fn create(&self, input: NewLineItem) -> Result<PayrollLineItem, AppError> {
        let item = build_line_item(input)?;
        let item = self.store.insert(item).await?;
        log::info!(
            "Created {} line item '{}' ({} minor units)",
            item.kind,
            item.name,
            item.amount
        );
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete::<PayrollLineItem>(id).await? {
            return Err(AppError::not_found("Payroll line item", id));
        }
        log::info!("Deleted payroll line item {}", id);
        Ok(())
    }

    pub async fn summary(&self, base_salary: i64) -> Result<PayrollSummary, AppError> {
        if base_salary < 0 {
            return Err(AppError::validation("Base salary cannot be negative"));
        }
        let items = self.list().await?;
        summarize(base_salary, &items)
    }
}
