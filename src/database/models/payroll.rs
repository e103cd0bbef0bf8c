use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// A deduction or benefit on a payslip. Money is in minor units (cêntimos).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLineItem {
    pub id: Uuid,
    pub kind: LineItemKind,
    pub name: String,
    pub description: Option<String>,
    pub calculation_type: CalculationType,
    pub amount: i64,
    pub percentage: Option<f64>,
    pub base_amount: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub kind: LineItemKind,
    pub name: String,
    pub description: Option<String>,
    pub calculation: Calculation,
}

/// How a line item's amount is obtained at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Calculation {
    #[serde(rename_all = "camelCase")]
    Fixed { amount: i64 },
    #[serde(rename_all = "camelCase")]
    Percentage { percentage: f64, base_amount: i64 },
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum LineItemKind {
        Deduction => "deduction",
        Benefit => "benefit",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum CalculationType {
        Fixed => "fixed",
        Percentage => "percentage",
    }
}

impl Calculation {
    pub fn calculation_type(&self) -> CalculationType {
        match self {
            Calculation::Fixed { .. } => CalculationType::Fixed,
            Calculation::Percentage { .. } => CalculationType::Percentage,
        }
    }
}

/// Totals for one payslip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub base_salary: i64,
    pub benefits: i64,
    pub deductions: i64,
    pub gross: i64,
    pub net: i64,
}
