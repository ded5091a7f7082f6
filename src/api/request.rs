//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Employee, PayrollInput};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// Daytime overtime hours worked.
    #[serde(default)]
    pub day_overtime_hours: i32,
    /// Night overtime hours worked.
    #[serde(default)]
    pub night_overtime_hours: i32,
    /// Additional bonus.
    #[serde(default)]
    pub extra_bonus: Decimal,
    /// Additional deduction.
    #[serde(default)]
    pub extra_deduction: Decimal,
}

impl From<CalculationRequest> for PayrollInput {
    fn from(req: CalculationRequest) -> Self {
        PayrollInput {
            base_salary: req.base_salary,
            day_overtime_hours: req.day_overtime_hours,
            night_overtime_hours: req.night_overtime_hours,
            extra_bonus: req.extra_bonus,
            extra_deduction: req.extra_deduction,
        }
    }
}

/// Employee information in a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Existing identifier; a new one is assigned when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Full name.
    pub name: String,
    /// Identity document number.
    pub document: String,
    /// Contracted monthly base salary.
    pub base_salary: Decimal,
    /// The date the employee joined.
    pub hire_date: NaiveDate,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        let mut employee = Employee::new(req.name, req.document, req.base_salary, req.hire_date);
        if let Some(id) = req.id {
            employee.id = id;
        }
        employee
    }
}

/// Request body for the `/settlements` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// The employee being settled.
    pub employee: EmployeeRequest,
    /// The payroll input for this settlement.
    pub input: CalculationRequest,
    /// Settlement date; today when absent.
    #[serde(default)]
    pub settlement_date: Option<NaiveDate>,
}

/// Request body for `PUT /parameters/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterUpdateRequest {
    /// The new value.
    pub value: Decimal,
}
