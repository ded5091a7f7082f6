//! Employee model.
//!
//! Employees are the people settlements are computed for. The engine only
//! checks their fields; storing them is left to the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Longest employee name accepted.
pub const MAX_NAME_LEN: usize = 100;

/// Longest identity document number accepted.
pub const MAX_DOCUMENT_LEN: usize = 20;

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Identity document number, unique per employee.
    pub document: String,
    /// The contracted monthly base salary.
    pub base_salary: Decimal,
    /// The date the employee joined.
    pub hire_date: NaiveDate,
}

impl Employee {
    /// Creates an employee with a fresh identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "Carlos Gomez",
    ///     "1020304050",
    ///     Decimal::from(1_800_000),
    ///     NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    /// );
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// assert!(employee.validate(today).is_ok());
    /// ```
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        base_salary: Decimal,
        hire_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            document: document.into(),
            base_salary,
            hire_date,
        }
    }

    /// Checks the employee's fields, reporting the first invalid one.
    ///
    /// `today` bounds the hire date; an employee cannot join in the future.
    pub fn validate(&self, today: NaiveDate) -> EngineResult<()> {
        check_text("name", &self.name, MAX_NAME_LEN)?;
        check_text("document", &self.document, MAX_DOCUMENT_LEN)?;

        if self.base_salary <= Decimal::ZERO {
            return Err(invalid("base_salary", "must be greater than zero"));
        }
        if self.hire_date > today {
            return Err(invalid("hire_date", "cannot be in the future"));
        }
        Ok(())
    }
}

fn check_text(field: &str, value: &str, max_len: usize) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "is required"));
    }
    if value.chars().count() > max_len {
        return Err(invalid(
            field,
            &format!("cannot exceed {} characters", max_len),
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}
