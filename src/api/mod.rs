//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for computing payroll,
//! deriving settlements and administering the payroll parameters.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeRequest, ParameterUpdateRequest, SettlementRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
