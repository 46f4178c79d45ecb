//! Request DTOs with validation.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use tirehub_core::error::AppError;
use tirehub_core::result::AppResult;
use tirehub_entity::TireDetails;
use tirehub_service::{EmployeePatch, NewEmployee, NewTireRequest, StatusChange};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    #[serde(default)]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

/// Registration and administrative create body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    #[serde(default)]
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Email should be valid"))]
    #[serde(default)]
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub job_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            employee_id: req.employee_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            address: req.address,
            position: req.position,
            department: req.department,
            job_start_date: req.job_start_date,
            password: req.password,
            role: req.role,
        }
    }
}

/// Partial employee update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(custom(function = "blank_or_email"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub job_start_date: Option<NaiveDate>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl From<UpdateEmployeeRequest> for EmployeePatch {
    fn from(req: UpdateEmployeeRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            address: req.address,
            position: req.position,
            department: req.department,
            job_start_date: req.job_start_date,
            password: req.password,
            role: req.role,
        }
    }
}

/// The `tireRequest` part of a multipart submission.
///
/// Server-managed fields a client might echo back (`id`, `status`,
/// `imagePaths`, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TireRequestForm {
    #[validate(length(max = 10, message = "Vehicle number must be at most 10 characters"))]
    pub vehicle_no: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub user_section: Option<String>,
    pub replacement_date: Option<String>,
    pub existing_make: Option<String>,
    pub tire_size: Option<String>,
    pub no_of_tires: Option<String>,
    pub no_of_tubes: Option<String>,
    #[validate(length(max = 15, message = "Cost center must be at most 15 characters"))]
    pub cost_center: Option<String>,
    pub present_km: Option<String>,
    pub previous_km: Option<String>,
    pub wear_indicator: Option<String>,
    pub wear_pattern: Option<String>,
    #[validate(length(max = 10, message = "Officer service number must be at most 10 characters"))]
    pub officer_service_no: Option<String>,
    #[validate(length(max = 500, message = "Comments must be at most 500 characters"))]
    pub comments: Option<String>,
}

impl TireRequestForm {
    /// Checks the numeric-text fields. Blank or absent values are not checked.
    pub fn check_numbers(&self) -> AppResult<()> {
        let tires = parse_number::<i64>("noOfTires", &self.no_of_tires)?;
        if tires.is_some_and(|n| n <= 0) {
            return Err(AppError::validation("noOfTires must be a positive integer"));
        }
        let tubes = parse_number::<i64>("noOfTubes", &self.no_of_tubes)?;
        if tubes.is_some_and(|n| n < 0) {
            return Err(AppError::validation(
                "noOfTubes must be a non-negative integer",
            ));
        }

        let present = parse_number::<f64>("presentKm", &self.present_km)?;
        let previous = parse_number::<f64>("previousKm", &self.previous_km)?;
        if present.is_some_and(|km| km <= 0.0) {
            return Err(AppError::validation("presentKm must be positive"));
        }
        if previous.is_some_and(|km| km < 0.0) {
            return Err(AppError::validation("previousKm must not be negative"));
        }
        if present
            .zip(previous)
            .is_some_and(|(present, previous)| present < previous)
        {
            return Err(AppError::validation(
                "presentKm must not be less than previousKm",
            ));
        }
        Ok(())
    }
}

impl From<TireRequestForm> for NewTireRequest {
    fn from(form: TireRequestForm) -> Self {
        Self {
            officer_service_no: form.officer_service_no,
            details: TireDetails {
                vehicle_no: form.vehicle_no,
                vehicle_type: form.vehicle_type,
                vehicle_brand: form.vehicle_brand,
                vehicle_model: form.vehicle_model,
                user_section: form.user_section,
                replacement_date: form.replacement_date,
                existing_make: form.existing_make,
                tire_size: form.tire_size,
                no_of_tires: form.no_of_tires,
                no_of_tubes: form.no_of_tubes,
                cost_center: form.cost_center,
                present_km: form.present_km,
                previous_km: form.previous_km,
                wear_indicator: form.wear_indicator,
                wear_pattern: form.wear_pattern,
            },
            comments: form.comments,
        }
    }
}

/// A blank email clears the field on update; anything else must be an address.
fn blank_or_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || email.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message("Email should be valid".into()))
}

/// Numbers accepted in the numeric-text form fields.
trait FormNumber: FromStr {
    fn is_acceptable(&self) -> bool {
        true
    }
}

impl FormNumber for i64 {}

impl FormNumber for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite()
    }
}

fn parse_number<T: FormNumber>(field: &str, value: &Option<String>) -> AppResult<Option<T>> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(n) if n.is_acceptable() => Ok(Some(n)),
        _ => Err(AppError::validation(format!(
            "{field} must be a number, got '{raw}'"
        ))),
    }
}

/// Approve/reject body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub approved_by: Option<String>,
    #[validate(length(max = 500, message = "Comments must be at most 500 characters"))]
    pub comments: Option<String>,
}

impl From<StatusUpdateRequest> for StatusChange {
    fn from(req: StatusUpdateRequest) -> Self {
        Self {
            status: req.status,
            approved_by: req.approved_by,
            comments: req.comments,
        }
    }
}
