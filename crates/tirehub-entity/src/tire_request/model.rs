//! Tire request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tirehub_core::error::AppError;
use tirehub_core::types::TireRequestId;

use super::status::{Decision, TireRequestStatus};

/// Vehicle and tire details captured by the request form.
///
/// Every field is free text as submitted; numeric fields are checked at the
/// API boundary before a request is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TireDetails {
    /// Vehicle registration number.
    pub vehicle_no: Option<String>,
    /// Vehicle type (car, van, lorry...).
    pub vehicle_type: Option<String>,
    /// Vehicle make.
    pub vehicle_brand: Option<String>,
    /// Vehicle model.
    pub vehicle_model: Option<String>,
    /// Section the vehicle is assigned to.
    pub user_section: Option<String>,
    /// Date of the last tire replacement.
    pub replacement_date: Option<String>,
    /// Make of the tires currently fitted.
    pub existing_make: Option<String>,
    /// Tire size code.
    pub tire_size: Option<String>,
    /// Number of tires requested.
    pub no_of_tires: Option<String>,
    /// Number of tubes requested.
    pub no_of_tubes: Option<String>,
    /// Cost center to charge.
    pub cost_center: Option<String>,
    /// Odometer reading now.
    pub present_km: Option<String>,
    /// Odometer reading at the previous replacement.
    pub previous_km: Option<String>,
    /// Whether the wear indicator is visible.
    pub wear_indicator: Option<String>,
    /// Observed wear pattern.
    pub wear_pattern: Option<String>,
}

/// One line in a request's append-only comment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    /// When the line was written.
    pub at: DateTime<Utc>,
    /// Employee id of the writer, when known.
    pub author: Option<String>,
    /// Comment text.
    pub text: String,
}

/// A request to replace tires on a vehicle, with its photos and decision.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TireRequest {
    /// Store-assigned identifier.
    pub id: TireRequestId,
    /// Employee id of the requesting officer.
    pub officer_service_no: String,
    /// Vehicle and tire details.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub details: TireDetails,
    /// Lifecycle status.
    pub status: TireRequestStatus,
    /// When the request was submitted.
    pub request_date: DateTime<Utc>,
    /// Employee id of whoever decided the request.
    pub approved_by: Option<String>,
    /// Set when approved; never set together with `rejected_date`.
    pub approved_date: Option<DateTime<Utc>>,
    /// Set when rejected; never set together with `approved_date`.
    pub rejected_date: Option<DateTime<Utc>>,
    /// Generated names of stored images, in upload order.
    pub image_paths: Vec<String>,
    /// Append-only comment log.
    #[sqlx(json)]
    pub comments: Vec<CommentEntry>,
}

impl TireRequest {
    /// Build a freshly submitted request: pending, stamped `now`, no images.
    pub fn submit(
        officer_service_no: impl Into<String>,
        details: TireDetails,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let officer_service_no = officer_service_no.into();
        let comments = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|text| CommentEntry {
                at: now,
                author: Some(officer_service_no.clone()),
                text: text.to_string(),
            })
            .into_iter()
            .collect();

        Self {
            id: TireRequestId::new(),
            officer_service_no,
            details,
            status: TireRequestStatus::Pending,
            request_date: now,
            approved_by: None,
            approved_date: None,
            rejected_date: None,
            image_paths: Vec::new(),
            comments,
        }
    }

    /// Fail with a conflict unless the request is still awaiting a decision.
    pub fn ensure_pending(&self) -> Result<(), AppError> {
        if self.status.is_final() {
            return Err(AppError::conflict(format!(
                "TireRequest {} has already been {}.",
                self.id,
                self.status.as_str().to_lowercase()
            )));
        }
        Ok(())
    }

    /// Record a decision: status, approver, outcome timestamp, and an audit line.
    ///
    /// Exactly one outcome timestamp is set afterwards.
    pub fn record_decision(
        &mut self,
        decision: Decision,
        approver: &str,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) {
        let status = decision.status();
        self.status = status;
        self.approved_by = Some(approver.to_string());

        match decision {
            Decision::Approved => {
                self.approved_date = Some(now);
                self.rejected_date = None;
            }
            Decision::Rejected => {
                self.rejected_date = Some(now);
                self.approved_date = None;
            }
        }

        let text = match comment.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => format!("Status update ({status}): {c}"),
            None => format!("Status update ({status})"),
        };
        self.comments.push(CommentEntry {
            at: now,
            author: Some(approver.to_string()),
            text,
        });
    }

    /// Whether `file_name` is one of this request's stored images.
    pub fn has_image(&self, file_name: &str) -> bool {
        self.image_paths.iter().any(|p| p == file_name)
    }

    /// Drop `file_name` from the image list. Returns `true` if it was listed.
    pub fn remove_image(&mut self, file_name: &str) -> bool {
        let before = self.image_paths.len();
        self.image_paths.retain(|p| p != file_name);
        self.image_paths.len() != before
    }
}
