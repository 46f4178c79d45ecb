//! Tire request lifecycle: submission with images, decisions, and image access.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tirehub_core::error::{AppError, ErrorKind};
use tirehub_core::result::AppResult;
use tirehub_core::traits::{Attachment, ImageResource, ImageStore};
use tirehub_core::types::TireRequestId;
use tirehub_database::{EmployeeRepository, TireRequestRepository};
use tirehub_entity::{Decision, TireDetails, TireRequest, TireRequestStatus};

use super::saga::{Compensation, CreateSaga};
use crate::context::Principal;

/// A submitted request form. Status, dates and images are never taken from
/// the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTireRequest {
    /// Owner reference; must name an existing employee.
    pub officer_service_no: Option<String>,
    /// Vehicle and tire details.
    pub details: TireDetails,
    /// Optional note logged as the first comment.
    pub comments: Option<String>,
}

/// A requested status change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusChange {
    /// Target status label (`Approved` or `Rejected`, any case).
    pub status: Option<String>,
    /// Deciding employee; defaults to the acting principal.
    pub approved_by: Option<String>,
    /// Optional note appended to the audit line.
    pub comments: Option<String>,
}

/// Orchestrates tire request records and their stored images.
#[derive(Debug, Clone)]
pub struct TireRequestService {
    requests: Arc<dyn TireRequestRepository>,
    employees: Arc<dyn EmployeeRepository>,
    images: Arc<dyn ImageStore>,
}

impl TireRequestService {
    /// Creates a new tire request service.
    pub fn new(
        requests: Arc<dyn TireRequestRepository>,
        employees: Arc<dyn EmployeeRepository>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            requests,
            employees,
            images,
        }
    }

    /// Submits a request and stores its images.
    ///
    /// The record is persisted first so its id can name the image directory,
    /// then each non-empty attachment is stored, then the record is saved
    /// again with the stored names. Any failure after the first write undoes
    /// what was done and no partial request remains.
    pub async fn create(
        &self,
        new: NewTireRequest,
        attachments: Vec<Attachment>,
    ) -> AppResult<TireRequest> {
        let owner = self.existing_employee(new.officer_service_no.as_deref()).await?;
        let Some(owner) = owner else {
            warn!(
                officer_service_no = ?new.officer_service_no,
                "Rejected tire request with unknown owner"
            );
            return Err(AppError::validation("Invalid or missing officerServiceNo."));
        };

        let mut request =
            TireRequest::submit(owner, new.details, new.comments.as_deref(), Utc::now());
        let mut saga = CreateSaga::new(request.id);

        request = self.requests.create(&request).await?;
        saga.record(Compensation::DeleteRecord);

        let request_key = request.id.to_string();
        let mut stored = Vec::new();
        for attachment in attachments.iter().filter(|a| !a.is_empty()) {
            saga.record(Compensation::DeleteFiles);
            match self.images.store(attachment, &request_key).await {
                Ok(name) => stored.push(name),
                Err(e) => {
                    let client_name = attachment.file_name.as_deref().unwrap_or_default();
                    warn!(
                        request_id = %request.id,
                        file_name = client_name,
                        error = %e,
                        "Image storage failed; rolling back tire request"
                    );
                    saga.roll_back(&self.requests, &self.images).await;
                    return Err(AppError::with_source(
                        e.kind,
                        format!("Failed to store image {client_name}: {}", e.message),
                        e,
                    ));
                }
            }
        }

        if !stored.is_empty() {
            request.image_paths = stored;
            request = match self.requests.update(&request).await {
                Ok(saved) => saved,
                Err(e) => {
                    saga.roll_back(&self.requests, &self.images).await;
                    return Err(e);
                }
            };
        }

        info!(
            request_id = %request.id,
            officer_service_no = %request.officer_service_no,
            images = request.image_paths.len(),
            "Tire request created"
        );
        Ok(request)
    }

    /// Fetches one request.
    pub async fn get(&self, id: &TireRequestId) -> AppResult<TireRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("TireRequest not found."))
    }

    /// Every request, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<TireRequest>> {
        self.requests.find_all().await
    }

    /// Requests submitted by one employee. Unknown employees are not found.
    pub async fn list_by_owner(&self, officer_service_no: &str) -> AppResult<Vec<TireRequest>> {
        if !self.employees.exists(officer_service_no).await? {
            return Err(AppError::not_found(format!(
                "Employee {officer_service_no} not found"
            )));
        }
        self.requests.find_by_officer(officer_service_no).await
    }

    /// Requests in a status given by label (case-insensitive).
    pub async fn list_by_status(&self, status: &str) -> AppResult<Vec<TireRequest>> {
        let status: TireRequestStatus = status.parse()?;
        self.requests.find_by_status(status).await
    }

    /// Requests for one vehicle.
    pub async fn list_by_vehicle(&self, vehicle_no: &str) -> AppResult<Vec<TireRequest>> {
        self.requests.find_by_vehicle(vehicle_no).await
    }

    /// Approves or rejects a pending request.
    ///
    /// Checks run in order: the request exists, the approver exists, the
    /// status is a valid decision, the request is still pending. Nothing is
    /// written unless all pass.
    pub async fn transition(
        &self,
        principal: &Principal,
        id: &TireRequestId,
        change: StatusChange,
    ) -> AppResult<TireRequest> {
        let mut request = self.get(id).await?;

        let approver_candidate = change
            .approved_by
            .as_deref()
            .or(Some(principal.employee_id.as_str()));
        let Some(approver) = self.existing_employee(approver_candidate).await? else {
            warn!(request_id = %id, approved_by = ?change.approved_by, "Rejected unknown approver");
            return Err(AppError::validation(
                "Invalid or missing approvedBy employee ID.",
            ));
        };

        let decision: Decision = change.status.as_deref().unwrap_or_default().parse()?;
        request.ensure_pending()?;

        request.record_decision(decision, &approver, change.comments.as_deref(), Utc::now());
        let updated = self.requests.update(&request).await?;

        info!(
            request_id = %updated.id,
            status = %updated.status,
            approved_by = %approver,
            acted_by = %principal.employee_id,
            "Tire request status changed"
        );
        Ok(updated)
    }

    /// Removes one image from a request.
    ///
    /// The file is deleted before the record changes, so a storage failure
    /// leaves the record untouched. Users may only detach from their own
    /// requests.
    pub async fn detach_image(
        &self,
        principal: &Principal,
        id: &TireRequestId,
        file_name: &str,
    ) -> AppResult<TireRequest> {
        let mut request = self.get(id).await?;

        if !principal.may_act_for(&request.officer_service_no) {
            warn!(
                request_id = %id,
                employee_id = %principal.employee_id,
                "Rejected image detach on another officer's request"
            );
            return Err(AppError::authorization(
                "You can only modify your own tire requests.",
            ));
        }

        if !request.has_image(file_name) {
            return Err(AppError::not_found(
                "Filename not associated with this TireRequest.",
            ));
        }

        self.images
            .delete(file_name, &id.to_string())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Could not delete file: {}", e.message),
                    e,
                )
            })?;

        request.remove_image(file_name);
        let updated = self.requests.update(&request).await?;
        info!(request_id = %id, file_name, "Image detached");
        Ok(updated)
    }

    /// Opens a stored image for streaming.
    pub async fn open_image(&self, request_id: &str, file_name: &str) -> AppResult<ImageResource> {
        self.images.load_as_resource(file_name, request_id).await
    }

    /// Trimmed `candidate` when it names an existing employee.
    async fn existing_employee(&self, candidate: Option<&str>) -> AppResult<Option<String>> {
        let Some(id) = candidate.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        Ok(self
            .employees
            .exists(id)
            .await?
            .then(|| id.to_string()))
    }
}
