//! In-memory tire request repository.

use async_trait::async_trait;
use dashmap::DashMap;

use tirehub_core::error::AppError;
use tirehub_core::result::AppResult;
use tirehub_core::traits::Repository;
use tirehub_core::types::TireRequestId;
use tirehub_entity::{TireRequest, TireRequestStatus};

use crate::repositories::TireRequestRepository;

/// Tire requests keyed by id.
#[derive(Debug, Default)]
pub struct MemoryTireRequestRepository {
    rows: DashMap<TireRequestId, TireRequest>,
}

impl MemoryTireRequestRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, keep: impl Fn(&TireRequest) -> bool) -> Vec<TireRequest> {
        let mut matched: Vec<TireRequest> = self
            .rows
            .iter()
            .filter(|row| keep(row.value()))
            .map(|row| row.clone())
            .collect();
        matched.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        matched
    }
}

#[async_trait]
impl Repository<TireRequest, TireRequestId> for MemoryTireRequestRepository {
    async fn find_by_id(&self, id: &TireRequestId) -> AppResult<Option<TireRequest>> {
        Ok(self.rows.get(id).map(|row| row.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<TireRequest>> {
        Ok(self.collect_where(|_| true))
    }

    async fn create(&self, request: &TireRequest) -> AppResult<TireRequest> {
        if self.rows.contains_key(&request.id) {
            return Err(AppError::conflict(format!(
                "TireRequest {} already exists",
                request.id
            )));
        }
        self.rows.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn update(&self, request: &TireRequest) -> AppResult<TireRequest> {
        match self.rows.get_mut(&request.id) {
            Some(mut row) => {
                *row = request.clone();
                Ok(request.clone())
            }
            None => Err(AppError::not_found(format!(
                "TireRequest {} not found",
                request.id
            ))),
        }
    }

    async fn delete(&self, id: &TireRequestId) -> AppResult<bool> {
        Ok(self.rows.remove(id).is_some())
    }
}

#[async_trait]
impl TireRequestRepository for MemoryTireRequestRepository {
    async fn find_by_status(&self, status: TireRequestStatus) -> AppResult<Vec<TireRequest>> {
        Ok(self.collect_where(|r| r.status == status))
    }

    async fn find_by_officer(&self, officer_service_no: &str) -> AppResult<Vec<TireRequest>> {
        Ok(self.collect_where(|r| r.officer_service_no == officer_service_no))
    }

    async fn find_by_vehicle(&self, vehicle_no: &str) -> AppResult<Vec<TireRequest>> {
        Ok(self.collect_where(|r| r.details.vehicle_no.as_deref() == Some(vehicle_no)))
    }
}
