//! PostgreSQL tire request repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use tirehub_core::error::{AppError, ErrorKind};
use tirehub_core::result::AppResult;
use tirehub_core::traits::Repository;
use tirehub_core::types::TireRequestId;
use tirehub_entity::{TireRequest, TireRequestStatus};

use super::TireRequestRepository;

/// Tire request repository backed by the `tire_requests` table.
#[derive(Debug, Clone)]
pub struct PgTireRequestRepository {
    pool: PgPool,
}

impl PgTireRequestRepository {
    /// Create a new tire request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        clause: &str,
        value: impl for<'q> sqlx::Encode<'q, sqlx::Postgres>
        + sqlx::Type<sqlx::Postgres>
        + Send
        + 'static,
        what: &str,
    ) -> AppResult<Vec<TireRequest>> {
        let sql = format!("SELECT * FROM tire_requests WHERE {clause} ORDER BY request_date DESC");
        sqlx::query_as::<_, TireRequest>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list tire requests by {what}"),
                    e,
                )
            })
    }
}

#[async_trait]
impl Repository<TireRequest, TireRequestId> for PgTireRequestRepository {
    async fn find_by_id(&self, id: &TireRequestId) -> AppResult<Option<TireRequest>> {
        sqlx::query_as::<_, TireRequest>("SELECT * FROM tire_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tire request", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<TireRequest>> {
        sqlx::query_as::<_, TireRequest>("SELECT * FROM tire_requests ORDER BY request_date DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list tire requests", e)
            })
    }

    async fn create(&self, request: &TireRequest) -> AppResult<TireRequest> {
        let d = &request.details;
        sqlx::query_as::<_, TireRequest>(
            "INSERT INTO tire_requests (id, officer_service_no, vehicle_no, vehicle_type, \
                 vehicle_brand, vehicle_model, user_section, replacement_date, existing_make, \
                 tire_size, no_of_tires, no_of_tubes, cost_center, present_km, previous_km, \
                 wear_indicator, wear_pattern, status, request_date, approved_by, \
                 approved_date, rejected_date, image_paths, comments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                     $17, $18, $19, $20, $21, $22, $23, $24) \
             RETURNING *",
        )
        .bind(request.id)
        .bind(&request.officer_service_no)
        .bind(&d.vehicle_no)
        .bind(&d.vehicle_type)
        .bind(&d.vehicle_brand)
        .bind(&d.vehicle_model)
        .bind(&d.user_section)
        .bind(&d.replacement_date)
        .bind(&d.existing_make)
        .bind(&d.tire_size)
        .bind(&d.no_of_tires)
        .bind(&d.no_of_tubes)
        .bind(&d.cost_center)
        .bind(&d.present_km)
        .bind(&d.previous_km)
        .bind(&d.wear_indicator)
        .bind(&d.wear_pattern)
        .bind(request.status)
        .bind(request.request_date)
        .bind(&request.approved_by)
        .bind(request.approved_date)
        .bind(request.rejected_date)
        .bind(&request.image_paths)
        .bind(Json(&request.comments))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tire request", e))
    }

    async fn update(&self, request: &TireRequest) -> AppResult<TireRequest> {
        let d = &request.details;
        sqlx::query_as::<_, TireRequest>(
            "UPDATE tire_requests SET officer_service_no = $2, vehicle_no = $3, \
                 vehicle_type = $4, vehicle_brand = $5, vehicle_model = $6, user_section = $7, \
                 replacement_date = $8, existing_make = $9, tire_size = $10, no_of_tires = $11, \
                 no_of_tubes = $12, cost_center = $13, present_km = $14, previous_km = $15, \
                 wear_indicator = $16, wear_pattern = $17, status = $18, approved_by = $19, \
                 approved_date = $20, rejected_date = $21, image_paths = $22, comments = $23 \
             WHERE id = $1 RETURNING *",
        )
        .bind(request.id)
        .bind(&request.officer_service_no)
        .bind(&d.vehicle_no)
        .bind(&d.vehicle_type)
        .bind(&d.vehicle_brand)
        .bind(&d.vehicle_model)
        .bind(&d.user_section)
        .bind(&d.replacement_date)
        .bind(&d.existing_make)
        .bind(&d.tire_size)
        .bind(&d.no_of_tires)
        .bind(&d.no_of_tubes)
        .bind(&d.cost_center)
        .bind(&d.present_km)
        .bind(&d.previous_km)
        .bind(&d.wear_indicator)
        .bind(&d.wear_pattern)
        .bind(request.status)
        .bind(&request.approved_by)
        .bind(request.approved_date)
        .bind(request.rejected_date)
        .bind(&request.image_paths)
        .bind(Json(&request.comments))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tire request", e))?
        .ok_or_else(|| AppError::not_found(format!("TireRequest {} not found", request.id)))
    }

    async fn delete(&self, id: &TireRequestId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tire_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete tire request", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TireRequestRepository for PgTireRequestRepository {
    async fn find_by_status(&self, status: TireRequestStatus) -> AppResult<Vec<TireRequest>> {
        self.fetch_where("status = $1", status, "status").await
    }

    async fn find_by_officer(&self, officer_service_no: &str) -> AppResult<Vec<TireRequest>> {
        self.fetch_where(
            "officer_service_no = $1",
            officer_service_no.to_string(),
            "officer",
        )
        .await
    }

    async fn find_by_vehicle(&self, vehicle_no: &str) -> AppResult<Vec<TireRequest>> {
        self.fetch_where("vehicle_no = $1", vehicle_no.to_string(), "vehicle")
            .await
    }
}
