//! Compensation steps for multi-write request creation.

use std::sync::Arc;

use tracing::{error, info};

use tirehub_core::traits::ImageStore;
use tirehub_core::types::TireRequestId;
use tirehub_database::TireRequestRepository;

/// An undo action recorded after a forward step succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    /// Remove the persisted request record.
    DeleteRecord,
    /// Remove every file stored for the request.
    DeleteFiles,
}

/// Ordered compensation log for creating one request.
///
/// Steps are recorded as the forward path makes progress and undone in
/// reverse order on failure. Compensation failures are logged and do not
/// replace the original error.
#[derive(Debug)]
pub struct CreateSaga {
    request_id: TireRequestId,
    steps: Vec<Compensation>,
}

impl CreateSaga {
    /// Starts an empty log for `request_id`.
    pub fn new(request_id: TireRequestId) -> Self {
        Self {
            request_id,
            steps: Vec::new(),
        }
    }

    /// Records a compensation, once.
    pub fn record(&mut self, step: Compensation) {
        if !self.steps.contains(&step) {
            self.steps.push(step);
        }
    }

    /// Recorded steps in the order they would be undone.
    pub fn pending(&self) -> impl Iterator<Item = Compensation> + '_ {
        self.steps.iter().rev().copied()
    }

    /// Runs every recorded compensation in reverse order.
    pub async fn roll_back(
        self,
        requests: &Arc<dyn TireRequestRepository>,
        images: &Arc<dyn ImageStore>,
    ) {
        let id = self.request_id;
        for step in self.pending() {
            let outcome = match step {
                Compensation::DeleteFiles => {
                    images.delete_all_for_request(&id.to_string()).await
                }
                Compensation::DeleteRecord => requests.delete(&id).await.map(|_| ()),
            };
            match outcome {
                Ok(()) => info!(request_id = %id, ?step, "Compensation applied"),
                Err(e) => error!(
                    request_id = %id,
                    ?step,
                    error = %e,
                    "Compensation failed; request may be left inconsistent"
                ),
            }
        }
    }
}
