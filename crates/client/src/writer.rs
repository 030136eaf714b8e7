//! The assignment write seam.

use async_trait::async_trait;
use mdb_core::assignment::TraineeAssignment;
use mdb_core::types::DbId;

use crate::api::MdbApi;
use crate::error::ClientError;

/// Persists the assigned values of one trainee.
///
/// The write always carries all three axes; `None` clears an axis.
#[async_trait]
pub trait AssignmentWriter: Send + Sync {
    async fn write_assignment(
        &self,
        trainee_id: DbId,
        assignment: TraineeAssignment,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl AssignmentWriter for MdbApi {
    async fn write_assignment(
        &self,
        trainee_id: DbId,
        assignment: TraineeAssignment,
    ) -> Result<(), ClientError> {
        self.update_assignment(trainee_id, &assignment).await
    }
}
