use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoteOp, NoteService, ServiceResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub note_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub note_id: Uuid,
	pub op: NoteOp,
}

impl NoteService {
	/// Idempotent: deleting an id that is absent from the collection is a
	/// success, matching the store's own no-op behavior.
	pub async fn delete(&self, req: DeleteRequest) -> ServiceResult<DeleteResponse> {
		self.store.delete_note(req.note_id).await?;

		tracing::debug!(note_id = %req.note_id, "Deleted note.");

		Ok(DeleteResponse { note_id: req.note_id, op: NoteOp::Delete })
	}
}
