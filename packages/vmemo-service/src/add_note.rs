use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{NoteOp, NoteService, ServiceError, ServiceResult, epoch_millis};
use vmemo_storage::models::NotePoint;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddNoteRequest {
	pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddNoteResponse {
	pub note_id: Uuid,
	pub created_at: i64,
	pub op: NoteOp,
}

impl NoteService {
	/// Embeds the text, assigns a fresh UUID and an epoch-millisecond
	/// timestamp, and upserts the point. Blank input is rejected before any
	/// remote call, so a rejected add leaves the collection untouched.
	pub async fn add_note(&self, req: AddNoteRequest) -> ServiceResult<AddNoteResponse> {
		let text = req.text.trim();

		if text.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "Note text must be non-empty.".to_string(),
			});
		}
		if text.chars().count() > self.cfg.notes.max_note_chars as usize {
			return Err(ServiceError::InvalidRequest {
				message: format!(
					"Note text exceeds {} characters.",
					self.cfg.notes.max_note_chars
				),
			});
		}

		let vector = self.embed_single(text).await?;
		let note = NotePoint {
			note_id: Uuid::new_v4(),
			text: text.to_string(),
			created_at: epoch_millis(OffsetDateTime::now_utc()),
		};

		self.store.upsert_note(&note, vector).await?;

		tracing::debug!(note_id = %note.note_id, "Stored note.");

		Ok(AddNoteResponse { note_id: note.note_id, created_at: note.created_at, op: NoteOp::Add })
	}
}
