use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoteService, ServiceError, ServiceResult};
use vmemo_storage::models::NotePoint;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRequest {
	pub limit: Option<u32>,
}

/// A listed note carries no similarity score; the scored shape lives in
/// [`crate::search::SearchItem`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListItem {
	pub note_id: Uuid,
	pub text: String,
	pub created_at: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<ListItem>,
}

impl NoteService {
	/// Full scan up to `limit` notes, newest first. This is a capped scan,
	/// not pagination; notes beyond the cap are not reachable here.
	pub async fn list(&self, req: ListRequest) -> ServiceResult<ListResponse> {
		let limit = req.limit.unwrap_or(self.cfg.notes.list_limit);

		if limit == 0 {
			return Err(ServiceError::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			});
		}

		let mut notes = self.store.scroll_notes(limit).await?;

		sort_newest_first(&mut notes);

		let items = notes
			.into_iter()
			.map(|note| ListItem {
				note_id: note.note_id,
				text: note.text,
				created_at: note.created_at,
			})
			.collect();

		Ok(ListResponse { items })
	}
}

fn sort_newest_first(notes: &mut [NotePoint]) {
	notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
