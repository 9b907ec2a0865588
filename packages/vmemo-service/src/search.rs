use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoteService, ServiceError, ServiceResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchItem {
	pub note_id: Uuid,
	pub text: String,
	pub created_at: i64,
	/// Cosine similarity against the query embedding, in [-1, 1].
	pub score: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<SearchItem>,
}

impl NoteService {
	/// Embeds the query and runs a nearest-neighbor search. Results keep the
	/// store's native descending-score order.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "Search query must be non-empty.".to_string(),
			});
		}

		let limit = req.limit.unwrap_or(self.cfg.notes.search_limit);

		if limit == 0 {
			return Err(ServiceError::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			});
		}

		let vector = self.embed_single(query).await?;
		let scored = self.store.query_nearest(vector, limit).await?;
		let items = scored
			.into_iter()
			.map(|scored| SearchItem {
				note_id: scored.note.note_id,
				text: scored.note.text,
				created_at: scored.note.created_at,
				score: scored.score,
			})
			.collect();

		Ok(SearchResponse { items })
	}
}
