pub const TEXT_PAYLOAD_KEY: &str = "text";
pub const CREATED_AT_PAYLOAD_KEY: &str = "created_at";

use std::collections::HashMap;

use qdrant_client::{
	client::Payload,
	qdrant::{
		CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct,
		PointsIdsList, Query, QueryPointsBuilder, ScrollPointsBuilder, UpsertPointsBuilder, Value,
		VectorParamsBuilder, point_id::PointIdOptions, value::Kind,
	},
};
use uuid::Uuid;

use crate::{
	Error, Result,
	models::{NotePoint, ScoredNotePoint},
};

/// Typed wrapper over the Qdrant connection. Constructed once at process
/// start and shared for the process lifetime; all note persistence goes
/// through it.
pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &vmemo_config::Qdrant) -> Result<Self> {
		let client =
			qdrant_client::Qdrant::from_url(&cfg.url).api_key(cfg.api_key.clone()).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Idempotent collection bootstrap: creates the collection with the
	/// configured dimensionality under cosine distance when it does not
	/// exist yet. A connectivity or auth failure here blocks every later
	/// operation and must abort startup.
	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(self.collection.clone()).await? {
			return Ok(());
		}

		let create = CreateCollectionBuilder::new(self.collection.clone())
			.vectors_config(VectorParamsBuilder::new(self.vector_dim as u64, Distance::Cosine));

		self.client.create_collection(create).await?;

		Ok(())
	}

	/// Insert-or-replace keyed by the note id; at most one point per id.
	pub async fn upsert_note(&self, note: &NotePoint, vector: Vec<f32>) -> Result<()> {
		let mut payload_map = HashMap::new();

		payload_map.insert(TEXT_PAYLOAD_KEY.to_string(), Value::from(note.text.clone()));
		payload_map.insert(CREATED_AT_PAYLOAD_KEY.to_string(), Value::from(note.created_at));

		let point =
			PointStruct::new(note.note_id.to_string(), vector, Payload::from(payload_map));
		let upsert = UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	/// Full scan up to `limit` points, payload only. Ordering is left to the
	/// caller; Qdrant's scroll order carries no chronology.
	pub async fn scroll_notes(&self, limit: u32) -> Result<Vec<NotePoint>> {
		let scroll = ScrollPointsBuilder::new(self.collection.clone())
			.limit(limit)
			.with_payload(true)
			.with_vectors(false);
		let response = self.client.scroll(scroll).await?;
		let mut notes = Vec::with_capacity(response.result.len());

		for point in response.result {
			notes.push(decode_note(point.id.as_ref(), &point.payload)?);
		}

		Ok(notes)
	}

	/// Nearest-neighbor query under the collection's cosine metric. Results
	/// arrive in the store's native descending-score order.
	pub async fn query_nearest(&self, vector: Vec<f32>, limit: u32) -> Result<Vec<ScoredNotePoint>> {
		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.limit(limit as u64)
			.with_payload(true);
		let response = self.client.query(search).await?;
		let mut scored = Vec::with_capacity(response.result.len());

		for point in response.result {
			let note = decode_note(point.id.as_ref(), &point.payload)?;

			scored.push(ScoredNotePoint { note, score: point.score });
		}

		Ok(scored)
	}

	/// Deleting an id that was never stored (or was already deleted) is a
	/// success; the store treats it as a no-op.
	pub async fn delete_note(&self, note_id: Uuid) -> Result<()> {
		let delete = DeletePointsBuilder::new(self.collection.clone())
			.points(PointsIdsList { ids: vec![PointId::from(note_id.to_string())] })
			.wait(true);

		self.client.delete_points(delete).await?;

		Ok(())
	}
}

fn decode_note(id: Option<&PointId>, payload: &HashMap<String, Value>) -> Result<NotePoint> {
	let note_id = id
		.and_then(point_id_to_uuid)
		.ok_or_else(|| Error::InvalidPayload("Point id is not a UUID.".to_string()))?;
	let text = match payload.get(TEXT_PAYLOAD_KEY).and_then(|value| value.kind.as_ref()) {
		Some(Kind::StringValue(text)) => text.clone(),
		_ => return Err(Error::InvalidPayload("Point payload is missing text.".to_string())),
	};
	// Points written before timestamps were recorded carry no created_at.
	let created_at = match payload.get(CREATED_AT_PAYLOAD_KEY).and_then(|value| value.kind.as_ref())
	{
		Some(Kind::IntegerValue(ms)) => *ms,
		_ => 0,
	};

	Ok(NotePoint { note_id, text, created_at })
}

fn point_id_to_uuid(point_id: &PointId) -> Option<Uuid> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Uuid::parse_str(id).ok(),
		_ => None,
	}
}
