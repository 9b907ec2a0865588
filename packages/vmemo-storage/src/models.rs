use uuid::Uuid;

/// A stored note as decoded from a Qdrant point payload. `created_at` is
/// epoch milliseconds; points written before timestamps were recorded decode
/// as 0 and sort last in chronological listings.
#[derive(Debug, Clone, PartialEq)]
pub struct NotePoint {
	pub note_id: Uuid,
	pub text: String,
	pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNotePoint {
	pub note: NotePoint,
	pub score: f32,
}
