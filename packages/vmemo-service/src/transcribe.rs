use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{NoteService, ServiceError, ServiceResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
	pub text: String,
}

impl NoteService {
	/// A failed transcription yields an empty transcript with a warning
	/// instead of an error; the caller decides whether an empty transcript
	/// is worth keeping. Nothing can be stored without text, so no note is
	/// written here either way.
	pub async fn transcribe(&self, audio: Vec<u8>) -> ServiceResult<TranscribeResponse> {
		if audio.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "Audio payload must be non-empty.".to_string(),
			});
		}

		let text = match self
			.providers
			.transcription
			.transcribe(&self.cfg.providers.transcription, audio)
			.await
		{
			Ok(text) => text,
			Err(err) => {
				warn!(error = %err, "Transcription failed; returning an empty transcript.");

				String::new()
			},
		};

		Ok(TranscribeResponse { text })
	}
}
