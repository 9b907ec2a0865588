pub mod add_note;
pub mod delete;
pub mod error;
pub mod list;
pub mod search;
pub mod transcribe;

use std::{future::Future, pin::Pin, sync::Arc};

pub use add_note::{AddNoteRequest, AddNoteResponse};
pub use delete::{DeleteRequest, DeleteResponse};
pub use error::{ServiceError, ServiceResult};
pub use list::{ListItem, ListRequest, ListResponse};
pub use search::{SearchItem, SearchRequest, SearchResponse};
pub use transcribe::TranscribeResponse;

use vmemo_config::{Config, EmbeddingProviderConfig, TranscriptionProviderConfig};
use vmemo_providers::{embedding, transcription};
use vmemo_storage::qdrant::QdrantStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, vmemo_providers::Result<Vec<Vec<f32>>>>;
}

pub trait TranscriptionProvider
where
	Self: Send + Sync,
{
	fn transcribe<'a>(
		&'a self,
		cfg: &'a TranscriptionProviderConfig,
		audio: Vec<u8>,
	) -> BoxFuture<'a, vmemo_providers::Result<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteOp {
	Add,
	Delete,
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub transcription: Arc<dyn TranscriptionProvider>,
}

/// The note repository: every user-facing operation (add, list, search,
/// delete, transcribe) goes through one instance that owns the store client
/// and the provider configuration for the process lifetime.
pub struct NoteService {
	pub cfg: Config,
	pub store: QdrantStore,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, vmemo_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl TranscriptionProvider for DefaultProviders {
	fn transcribe<'a>(
		&'a self,
		cfg: &'a TranscriptionProviderConfig,
		audio: Vec<u8>,
	) -> BoxFuture<'a, vmemo_providers::Result<String>> {
		Box::pin(transcription::transcribe(cfg, audio))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		transcription: Arc<dyn TranscriptionProvider>,
	) -> Self {
		Self { embedding, transcription }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), transcription: provider }
	}
}

impl NoteService {
	pub fn new(cfg: Config, store: QdrantStore) -> Self {
		Self { cfg, store, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, store: QdrantStore, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}

	pub(crate) async fn embed_single(&self, text: &str) -> ServiceResult<Vec<f32>> {
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&text.to_string()))
			.await?;
		let vector = embeddings.into_iter().next().ok_or_else(|| ServiceError::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if vector.len() != self.store.vector_dim as usize {
			return Err(ServiceError::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}

pub(crate) fn epoch_millis(ts: time::OffsetDateTime) -> i64 {
	(ts.unix_timestamp_nanos() / 1_000_000) as i64
}
