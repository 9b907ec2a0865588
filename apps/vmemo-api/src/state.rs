use std::sync::Arc;

use vmemo_service::NoteService;
use vmemo_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NoteService>,
}
impl AppState {
	/// Bootstraps the collection before accepting any request; an
	/// unreachable or misconfigured store aborts startup here instead of
	/// failing on the first write.
	pub async fn new(config: vmemo_config::Config) -> color_eyre::Result<Self> {
		let store = QdrantStore::new(&config.storage.qdrant)?;

		store.ensure_collection().await?;

		tracing::info!(collection = %store.collection, "Qdrant collection ready.");

		let service = NoteService::new(config, store);

		Ok(Self { service: Arc::new(service) })
	}
}
