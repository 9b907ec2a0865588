mod error;

pub use error::{Error, Result};

use std::{env, future::Future, thread, time::Duration};

use qdrant_client::Qdrant;
use tokio::{runtime::Builder, time};
use uuid::Uuid;

pub fn env_qdrant_url() -> Option<String> {
	env::var("VMEMO_QDRANT_URL").ok()
}

pub fn env_qdrant_api_key() -> Option<String> {
	env::var("VMEMO_QDRANT_API_KEY").ok()
}

/// A uniquely named Qdrant collection for one test. Dropped collections are
/// deleted from the instance named by `VMEMO_QDRANT_URL`; cleanup is retried
/// with backoff because collection deletion can race collection creation on
/// a busy instance.
pub struct TestCollection {
	name: String,
	cleaned: bool,
}
impl TestCollection {
	pub fn new(prefix: &str) -> Self {
		let name = format!("{prefix}_{}", Uuid::new_v4().simple());

		Self { name, cleaned: false }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		cleanup_collection(&self.name).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestCollection {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let name = self.name.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test collection cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(cleanup_collection(&name)) {
				eprintln!("Test collection cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

pub fn test_client() -> Result<Qdrant> {
	let Some(url) = env_qdrant_url() else {
		return Err(Error::Message(
			"Set VMEMO_QDRANT_URL to run Qdrant integration tests.".to_string(),
		));
	};

	Qdrant::from_url(&url)
		.api_key(env_qdrant_api_key())
		.build()
		.map_err(|err| Error::Message(format!("Failed to build Qdrant client: {err}.")))
}

pub async fn with_test_collection<F, Fut, T>(prefix: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestCollection) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let collection = TestCollection::new(prefix);
	let result = f(&collection).await;
	let mut collection = collection;

	if let Err(err) = collection.cleanup_inner().await {
		eprintln!("Test collection cleanup warning: {err}.");

		if result.is_ok() {
			return Err(err);
		}
	}

	result
}

async fn cleanup_collection(name: &str) -> Result<()> {
	let Some(_) = env_qdrant_url() else {
		eprintln!("Skipping Qdrant cleanup; set VMEMO_QDRANT_URL to delete test collections.");

		return Ok(());
	};
	let client = test_client()?;
	let max_attempts = 6;
	let mut backoff = Duration::from_millis(100);
	let mut last_err = None;

	for attempt in 1..=max_attempts {
		let exists = time::timeout(Duration::from_secs(10), client.collection_exists(name))
			.await
			.map_err(|_| Error::Message("Qdrant collection_exists timed out.".to_string()))?
			.map_err(|err| Error::Message(format!("Failed to check Qdrant collection: {err}.")))?;

		if !exists {
			return Ok(());
		}

		let result =
			time::timeout(Duration::from_secs(10), client.delete_collection(name.to_string()))
				.await;

		match result {
			Ok(Ok(_)) => return Ok(()),
			Ok(Err(err)) => {
				last_err = Some(format!("{err}"));
			},
			Err(_) => {
				last_err = Some("timed out".to_string());
			},
		}

		if attempt < max_attempts {
			time::sleep(backoff).await;

			backoff = backoff.saturating_mul(2).min(Duration::from_secs(2));
		}
	}

	Err(Error::Message(format!(
		"Failed to delete Qdrant collection {name:?} after {max_attempts} attempts: {last_err:?}."
	)))
}
