use uuid::Uuid;

use vmemo_storage::{models::NotePoint, qdrant::QdrantStore};

fn store_for(collection: &str, url: String) -> QdrantStore {
	let cfg = vmemo_config::Qdrant {
		url,
		api_key: vmemo_testkit::env_qdrant_api_key(),
		collection: collection.to_string(),
		vector_dim: 4,
	};

	QdrantStore::new(&cfg).expect("Failed to build Qdrant store.")
}

fn note(text: &str, created_at: i64) -> NotePoint {
	NotePoint { note_id: Uuid::new_v4(), text: text.to_string(), created_at }
}

fn tk(err: vmemo_storage::Error) -> vmemo_testkit::Error {
	vmemo_testkit::Error::Message(err.to_string())
}

#[tokio::test]
async fn bootstrap_upsert_scroll_delete_roundtrip() {
	let Some(url) = vmemo_testkit::env_qdrant_url() else {
		eprintln!("Skipping; set VMEMO_QDRANT_URL to run Qdrant integration tests.");

		return;
	};

	vmemo_testkit::with_test_collection("vmemo_storage", |collection| {
		let store = store_for(collection.name(), url.clone());

		async move {
			store.ensure_collection().await.map_err(tk)?;
			// Idempotent: the second bootstrap neither errors nor recreates.
			store.ensure_collection().await.map_err(tk)?;

			let first = note("first note", 1_000);
			let second = note("second note", 2_000);

			store.upsert_note(&first, vec![1.0, 0.0, 0.0, 0.0]).await.map_err(tk)?;
			store.upsert_note(&second, vec![0.0, 1.0, 0.0, 0.0]).await.map_err(tk)?;

			let notes = store.scroll_notes(100).await.map_err(tk)?;

			assert_eq!(notes.len(), 2);
			assert!(notes.iter().any(|n| n.note_id == first.note_id && n.text == "first note"));
			assert!(notes.iter().any(|n| n.note_id == second.note_id && n.created_at == 2_000));

			let scored = store.query_nearest(vec![1.0, 0.0, 0.0, 0.0], 10).await.map_err(tk)?;

			assert!(!scored.is_empty());
			assert_eq!(scored[0].note.note_id, first.note_id);
			assert!(scored.windows(2).all(|pair| pair[0].score >= pair[1].score));
			assert!(scored.iter().all(|s| (-1.0..=1.0001).contains(&s.score)));

			store.delete_note(first.note_id).await.map_err(tk)?;
			// Idempotent delete: removing an already absent id is a success.
			store.delete_note(first.note_id).await.map_err(tk)?;
			store.delete_note(Uuid::new_v4()).await.map_err(tk)?;

			let remaining = store.scroll_notes(100).await.map_err(tk)?;

			assert_eq!(remaining.len(), 1);
			assert_eq!(remaining[0].note_id, second.note_id);

			Ok(())
		}
	})
	.await
	.expect("Qdrant roundtrip failed.");
}

#[tokio::test]
async fn scroll_respects_limit() {
	let Some(url) = vmemo_testkit::env_qdrant_url() else {
		eprintln!("Skipping; set VMEMO_QDRANT_URL to run Qdrant integration tests.");

		return;
	};

	vmemo_testkit::with_test_collection("vmemo_storage_limit", |collection| {
		let store = store_for(collection.name(), url.clone());

		async move {
			store.ensure_collection().await.map_err(tk)?;

			for i in 0..5 {
				store
					.upsert_note(&note(&format!("note {i}"), i), vec![0.0, 0.0, 1.0, 0.0])
					.await
					.map_err(tk)?;
			}

			let notes = store.scroll_notes(3).await.map_err(tk)?;

			assert_eq!(notes.len(), 3);

			Ok(())
		}
	})
	.await
	.expect("Qdrant scroll limit test failed.");
}
