/* tests/store_tests.rs */

use revalidate::store::{LocalStore, MemoryStore};

#[tokio::test]
async fn test_memory_store_replace_read() {
	let store = MemoryStore::<i32>::new();
	assert!(store.is_empty().await.unwrap());

	store.replace_all(vec![42, 7]).await.unwrap();

	assert_eq!(store.read_all().await.unwrap(), vec![42, 7]);
	assert_eq!(store.version(), 1);
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_memory_store_replace_event() {
	use revalidate::store::StoreEvent;

	let store = MemoryStore::with_records(vec!["old"]);
	let mut rx = store.subscribe();

	store.replace(vec!["new", "newer"]);

	match rx.recv().await.unwrap() {
		StoreEvent::Replaced { old, new, version } => {
			assert_eq!(*old, vec!["old"]);
			assert_eq!(*new, vec!["new", "newer"]);
			assert_eq!(version, 1);
		}
	}
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_memory_store_event_stream() {
	use futures_util::StreamExt;
	use revalidate::store::StoreEvent;

	let store = MemoryStore::<u8>::new();
	let events = store.stream();

	store.replace(vec![1]);
	store.replace(vec![2, 3]);

	let versions: Vec<u64> = events
		.take(2)
		.map(|event| match event.unwrap() {
			StoreEvent::Replaced { version, .. } => version,
		})
		.collect()
		.await;
	assert_eq!(versions, vec![1, 2]);
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_store_persists_across_reopen() -> Result<(), Box<dyn std::error::Error>> {
	use revalidate::store::SqliteStore;

	let dir = tempfile::tempdir()?;
	let path = dir.path().join("cache.db");

	{
		let store = SqliteStore::<String>::open(&path, "countries")?;
		store.replace_all(vec!["KE".into(), "NG".into()]).await?;
	}

	let reopened = SqliteStore::<String>::open(&path, "countries")?;
	assert_eq!(reopened.read_all().await?, vec!["KE", "NG"]);
	assert!(!reopened.is_empty().await?);

	reopened.replace_all(Vec::new()).await?;
	assert!(reopened.is_empty().await?);
	Ok(())
}

#[cfg(feature = "sqlite")]
#[test]
fn test_sqlite_store_rejects_bad_table() {
	use revalidate::store::{SqliteStore, StoreError};

	let err = SqliteStore::<String>::in_memory("a-b").err().unwrap();
	assert!(matches!(err, StoreError::InvalidTable { .. }));
}

#[cfg(feature = "sqlite")]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_readers_never_see_partial_replace() -> Result<(), Box<dyn std::error::Error>> {
	use std::sync::Arc;

	use revalidate::store::SqliteStore;

	let dir = tempfile::tempdir()?;
	let store = Arc::new(SqliteStore::<u32>::open(dir.path().join("cache.db"), "rounds")?);
	store.replace_all(vec![0; 5]).await?;

	let writer = {
		let store = Arc::clone(&store);
		tokio::spawn(async move {
			for round in 1..=50u32 {
				store.replace_all(vec![round; 5]).await.unwrap();
			}
		})
	};

	let readers: Vec<_> = (0..3)
		.map(|_| {
			let store = Arc::clone(&store);
			tokio::spawn(async move {
				for _ in 0..50 {
					let seen = store.read_all().await.unwrap();
					assert_eq!(seen.len(), 5);
					assert!(seen.iter().all(|round| *round == seen[0]));
				}
			})
		})
		.collect();

	writer.await?;
	for reader in readers {
		reader.await?;
	}
	assert_eq!(store.read_all().await?, vec![50; 5]);
	assert_eq!(store.version(), 51);
	Ok(())
}

#[cfg(all(feature = "sqlite", feature = "events"))]
#[tokio::test]
async fn test_store_changes_through_trait_object() -> Result<(), Box<dyn std::error::Error>> {
	use std::sync::Arc;

	use futures_util::StreamExt;
	use revalidate::store::{SqliteStore, StoreEvent};

	let sqlite = Arc::new(SqliteStore::<String>::in_memory("names")?);
	let memory: Arc<dyn LocalStore<String>> = Arc::new(MemoryStore::<String>::new());
	let shared: Arc<dyn LocalStore<String>> = Arc::clone(&sqlite) as Arc<dyn LocalStore<String>>;
	let stores = [memory, shared];

	for store in &stores {
		let mut changes = store.changes().ok_or("store publishes no changes")?;
		store.replace_all(vec!["ada".to_string()]).await?;

		let StoreEvent::Replaced { old, new, version } = changes.recv().await?;
		assert!(old.is_empty());
		assert_eq!(*new, vec!["ada"]);
		assert_eq!(version, 1);
	}

	let mut stream = sqlite.stream();
	sqlite.replace_all(vec!["grace".to_string()]).await?;
	match stream.next().await {
		Some(Ok(StoreEvent::Replaced { old, version, .. })) => {
			assert_eq!(*old, vec!["ada"]);
			assert_eq!(version, 2);
		}
		other => panic!("unexpected event: {other:?}"),
	}
	Ok(())
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_store_without_changes_reports_none() {
	use async_trait::async_trait;
	use revalidate::store::StoreError;

	struct Fixed;

	#[async_trait]
	impl LocalStore<u8> for Fixed {
		async fn read_all(&self) -> Result<Vec<u8>, StoreError> {
			Ok(vec![1])
		}

		async fn replace_all(&self, _records: Vec<u8>) -> Result<(), StoreError> {
			Ok(())
		}
	}

	assert!(Fixed.changes().is_none());
	assert!(!Fixed.is_empty().await.unwrap());
}
