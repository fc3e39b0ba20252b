/* src/store/sqlite.rs */

use std::marker::PhantomData;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "events")]
use super::{DEFAULT_EVENT_CAPACITY, EventStream, StoreEvent};
use super::{LocalStore, StoreError};

/// SQLite-backed store keeping one collection per table.
///
/// Records are stored as JSON text keyed by their position, so reads return
/// them in the order they were inserted. Engine calls run on the blocking
/// pool and never stall the async runtime.
///
/// The version counter starts at zero for every opened handle; it counts the
/// replaces committed through this handle, not the history of the file.
pub struct SqliteStore<T> {
	connection: Arc<Mutex<Connection>>,
	table: Arc<str>,
	version: Arc<AtomicU64>,
	#[cfg(feature = "events")]
	events: tokio::sync::broadcast::Sender<StoreEvent<T>>,
	_record: PhantomData<fn() -> T>,
}

impl<T> SqliteStore<T> {
	/// Opens (or creates) the database at `path` and ensures `table` exists.
	pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, StoreError> {
		let connection = Connection::open(path)?;
		Self::from_connection(connection, table)
	}

	/// Opens a private in-memory database.
	pub fn in_memory(table: &str) -> Result<Self, StoreError> {
		let connection = Connection::open_in_memory()?;
		Self::from_connection(connection, table)
	}

	fn from_connection(connection: Connection, table: &str) -> Result<Self, StoreError> {
		validate_table(table)?;
		let ddl = format!(
			"CREATE TABLE IF NOT EXISTS {table} (
				position INTEGER PRIMARY KEY,
				record_json TEXT NOT NULL
			);"
		);
		connection.execute_batch(&ddl)?;
		Ok(Self {
			connection: Arc::new(Mutex::new(connection)),
			table: Arc::from(table),
			version: Arc::new(AtomicU64::new(0)),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
			_record: PhantomData,
		})
	}

	/// The table holding this store's collection.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Number of replaces committed through this handle.
	pub fn version(&self) -> u64 {
		self.version.load(Ordering::SeqCst)
	}

	/// Subscribes to committed replaces.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent<T>> {
		self.events.subscribe()
	}

	/// Subscribes to committed replaces as a [`futures_util::Stream`].
	#[cfg(feature = "events")]
	pub fn stream(&self) -> EventStream<T>
	where
		T: Clone + Send + Sync + 'static,
	{
		EventStream::new(self.subscribe())
	}
}

fn validate_table(table: &str) -> Result<(), StoreError> {
	let mut chars = table.chars();
	let valid = match chars.next() {
		Some(first) => {
			(first.is_ascii_alphabetic() || first == '_')
				&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		}
		None => false,
	};
	if valid {
		Ok(())
	} else {
		Err(StoreError::InvalidTable {
			table: table.to_string(),
		})
	}
}

fn read_rows<T: DeserializeOwned>(connection: &Connection, table: &str) -> Result<Vec<T>, StoreError> {
	let mut stmt = connection.prepare(&format!(
		"SELECT record_json FROM {table} ORDER BY position ASC"
	))?;
	let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

	let mut records = Vec::new();
	for json in rows {
		let json = json?;
		records.push(serde_json::from_str(&json)?);
	}
	Ok(records)
}

/// Replaces every row of `table`. When `keep_old` is set, the rows being
/// deleted are decoded inside the same transaction and returned.
fn write_rows<T: Serialize + DeserializeOwned>(
	connection: &mut Connection,
	table: &str,
	records: &[T],
	keep_old: bool,
) -> Result<Option<Vec<T>>, StoreError> {
	// Encode first so a bad record never opens a transaction.
	let encoded = records
		.iter()
		.map(serde_json::to_string)
		.collect::<Result<Vec<_>, _>>()?;

	let tx = connection.transaction()?;
	let old = if keep_old { Some(read_rows(&tx, table)?) } else { None };
	tx.execute(&format!("DELETE FROM {table}"), [])?;
	{
		let mut stmt = tx.prepare(&format!(
			"INSERT INTO {table} (position, record_json) VALUES (?1, ?2)"
		))?;
		for (position, json) in encoded.iter().enumerate() {
			stmt.execute(params![position as i64, json])?;
		}
	}
	tx.commit()?;
	Ok(old)
}

#[async_trait]
impl<T> LocalStore<T> for SqliteStore<T>
where
	T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
	async fn read_all(&self) -> Result<Vec<T>, StoreError> {
		let connection = Arc::clone(&self.connection);
		let table = Arc::clone(&self.table);
		tokio::task::spawn_blocking(move || -> Result<Vec<T>, StoreError> {
			let connection = connection.lock().map_err(|_| StoreError::Poisoned)?;
			read_rows(&connection, &table)
		})
		.await?
	}

	async fn replace_all(&self, records: Vec<T>) -> Result<(), StoreError> {
		let connection = Arc::clone(&self.connection);
		let table = Arc::clone(&self.table);
		let version = Arc::clone(&self.version);
		#[cfg(feature = "events")]
		let events = self.events.clone();

		tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
			let mut connection = connection.lock().map_err(|_| StoreError::Poisoned)?;

			#[cfg(feature = "events")]
			let keep_old = events.receiver_count() > 0;
			#[cfg(not(feature = "events"))]
			let keep_old = false;

			let old = write_rows(&mut connection, &table, &records, keep_old)?;
			// Still under the connection lock: versions and events follow commit order.
			let version = version.fetch_add(1, Ordering::SeqCst) + 1;

			#[cfg(feature = "events")]
			{
				if let Some(old) = old {
					let _ = events.send(StoreEvent::Replaced {
						old: Arc::new(old),
						new: Arc::new(records),
						version,
					});
				}
			}

			#[cfg(not(feature = "events"))]
			let _ = (old, version, records);

			Ok(())
		})
		.await?
	}

	async fn is_empty(&self) -> Result<bool, StoreError> {
		let connection = Arc::clone(&self.connection);
		let table = Arc::clone(&self.table);
		tokio::task::spawn_blocking(move || -> Result<bool, StoreError> {
			let connection = connection.lock().map_err(|_| StoreError::Poisoned)?;
			let count: i64 =
				connection.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
			Ok(count == 0)
		})
		.await?
	}

	#[cfg(feature = "events")]
	fn changes(&self) -> Option<tokio::sync::broadcast::Receiver<StoreEvent<T>>> {
		Some(self.subscribe())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_identifier_tables() {
		assert!(validate_table("countries").is_ok());
		assert!(validate_table("_cache_2").is_ok());
		assert!(matches!(
			validate_table("countries; DROP TABLE x"),
			Err(StoreError::InvalidTable { .. })
		));
		assert!(validate_table("").is_err());
		assert!(validate_table("1st").is_err());
	}

	#[tokio::test]
	async fn replace_keeps_insertion_order() {
		let store = SqliteStore::<String>::in_memory("names").unwrap();
		store
			.replace_all(vec!["zeta".into(), "alpha".into(), "mid".into()])
			.await
			.unwrap();

		assert_eq!(store.read_all().await.unwrap(), vec!["zeta", "alpha", "mid"]);
	}

	#[tokio::test]
	async fn replace_is_total() {
		let store = SqliteStore::<u32>::in_memory("numbers").unwrap();
		store.replace_all(vec![1, 2, 3, 4]).await.unwrap();
		store.replace_all(vec![9]).await.unwrap();

		assert_eq!(store.read_all().await.unwrap(), vec![9]);
		assert!(!store.is_empty().await.unwrap());
		assert_eq!(store.version(), 2);
		assert_eq!(store.table(), "numbers");
	}

	#[cfg(feature = "events")]
	#[tokio::test]
	async fn replace_publishes_after_commit() {
		let store = SqliteStore::<u32>::in_memory("numbers").unwrap();
		store.replace_all(vec![1, 2]).await.unwrap();

		let mut changes = store.changes().unwrap();
		store.replace_all(vec![3]).await.unwrap();

		let StoreEvent::Replaced { old, new, version } = changes.recv().await.unwrap();
		assert_eq!(*old, vec![1, 2]);
		assert_eq!(*new, vec![3]);
		assert_eq!(version, 2);
		assert_eq!(store.read_all().await.unwrap(), *new);
	}
}
