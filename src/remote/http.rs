/* src/remote/http.rs */

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{RemoteError, RemoteSource};

/// A response body that wraps the collection.
///
/// APIs rarely return a bare array; the envelope names the JSON shape and
/// knows how to unwrap the records from it.
pub trait Envelope: DeserializeOwned + Send {
	type Item: Send;

	fn into_items(self) -> Vec<Self::Item>;
}

/// Fetches the collection with a single HTTP `GET` and JSON decoding.
pub struct HttpRemote<E> {
	client: reqwest::Client,
	url: String,
	query: Vec<(String, String)>,
	_envelope: PhantomData<fn() -> E>,
}

impl<E> HttpRemote<E> {
	/// Creates a source with its own client and request timeout.
	pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self::with_client(client, url))
	}

	/// Creates a source sharing an existing client.
	pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
		Self {
			client,
			url: url.into(),
			query: Vec::new(),
			_envelope: PhantomData,
		}
	}

	/// Adds a query parameter sent with every fetch.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

/// Connectivity problems are transient; anything the server actually said
/// (bad status, undecodable body) is a protocol failure.
fn classify(err: reqwest::Error) -> RemoteError {
	if err.is_decode() || err.is_status() {
		RemoteError::protocol(err.to_string())
	} else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
		RemoteError::transient(err.to_string())
	} else {
		RemoteError::protocol(err.to_string())
	}
}

#[async_trait]
impl<E> RemoteSource<E::Item> for HttpRemote<E>
where
	E: Envelope,
{
	async fn fetch_all(&self) -> Result<Vec<E::Item>, RemoteError> {
		let response = self
			.client
			.get(&self.url)
			.query(&self.query)
			.send()
			.await
			.map_err(classify)?;

		let status = response.status();
		if !status.is_success() {
			#[cfg(feature = "logging")]
			tracing::warn!(url = %self.url, %status, "remote answered with non-success status");
			return Err(RemoteError::protocol(format!("HTTP {status}")));
		}

		let envelope: E = response.json().await.map_err(classify)?;
		Ok(envelope.into_items())
	}
}
