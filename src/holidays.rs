/* src/holidays.rs */

//!
//! Country list of a public-holiday API, cached with a [`Coordinator`].
//!
//! The wire shape follows Calendarific's `countries` endpoint:
//! `{ "response": { "countries": [ ... ] } }`.

use futures_util::StreamExt;
use futures_util::stream::Map;
use serde::{Deserialize, Serialize};

use crate::refresh::{Coordinator, RefreshResult, RefreshStream};
use crate::remote::RemoteSource;
use crate::store::LocalStore;

/// One country supported by the holiday API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
	pub country_name: String,
	#[serde(rename = "iso-3166")]
	pub iso_3166: String,
	#[serde(default)]
	pub total_holidays: u32,
	#[serde(default)]
	pub supported_languages: u32,
	#[serde(default)]
	pub uuid: String,
	#[serde(default)]
	pub flag_unicode: Option<String>,
}

/// Body of the countries endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountriesResponse {
	pub response: Countries,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countries {
	#[serde(default)]
	pub countries: Vec<CountryInfo>,
}

impl From<Vec<CountryInfo>> for CountriesResponse {
	fn from(countries: Vec<CountryInfo>) -> Self {
		Self {
			response: Countries { countries },
		}
	}
}

#[cfg(feature = "http")]
impl crate::remote::Envelope for CountriesResponse {
	type Item = CountryInfo;

	fn into_items(self) -> Vec<CountryInfo> {
		self.response.countries
	}
}

/// Stream item of [`HolidayRepository::get_countries`].
pub type CountriesResult = RefreshResult<CountriesResponse>;

/// Stream returned by [`HolidayRepository::get_countries`].
pub type CountriesStream =
	Map<RefreshStream<CountryInfo>, fn(RefreshResult<CountryInfo>) -> CountriesResult>;

fn wrap_response(result: RefreshResult<CountryInfo>) -> CountriesResult {
	match result {
		RefreshResult::Success(countries) => RefreshResult::Success(countries.into()),
		RefreshResult::Loading(active) => RefreshResult::Loading(active),
		RefreshResult::Error(message) => RefreshResult::Error(message),
	}
}

/// Cached access to the country list.
pub struct HolidayRepository<S: ?Sized, R: ?Sized> {
	coordinator: Coordinator<CountryInfo, S, R>,
}

impl<S, R> HolidayRepository<S, R>
where
	S: LocalStore<CountryInfo> + ?Sized + 'static,
	R: RemoteSource<CountryInfo> + ?Sized + 'static,
{
	pub fn new(coordinator: Coordinator<CountryInfo, S, R>) -> Self {
		Self { coordinator }
	}

	/// Raw cycle over country records.
	pub fn countries(&self, fetch_from_remote: bool) -> RefreshStream<CountryInfo> {
		self.coordinator.refresh(fetch_from_remote)
	}

	/// Cycle with each snapshot wrapped in the API's response shape.
	pub fn get_countries(&self, fetch_from_remote: bool) -> CountriesStream {
		self.countries(fetch_from_remote)
			.map(wrap_response as fn(RefreshResult<CountryInfo>) -> CountriesResult)
	}

	pub fn coordinator(&self) -> &Coordinator<CountryInfo, S, R> {
		&self.coordinator
	}
}

/// Builds the HTTP source for `GET {base_url}/countries?api_key=...`.
#[cfg(all(feature = "http", feature = "config"))]
pub fn countries_remote(
	settings: &crate::config::RemoteSettings,
) -> Result<crate::remote::HttpRemote<CountriesResponse>, reqwest::Error> {
	let url = format!("{}/countries", settings.base_url.trim_end_matches('/'));
	let mut remote = crate::remote::HttpRemote::new(url, settings.timeout())?
		.query("api_key", settings.api_key.clone());
	if let Some(country) = &settings.country {
		remote = remote.query("country", country.clone());
	}
	Ok(remote)
}
