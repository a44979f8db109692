//! HTTP gateway to the external recipe repository.
//!
//! The repository is reached by query parameters only; every operation
//! returns a typed [`RecipePage`](larder_domain::RecipePage) and malformed
//! response shapes decode to an empty page instead of an error, so callers
//! never shape-check.

mod error;
pub mod recipes;

pub use error::{Error, Result};
pub use recipes::{by_ingredients, excluding_ingredients, newest, top_rated};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
