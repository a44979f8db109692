use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub gateway: Gateway,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Connection settings for the external recipe repository.
#[derive(Debug, Deserialize)]
pub struct Gateway {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Result count the broadening stages try to reach.
	#[serde(default = "default_target_floor")]
	pub target_floor: u32,
	/// Exact-stage count below which broadening kicks in.
	#[serde(default = "default_min_results_before_broaden")]
	pub min_results_before_broaden: u32,
	/// A probe word must be strictly longer than this to be picked over the
	/// whole first term.
	#[serde(default = "default_probe_min_word_len")]
	pub probe_min_word_len: u32,
	/// Page size for empty-query browsing (newest / top rated).
	#[serde(default = "default_limit")]
	pub default_limit: u32,
}

fn default_target_floor() -> u32 {
	15
}

fn default_min_results_before_broaden() -> u32 {
	5
}

fn default_probe_min_word_len() -> u32 {
	3
}

fn default_limit() -> u32 {
	15
}
