use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::Result;
use larder_domain::{RecipeCandidate, RecipePage};

/// Include-match: recipes containing the given ingredient terms.
pub async fn by_ingredients(cfg: &larder_config::Gateway, terms: &[String]) -> Result<RecipePage> {
	query_recipes(cfg, &[("ingredients", terms.join(","))]).await
}

/// Exclude-match: recipes free of the given allergen terms.
pub async fn excluding_ingredients(
	cfg: &larder_config::Gateway,
	terms: &[String],
) -> Result<RecipePage> {
	query_recipes(cfg, &[("excludeIngredients", terms.join(","))]).await
}

pub async fn top_rated(cfg: &larder_config::Gateway, limit: u32) -> Result<RecipePage> {
	query_recipes(cfg, &[("sort", "-averageRating".to_string()), ("limit", limit.to_string())])
		.await
}

pub async fn newest(cfg: &larder_config::Gateway, limit: u32) -> Result<RecipePage> {
	query_recipes(cfg, &[("sort", "-createdAt".to_string()), ("limit", limit.to_string())]).await
}

async fn query_recipes(
	cfg: &larder_config::Gateway,
	params: &[(&str, String)],
) -> Result<RecipePage> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.query(params)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(parse_recipe_page(json))
}

/// A missing or non-array `data` field yields an empty page; entries that
/// fail to decode are skipped rather than failing the whole response.
fn parse_recipe_page(json: Value) -> RecipePage {
	let Some(items) = json.get("data").and_then(Value::as_array) else {
		return RecipePage::empty();
	};
	let mut data = Vec::with_capacity(items.len());

	for item in items {
		if let Ok(candidate) = serde_json::from_value::<RecipeCandidate>(item.clone()) {
			data.push(candidate);
		}
	}

	let count =
		json.get("count").and_then(Value::as_u64).map(|v| v as usize).unwrap_or(data.len());

	RecipePage { data, count }
}
