//! Test support: an in-memory [`RecipeSource`] over a fixed recipe list,
//! with per-endpoint call counters and failure injection, plus fixture
//! builders and a ready-made config.

use std::sync::atomic::{AtomicUsize, Ordering};

use color_eyre::eyre;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use larder_config::{Config, Gateway, Search, Service};
use larder_domain::{RecipeCandidate, RecipePage};
use larder_service::{BoxFuture, RecipeSource};

pub fn sample_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		gateway: Gateway {
			api_base: "http://127.0.0.1:9090".to_string(),
			api_key: "test-key".to_string(),
			path: "/v1/recipes".to_string(),
			timeout_ms: 1_000,
			default_headers: serde_json::Map::new(),
		},
		search: Search {
			target_floor: 15,
			min_results_before_broaden: 5,
			probe_min_word_len: 3,
			default_limit: 15,
		},
	}
}

pub fn recipe(title: &str, ingredients: &[&str], rating: f32) -> RecipeCandidate {
	recipe_created(title, ingredients, rating, OffsetDateTime::UNIX_EPOCH)
}

pub fn recipe_created(
	title: &str,
	ingredients: &[&str],
	rating: f32,
	created_at: OffsetDateTime,
) -> RecipeCandidate {
	RecipeCandidate {
		id: Uuid::new_v4(),
		title: title.to_string(),
		ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
		average_rating: rating,
		created_at: Some(created_at),
		similarity_score: None,
		suggested: false,
	}
}

/// `n` days after the epoch; keeps fixture recency deterministic.
pub fn day(n: i64) -> OffsetDateTime {
	OffsetDateTime::UNIX_EPOCH + Duration::days(n)
}

pub struct SourceCalls {
	pub by_ingredients: AtomicUsize,
	pub excluding_ingredients: AtomicUsize,
	pub top_rated: AtomicUsize,
	pub newest: AtomicUsize,
}

impl Default for SourceCalls {
	fn default() -> Self {
		Self {
			by_ingredients: AtomicUsize::new(0),
			excluding_ingredients: AtomicUsize::new(0),
			top_rated: AtomicUsize::new(0),
			newest: AtomicUsize::new(0),
		}
	}
}

impl SourceCalls {
	pub fn total(&self) -> usize {
		self.by_ingredients.load(Ordering::SeqCst)
			+ self.excluding_ingredients.load(Ordering::SeqCst)
			+ self.top_rated.load(Ordering::SeqCst)
			+ self.newest.load(Ordering::SeqCst)
	}
}

const NEVER: usize = usize::MAX;

/// Fixed-list recipe source. Include-match returns recipes where any query
/// term is a case-insensitive substring of an ingredient; exclude-match
/// returns recipes where none is. Both preserve fixture order, like a
/// repository returning its own order.
///
/// `fail_*_from(n)` makes an endpoint error from its n-th call (zero-based)
/// onward, so a test can fail only the broadening probe while the exact
/// stage succeeds.
pub struct StaticRecipeSource {
	recipes: Vec<RecipeCandidate>,
	pub calls: SourceCalls,
	fail_by_ingredients_from: AtomicUsize,
	fail_excluding_from: AtomicUsize,
	fail_top_rated_from: AtomicUsize,
	fail_newest_from: AtomicUsize,
}

impl StaticRecipeSource {
	pub fn new(recipes: Vec<RecipeCandidate>) -> Self {
		Self {
			recipes,
			calls: SourceCalls::default(),
			fail_by_ingredients_from: AtomicUsize::new(NEVER),
			fail_excluding_from: AtomicUsize::new(NEVER),
			fail_top_rated_from: AtomicUsize::new(NEVER),
			fail_newest_from: AtomicUsize::new(NEVER),
		}
	}

	pub fn fail_by_ingredients_from(&self, call: usize) {
		self.fail_by_ingredients_from.store(call, Ordering::SeqCst);
	}

	pub fn fail_excluding_from(&self, call: usize) {
		self.fail_excluding_from.store(call, Ordering::SeqCst);
	}

	pub fn fail_top_rated_from(&self, call: usize) {
		self.fail_top_rated_from.store(call, Ordering::SeqCst);
	}

	pub fn fail_newest_from(&self, call: usize) {
		self.fail_newest_from.store(call, Ordering::SeqCst);
	}

	fn matches(recipe: &RecipeCandidate, terms: &[String]) -> bool {
		terms.iter().any(|term| {
			let term = term.to_lowercase();

			recipe
				.ingredients
				.iter()
				.any(|ingredient| ingredient.to_lowercase().contains(&term))
		})
	}
}

impl RecipeSource for StaticRecipeSource {
	fn by_ingredients<'a>(
		&'a self,
		_cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		let call = self.calls.by_ingredients.fetch_add(1, Ordering::SeqCst);
		let fail = call >= self.fail_by_ingredients_from.load(Ordering::SeqCst);

		Box::pin(async move {
			if fail {
				return Err(eyre::eyre!("recipe repository unreachable"));
			}

			let data: Vec<RecipeCandidate> = self
				.recipes
				.iter()
				.filter(|recipe| Self::matches(recipe, terms))
				.cloned()
				.collect();

			Ok(RecipePage::new(data))
		})
	}

	fn excluding_ingredients<'a>(
		&'a self,
		_cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		let call = self.calls.excluding_ingredients.fetch_add(1, Ordering::SeqCst);
		let fail = call >= self.fail_excluding_from.load(Ordering::SeqCst);

		Box::pin(async move {
			if fail {
				return Err(eyre::eyre!("recipe repository unreachable"));
			}

			let data: Vec<RecipeCandidate> = self
				.recipes
				.iter()
				.filter(|recipe| !Self::matches(recipe, terms))
				.cloned()
				.collect();

			Ok(RecipePage::new(data))
		})
	}

	fn top_rated<'a>(
		&'a self,
		_cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		let call = self.calls.top_rated.fetch_add(1, Ordering::SeqCst);
		let fail = call >= self.fail_top_rated_from.load(Ordering::SeqCst);

		Box::pin(async move {
			if fail {
				return Err(eyre::eyre!("recipe repository unreachable"));
			}

			let mut data = self.recipes.clone();

			data.sort_by(|left, right| {
				right
					.average_rating
					.partial_cmp(&left.average_rating)
					.unwrap_or(std::cmp::Ordering::Equal)
			});
			data.truncate(limit as usize);

			Ok(RecipePage::new(data))
		})
	}

	fn newest<'a>(
		&'a self,
		_cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		let call = self.calls.newest.fetch_add(1, Ordering::SeqCst);
		let fail = call >= self.fail_newest_from.load(Ordering::SeqCst);

		Box::pin(async move {
			if fail {
				return Err(eyre::eyre!("recipe repository unreachable"));
			}

			let mut data = self.recipes.clone();

			data.sort_by(|left, right| right.created_at.cmp(&left.created_at));
			data.truncate(limit as usize);

			Ok(RecipePage::new(data))
		})
	}
}
