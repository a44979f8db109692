pub mod cache;
pub mod search;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use cache::{CacheEntry, SearchCache, SearchKind, SearchTicket};
pub use error::{Error, Result};
pub use search::ResultSet;

use larder_config::Config;
use larder_domain::RecipePage;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The four repository queries the orchestrator consumes.
///
/// Repository-side matching is opaque: implementations return whatever the
/// repository considers a match and the orchestrator scores, dedups, and
/// flags on its own.
pub trait RecipeSource
where
	Self: Send + Sync,
{
	fn by_ingredients<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>>;

	fn excluding_ingredients<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>>;

	fn top_rated<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>>;

	fn newest<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>>;
}

struct DefaultSource;

impl RecipeSource for DefaultSource {
	fn by_ingredients<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		Box::pin(async move { Ok(larder_gateway::by_ingredients(cfg, terms).await?) })
	}

	fn excluding_ingredients<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		terms: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		Box::pin(async move { Ok(larder_gateway::excluding_ingredients(cfg, terms).await?) })
	}

	fn top_rated<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		Box::pin(async move { Ok(larder_gateway::top_rated(cfg, limit).await?) })
	}

	fn newest<'a>(
		&'a self,
		cfg: &'a larder_config::Gateway,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<RecipePage>> {
		Box::pin(async move { Ok(larder_gateway::newest(cfg, limit).await?) })
	}
}

pub struct LarderService {
	pub cfg: Config,
	pub source: Arc<dyn RecipeSource>,
	pub cache: SearchCache,
}

impl LarderService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, source: Arc::new(DefaultSource), cache: SearchCache::new() }
	}

	pub fn with_source(cfg: Config, source: Arc<dyn RecipeSource>) -> Self {
		Self { cfg, source, cache: SearchCache::new() }
	}
}
