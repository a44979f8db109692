use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
	LarderService, Result,
	cache::{CacheEntry, SearchKind},
};
use larder_domain::{IngredientQuery, RecipeCandidate, dedup, probe, scoring};

/// One search invocation's output. `count` always equals `items.len()`.
/// Superseded by the next search, never mutated.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResultSet {
	pub query: Vec<String>,
	pub count: usize,
	pub items: Vec<RecipeCandidate>,
}

impl ResultSet {
	fn new(query: Vec<String>, items: Vec<RecipeCandidate>) -> Self {
		let count = items.len();

		Self { query, count, items }
	}
}

impl LarderService {
	/// Include-match search: recipes using as many of the given ingredients
	/// as possible, broadened toward the floor when exact matches run short.
	pub async fn search_by_ingredients(&self, raw: &str) -> Result<ResultSet> {
		self.run_search(SearchKind::Ingredients, raw).await
	}

	/// Exclude-match search: recipes free of the given allergens. Same
	/// broadening algorithm, its own cache slot.
	pub async fn search_excluding(&self, raw: &str) -> Result<ResultSet> {
		self.run_search(SearchKind::Allergens, raw).await
	}

	/// Navigation-back path: returns the cached result set with its flags
	/// and ordering intact, issuing no repository calls.
	pub fn restore(&self, kind: SearchKind) -> Option<ResultSet> {
		self.cache.restore(kind).map(|entry| entry.result)
	}

	pub async fn newest(&self, limit: Option<u32>) -> Result<ResultSet> {
		let limit = limit.unwrap_or(self.cfg.search.default_limit);
		let page = self.source.newest(&self.cfg.gateway, limit).await?;

		Ok(ResultSet::new(Vec::new(), page.data))
	}

	pub async fn top_rated(&self, limit: Option<u32>) -> Result<ResultSet> {
		let limit = limit.unwrap_or(self.cfg.search.default_limit);
		let page = self.source.top_rated(&self.cfg.gateway, limit).await?;

		Ok(ResultSet::new(Vec::new(), page.data))
	}

	async fn run_search(&self, kind: SearchKind, raw: &str) -> Result<ResultSet> {
		let query = IngredientQuery::parse(raw);
		let ticket = self.cache.begin(kind);

		// Empty query is not a broadening scenario: delegate to the browse
		// default for this slot and cache under the sort descriptor.
		if query.is_empty() {
			let limit = self.cfg.search.default_limit;
			let (descriptor, page) = match kind {
				SearchKind::Ingredients =>
					("-createdAt", self.source.newest(&self.cfg.gateway, limit).await?),
				SearchKind::Allergens =>
					("-averageRating", self.source.top_rated(&self.cfg.gateway, limit).await?),
			};
			let result = ResultSet::new(Vec::new(), page.data);

			self.cache.commit(
				ticket,
				CacheEntry {
					key: kind.cache_key(descriptor),
					raw_query: raw.to_string(),
					terms: Vec::new(),
					result: result.clone(),
				},
			);

			return Ok(result);
		}

		let result = self.run_broadened(kind, &query).await?;
		let entry = CacheEntry {
			key: kind.cache_key(&query.canonical_key()),
			raw_query: raw.to_string(),
			terms: query.terms().to_vec(),
			result: result.clone(),
		};

		self.cache.commit(ticket, entry);

		Ok(result)
	}

	/// The three-stage state machine: EXACT, then BROADEN-PARTIAL, then
	/// BROADEN-POPULAR, short-circuiting once the floor is met. A stage-1
	/// failure fails the search; stage-2/3 failures degrade to empty stages.
	async fn run_broadened(&self, kind: SearchKind, query: &IngredientQuery) -> Result<ResultSet> {
		let floor = self.cfg.search.target_floor as usize;
		let min_before_broaden = self.cfg.search.min_results_before_broaden as usize;
		let comparison = query.comparison_terms();

		// Stage EXACT.
		let page = match kind {
			SearchKind::Ingredients =>
				self.source.by_ingredients(&self.cfg.gateway, query.terms()).await?,
			SearchKind::Allergens =>
				self.source.excluding_ingredients(&self.cfg.gateway, query.terms()).await?,
		};
		// Exclude-match candidates satisfy the predicate by construction, so
		// the zero-score cut only applies to the include search.
		let exact = match kind {
			SearchKind::Ingredients => scoring::score_exact_candidates(&comparison, page.data),
			SearchKind::Allergens => page.data,
		};
		let mut exact = dedup::dedup_by_title(exact);

		for candidate in &mut exact {
			candidate.suggested = false;
		}

		scoring::sort_exact(&mut exact);

		if exact.len() >= min_before_broaden {
			return Ok(ResultSet::new(query.terms().to_vec(), exact));
		}

		let mut seen: HashSet<Uuid> = exact.iter().map(|candidate| candidate.id).collect();
		let mut suggested: Vec<RecipeCandidate> = Vec::new();

		// Stage BROADEN-PARTIAL: a single probe from the primary term,
		// against the same predicate as the exact stage.
		if let Some(primary) = query.primary() {
			let probe_term =
				probe::broadening_probe(primary, self.cfg.search.probe_min_word_len as usize);
			let probe_terms = [probe_term.clone()];
			let probe_page = match kind {
				SearchKind::Ingredients =>
					self.source.by_ingredients(&self.cfg.gateway, &probe_terms).await,
				SearchKind::Allergens =>
					self.source.excluding_ingredients(&self.cfg.gateway, &probe_terms).await,
			};

			match probe_page {
				Ok(page) => append_suggested(
					&mut suggested,
					&mut seen,
					page.data,
					floor.saturating_sub(exact.len()),
				),
				Err(err) => {
					tracing::warn!(
						probe = probe_term.as_str(),
						error = %err,
						"Partial broadening failed; continuing without it."
					);
				},
			}
		}

		// Stage BROADEN-POPULAR: fill the remaining deficit from top rated.
		if exact.len() + suggested.len() < floor {
			let deficit = floor.saturating_sub(exact.len() + suggested.len());

			match self.source.top_rated(&self.cfg.gateway, self.cfg.search.target_floor).await {
				Ok(page) => append_suggested(&mut suggested, &mut seen, page.data, deficit),
				Err(err) => {
					tracing::warn!(
						error = %err,
						"Popular broadening failed; returning what was found."
					);
				},
			}
		}

		// Suggested results from both stages render after the exact
		// partition, ordered by rating.
		scoring::sort_by_rating(&mut suggested);

		let mut items = exact;

		items.extend(suggested);

		Ok(ResultSet::new(query.terms().to_vec(), items))
	}
}

/// Merges one broadening stage's page into the suggested partition: drops
/// ids already accumulated, flags the rest, and appends at most `deficit` of
/// them in rating order.
fn append_suggested(
	suggested: &mut Vec<RecipeCandidate>,
	seen: &mut HashSet<Uuid>,
	page: Vec<RecipeCandidate>,
	deficit: usize,
) {
	if deficit == 0 {
		return;
	}

	let mut extras: Vec<RecipeCandidate> = Vec::new();

	for mut candidate in page {
		if !seen.contains(&candidate.id) {
			candidate.suggested = true;

			extras.push(candidate);
		}
	}

	scoring::sort_by_rating(&mut extras);
	extras.truncate(deficit);

	for candidate in extras {
		seen.insert(candidate.id);

		suggested.push(candidate);
	}
}
