use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::search::ResultSet;

/// Which cache slot a search writes to. The two searches cache
/// independently; they never share or merge entries.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
	Ingredients,
	Allergens,
}

impl SearchKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ingredients => "ingredients",
			Self::Allergens => "allergens",
		}
	}

	pub fn cache_key(&self, canonical: &str) -> String {
		format!("{}:{canonical}", self.as_str())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CacheEntry {
	pub key: String,
	pub raw_query: String,
	pub terms: Vec<String>,
	pub result: ResultSet,
}

/// Handle for one search submission. Committing with a superseded ticket is
/// a no-op: a newer submission owns the slot.
#[derive(Clone, Copy, Debug)]
pub struct SearchTicket {
	kind: SearchKind,
	generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
	generation: u64,
	entry: Option<CacheEntry>,
}

/// Process-scoped result cache, one slot per search kind, no TTL.
///
/// `begin` registers a submission and clears the slot, so a failed search
/// never leaves a stale entry behind. `commit` writes the slot atomically and
/// only if the ticket is still current; a stale in-flight search's result is
/// dropped, never merged.
#[derive(Debug, Default)]
pub struct SearchCache {
	ingredients: Mutex<Slot>,
	allergens: Mutex<Slot>,
}

impl SearchCache {
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&self, kind: SearchKind) -> &Mutex<Slot> {
		match kind {
			SearchKind::Ingredients => &self.ingredients,
			SearchKind::Allergens => &self.allergens,
		}
	}

	pub fn begin(&self, kind: SearchKind) -> SearchTicket {
		let mut slot = self.slot(kind).lock().unwrap_or_else(|err| err.into_inner());

		slot.generation += 1;
		slot.entry = None;

		SearchTicket { kind, generation: slot.generation }
	}

	pub fn commit(&self, ticket: SearchTicket, entry: CacheEntry) -> bool {
		let mut slot = self.slot(ticket.kind).lock().unwrap_or_else(|err| err.into_inner());

		if slot.generation != ticket.generation {
			tracing::debug!(
				kind = ticket.kind.as_str(),
				key = entry.key.as_str(),
				"Superseded search result dropped."
			);

			return false;
		}

		slot.entry = Some(entry);

		true
	}

	pub fn restore(&self, kind: SearchKind) -> Option<CacheEntry> {
		let slot = self.slot(kind).lock().unwrap_or_else(|err| err.into_inner());

		slot.entry.clone()
	}

	pub fn invalidate(&self, kind: SearchKind) {
		let mut slot = self.slot(kind).lock().unwrap_or_else(|err| err.into_inner());

		slot.entry = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(key: &str) -> CacheEntry {
		CacheEntry {
			key: key.to_string(),
			raw_query: String::new(),
			terms: Vec::new(),
			result: ResultSet { query: Vec::new(), count: 0, items: Vec::new() },
		}
	}

	#[test]
	fn commit_then_restore_round_trips() {
		let cache = SearchCache::new();
		let ticket = cache.begin(SearchKind::Ingredients);

		assert!(cache.commit(ticket, entry("ingredients:eggs")));

		let restored = cache.restore(SearchKind::Ingredients).expect("Entry must be present.");

		assert_eq!(restored.key, "ingredients:eggs");
	}

	#[test]
	fn superseded_ticket_is_dropped() {
		let cache = SearchCache::new();
		let stale = cache.begin(SearchKind::Ingredients);
		let fresh = cache.begin(SearchKind::Ingredients);

		assert!(!cache.commit(stale, entry("ingredients:old")));
		assert!(cache.restore(SearchKind::Ingredients).is_none());
		assert!(cache.commit(fresh, entry("ingredients:new")));
		assert_eq!(cache.restore(SearchKind::Ingredients).unwrap().key, "ingredients:new");
	}

	#[test]
	fn begin_clears_the_previous_entry() {
		let cache = SearchCache::new();
		let ticket = cache.begin(SearchKind::Allergens);

		cache.commit(ticket, entry("allergens:nuts"));
		cache.begin(SearchKind::Allergens);

		assert!(cache.restore(SearchKind::Allergens).is_none());
	}

	#[test]
	fn slots_are_independent() {
		let cache = SearchCache::new();
		let ticket = cache.begin(SearchKind::Ingredients);

		cache.commit(ticket, entry("ingredients:eggs"));
		cache.invalidate(SearchKind::Allergens);

		assert!(cache.restore(SearchKind::Ingredients).is_some());
		assert!(cache.restore(SearchKind::Allergens).is_none());
	}
}
