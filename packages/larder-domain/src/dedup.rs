use std::collections::HashMap;

use crate::recipe::RecipeCandidate;

/// Collapses candidates that share a normalized title, keeping the strictly
/// higher-rated instance in the first-seen position. Rating ties keep the
/// first-seen candidate. Idempotent.
///
/// Known limitation: distinct recipes that happen to share a title merge.
pub fn dedup_by_title(candidates: Vec<RecipeCandidate>) -> Vec<RecipeCandidate> {
	let mut out: Vec<RecipeCandidate> = Vec::with_capacity(candidates.len());
	let mut seen: HashMap<String, usize> = HashMap::new();

	for candidate in candidates {
		let key = candidate.title.trim().to_lowercase();

		match seen.get(&key) {
			Some(&idx) =>
				if candidate.average_rating > out[idx].average_rating {
					out[idx] = candidate;
				},
			None => {
				seen.insert(key, out.len());
				out.push(candidate);
			},
		}
	}

	out
}
