use std::cmp::Ordering;

use crate::recipe::RecipeCandidate;

/// Fraction of query terms that appear, case-insensitively, somewhere in the
/// candidate's ingredient list. Terms are expected pre-lowercased.
pub fn similarity_score(comparison_terms: &[String], ingredients: &[String]) -> f32 {
	if comparison_terms.is_empty() {
		return 0.0;
	}

	let haystack: Vec<String> =
		ingredients.iter().map(|ingredient| ingredient.to_lowercase()).collect();
	let mut matched = 0_usize;

	for term in comparison_terms {
		if haystack.iter().any(|ingredient| ingredient.contains(term.as_str())) {
			matched += 1;
		}
	}

	matched as f32 / comparison_terms.len() as f32
}

/// Attaches scores to exact-stage candidates and drops zero-match ones.
///
/// A repository-provided score passes through unchanged; only unscored
/// candidates are scored locally. Zero-score candidates are excluded from the
/// exact classification (they can still surface via broadening).
pub fn score_exact_candidates(
	comparison_terms: &[String],
	candidates: Vec<RecipeCandidate>,
) -> Vec<RecipeCandidate> {
	let mut out = Vec::with_capacity(candidates.len());

	for mut candidate in candidates {
		let score = match candidate.similarity_score {
			Some(score) => score,
			None => similarity_score(comparison_terms, &candidate.ingredients),
		};

		if score <= 0.0 {
			continue;
		}

		candidate.similarity_score = Some(score);

		out.push(candidate);
	}

	out
}

/// Exact-partition display order: score descending, ties by rating
/// descending, remaining ties keep repository order.
pub fn sort_exact(candidates: &mut [RecipeCandidate]) {
	candidates.sort_by(|left, right| {
		cmp_f32_desc(
			left.similarity_score.unwrap_or(0.0),
			right.similarity_score.unwrap_or(0.0),
		)
		.then_with(|| cmp_f32_desc(left.average_rating, right.average_rating))
	});
}

/// Suggested-partition display order: rating descending, stable.
pub fn sort_by_rating(candidates: &mut [RecipeCandidate]) {
	candidates.sort_by(|left, right| cmp_f32_desc(left.average_rating, right.average_rating));
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
