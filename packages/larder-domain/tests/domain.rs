use time::OffsetDateTime;
use uuid::Uuid;

use larder_domain::{IngredientQuery, RecipeCandidate, dedup, probe, scoring};

fn candidate(title: &str, ingredients: &[&str], rating: f32) -> RecipeCandidate {
	RecipeCandidate {
		id: Uuid::new_v4(),
		title: title.to_string(),
		ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
		average_rating: rating,
		created_at: Some(OffsetDateTime::UNIX_EPOCH),
		similarity_score: None,
		suggested: false,
	}
}

#[test]
fn exact_stage_pipeline_scores_dedups_and_orders() {
	let query = IngredientQuery::parse("Chicken, Rice");
	let terms = query.comparison_terms();
	let candidates = vec![
		candidate("Fried Rice", &["rice", "egg"], 4.0),
		candidate("Chicken Curry", &["chicken", "rice", "curry"], 4.2),
		candidate("Fried Rice", &["rice", "oil"], 4.6),
		candidate("Beef Stew", &["beef", "carrot"], 4.9),
	];
	let scored = scoring::score_exact_candidates(&terms, candidates);
	let mut deduped = dedup::dedup_by_title(scored);

	scoring::sort_exact(&mut deduped);

	let titles: Vec<&str> = deduped.iter().map(|c| c.title.as_str()).collect();

	// The zero-match stew is gone, the duplicate keeps the 4.6 instance, and
	// the full match outranks the half matches.
	assert_eq!(titles, ["Chicken Curry", "Fried Rice"]);
	assert_eq!(deduped[0].similarity_score, Some(1.0));
	assert_eq!(deduped[1].average_rating, 4.6);
}

#[test]
fn probe_derives_from_the_primary_term() {
	let query = IngredientQuery::parse("soy sauce noodles, garlic");
	let primary = query.primary().expect("Query must have a primary term.");

	assert_eq!(probe::broadening_probe(primary, 3), "sauce");
}

#[test]
fn canonical_key_is_stable_across_casing_and_padding() {
	let left = IngredientQuery::parse("Eggs,  Milk ");
	let right = IngredientQuery::parse("eggs,milk");

	assert_eq!(left.canonical_key(), right.canonical_key());
}
