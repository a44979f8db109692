use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One repository record as seen by the search core.
///
/// The `id` is owned by the repository and never mutated here. `title` doubles
/// as the dedup key (case-insensitive, trimmed). `similarity_score` stays
/// `None` until the scorer attaches one; `suggested` stays `false` until a
/// broadening stage flags the candidate.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
	pub id: Uuid,
	pub title: String,
	#[serde(default)]
	pub ingredients: Vec<String>,
	#[serde(default)]
	pub average_rating: f32,
	#[serde(default, with = "crate::time_serde::option")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub similarity_score: Option<f32>,
	#[serde(default, rename = "isSuggested")]
	pub suggested: bool,
}

/// Typed envelope for a repository query response.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecipePage {
	pub data: Vec<RecipeCandidate>,
	pub count: usize,
}

impl RecipePage {
	pub fn new(data: Vec<RecipeCandidate>) -> Self {
		let count = data.len();

		Self { data, count }
	}

	pub fn empty() -> Self {
		Self::default()
	}
}
