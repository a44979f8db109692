/// An ordered, normalized ingredient query.
///
/// Parsed once from the raw comma-separated input and immutable afterwards.
/// Display casing is preserved; comparisons and cache keys use the lowercase
/// form. Insertion order is user priority: the first term is the broadening
/// pivot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IngredientQuery {
	terms: Vec<String>,
}

impl IngredientQuery {
	pub fn parse(raw: &str) -> Self {
		let terms = raw
			.split(',')
			.map(str::trim)
			.filter(|term| !term.is_empty())
			.map(str::to_string)
			.collect();

		Self { terms }
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}

	pub fn terms(&self) -> &[String] {
		&self.terms
	}

	pub fn primary(&self) -> Option<&str> {
		self.terms.first().map(String::as_str)
	}

	pub fn comparison_terms(&self) -> Vec<String> {
		self.terms.iter().map(|term| term.to_lowercase()).collect()
	}

	pub fn canonical_key(&self) -> String {
		self.comparison_terms().join(",")
	}
}
