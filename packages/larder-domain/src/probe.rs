/// Picks the single probe term for the partial-broadening stage.
///
/// The first whitespace-split word of the primary term strictly longer than
/// `min_word_len` wins; otherwise the primary term is reused verbatim. This
/// mirrors the observed production heuristic; `min_word_len` (default 3) is
/// the only tunable.
pub fn broadening_probe(primary_term: &str, min_word_len: usize) -> String {
	primary_term
		.split_whitespace()
		.find(|word| word.chars().count() > min_word_len)
		.unwrap_or(primary_term)
		.to_string()
}
