//! Request parameter normalization shared by the JSON and page entry points.

use std::collections::BTreeSet;

/// Selected tag ids, deduplicated and in ascending order.
pub type TagIdSet = BTreeSet<i64>;

/// Parses a comma-separated tag id list.
///
/// Blank and non-numeric entries are dropped rather than rejected. More than `max` distinct
/// well-formed ids is an error; no valid id is ever discarded.
pub fn parse_tag_ids(raw: Option<&str>, max: usize) -> Result<TagIdSet, TooManyTagIds> {
	let ids: TagIdSet = raw
		.into_iter()
		.flat_map(|raw| raw.split(','))
		.filter_map(|part| part.trim().parse::<i64>().ok())
		.collect();

	if ids.len() > max {
		return Err(TooManyTagIds { selected: ids.len(), max });
	}

	Ok(ids)
}

/// Trims free text; blank input means "no text filter".
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
	raw.map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}

/// Builds an `ILIKE` pattern matching `text` as a literal substring.
///
/// `%`, `_` and `\` in user input are escaped with the default `\` escape character.
pub fn like_pattern(text: &str) -> String {
	let mut pattern = String::with_capacity(text.len() + 2);

	pattern.push('%');

	for ch in text.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			pattern.push('\\');
		}

		pattern.push(ch);
	}

	pattern.push('%');

	pattern
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{selected} tag ids selected; at most {max} are allowed.")]
pub struct TooManyTagIds {
	pub selected: usize,
	pub max: usize,
}
