use std::collections::{HashMap, HashSet};

use crate::Ranked;

/// Keeps the candidates whose id is in `matched`, preserving candidate order.
pub fn retain_matching<T: Ranked>(candidates: Vec<T>, matched: &HashSet<String>) -> Vec<T> {
	candidates.into_iter().filter(|candidate| matched.contains(candidate.rank_id())).collect()
}

/// Groups `(listing_id, value)` pairs by listing id, keeping the input order within each group.
pub fn group_by_listing<T, I>(rows: I) -> HashMap<String, Vec<T>>
where
	I: IntoIterator<Item = (String, T)>,
{
	let mut grouped: HashMap<String, Vec<T>> = HashMap::new();

	for (listing_id, value) in rows {
		grouped.entry(listing_id).or_default().push(value);
	}

	grouped
}
