use std::collections::HashSet;

use ethdir_domain::{TagIdSet, retain_matching};
use ethdir_storage::models::Listing;

use crate::{DirectoryService, Outcome, Stage, StageError};

impl DirectoryService {
	/// Keeps the candidates linked to at least one of `tag_ids`, in candidate order.
	///
	/// Selected tags are combined as a union. If the link lookup fails the candidates are returned
	/// unfiltered with the error recorded.
	pub async fn filter_by_tags(
		&self,
		candidates: Vec<Listing>,
		tag_ids: &TagIdSet,
	) -> Outcome<Vec<Listing>> {
		if tag_ids.is_empty() || candidates.is_empty() {
			return Outcome::ok(candidates);
		}

		let tag_ids: Vec<i64> = tag_ids.iter().copied().collect();
		let candidate_ids: Vec<String> =
			candidates.iter().map(|listing| listing.id.clone()).collect();
		let matched = match self.source.tagged_listing_ids(&tag_ids, &candidate_ids).await {
			Ok(ids) => ids.into_iter().collect::<HashSet<_>>(),
			Err(err) => {
				return Outcome::degraded(candidates, StageError::from_storage(Stage::TagFilter, err));
			},
		};
		let filtered = retain_matching(candidates, &matched);

		tracing::debug!(
			tags = tag_ids.len(),
			candidates = candidate_ids.len(),
			kept = filtered.len(),
			"Applied tag filter."
		);

		Outcome::ok(filtered)
	}
}
