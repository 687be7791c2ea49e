use std::collections::HashMap;

use ethdir_domain::group_by_listing;
use ethdir_storage::models::{Listing, Tag};

use crate::{DirectoryService, Outcome, Stage, StageError};

/// Tags per listing id, each list ordered by tag name. A missing key means the listing has no tags.
pub type TagMap = HashMap<String, Vec<Tag>>;

impl DirectoryService {
	pub async fn annotate_with_tags(&self, listings: &[Listing]) -> Outcome<TagMap> {
		if listings.is_empty() {
			return Outcome::ok(TagMap::new());
		}

		let listing_ids: Vec<String> = listings.iter().map(|listing| listing.id.clone()).collect();

		match self.source.listing_tags(&listing_ids).await {
			Ok(rows) => Outcome::ok(group_by_listing(rows.into_iter().map(|row| row.into_pair()))),
			Err(err) =>
				Outcome::degraded(TagMap::new(), StageError::from_storage(Stage::Annotation, err)),
		}
	}
}
