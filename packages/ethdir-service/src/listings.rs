use ethdir_domain::{ListingType, sort_ranked};
use ethdir_storage::{ListingFilter, models::Listing};

use crate::{DirectoryService, Outcome, Stage, StageError};

impl DirectoryService {
	/// Base query over the ranking view: optional type equality and case-insensitive name
	/// substring, ordered by score descending with ties broken by id.
	///
	/// No visibility predicate is applied here; the view decides which listings exist.
	pub async fn fetch_listings(
		&self,
		listing_type: Option<ListingType>,
		text: Option<&str>,
	) -> Outcome<Vec<Listing>> {
		let filter = ListingFilter {
			listing_type,
			text: text.map(str::to_string),
			..Default::default()
		};

		self.fetch_ranked(&filter, Stage::BaseQuery).await
	}

	pub(crate) async fn fetch_ranked(
		&self,
		filter: &ListingFilter,
		stage: Stage,
	) -> Outcome<Vec<Listing>> {
		match self.source.listings(filter).await {
			Ok(mut listings) => {
				sort_ranked(&mut listings);

				tracing::debug!(%stage, count = listings.len(), "Fetched ranked listings.");

				Outcome::ok(listings)
			},
			Err(err) => Outcome::degraded(Vec::new(), StageError::from_storage(stage, err)),
		}
	}
}
