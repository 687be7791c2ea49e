use serde::Serialize;

use ethdir_storage::{
	ListingFilter,
	models::{Listing, Tag},
};

use crate::{DirectoryService, Error, Result, Stage, StageError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailErrors {
	pub annotation: Option<StageError>,
	pub related: Option<StageError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDetail {
	pub listing: Listing,
	pub tags: Vec<Tag>,
	/// Other listings by score, excluding this one.
	pub related: Vec<Listing>,
	pub errors: DetailErrors,
}

impl DirectoryService {
	/// Single listing lookup. A missing slug is terminal; tags and related listings degrade.
	pub async fn listing_detail(&self, slug: &str) -> Result<ListingDetail> {
		let slug = slug.trim();

		if slug.is_empty() {
			return Err(Error::InvalidInput { message: "slug must be non-empty.".to_string() });
		}

		let Some(listing) = self.source.listing_by_slug(slug).await? else {
			return Err(Error::NotFound { message: format!("No listing with slug {slug:?}.") });
		};
		let filter = ListingFilter {
			exclude_id: Some(listing.id.clone()),
			limit: Some(self.cfg.related_limit),
			..Default::default()
		};
		let (annotation, related) = tokio::join!(
			self.annotate_with_tags(std::slice::from_ref(&listing)),
			self.fetch_ranked(&filter, Stage::Related)
		);
		let (mut tag_map, annotation) = annotation.into_parts();
		let (related, related_error) = related.into_parts();
		let tags = tag_map.remove(&listing.id).unwrap_or_default();

		Ok(ListingDetail {
			listing,
			tags,
			related,
			errors: DetailErrors { annotation, related: related_error },
		})
	}
}
