use serde::Serialize;

use ethdir_domain::ListingType;
use ethdir_storage::{
	ListingFilter,
	models::{Listing, Tag},
};

use crate::{DirectoryService, Stage, StageError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSection {
	pub listing_type: ListingType,
	pub label: &'static str,
	pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeErrors {
	pub tag_catalog: Option<StageError>,
	pub base_query: Option<StageError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
	pub tags: Vec<Tag>,
	pub featured: Vec<Listing>,
	pub core_sections: Vec<TypeSection>,
	pub media_sections: Vec<TypeSection>,
	pub errors: HomeErrors,
}

impl DirectoryService {
	/// Home overview: the top listings by score grouped into per-type panels, plus featured rows.
	pub async fn home(&self) -> HomePage {
		let filter =
			ListingFilter { limit: Some(self.cfg.home_listing_limit), ..Default::default() };
		let (catalog, top) =
			tokio::join!(self.fetch_tags(), self.fetch_ranked(&filter, Stage::BaseQuery));
		let (tags, tag_catalog) = catalog.into_parts();
		let (top, base_query) = top.into_parts();
		let featured = top
			.iter()
			.filter(|listing| listing.is_featured)
			.take(self.cfg.featured_limit as usize)
			.cloned()
			.collect();

		HomePage {
			tags,
			featured,
			core_sections: sections(&top, &ListingType::CORE),
			media_sections: sections(&top, &ListingType::MEDIA),
			errors: HomeErrors { tag_catalog, base_query },
		}
	}
}

/// Non-empty panels in `order`, each keeping score order.
fn sections(listings: &[Listing], order: &[ListingType]) -> Vec<TypeSection> {
	order
		.iter()
		.filter_map(|&listing_type| {
			let members: Vec<Listing> = listings
				.iter()
				.filter(|listing| listing.r#type == listing_type)
				.cloned()
				.collect();

			(!members.is_empty()).then(|| TypeSection {
				listing_type,
				label: listing_type.label(),
				listings: members,
			})
		})
		.collect()
}
