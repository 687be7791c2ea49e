use serde::Serialize;

use ethdir_domain::{ListingType, TagIdSet, normalize_text, parse_tag_ids};
use ethdir_storage::models::{Listing, Tag};

use crate::{DirectoryService, Error, Result, StageErrors};

/// A parsed directory request. Built once per request and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetedQuery {
	pub listing_type: Option<ListingType>,
	pub text: Option<String>,
	pub tag_ids: TagIdSet,
}
impl FacetedQuery {
	/// Parses raw request parameters.
	///
	/// An unknown type and more than `max_tag_ids` distinct tag ids are rejected. Malformed tag ids
	/// are dropped.
	pub fn parse(
		listing_type: Option<&str>,
		text: Option<&str>,
		tag: Option<&str>,
		max_tag_ids: usize,
	) -> Result<Self> {
		let listing_type = match listing_type.map(str::trim).filter(|raw| !raw.is_empty()) {
			Some(raw) => Some(
				raw.parse::<ListingType>()
					.map_err(|err| Error::InvalidInput { message: err.to_string() })?,
			),
			None => None,
		};

		Ok(Self {
			listing_type,
			text: normalize_text(text),
			tag_ids: parse_tag_ids(tag, max_tag_ids)
				.map_err(|err| Error::InvalidInput { message: err.to_string() })?,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedListing {
	#[serde(flatten)]
	pub listing: Listing,
	pub tags: Vec<Tag>,
}

/// Ranked listings with their tags, the tag facets, and one error slot per stage.
///
/// An empty `listings` with no `base_query` error means nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotatedResult {
	pub tags: Vec<Tag>,
	pub listings: Vec<AnnotatedListing>,
	pub errors: StageErrors,
}

/// The listing projection served by the JSON listings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummary {
	pub id: String,
	pub name: String,
	pub slug: String,
	pub short_desc: Option<String>,
	pub logo_url: Option<String>,
	pub score: f64,
	pub tags: Vec<Tag>,
}
impl From<AnnotatedListing> for ListingSummary {
	fn from(annotated: AnnotatedListing) -> Self {
		let AnnotatedListing { listing, tags } = annotated;

		Self {
			id: listing.id,
			name: listing.name,
			slug: listing.slug,
			short_desc: listing.short_desc,
			logo_url: listing.logo_url,
			score: listing.score,
			tags,
		}
	}
}

impl DirectoryService {
	/// Runs the full pipeline. The tag catalog loads concurrently with the listing chain, and
	/// every stage runs even when an earlier one failed.
	pub async fn build_result(&self, query: &FacetedQuery) -> AnnotatedResult {
		let (catalog, mut result) = tokio::join!(self.fetch_tags(), self.search_listings(query));
		let (tags, tag_catalog) = catalog.into_parts();

		result.tags = tags;
		result.errors.tag_catalog = tag_catalog;

		result
	}

	/// Base query, tag filter and annotation, without the tag catalog.
	pub async fn search_listings(&self, query: &FacetedQuery) -> AnnotatedResult {
		let mut errors = StageErrors::default();
		let (mut listings, base_query) =
			self.fetch_listings(query.listing_type, query.text.as_deref()).await.into_parts();

		errors.base_query = base_query;

		if !query.tag_ids.is_empty() && !listings.is_empty() {
			let (filtered, tag_filter) =
				self.filter_by_tags(listings, &query.tag_ids).await.into_parts();

			listings = filtered;
			errors.tag_filter = tag_filter;
		}

		let mut tag_map = if listings.is_empty() {
			Default::default()
		} else {
			let (tag_map, annotation) = self.annotate_with_tags(&listings).await.into_parts();

			errors.annotation = annotation;

			tag_map
		};
		let listings = listings
			.into_iter()
			.map(|listing| {
				let tags = tag_map.remove(&listing.id).unwrap_or_default();

				AnnotatedListing { listing, tags }
			})
			.collect();

		AnnotatedResult { tags: Vec::new(), listings, errors }
	}
}
