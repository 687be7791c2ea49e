//! View models for the category and search pages. Both always render; failures surface as
//! per-stage errors.

use serde::Serialize;

use ethdir_domain::ListingType;

use crate::{AnnotatedResult, DirectoryService, Error, FacetedQuery, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
	pub listing_type: ListingType,
	pub label: &'static str,
	pub query: Option<String>,
	pub selected_tags: Vec<i64>,
	#[serde(flatten)]
	pub result: AnnotatedResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
	pub query: Option<String>,
	pub total: usize,
	#[serde(flatten)]
	pub result: AnnotatedResult,
}

impl DirectoryService {
	/// Category page for the `/pages/{type}` route. An unknown type segment names no page; too
	/// many selected tags is invalid input.
	pub async fn category_page(
		&self,
		type_segment: &str,
		text: Option<&str>,
		tag: Option<&str>,
	) -> Result<CategoryPage> {
		let listing_type = type_segment.parse::<ListingType>().map_err(|_| Error::NotFound {
			message: format!("No directory page for type {type_segment:?}."),
		})?;
		let query =
			FacetedQuery::parse(Some(listing_type.as_str()), text, tag, self.max_tag_ids())?;
		let result = self.build_result(&query).await;

		Ok(CategoryPage {
			listing_type,
			label: listing_type.label(),
			query: query.text,
			selected_tags: query.tag_ids.into_iter().collect(),
			result,
		})
	}

	/// Free-text search across every type. Blank text renders the empty prompt without touching
	/// the datastore.
	pub async fn search_page(&self, text: Option<&str>) -> SearchPage {
		let query = FacetedQuery { text: ethdir_domain::normalize_text(text), ..Default::default() };

		if query.text.is_none() {
			return SearchPage { query: None, total: 0, result: AnnotatedResult::default() };
		}

		let result = self.search_listings(&query).await;

		SearchPage { total: result.listings.len(), query: query.text, result }
	}

	pub(crate) fn max_tag_ids(&self) -> usize {
		self.cfg.max_tag_ids as usize
	}
}
