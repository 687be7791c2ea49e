use serde::Serialize;

use ethdir_domain::{ListingType, Ranked};

/// Row of the `listing_rank_v` view.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Listing {
	pub id: String,
	pub name: String,
	pub slug: String,
	pub r#type: ListingType,
	pub short_desc: Option<String>,
	pub long_desc: Option<String>,
	pub logo_url: Option<String>,
	pub thumbnail_url: Option<String>,
	pub url: String,
	pub score: f64,
	pub total_votes: i64,
	pub is_featured: bool,
}
impl Ranked for Listing {
	fn rank_id(&self) -> &str {
		&self.id
	}

	fn rank_score(&self) -> f64 {
		self.score
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Tag {
	pub id: i64,
	pub name: String,
}

/// A `listing_tags` row joined with its tag.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ListingTag {
	pub listing_id: String,
	pub tag_id: i64,
	pub tag_name: String,
}
impl ListingTag {
	pub fn into_pair(self) -> (String, Tag) {
		(self.listing_id, Tag { id: self.tag_id, name: self.tag_name })
	}
}
