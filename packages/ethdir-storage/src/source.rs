use std::{future::Future, pin::Pin};

use ethdir_domain::ListingType;

use crate::{
	Result,
	db::Db,
	models::{Listing, ListingTag, Tag},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Predicates pushed into the ranked listing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
	pub listing_type: Option<ListingType>,
	/// Case-insensitive substring matched against `name` only.
	pub text: Option<String>,
	pub exclude_id: Option<String>,
	pub limit: Option<u32>,
}

/// Read-only view of the directory datastore.
///
/// Every call is independent and request scoped; implementations must not cache across calls.
pub trait DirectorySource
where
	Self: Send + Sync,
{
	/// All tags, ordered by name.
	fn tags<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Tag>>>;

	/// Listings matching `filter`, ordered by score descending then id ascending.
	fn listings<'a>(&'a self, filter: &'a ListingFilter) -> BoxFuture<'a, Result<Vec<Listing>>>;

	fn listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>>;

	/// Distinct ids among `listing_ids` linked to any of `tag_ids`.
	fn tagged_listing_ids<'a>(
		&'a self,
		tag_ids: &'a [i64],
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<String>>>;

	/// Tag links for exactly `listing_ids`, ordered by listing id then tag name.
	fn listing_tags<'a>(
		&'a self,
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<ListingTag>>>;

	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>>;
}

pub struct PgSource {
	pub db: Db,
}
impl PgSource {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl DirectorySource for PgSource {
	fn tags<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Tag>>> {
		Box::pin(queries::fetch_tags(&self.db))
	}

	fn listings<'a>(&'a self, filter: &'a ListingFilter) -> BoxFuture<'a, Result<Vec<Listing>>> {
		Box::pin(queries::fetch_listings(&self.db, filter))
	}

	fn listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>> {
		Box::pin(queries::fetch_listing_by_slug(&self.db, slug))
	}

	fn tagged_listing_ids<'a>(
		&'a self,
		tag_ids: &'a [i64],
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(queries::fetch_tagged_listing_ids(&self.db, tag_ids, listing_ids))
	}

	fn listing_tags<'a>(
		&'a self,
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<ListingTag>>> {
		Box::pin(queries::fetch_listing_tags(&self.db, listing_ids))
	}

	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.db.ping())
	}
}
