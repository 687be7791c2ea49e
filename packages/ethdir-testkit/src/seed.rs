//! Fixture writers for Postgres-backed tests.

use sqlx::PgPool;

use ethdir_domain::ListingType;

use crate::Result;

pub struct SeedListing<'a> {
	pub id: &'a str,
	pub name: &'a str,
	pub kind: ListingType,
	pub votes: u32,
	pub is_featured: bool,
	pub status: &'a str,
}
impl<'a> SeedListing<'a> {
	pub fn published(id: &'a str, name: &'a str, kind: ListingType, votes: u32) -> Self {
		Self { id, name, kind, votes, is_featured: false, status: "published" }
	}
}

pub async fn insert_listing(pool: &PgPool, listing: &SeedListing<'_>) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO listings (id, name, slug, type, short_desc, url, is_featured, status)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
	)
	.bind(listing.id)
	.bind(listing.name)
	.bind(format!("{}-slug", listing.id))
	.bind(listing.kind.as_str())
	.bind(format!("{} short description", listing.name))
	.bind(format!("https://example.com/{}", listing.id))
	.bind(listing.is_featured)
	.bind(listing.status)
	.execute(pool)
	.await?;

	for voter in 0..listing.votes {
		sqlx::query("INSERT INTO listing_votes (listing_id, voter) VALUES ($1, $2)")
			.bind(listing.id)
			.bind(format!("voter-{voter}"))
			.execute(pool)
			.await?;
	}

	Ok(())
}

pub async fn insert_tag(pool: &PgPool, id: i64, name: &str) -> Result<()> {
	sqlx::query("INSERT INTO tags (id, name) VALUES ($1, $2)")
		.bind(id)
		.bind(name)
		.execute(pool)
		.await?;

	Ok(())
}

pub async fn link_tag(pool: &PgPool, listing_id: &str, tag_id: i64) -> Result<()> {
	sqlx::query("INSERT INTO listing_tags (listing_id, tag_id) VALUES ($1, $2)")
		.bind(listing_id)
		.bind(tag_id)
		.execute(pool)
		.await?;

	Ok(())
}
