use sqlx::{Postgres, QueryBuilder};

use ethdir_domain::like_pattern;

use crate::{
	Result,
	db::Db,
	models::{Listing, ListingTag, Tag},
	source::ListingFilter,
};

const LISTING_COLUMNS: &str = "\
id, name, slug, type, short_desc, long_desc, logo_url, thumbnail_url, url, score, total_votes, \
is_featured";

pub async fn fetch_tags(db: &Db) -> Result<Vec<Tag>> {
	let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name ASC, id ASC")
		.fetch_all(&db.pool)
		.await?;

	Ok(tags)
}

/// Reads ranked listings. Visibility is decided by the view; no status predicate is added here.
pub async fn fetch_listings(db: &Db, filter: &ListingFilter) -> Result<Vec<Listing>> {
	let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT ");

	builder.push(LISTING_COLUMNS);
	builder.push(" FROM listing_rank_v WHERE TRUE");

	if let Some(kind) = filter.listing_type {
		builder.push(" AND type = ");
		builder.push_bind(kind.as_str());
	}
	if let Some(text) = filter.text.as_deref() {
		builder.push(" AND name ILIKE ");
		builder.push_bind(like_pattern(text));
	}
	if let Some(exclude_id) = filter.exclude_id.as_deref() {
		builder.push(" AND id <> ");
		builder.push_bind(exclude_id);
	}

	builder.push(" ORDER BY score DESC, id COLLATE \"C\" ASC");

	if let Some(limit) = filter.limit {
		builder.push(" LIMIT ");
		builder.push_bind(i64::from(limit));
	}

	let listings = builder.build_query_as::<Listing>().fetch_all(&db.pool).await?;

	Ok(listings)
}

pub async fn fetch_listing_by_slug(db: &Db, slug: &str) -> Result<Option<Listing>> {
	let sql = format!("SELECT {LISTING_COLUMNS} FROM listing_rank_v WHERE slug = $1");
	let listing = sqlx::query_as::<_, Listing>(&sql).bind(slug).fetch_optional(&db.pool).await?;

	Ok(listing)
}

/// Ids of `listing_ids` linked to at least one of `tag_ids`.
pub async fn fetch_tagged_listing_ids(
	db: &Db,
	tag_ids: &[i64],
	listing_ids: &[String],
) -> Result<Vec<String>> {
	if tag_ids.is_empty() || listing_ids.is_empty() {
		return Ok(Vec::new());
	}

	let ids = sqlx::query_scalar::<_, String>(
		"\
SELECT DISTINCT listing_id
FROM listing_tags
WHERE tag_id = ANY($1)
	AND listing_id = ANY($2)",
	)
	.bind(tag_ids)
	.bind(listing_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

pub async fn fetch_listing_tags(db: &Db, listing_ids: &[String]) -> Result<Vec<ListingTag>> {
	if listing_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, ListingTag>(
		"\
SELECT lt.listing_id, t.id AS tag_id, t.name AS tag_name
FROM listing_tags lt
JOIN tags t ON t.id = lt.tag_id
WHERE lt.listing_id = ANY($1)
ORDER BY lt.listing_id ASC, t.name ASC, t.id ASC",
	)
	.bind(listing_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
