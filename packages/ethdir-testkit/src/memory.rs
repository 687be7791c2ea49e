//! In-memory [`DirectorySource`] with call recording and per-operation failure injection.

use std::{
	collections::HashSet,
	sync::{Mutex, MutexGuard},
};

use ethdir_domain::{ListingType, rank_order};
use ethdir_storage::{
	BoxFuture, DirectorySource, Error, ListingFilter, Result,
	models::{Listing, ListingTag, Tag},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
	Tags,
	Listings,
	ListingBySlug,
	TaggedListingIds,
	ListingTags,
	Ping,
}

/// One recorded datastore call with the arguments it received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Tags,
	Listings(ListingFilter),
	ListingBySlug(String),
	TaggedListingIds { tag_ids: Vec<i64>, listing_ids: Vec<String> },
	ListingTags(Vec<String>),
	Ping,
}
impl Call {
	pub fn op(&self) -> Op {
		match self {
			Self::Tags => Op::Tags,
			Self::Listings(_) => Op::Listings,
			Self::ListingBySlug(_) => Op::ListingBySlug,
			Self::TaggedListingIds { .. } => Op::TaggedListingIds,
			Self::ListingTags(_) => Op::ListingTags,
			Self::Ping => Op::Ping,
		}
	}
}

#[derive(Default)]
pub struct MemorySource {
	listings: Vec<Listing>,
	tags: Vec<Tag>,
	links: Vec<(String, i64)>,
	failing: HashSet<Op>,
	calls: Mutex<Vec<Call>>,
}
impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_listing(mut self, listing: Listing) -> Self {
		self.listings.push(listing);

		self
	}

	pub fn with_tag(mut self, id: i64, name: &str) -> Self {
		self.tags.push(Tag { id, name: name.to_string() });

		self
	}

	pub fn with_link(mut self, listing_id: &str, tag_id: i64) -> Self {
		self.links.push((listing_id.to_string(), tag_id));

		self
	}

	/// Makes every call of `op` fail with [`Error::Unavailable`].
	pub fn failing(mut self, op: Op) -> Self {
		self.failing.insert(op);

		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.recorded().clone()
	}

	pub fn count(&self, op: Op) -> usize {
		self.recorded().iter().filter(|call| call.op() == op).count()
	}

	fn recorded(&self) -> MutexGuard<'_, Vec<Call>> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn record(&self, call: Call) -> Result<()> {
		let op = call.op();

		self.recorded().push(call);

		if self.failing.contains(&op) {
			return Err(Error::Unavailable(format!("injected {op:?} failure")));
		}

		Ok(())
	}

	fn tag_name(&self, tag_id: i64) -> Option<&str> {
		self.tags.iter().find(|tag| tag.id == tag_id).map(|tag| tag.name.as_str())
	}

	fn select_listings(&self, filter: &ListingFilter) -> Vec<Listing> {
		let needle = filter.text.as_deref().map(str::to_lowercase);
		let mut selected: Vec<Listing> = self
			.listings
			.iter()
			.filter(|listing| {
				filter.listing_type.is_none_or(|kind| listing.r#type == kind)
			})
			.filter(|listing| {
				needle.as_deref().is_none_or(|needle| listing.name.to_lowercase().contains(needle))
			})
			.filter(|listing| filter.exclude_id.as_deref() != Some(listing.id.as_str()))
			.cloned()
			.collect();

		selected.sort_by(rank_order);

		if let Some(limit) = filter.limit {
			selected.truncate(limit as usize);
		}

		selected
	}
}
impl DirectorySource for MemorySource {
	fn tags<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Tag>>> {
		Box::pin(async move {
			self.record(Call::Tags)?;

			let mut tags = self.tags.clone();

			tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

			Ok(tags)
		})
	}

	fn listings<'a>(&'a self, filter: &'a ListingFilter) -> BoxFuture<'a, Result<Vec<Listing>>> {
		Box::pin(async move {
			self.record(Call::Listings(filter.clone()))?;

			Ok(self.select_listings(filter))
		})
	}

	fn listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>> {
		Box::pin(async move {
			self.record(Call::ListingBySlug(slug.to_string()))?;

			Ok(self.listings.iter().find(|listing| listing.slug == slug).cloned())
		})
	}

	fn tagged_listing_ids<'a>(
		&'a self,
		tag_ids: &'a [i64],
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			self.record(Call::TaggedListingIds {
				tag_ids: tag_ids.to_vec(),
				listing_ids: listing_ids.to_vec(),
			})?;

			let mut ids: Vec<String> = self
				.links
				.iter()
				.filter(|(listing_id, tag_id)| {
					tag_ids.contains(tag_id) && listing_ids.contains(listing_id)
				})
				.map(|(listing_id, _)| listing_id.clone())
				.collect();

			ids.sort();
			ids.dedup();

			Ok(ids)
		})
	}

	fn listing_tags<'a>(
		&'a self,
		listing_ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<ListingTag>>> {
		Box::pin(async move {
			self.record(Call::ListingTags(listing_ids.to_vec()))?;

			let mut rows: Vec<ListingTag> = self
				.links
				.iter()
				.filter(|(listing_id, _)| listing_ids.contains(listing_id))
				.filter_map(|(listing_id, tag_id)| {
					self.tag_name(*tag_id).map(|name| ListingTag {
						listing_id: listing_id.clone(),
						tag_id: *tag_id,
						tag_name: name.to_string(),
					})
				})
				.collect();

			rows.sort_by(|a, b| {
				a.listing_id
					.cmp(&b.listing_id)
					.then_with(|| a.tag_name.cmp(&b.tag_name))
					.then(a.tag_id.cmp(&b.tag_id))
			});

			Ok(rows)
		})
	}

	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { self.record(Call::Ping) })
	}
}

/// Builds a published listing row; the slug is `<id>-slug`.
pub fn listing(id: &str, name: &str, kind: ListingType, score: f64) -> Listing {
	Listing {
		id: id.to_string(),
		name: name.to_string(),
		slug: format!("{id}-slug"),
		r#type: kind,
		short_desc: Some(format!("{name} short description")),
		long_desc: None,
		logo_url: None,
		thumbnail_url: None,
		url: format!("https://example.com/{id}"),
		score,
		total_votes: score as i64,
		is_featured: false,
	}
}
