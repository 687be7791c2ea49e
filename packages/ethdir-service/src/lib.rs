pub mod annotate;
pub mod assemble;
pub mod catalog;
pub mod detail;
pub mod home;
pub mod listings;
pub mod pages;
pub mod stage;
pub mod tag_filter;

mod error;

pub use annotate::TagMap;
pub use assemble::{AnnotatedListing, AnnotatedResult, FacetedQuery, ListingSummary};
pub use detail::{DetailErrors, ListingDetail};
pub use error::{Error, Result};
pub use home::{HomeErrors, HomePage, TypeSection};
pub use pages::{CategoryPage, SearchPage};
pub use stage::{Outcome, Stage, StageError, StageErrors};

use std::sync::Arc;

use ethdir_config::Directory;
use ethdir_storage::{DirectorySource, PgSource, db::Db};

/// Request-scoped read pipeline over a directory datastore.
///
/// Holds no per-request state; every call starts from the datastore.
pub struct DirectoryService {
	pub cfg: Directory,
	pub source: Arc<dyn DirectorySource>,
}
impl DirectoryService {
	pub fn new(cfg: Directory, db: Db) -> Self {
		Self::with_source(cfg, Arc::new(PgSource::new(db)))
	}

	pub fn with_source(cfg: Directory, source: Arc<dyn DirectorySource>) -> Self {
		Self { cfg, source }
	}

	pub async fn ping(&self) -> Result<()> {
		self.source.ping().await?;

		Ok(())
	}
}
