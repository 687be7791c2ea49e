use ethdir_storage::models::Tag;

use crate::{DirectoryService, Outcome, Stage, StageError};

impl DirectoryService {
	/// Loads every tag, ordered by name. A failure degrades to an empty facet list.
	pub async fn fetch_tags(&self) -> Outcome<Vec<Tag>> {
		match self.source.tags().await {
			Ok(tags) => Outcome::ok(tags),
			Err(err) =>
				Outcome::degraded(Vec::new(), StageError::from_storage(Stage::TagCatalog, err)),
		}
	}
}
