use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	TagCatalog,
	BaseQuery,
	TagFilter,
	Annotation,
	Related,
}
impl Stage {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::TagCatalog => "tag_catalog",
			Self::BaseQuery => "base_query",
			Self::TagFilter => "tag_filter",
			Self::Annotation => "annotation",
			Self::Related => "related",
		}
	}
}
impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A datastore failure confined to one stage of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageError {
	pub stage: Stage,
	pub message: String,
}
impl StageError {
	pub(crate) fn from_storage(stage: Stage, err: ethdir_storage::Error) -> Self {
		tracing::warn!(%stage, error = %err, "Directory stage failed.");

		Self { stage, message: err.to_string() }
	}
}

/// The value a stage produced, plus the error it recorded if the datastore call failed.
///
/// On failure `value` holds the stage's degraded fallback, never a partial read.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
	pub value: T,
	pub error: Option<StageError>,
}
impl<T> Outcome<T> {
	pub fn ok(value: T) -> Self {
		Self { value, error: None }
	}

	pub fn degraded(value: T, error: StageError) -> Self {
		Self { value, error: Some(error) }
	}

	pub fn into_parts(self) -> (T, Option<StageError>) {
		(self.value, self.error)
	}
}

/// One error slot per stage of the faceted pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageErrors {
	pub tag_catalog: Option<StageError>,
	pub base_query: Option<StageError>,
	pub tag_filter: Option<StageError>,
	pub annotation: Option<StageError>,
}
impl StageErrors {
	pub fn is_empty(&self) -> bool {
		self.tag_catalog.is_none()
			&& self.base_query.is_none()
			&& self.tag_filter.is_none()
			&& self.annotation.is_none()
	}
}
