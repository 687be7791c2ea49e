use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub directory: Directory,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Directory {
	/// Number of top-ranked listings loaded for the home overview before grouping by type.
	pub home_listing_limit: u32,
	pub featured_limit: u32,
	/// Other listings shown on a listing detail page.
	pub related_limit: u32,
	/// Upper bound on tag ids accepted from a single request; extra ids are dropped.
	pub max_tag_ids: u32,
}
impl Default for Directory {
	fn default() -> Self {
		Self { home_listing_limit: 60, featured_limit: 6, related_limit: 6, max_tag_ids: 32 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}
