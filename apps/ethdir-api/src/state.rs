use std::sync::Arc;

use ethdir_service::DirectoryService;
use ethdir_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DirectoryService>,
}
impl AppState {
	pub async fn new(config: &ethdir_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;
		let service = DirectoryService::new(config.directory.clone(), db);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: DirectoryService) -> Self {
		Self { service: Arc::new(service) }
	}
}
