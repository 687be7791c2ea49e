pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Data source unavailable: {message}")]
	DataSourceUnavailable { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Invalid input: {message}")]
	InvalidInput { message: String },
}
impl From<ethdir_storage::Error> for Error {
	fn from(err: ethdir_storage::Error) -> Self {
		match err {
			ethdir_storage::Error::Sqlx(inner) =>
				Self::DataSourceUnavailable { message: inner.to_string() },
			ethdir_storage::Error::Unavailable(message) => Self::DataSourceUnavailable { message },
		}
	}
}
