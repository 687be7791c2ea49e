pub mod db;
pub mod models;
pub mod queries;
pub mod schema;
pub mod source;

mod error;

pub use error::Error;
pub use source::{BoxFuture, DirectorySource, ListingFilter, PgSource};

pub type Result<T, E = Error> = std::result::Result<T, E>;
