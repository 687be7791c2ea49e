mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Directory, Postgres, Security, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw, path)
}

/// Parses and validates a config document; `origin` is only used in error reports.
pub fn parse(raw: &str, origin: &Path) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: origin.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let http_addr: SocketAddr = cfg.service.http_bind.parse().map_err(|_| Error::Validation {
		message: "service.http_bind must be a socket address.".to_string(),
	})?;

	if cfg.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(Error::Validation {
			message: "service.http_bind must be a loopback address when security.bind_localhost_only is true."
				.to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("directory.home_listing_limit", cfg.directory.home_listing_limit),
		("directory.featured_limit", cfg.directory.featured_limit),
		("directory.related_limit", cfg.directory.related_limit),
		("directory.max_tag_ids", cfg.directory.max_tag_ids),
	] {
		if value == 0 {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	if cfg.directory.featured_limit > cfg.directory.home_listing_limit {
		return Err(Error::Validation {
			message: "directory.featured_limit must not exceed directory.home_listing_limit."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.http_bind = cfg.service.http_bind.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
