use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ListingType {
	Wallet,
	Dapp,
	Learning,
	Service,
	Event,
	Media,
	Books,
	Podcasts,
	Documentaries,
}
impl ListingType {
	pub const ALL: [Self; 9] = [
		Self::Wallet,
		Self::Dapp,
		Self::Learning,
		Self::Service,
		Self::Event,
		Self::Media,
		Self::Books,
		Self::Podcasts,
		Self::Documentaries,
	];
	/// Types rendered as two-column panels on the home overview.
	pub const CORE: [Self; 4] = [Self::Wallet, Self::Dapp, Self::Service, Self::Event];
	/// Types rendered as thumbnail panels on the home overview.
	pub const MEDIA: [Self; 5] =
		[Self::Learning, Self::Media, Self::Books, Self::Podcasts, Self::Documentaries];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Wallet => "wallet",
			Self::Dapp => "dapp",
			Self::Learning => "learning",
			Self::Service => "service",
			Self::Event => "event",
			Self::Media => "media",
			Self::Books => "books",
			Self::Podcasts => "podcasts",
			Self::Documentaries => "documentaries",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Wallet => "Wallets",
			Self::Dapp => "Dapps",
			Self::Learning => "Learning",
			Self::Service => "Services",
			Self::Event => "Events",
			Self::Media => "Media",
			Self::Books => "Books",
			Self::Podcasts => "Podcasts",
			Self::Documentaries => "Documentaries",
		}
	}
}
impl fmt::Display for ListingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for ListingType {
	type Err = UnknownListingType;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();

		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
			.ok_or_else(|| UnknownListingType(raw.to_string()))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown listing type {0:?}.")]
pub struct UnknownListingType(pub String);
