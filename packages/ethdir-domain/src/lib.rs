pub mod listing_type;
pub mod query;
pub mod ranking;
pub mod tags;

pub use listing_type::{ListingType, UnknownListingType};
pub use query::{TagIdSet, TooManyTagIds, like_pattern, normalize_text, parse_tag_ids};
pub use ranking::{Ranked, is_ranked, rank_order, sort_ranked};
pub use tags::{group_by_listing, retain_matching};
