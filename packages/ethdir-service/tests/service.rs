use std::sync::Arc;

use ethdir_config::Directory;
use ethdir_domain::{ListingType, TagIdSet, is_ranked};
use ethdir_service::{DirectoryService, Error, FacetedQuery, Stage};
use ethdir_storage::models::Listing;
use ethdir_testkit::{Call, MemorySource, Op, listing};

fn featured(mut listing: Listing) -> Listing {
	listing.is_featured = true;

	listing
}

fn directory() -> MemorySource {
	MemorySource::new()
		.with_listing(featured(listing("w1", "MetaMask", ListingType::Wallet, 50.0)))
		.with_listing(listing("w2", "Rainbow", ListingType::Wallet, 30.0))
		.with_listing(listing("w3", "Frame", ListingType::Wallet, 30.0))
		.with_listing(featured(listing("d1", "Uniswap", ListingType::Dapp, 80.0)))
		.with_listing(listing("d2", "SushiSwap", ListingType::Dapp, 40.0))
		.with_listing(listing("d3", "Aave", ListingType::Dapp, 60.0))
		.with_listing(listing("d4", "SwapBox", ListingType::Dapp, 20.0))
		.with_listing(listing("s1", "Infura", ListingType::Service, 10.0))
		.with_listing(listing("p1", "Bankless", ListingType::Podcasts, 15.0))
		.with_tag(5, "defi")
		.with_tag(1, "security")
		.with_tag(7, "mobile")
		.with_tag(99, "unused")
		.with_link("w1", 1)
		.with_link("w1", 7)
		.with_link("w2", 7)
		.with_link("d1", 5)
		.with_link("d2", 1)
		.with_link("d3", 5)
		.with_link("d4", 5)
}

fn service(source: MemorySource) -> (DirectoryService, Arc<MemorySource>) {
	let source = Arc::new(source);
	let service = DirectoryService::with_source(Directory::default(), source.clone());

	(service, source)
}

fn tag_set(ids: &[i64]) -> TagIdSet {
	ids.iter().copied().collect()
}

fn query(listing_type: Option<ListingType>, text: Option<&str>, tags: &[i64]) -> FacetedQuery {
	FacetedQuery { listing_type, text: text.map(str::to_string), tag_ids: tag_set(tags) }
}

fn ids<T, F>(items: &[T], id: F) -> Vec<&str>
where
	F: Fn(&T) -> &str,
{
	items.iter().map(id).collect()
}

#[tokio::test]
async fn wallet_listings_are_ranked_and_annotated() {
	let (service, _) = service(directory());
	let result = service.build_result(&query(Some(ListingType::Wallet), None, &[])).await;

	assert!(result.errors.is_empty(), "Unexpected errors: {:?}", result.errors);
	assert_eq!(ids(&result.listings, |item| item.listing.id.as_str()), vec!["w1", "w2", "w3"]);
	assert_eq!(
		result.listings[0].tags.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>(),
		vec!["mobile", "security"]
	);
	assert_eq!(result.listings[1].tags.len(), 1);
	assert!(result.listings[2].tags.is_empty());
	assert_eq!(
		result.tags.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>(),
		vec!["defi", "mobile", "security", "unused"]
	);
}

#[tokio::test]
async fn type_text_and_tag_filters_combine() {
	let (service, _) = service(directory());
	let result = service.build_result(&query(Some(ListingType::Dapp), Some("swap"), &[5])).await;

	assert!(result.errors.is_empty(), "Unexpected errors: {:?}", result.errors);
	assert_eq!(ids(&result.listings, |item| item.listing.id.as_str()), vec!["d1", "d4"]);

	for item in &result.listings {
		assert!(item.tags.iter().any(|tag| tag.id == 5));
	}
}

#[tokio::test]
async fn text_match_is_case_insensitive_and_name_only() {
	let (service, _) = service(directory());
	let (listings, error) = service.fetch_listings(None, Some("SWAP")).await.into_parts();

	assert!(error.is_none());
	assert_eq!(ids(&listings, |listing| listing.id.as_str()), vec!["d1", "d2", "d4"]);

	let (listings, _) = service.fetch_listings(None, Some("short description")).await.into_parts();

	assert!(listings.is_empty());
}

#[tokio::test]
async fn repeated_base_queries_return_identical_order() {
	let (service, _) = service(directory());
	let (first, _) = service.fetch_listings(None, None).await.into_parts();
	let (second, _) = service.fetch_listings(None, None).await.into_parts();

	assert!(is_ranked(&first));
	assert_eq!(first, second);
	// w2 and w3 tie on score; id breaks the tie.
	let wallets: Vec<&str> = first
		.iter()
		.filter(|listing| listing.r#type == ListingType::Wallet)
		.map(|listing| listing.id.as_str())
		.collect();

	assert_eq!(wallets, vec!["w1", "w2", "w3"]);
}

#[tokio::test]
async fn empty_tag_set_returns_candidates_unchanged() {
	let (service, source) = service(directory());
	let (candidates, _) = service.fetch_listings(None, None).await.into_parts();
	let (filtered, error) =
		service.filter_by_tags(candidates.clone(), &TagIdSet::new()).await.into_parts();

	assert!(error.is_none());
	assert_eq!(filtered, candidates);
	assert_eq!(source.count(Op::TaggedListingIds), 0);
}

#[tokio::test]
async fn tag_filter_is_a_union_over_selected_tags() {
	let (service, _) = service(directory());
	let (candidates, _) = service.fetch_listings(None, None).await.into_parts();
	let selected = tag_set(&[1, 7]);
	let (filtered, error) =
		service.filter_by_tags(candidates.clone(), &selected).await.into_parts();

	assert!(error.is_none());
	assert_eq!(ids(&filtered, |listing| listing.id.as_str()), vec!["w1", "d2", "w2"]);

	let links = [("w1", 1), ("w1", 7), ("w2", 7), ("d1", 5), ("d2", 1), ("d3", 5), ("d4", 5)];

	for candidate in &candidates {
		let linked = links
			.iter()
			.any(|(listing_id, tag_id)| *listing_id == candidate.id && selected.contains(tag_id));
		let kept = filtered.iter().any(|listing| listing.id == candidate.id);

		assert_eq!(linked, kept, "Mismatch for {}", candidate.id);
	}
}

#[tokio::test]
async fn tag_filter_pushes_candidate_ids_into_the_lookup() {
	let (service, source) = service(directory());
	let _ = service.build_result(&query(Some(ListingType::Wallet), None, &[7, 1])).await;
	let lookup = source
		.calls()
		.into_iter()
		.find(|call| call.op() == Op::TaggedListingIds)
		.expect("Expected a tagged listing lookup.");

	assert_eq!(
		lookup,
		Call::TaggedListingIds {
			tag_ids: vec![1, 7],
			listing_ids: vec!["w1".to_string(), "w2".to_string(), "w3".to_string()],
		}
	);
}

#[tokio::test]
async fn annotation_covers_exactly_the_filtered_listings() {
	let (service, source) = service(directory());
	let result = service.build_result(&query(None, None, &[5])).await;
	let lookups: Vec<Call> =
		source.calls().into_iter().filter(|call| call.op() == Op::ListingTags).collect();

	assert!(result.errors.is_empty());
	assert_eq!(ids(&result.listings, |item| item.listing.id.as_str()), vec!["d1", "d3", "d4"]);
	assert_eq!(
		lookups,
		vec![Call::ListingTags(vec!["d1".to_string(), "d3".to_string(), "d4".to_string()])]
	);
}

#[tokio::test]
async fn tag_filter_failure_keeps_unfiltered_candidates() {
	let (service, source) = service(directory().failing(Op::TaggedListingIds));
	let result = service.build_result(&query(Some(ListingType::Wallet), None, &[1])).await;
	let error = result.errors.tag_filter.as_ref().expect("Expected a tag filter error.");

	assert_eq!(error.stage, Stage::TagFilter);
	assert_eq!(ids(&result.listings, |item| item.listing.id.as_str()), vec!["w1", "w2", "w3"]);
	assert!(result.errors.base_query.is_none());
	assert!(result.errors.annotation.is_none());
	assert_eq!(source.count(Op::ListingTags), 1);
}

#[tokio::test]
async fn annotating_nothing_never_queries() {
	let (service, source) = service(directory().failing(Op::ListingTags));
	let (tag_map, error) = service.annotate_with_tags(&[]).await.into_parts();

	assert!(tag_map.is_empty());
	assert!(error.is_none());
	assert_eq!(source.count(Op::ListingTags), 0);
}

#[tokio::test]
async fn annotation_failure_renders_listings_without_tags() {
	let (service, _) = service(directory().failing(Op::ListingTags));
	let result = service.build_result(&query(Some(ListingType::Dapp), None, &[])).await;

	assert_eq!(result.listings.len(), 4);
	assert!(result.listings.iter().all(|item| item.tags.is_empty()));
	assert_eq!(
		result.errors.annotation.as_ref().map(|error| error.stage),
		Some(Stage::Annotation)
	);
	assert!(result.errors.tag_catalog.is_none());
}

#[tokio::test]
async fn annotation_omits_untagged_listings() {
	let (service, _) = service(directory());
	let (wallets, _) = service.fetch_listings(Some(ListingType::Wallet), None).await.into_parts();
	let (tag_map, error) = service.annotate_with_tags(&wallets).await.into_parts();

	assert!(error.is_none());
	assert_eq!(tag_map.len(), 2);
	assert!(!tag_map.contains_key("w3"));
}

#[tokio::test]
async fn base_query_failure_still_returns_tag_catalog() {
	let (service, source) = service(directory().failing(Op::Listings));
	let result = service.build_result(&query(Some(ListingType::Wallet), None, &[1])).await;

	assert!(result.listings.is_empty());
	assert_eq!(result.errors.base_query.as_ref().map(|error| error.stage), Some(Stage::BaseQuery));
	assert_eq!(result.tags.len(), 4);
	assert!(result.errors.tag_catalog.is_none());
	assert_eq!(source.count(Op::TaggedListingIds), 0);
	assert_eq!(source.count(Op::ListingTags), 0);
}

#[tokio::test]
async fn tag_catalog_failure_does_not_block_listings() {
	let (service, _) = service(directory().failing(Op::Tags));
	let result = service.build_result(&query(Some(ListingType::Wallet), None, &[])).await;

	assert!(result.tags.is_empty());
	assert_eq!(
		result.errors.tag_catalog.as_ref().map(|error| error.stage),
		Some(Stage::TagCatalog)
	);
	assert!(result.errors.base_query.is_none());
	assert_eq!(result.listings.len(), 3);
	assert_eq!(result.listings[0].tags.len(), 2);
}

#[tokio::test]
async fn unmatched_tag_is_an_empty_result_not_an_error() {
	let (service, source) = service(directory());
	let result = service.build_result(&query(None, None, &[99])).await;

	assert!(result.listings.is_empty());
	assert!(result.errors.is_empty());
	assert_eq!(source.count(Op::ListingTags), 0);
}

#[tokio::test]
async fn every_failure_at_once_still_produces_a_result() {
	let source = directory()
		.failing(Op::Tags)
		.failing(Op::Listings)
		.failing(Op::TaggedListingIds)
		.failing(Op::ListingTags);
	let (service, _) = service(source);
	let result = service.build_result(&query(None, Some("swap"), &[5])).await;

	assert!(result.tags.is_empty());
	assert!(result.listings.is_empty());
	assert!(result.errors.tag_catalog.is_some());
	assert!(result.errors.base_query.is_some());
	// Nothing reached the later stages, so they have nothing to report.
	assert!(result.errors.tag_filter.is_none());
	assert!(result.errors.annotation.is_none());
}

#[test]
fn faceted_query_rejects_unknown_type() {
	let err = FacetedQuery::parse(Some("nft"), None, None, 32).expect_err("Expected invalid type.");

	assert!(matches!(err, Error::InvalidInput { .. }), "Unexpected error: {err}");
}

#[test]
fn faceted_query_tolerates_malformed_tags() {
	let query = FacetedQuery::parse(Some(" dapp "), Some("  "), Some("5,abc,,3"), 32)
		.expect("Expected a valid query.");

	assert_eq!(query.listing_type, Some(ListingType::Dapp));
	assert_eq!(query.text, None);
	assert_eq!(query.tag_ids, tag_set(&[3, 5]));

	let query = FacetedQuery::parse(Some(""), None, None, 32).expect("Expected a valid query.");

	assert_eq!(query, FacetedQuery::default());
}

#[tokio::test]
async fn every_selected_tag_reaches_the_filter() {
	let raw = (1..=33).map(|id| id.to_string()).collect::<Vec<_>>().join(",");
	let err = FacetedQuery::parse(None, None, Some(&raw), 32).expect_err("Expected too many tags.");

	assert!(matches!(err, Error::InvalidInput { .. }), "Unexpected error: {err}");

	let (service, _) = service(
		MemorySource::new()
			.with_listing(listing("w1", "MetaMask", ListingType::Wallet, 50.0))
			.with_listing(listing("w2", "Rainbow", ListingType::Wallet, 30.0))
			.with_tag(33, "hardware")
			.with_link("w1", 33),
	);
	let query = FacetedQuery::parse(None, None, Some(&raw), 33).expect("Expected a valid query.");
	let result = service.build_result(&query).await;

	assert!(result.errors.is_empty());
	assert_eq!(ids(&result.listings, |item| item.listing.id.as_str()), vec!["w1"]);
}

#[tokio::test]
async fn category_page_rejects_too_many_tags_before_querying() {
	let (service, source) = service(directory());
	let raw = (1..=33).map(|id| id.to_string()).collect::<Vec<_>>().join(",");
	let err = service
		.category_page("wallet", None, Some(&raw))
		.await
		.expect_err("Expected invalid input.");

	assert!(matches!(err, Error::InvalidInput { .. }), "Unexpected error: {err}");
	assert!(source.calls().is_empty());
}

#[tokio::test]
async fn category_page_resolves_type_segment() {
	let (service, _) = service(directory());
	let page =
		service.category_page("dapp", Some("swap"), Some("5")).await.expect("Expected a page.");

	assert_eq!(page.listing_type, ListingType::Dapp);
	assert_eq!(page.label, "Dapps");
	assert_eq!(page.query.as_deref(), Some("swap"));
	assert_eq!(page.selected_tags, vec![5]);
	assert_eq!(page.result.listings.len(), 2);
	assert_eq!(page.result.tags.len(), 4);
}

#[tokio::test]
async fn unknown_category_is_not_found_before_querying() {
	let (service, source) = service(directory());
	let err = service.category_page("nft", None, None).await.expect_err("Expected not found.");

	assert!(matches!(err, Error::NotFound { .. }), "Unexpected error: {err}");
	assert!(source.calls().is_empty());
}

#[tokio::test]
async fn search_page_spans_types_and_skips_blank_text() {
	let (service, source) = service(directory());
	let blank = service.search_page(Some("   ")).await;

	assert_eq!(blank.total, 0);
	assert!(blank.query.is_none());
	assert!(source.calls().is_empty());

	let page = service.search_page(Some("swap")).await;

	assert_eq!(page.total, 3);
	assert_eq!(page.query.as_deref(), Some("swap"));
	assert_eq!(source.count(Op::Tags), 0);
}

#[tokio::test]
async fn listing_detail_includes_tags_and_related() {
	let (service, _) = service(directory());
	let detail = service.listing_detail("w1-slug").await.expect("Expected listing detail.");

	assert_eq!(detail.listing.id, "w1");
	assert_eq!(detail.tags.len(), 2);
	assert_eq!(detail.related.len(), 6);
	assert!(detail.related.iter().all(|listing| listing.id != "w1"));
	assert_eq!(detail.related[0].id, "d1");
	assert_eq!(detail.errors, Default::default());
}

#[tokio::test]
async fn listing_detail_distinguishes_missing_from_unavailable() {
	let (service, _) = service(directory());
	let err = service.listing_detail("missing").await.expect_err("Expected not found.");

	assert!(matches!(err, Error::NotFound { .. }), "Unexpected error: {err}");

	let err = service.listing_detail("  ").await.expect_err("Expected invalid input.");

	assert!(matches!(err, Error::InvalidInput { .. }), "Unexpected error: {err}");

	let (service, _) = self::service(directory().failing(Op::ListingBySlug));
	let err = service.listing_detail("w1-slug").await.expect_err("Expected unavailable.");

	assert!(matches!(err, Error::DataSourceUnavailable { .. }), "Unexpected error: {err}");
}

#[tokio::test]
async fn listing_detail_degrades_when_related_fails() {
	let (service, _) = service(directory().failing(Op::Listings));
	let detail = service.listing_detail("d1-slug").await.expect("Expected listing detail.");

	assert!(detail.related.is_empty());
	assert_eq!(detail.errors.related.as_ref().map(|error| error.stage), Some(Stage::Related));
	assert_eq!(detail.tags.len(), 1);
}

#[tokio::test]
async fn home_groups_top_listings_by_type() {
	let (service, source) = service(directory());
	let home = service.home().await;

	assert_eq!(ids(&home.featured, |listing| listing.id.as_str()), vec!["d1", "w1"]);
	assert_eq!(
		home.core_sections.iter().map(|section| section.listing_type).collect::<Vec<_>>(),
		vec![ListingType::Wallet, ListingType::Dapp, ListingType::Service]
	);
	assert_eq!(
		home.media_sections.iter().map(|section| section.label).collect::<Vec<_>>(),
		vec!["Podcasts"]
	);
	assert_eq!(
		ids(&home.core_sections[1].listings, |listing| listing.id.as_str()),
		vec!["d1", "d3", "d2", "d4"]
	);
	assert_eq!(home.tags.len(), 4);

	let limit = source
		.calls()
		.into_iter()
		.find_map(|call| match call {
			Call::Listings(filter) => filter.limit,
			_ => None,
		})
		.expect("Expected a limited listing query.");

	assert_eq!(limit, 60);
}

#[tokio::test]
async fn annotated_listing_serializes_flat() {
	let (service, _) = service(directory());
	let result = service.build_result(&query(Some(ListingType::Wallet), None, &[7])).await;
	let json = serde_json::to_value(&result).expect("Failed to serialize result.");

	assert_eq!(json["listings"][0]["id"], "w1");
	assert_eq!(json["listings"][0]["type"], "wallet");
	assert_eq!(json["listings"][0]["tags"][0]["name"], "mobile");
	assert!(json["errors"]["tag_filter"].is_null());
}
