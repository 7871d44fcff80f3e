//! Typeahead lookups over the item/vendor/location catalogs.

use offerdesk_backoffice::models::{ItemSummary, LocationSummary, VendorSummary};
use offerdesk_core::UnitOfMeasure;
use offerdesk_integration_tests::TestContext;

#[tokio::test]
async fn item_search_matches_number_and_description() {
    let ctx = TestContext::spawn().await;
    ctx.store.seed_item(ItemSummary {
        item_no: "DESKA-25".into(),
        description: "Spruce board 25mm".to_string(),
        base_unit_of_measure: UnitOfMeasure::M3,
    });
    ctx.store.seed_item(ItemSummary {
        item_no: "LATA-40".into(),
        description: "Batten 40mm".to_string(),
        base_unit_of_measure: UnitOfMeasure::M3,
    });

    let by_number = ctx.api.search_items("deska").await.expect("search failed");
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].item_no.as_str(), "DESKA-25");

    let by_description = ctx.api.search_items("batten").await.expect("search failed");
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].item_no.as_str(), "LATA-40");

    let all = ctx.api.search_items("").await.expect("search failed");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn vendor_search_matches_name() {
    let ctx = TestContext::spawn().await;
    ctx.store.seed_vendor(VendorSummary {
        vendor_no: "V00010".into(),
        name: "Tartak Podhale".to_string(),
        city: Some("Nowy Targ".to_string()),
    });

    let found = ctx.api.search_vendors("tartak").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].vendor_no.as_str(), "V00010");
    assert!(ctx
        .api
        .search_vendors("nomatch")
        .await
        .expect("search failed")
        .is_empty());
}

#[tokio::test]
async fn location_search_matches_number() {
    let ctx = TestContext::spawn().await;
    ctx.store.seed_location(LocationSummary {
        location_no: "MAG-01".into(),
        name: "Main yard".to_string(),
        address: None,
        city: None,
        post_code: None,
        country: None,
    });

    let found = ctx.api.search_locations("mag").await.expect("search failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location_no.as_str(), "MAG-01");
}
