//! Offer line store client tests: CRUD, paging, and recalc parity.

use rust_decimal_macros::dec;

use offerdesk_backoffice::api::{ApiError, LineListQuery};
use offerdesk_backoffice::engine::{compute_line_value, compute_transport_cost};
use offerdesk_backoffice::models::{OfferLine, OfferSide};
use offerdesk_integration_tests::TestContext;

const SIDE: OfferSide = OfferSide::Purchase;

fn item_line(document_no: &str, item_no: &str) -> OfferLine {
    let mut line = OfferLine::draft(document_no);
    line.item_no = Some(item_no.into());
    line
}

#[tokio::test]
async fn create_assigns_id_and_spaced_line_numbers() {
    let ctx = TestContext::spawn().await;

    let first = ctx
        .api
        .create_offer_line(SIDE, &item_line("ZO/2024/0001", "DESKA-25"))
        .await
        .expect("create failed");
    let second = ctx
        .api
        .create_offer_line(SIDE, &item_line("ZO/2024/0001", "LATA-40"))
        .await
        .expect("create failed");
    let other_doc = ctx
        .api
        .create_offer_line(SIDE, &item_line("ZO/2024/0002", "DESKA-25"))
        .await
        .expect("create failed");

    assert!(first.id.is_some());
    assert_eq!(first.line_no.map(|n| n.as_i32()), Some(10_000));
    assert_eq!(second.line_no.map(|n| n.as_i32()), Some(20_000));
    // Numbering restarts per document.
    assert_eq!(other_doc.line_no.map(|n| n.as_i32()), Some(10_000));
}

#[tokio::test]
async fn list_filters_by_document_and_pages() {
    let ctx = TestContext::spawn().await;
    for item in ["DESKA-25", "LATA-40", "KRAWEDZIAK-10"] {
        ctx.api
            .create_offer_line(SIDE, &item_line("ZO/2024/0001", item))
            .await
            .expect("create failed");
    }
    ctx.api
        .create_offer_line(SIDE, &item_line("ZO/2024/0099", "DESKA-25"))
        .await
        .expect("create failed");

    let query = LineListQuery {
        document_no: Some("ZO/2024/0001".into()),
        page: Some(1),
        page_size: Some(2),
        ..LineListQuery::default()
    };
    let page1 = ctx.api.list_offer_lines(SIDE, &query).await.expect("list failed");
    assert_eq!(page1.total_count, 3);
    assert_eq!(page1.items.len(), 2);

    let page2 = ctx
        .api
        .list_offer_lines(
            SIDE,
            &LineListQuery {
                page: Some(2),
                ..query.clone()
            },
        )
        .await
        .expect("list failed");
    assert_eq!(page2.total_count, 3);
    assert_eq!(page2.items.len(), 1);

    // Free-text search matches the item number, case-insensitively.
    let found = ctx
        .api
        .list_offer_lines(
            SIDE,
            &LineListQuery {
                query: Some("lata".to_string()),
                ..LineListQuery::default()
            },
        )
        .await
        .expect("search failed");
    assert_eq!(found.total_count, 1);
}

#[tokio::test]
async fn missing_line_is_none_and_updates_need_an_id() {
    let ctx = TestContext::spawn().await;

    let missing = ctx
        .api
        .get_offer_line(SIDE, 999)
        .await
        .expect("lookup failed");
    assert!(missing.is_none());

    let unsaved = item_line("ZO/2024/0001", "DESKA-25");
    let err = ctx
        .api
        .update_offer_line(SIDE, &unsaved)
        .await
        .expect_err("updating a line without an id must fail");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn store_recalc_matches_the_engine() {
    let ctx = TestContext::spawn().await;

    let mut line = item_line("ZO/2024/0001", "DESKA-25");
    line.quantity = Some(dec!(3));
    line.unit_price = Some(dec!(12.345));
    line.toll_cost = Some(dec!(10));
    line.driver_cost = Some(dec!(5));
    line.vehicle_cost = Some(dec!(3));
    line.additional_costs = Some(dec!(2));
    line.cost_margin = Some(dec!(10));
    // Deliberately stale derived fields.
    line.line_value = dec!(1);
    line.transport_cost = dec!(1);

    let created = ctx
        .api
        .create_offer_line(SIDE, &line)
        .await
        .expect("create failed");
    let recalced = ctx
        .api
        .recalc_offer_line(SIDE, created.id.expect("no id"))
        .await
        .expect("recalc failed");

    // 12.345 * 3 = 37.035, rounded half away from zero.
    assert_eq!(recalced.line_value, dec!(37.04));
    // (10 + 5 + 3 + 2) * 1.10
    assert_eq!(recalced.transport_cost, dec!(22.00));
    assert_eq!(
        recalced.line_value,
        compute_line_value(line.unit_price, line.quantity)
    );
    assert_eq!(
        recalced.transport_cost,
        compute_transport_cost(
            line.toll_cost,
            line.driver_cost,
            line.vehicle_cost,
            line.additional_costs,
            line.cost_margin,
        )
    );
}

#[tokio::test]
async fn delete_removes_the_line() {
    let ctx = TestContext::spawn().await;
    let created = ctx
        .api
        .create_offer_line(SIDE, &item_line("ZO/2024/0001", "DESKA-25"))
        .await
        .expect("create failed");
    let id = created.id.expect("no id");

    ctx.api.delete_offer_line(SIDE, id).await.expect("delete failed");
    assert!(ctx
        .api
        .get_offer_line(SIDE, id)
        .await
        .expect("lookup failed")
        .is_none());
}
