//! End-to-end tests of the line save pipeline against the mock store.

use rust_decimal_macros::dec;

use offerdesk_backoffice::error::AppError;
use offerdesk_backoffice::models::{OfferLine, OfferSide, ParamSlot};
use offerdesk_backoffice::services::{
    LineSaveContext, SaveGuard, StaticUser, StepOutcome, SyncError, ValidationError,
};
use offerdesk_core::{LineKey, LineType, UserCode};
use offerdesk_integration_tests::TestContext;

fn test_user() -> StaticUser {
    StaticUser(UserCode::new("TESTER"))
}

/// 40 m3 of lumber at 2/unit with a 50 toll: value 80.00, blocks of
/// 25 and 15 carrying 50.00/30.00 in value and 31.25/18.75 in toll.
#[tokio::test]
async fn purchase_save_creates_line_blocks_and_parameters() {
    let ctx = TestContext::spawn().await;
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let mut line = OfferLine::draft("ZO/2024/0001");
    line.item_no = Some("DESKA-25".into());
    line.quantity = Some(dec!(40));
    line.unit_price = Some(dec!(2));
    line.toll_cost = Some(dec!(50));
    line.parameters[0] = Some(ParamSlot::new("gatunek", "C24"));

    let outcome = save
        .save_line(OfferSide::Purchase, line, None)
        .await
        .expect("save failed");

    assert!(outcome.fully_synced());
    assert_eq!(outcome.line.line_value, dec!(80.00));
    assert_eq!(outcome.line.transport_cost, dec!(50.00));
    assert_eq!(outcome.line.id, Some(1));
    let line_no = outcome.line.line_no.expect("store assigned no lineNo");
    assert_eq!(line_no.as_i32(), 10_000);

    // Audit stamps come from the injected user.
    assert_eq!(
        outcome.line.user_created.as_ref().map(|u| u.as_str()),
        Some("TESTER")
    );
    assert!(outcome.line.date_modified.is_some());

    // Read the blocks back through the client, the way a block screen
    // would.
    let key = LineKey::new(outcome.line.document_no.clone(), line_no);
    let blocks = ctx.api.list_blocks(&key).await.expect("list blocks failed");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].quantity, dec!(25));
    assert_eq!(blocks[1].quantity, dec!(15));
    assert_eq!(blocks[0].line_value, dec!(50.00));
    assert_eq!(blocks[1].line_value, dec!(30.00));
    assert_eq!(blocks[0].toll_cost, dec!(31.25));
    assert_eq!(blocks[1].toll_cost, dec!(18.75));
    assert_eq!(blocks[0].transport_cost, dec!(31.25));
    assert_eq!(blocks[1].transport_cost, dec!(18.75));

    let params = ctx.store.params_for(&key);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].param_code.as_str(), "GATUNEK");
    assert_eq!(params[0].param_value, "C24");
}

#[tokio::test]
async fn sales_save_never_writes_blocks() {
    let ctx = TestContext::spawn().await;
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let mut line = OfferLine::draft("SO/2024/0001");
    line.item_no = Some("DESKA-25".into());
    line.quantity = Some(dec!(40));
    line.unit_price = Some(dec!(2));

    let outcome = save
        .save_line(OfferSide::Sales, line, None)
        .await
        .expect("save failed");

    assert!(matches!(outcome.blocks, StepOutcome::Skipped));
    let line_no = outcome.line.line_no.expect("store assigned no lineNo");
    let key = LineKey::new(outcome.line.document_no.clone(), line_no);
    assert!(ctx
        .api
        .list_blocks(&key)
        .await
        .expect("list blocks failed")
        .is_empty());
}

#[tokio::test]
async fn edit_without_trigger_fields_skips_block_resync() {
    let ctx = TestContext::spawn().await;
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let mut line = OfferLine::draft("ZO/2024/0002");
    line.item_no = Some("DESKA-25".into());
    line.quantity = Some(dec!(30));
    line.unit_price = Some(dec!(3));
    let first = save
        .save_line(OfferSide::Purchase, line, None)
        .await
        .expect("first save failed");
    assert!(matches!(first.blocks, StepOutcome::Succeeded));

    // Changing only the description must not touch the blocks.
    let mut edited = first.line.clone();
    edited.description = Some("spruce, planed".to_string());
    let second = save
        .save_line(OfferSide::Purchase, edited, Some(&first.line))
        .await
        .expect("second save failed");
    assert!(matches!(second.blocks, StepOutcome::Skipped));

    // Changing the quantity regenerates them.
    let mut requantified = second.line.clone();
    requantified.quantity = Some(dec!(55));
    let third = save
        .save_line(OfferSide::Purchase, requantified, Some(&second.line))
        .await
        .expect("third save failed");
    assert!(matches!(third.blocks, StepOutcome::Succeeded));

    let line_no = third.line.line_no.expect("store assigned no lineNo");
    let key = LineKey::new(third.line.document_no.clone(), line_no);
    let blocks = ctx.store.blocks_for(&key);
    let quantities: Vec<_> = blocks.iter().map(|b| b.quantity).collect();
    assert_eq!(quantities, vec![dec!(25), dec!(25), dec!(5)]);
}

#[tokio::test]
async fn block_failure_keeps_the_line_committed() {
    let ctx = TestContext::spawn().await;
    ctx.store.fail_block(2);
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let mut line = OfferLine::draft("ZO/2024/0003");
    line.item_no = Some("DESKA-25".into());
    line.quantity = Some(dec!(40));
    line.unit_price = Some(dec!(2));

    let outcome = save
        .save_line(OfferSide::Purchase, line, None)
        .await
        .expect("save itself must not fail");

    assert!(!outcome.fully_synced());
    let StepOutcome::Failed(err) = &outcome.blocks else {
        panic!("expected a failed block step");
    };
    assert_eq!(
        err.to_string(),
        "Failed to (re)create purchase blocks: block 2 (1 created)"
    );
    assert!(matches!(
        err,
        SyncError::Blocks { created: 1, .. }
    ));

    // The line and block 1 are still in the store.
    let line_no = outcome.line.line_no.expect("store assigned no lineNo");
    let key = LineKey::new(outcome.line.document_no.clone(), line_no);
    assert!(ctx.store.line(1).is_some());
    assert_eq!(ctx.store.blocks_for(&key).len(), 1);
}

#[tokio::test]
async fn description_lines_keep_their_previous_value() {
    let ctx = TestContext::spawn().await;
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let mut line = OfferLine::draft("ZO/2024/0004");
    line.line_type = LineType::Description;
    line.description = Some("transport surcharge note".to_string());
    // A stray price on a description line must not produce a value.
    line.unit_price = Some(dec!(99));
    line.quantity = Some(dec!(99));

    let outcome = save
        .save_line(OfferSide::Purchase, line, None)
        .await
        .expect("save failed");
    assert_eq!(outcome.line.line_value, dec!(0));
}

#[tokio::test]
async fn validation_rejects_before_any_network_call() {
    let ctx = TestContext::spawn().await;
    let user = test_user();
    let guard = SaveGuard::new();
    let save = LineSaveContext {
        api: &ctx.api,
        user: &user,
        guard: &guard,
        max_block_quantity: dec!(25),
    };

    let no_document = OfferLine::draft("");
    let err = save
        .save_line(OfferSide::Purchase, no_document, None)
        .await
        .expect_err("empty documentNo must be rejected");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingDocumentNo)
    ));

    // Item lines need an item; nothing was stored for either attempt.
    let no_item = OfferLine::draft("ZO/2024/0005");
    let err = save
        .save_line(OfferSide::Purchase, no_item, None)
        .await
        .expect_err("item line without itemNo must be rejected");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingItemNo)
    ));
    assert!(ctx.store.line(1).is_none());
}
