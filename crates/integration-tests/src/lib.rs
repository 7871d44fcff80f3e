//! Integration test harness for OfferDesk.
//!
//! Spins up an in-process mock of the offer document store (the external
//! REST service the backoffice talks to) on an ephemeral port and hands
//! tests a configured [`ApiClient`] pointed at it. No external services
//! are required.
//!
//! ```bash
//! cargo test -p offerdesk-integration-tests
//! ```
//!
//! The mock implements the endpoint surface the backoffice uses: offer
//! line CRUD plus `recalc`, the per-line parameter store, the purchase
//! block store, and the read-only catalogs. Failures can be injected per
//! parameter code and per block number to exercise the best-effort sync
//! paths.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use url::Url;

use offerdesk_backoffice::api::ApiClient;
use offerdesk_backoffice::engine::{compute_line_value, compute_transport_cost};
use offerdesk_backoffice::models::{
    DefaultItemParam, ItemSummary, LineParameter, LocationSummary, OfferLine, OfferLineBlock,
    Page, ParamDefinition, VendorSummary,
};
use offerdesk_core::{LineKey, LineNo, LineType};

/// Gap between store-assigned line numbers within one document.
const LINE_NO_STEP: i32 = 10_000;

#[derive(Debug, Default)]
struct StoreState {
    next_id: i64,
    lines: BTreeMap<i64, OfferLine>,
    params: BTreeMap<i64, LineParameter>,
    blocks: BTreeMap<i64, OfferLineBlock>,
    default_params: HashMap<String, Vec<DefaultItemParam>>,
    param_catalog: Vec<ParamDefinition>,
    items: Vec<ItemSummary>,
    vendors: Vec<VendorSummary>,
    locations: Vec<LocationSummary>,
    /// Parameter codes whose writes answer 500.
    fail_param_codes: HashSet<String>,
    /// Block numbers whose creates answer 500.
    fail_block_numbers: HashSet<i32>,
}

impl StoreState {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn next_line_no(&self, document_no: &str) -> LineNo {
        let max = self
            .lines
            .values()
            .filter(|line| line.document_no.as_str() == document_no)
            .filter_map(|line| line.line_no.map(|n| n.as_i32()))
            .max()
            .unwrap_or(0);
        LineNo::new(max + LINE_NO_STEP)
    }
}

/// Handle to the in-process mock document store.
///
/// Cloning shares the underlying state; tests keep one clone for seeding
/// and assertions while the router owns another.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ordered default parameter configuration for an item.
    pub fn seed_default_params(&self, item_no: &str, codes: &[&str]) {
        let rows = codes
            .iter()
            .map(|code| DefaultItemParam {
                item_no: item_no.into(),
                param_code: (*code).to_string(),
            })
            .collect();
        self.lock().default_params.insert(item_no.to_string(), rows);
    }

    /// Seed one parameter catalog definition.
    pub fn seed_param_definition(&self, definition: ParamDefinition) {
        self.lock().param_catalog.push(definition);
    }

    /// Seed one item catalog row.
    pub fn seed_item(&self, item: ItemSummary) {
        self.lock().items.push(item);
    }

    /// Seed one vendor directory row.
    pub fn seed_vendor(&self, vendor: VendorSummary) {
        self.lock().vendors.push(vendor);
    }

    /// Seed one location directory row.
    pub fn seed_location(&self, location: LocationSummary) {
        self.lock().locations.push(location);
    }

    /// Make every write for `code` answer 500.
    pub fn fail_param_code(&self, code: &str) {
        self.lock().fail_param_codes.insert(code.to_uppercase());
    }

    /// Make creating block number `block` answer 500.
    pub fn fail_block(&self, block: i32) {
        self.lock().fail_block_numbers.insert(block);
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.fail_param_codes.clear();
        state.fail_block_numbers.clear();
    }

    /// Stored parameter rows for one line, in insertion order.
    #[must_use]
    pub fn params_for(&self, key: &LineKey) -> Vec<LineParameter> {
        self.lock()
            .params
            .values()
            .filter(|row| {
                row.document_no == key.document_no && row.document_line_no == key.line_no
            })
            .cloned()
            .collect()
    }

    /// Stored blocks for one line, ordered by block number.
    #[must_use]
    pub fn blocks_for(&self, key: &LineKey) -> Vec<OfferLineBlock> {
        let mut blocks: Vec<OfferLineBlock> = self
            .lock()
            .blocks
            .values()
            .filter(|b| b.document_no == key.document_no && b.line_no == key.line_no)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.block.as_i32());
        blocks
    }

    /// One stored line by store id.
    #[must_use]
    pub fn line(&self, id: i64) -> Option<OfferLine> {
        self.lock().lines.get(&id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("mock store lock poisoned")
    }

    fn router(&self) -> Router {
        let line_routes = |router: Router<Self>, base: &str| {
            router
                .route(base, get(list_lines).post(create_line))
                .route(
                    &format!("{base}/{{id}}"),
                    get(get_line).put(update_line).delete(delete_line),
                )
                .route(&format!("{base}/{{id}}/recalc"), post(recalc_line))
        };
        let param_routes = |router: Router<Self>, base: &str| {
            router.route(base, get(list_params).post(create_param)).route(
                &format!("{base}/{{id}}"),
                put(update_param).delete(delete_param),
            )
        };

        let mut router = Router::new();
        router = line_routes(router, "/api/purchase-offer-lines");
        router = line_routes(router, "/api/sales-offer-lines");
        router = param_routes(router, "/api/purchase-line-parameters");
        router = param_routes(router, "/api/sales-line-parameters");
        router
            .route(
                "/api/purchase-offer-lines-blocks",
                get(list_blocks).post(create_block).delete(delete_blocks),
            )
            .route("/api/mdefault-item-parameters", get(default_item_params))
            .route("/api/params", get(search_params))
            .route("/api/mitems", get(search_items))
            .route("/api/mvendors", get(search_vendors))
            .route("/api/mlocations", get(search_locations))
            .with_state(self.clone())
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn not_found(what: &str) -> Response {
    error(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

// Offer lines -----------------------------------------------------------

async fn list_lines(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Page<OfferLine>> {
    let state = store.lock();
    let document_no = query.get("documentNo");
    let needle = query.get("query").map(|q| q.to_lowercase());
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: usize = query
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(20);

    let matching: Vec<OfferLine> = state
        .lines
        .values()
        .filter(|line| document_no.is_none_or(|doc| line.document_no.as_str() == doc))
        .filter(|line| {
            needle.as_ref().is_none_or(|needle| {
                line.item_no
                    .as_ref()
                    .is_some_and(|i| i.as_str().to_lowercase().contains(needle))
                    || line
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            })
        })
        .cloned()
        .collect();

    let total_count = matching.len() as u64;
    let items = matching
        .into_iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .collect();
    Json(Page { items, total_count })
}

async fn create_line(State(store): State<MockStore>, Json(mut line): Json<OfferLine>) -> Response {
    let mut state = store.lock();
    let id = state.assign_id();
    if line.line_no.is_none() {
        line.line_no = Some(state.next_line_no(line.document_no.as_str()));
    }
    line.id = Some(id);
    state.lines.insert(id, line.clone());
    Json(line).into_response()
}

async fn get_line(State(store): State<MockStore>, Path(id): Path<i64>) -> Response {
    match store.lock().lines.get(&id) {
        Some(line) => Json(line.clone()).into_response(),
        None => not_found("offer line"),
    }
}

async fn update_line(
    State(store): State<MockStore>,
    Path(id): Path<i64>,
    Json(mut line): Json<OfferLine>,
) -> Response {
    let mut state = store.lock();
    let Some(existing) = state.lines.get(&id) else {
        return not_found("offer line");
    };
    line.id = Some(id);
    if line.line_no.is_none() {
        line.line_no = existing.line_no;
    }
    state.lines.insert(id, line.clone());
    Json(line).into_response()
}

async fn delete_line(State(store): State<MockStore>, Path(id): Path<i64>) -> Response {
    match store.lock().lines.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("offer line"),
    }
}

/// Server-side recomputation of the derived money fields. The engine's
/// own computation must agree with this bit-for-bit.
async fn recalc_line(State(store): State<MockStore>, Path(id): Path<i64>) -> Response {
    let mut state = store.lock();
    let Some(line) = state.lines.get_mut(&id) else {
        return not_found("offer line");
    };
    if line.line_type == LineType::Item {
        line.line_value = compute_line_value(line.unit_price, line.quantity);
    }
    line.transport_cost = compute_transport_cost(
        line.toll_cost,
        line.driver_cost,
        line.vehicle_cost,
        line.additional_costs,
        line.cost_margin,
    );
    Json(line.clone()).into_response()
}

// Line parameters -------------------------------------------------------

async fn list_params(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<LineParameter>> {
    let state = store.lock();
    let document_no = query.get("documentNo");
    let line_no: Option<i32> = query.get("documentLineNo").and_then(|n| n.parse().ok());
    let code = query.get("paramCode");

    let rows = state
        .params
        .values()
        .filter(|row| document_no.is_none_or(|doc| row.document_no.as_str() == doc))
        .filter(|row| line_no.is_none_or(|no| row.document_line_no.as_i32() == no))
        .filter(|row| code.is_none_or(|code| row.param_code.as_str() == code))
        .cloned()
        .collect();
    Json(rows)
}

async fn create_param(
    State(store): State<MockStore>,
    Json(mut row): Json<LineParameter>,
) -> Response {
    let mut state = store.lock();
    if state.fail_param_codes.contains(row.param_code.as_str()) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "parameter store failure");
    }
    let id = state.assign_id();
    row.id = Some(id);
    state.params.insert(id, row.clone());
    Json(row).into_response()
}

async fn update_param(
    State(store): State<MockStore>,
    Path(id): Path<i64>,
    Json(mut row): Json<LineParameter>,
) -> Response {
    let mut state = store.lock();
    if state.fail_param_codes.contains(row.param_code.as_str()) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "parameter store failure");
    }
    if !state.params.contains_key(&id) {
        return not_found("line parameter");
    }
    row.id = Some(id);
    state.params.insert(id, row.clone());
    Json(row).into_response()
}

async fn delete_param(State(store): State<MockStore>, Path(id): Path<i64>) -> Response {
    let mut state = store.lock();
    let failing = state
        .params
        .get(&id)
        .is_some_and(|row| state.fail_param_codes.contains(row.param_code.as_str()));
    if failing {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "parameter store failure");
    }
    match state.params.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("line parameter"),
    }
}

// Purchase blocks -------------------------------------------------------

async fn list_blocks(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<OfferLineBlock>> {
    let state = store.lock();
    let document_no = query.get("documentNo");
    let line_no: Option<i32> = query.get("lineNo").and_then(|n| n.parse().ok());

    let mut blocks: Vec<OfferLineBlock> = state
        .blocks
        .values()
        .filter(|b| document_no.is_none_or(|doc| b.document_no.as_str() == doc))
        .filter(|b| line_no.is_none_or(|no| b.line_no.as_i32() == no))
        .cloned()
        .collect();
    blocks.sort_by_key(|b| b.block.as_i32());
    Json(blocks)
}

async fn create_block(
    State(store): State<MockStore>,
    Json(mut block): Json<OfferLineBlock>,
) -> Response {
    let mut state = store.lock();
    if state.fail_block_numbers.contains(&block.block.as_i32()) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "block store failure");
    }
    let id = state.assign_id();
    block.id = Some(id);
    state.blocks.insert(id, block.clone());
    Json(block).into_response()
}

async fn delete_blocks(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let mut state = store.lock();
    let document_no = query.get("documentNo").cloned();
    let line_no: Option<i32> = query.get("lineNo").and_then(|n| n.parse().ok());

    state.blocks.retain(|_, b| {
        !(document_no
            .as_ref()
            .is_none_or(|doc| b.document_no.as_str() == doc)
            && line_no.is_none_or(|no| b.line_no.as_i32() == no))
    });
    StatusCode::NO_CONTENT
}

// Catalogs --------------------------------------------------------------

async fn default_item_params(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<DefaultItemParam>> {
    let state = store.lock();
    let rows = query
        .get("itemNo")
        .and_then(|item| state.default_params.get(item))
        .cloned()
        .unwrap_or_default();
    Json(rows)
}

async fn search_params(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<ParamDefinition>> {
    let state = store.lock();
    let needle = query
        .get("query")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let rows = state
        .param_catalog
        .iter()
        .filter(|def| {
            def.code.to_lowercase().contains(&needle)
                || def.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(rows)
}

fn needle(query: &HashMap<String, String>) -> String {
    query
        .get("query")
        .map(|q| q.to_lowercase())
        .unwrap_or_default()
}

async fn search_items(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<ItemSummary>> {
    let needle = needle(&query);
    let rows = store
        .lock()
        .items
        .iter()
        .filter(|item| {
            item.item_no.as_str().to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(rows)
}

async fn search_vendors(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<VendorSummary>> {
    let needle = needle(&query);
    let rows = store
        .lock()
        .vendors
        .iter()
        .filter(|vendor| {
            vendor.vendor_no.as_str().to_lowercase().contains(&needle)
                || vendor.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(rows)
}

async fn search_locations(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<LocationSummary>> {
    let needle = needle(&query);
    let rows = store
        .lock()
        .locations
        .iter()
        .filter(|location| location.location_no.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(rows)
}

// Test context ----------------------------------------------------------

/// A running mock store plus a client configured against it.
pub struct TestContext {
    pub api: ApiClient,
    pub store: MockStore,
}

impl TestContext {
    /// Bind the mock store to an ephemeral port and return a client
    /// pointed at it.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the base URL cannot be
    /// built; both indicate a broken test environment.
    pub async fn spawn() -> Self {
        let store = MockStore::new();
        let router = store.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock store listener");
        let addr = listener.local_addr().expect("listener has no local addr");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock store crashed");
        });

        let base_url =
            Url::parse(&format!("http://{addr}")).expect("mock store addr is a valid URL");
        let api = ApiClient::new(base_url, None);
        Self { api, store }
    }
}
