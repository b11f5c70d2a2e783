//! In-memory stand-in for the broker's HTTP management API.
//!
//! Covers the endpoints the client's integration tests drive. Status codes
//! follow the real broker: 201 on creation, 204 on update and deletion, 404
//! for unknown objects, 401 without valid Basic credentials.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const USER: &str = "guest";
pub const PASSWORD: &str = "guest";
pub const CLUSTER_NAME: &str = "rabbit@mock";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vhost {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub durable: bool,
    pub auto_delete: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Queue {
    pub name: String,
    pub vhost: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub messages: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Binding {
    pub source: String,
    pub vhost: String,
    pub destination: String,
    pub destination_type: String,
    pub routing_key: String,
    pub properties_key: String,
}

#[derive(Deserialize)]
pub struct DeclareExchange {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
}

#[derive(Deserialize)]
pub struct DeclareQueue {
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
}

#[derive(Deserialize)]
pub struct DeclareBinding {
    #[serde(default)]
    pub routing_key: String,
}

#[derive(Deserialize)]
pub struct ClusterName {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
    pub name: Option<String>,
}

pub struct Broker {
    pub cluster_name: String,
    pub vhosts: BTreeMap<String, Vhost>,
    pub exchanges: BTreeMap<(String, String), Exchange>,
    pub queues: BTreeMap<(String, String), Queue>,
    pub bindings: Vec<Binding>,
}

impl Default for Broker {
    fn default() -> Self {
        let vhosts = BTreeMap::from([("/".to_string(), Vhost { name: "/".to_string() })]);
        Broker {
            cluster_name: CLUSTER_NAME.to_string(),
            vhosts,
            exchanges: BTreeMap::new(),
            queues: BTreeMap::new(),
            bindings: Vec::new(),
        }
    }
}

pub type Db = Arc<RwLock<Broker>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Broker::default()));
    Router::new()
        .route("/api/cluster-name", get(get_cluster_name).put(set_cluster_name))
        .route("/api/nodes", get(list_nodes))
        .route("/api/vhosts", get(list_vhosts))
        .route("/api/vhosts/{vhost}", get(get_vhost).put(create_vhost).delete(delete_vhost))
        .route("/api/exchanges", get(list_exchanges))
        .route(
            "/api/exchanges/{vhost}/{name}",
            get(get_exchange).put(create_exchange).delete(delete_exchange),
        )
        .route("/api/queues", get(list_queues))
        .route(
            "/api/queues/{vhost}/{name}",
            get(get_queue).put(create_queue).delete(delete_queue),
        )
        .route("/api/queues/{vhost}/{name}/contents", delete(purge_queue))
        .route(
            "/api/bindings/{vhost}/e/{source}/q/{destination}",
            get(list_queue_bindings).post(create_queue_binding),
        )
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let expected = format!("Basic {}", BASE64_STANDARD.encode(format!("{USER}:{PASSWORD}")));
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes());
    if !authorized {
        tracing::debug!(uri = %request.uri(), "rejecting unauthenticated request");
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn get_cluster_name(State(db): State<Db>) -> Json<Value> {
    let name = db.read().await.cluster_name.clone();
    Json(json!({ "name": name }))
}

async fn set_cluster_name(State(db): State<Db>, Json(input): Json<ClusterName>) -> StatusCode {
    db.write().await.cluster_name = input.name;
    StatusCode::NO_CONTENT
}

async fn list_nodes() -> Json<Value> {
    Json(json!([{ "name": CLUSTER_NAME, "type": "disc", "running": true }]))
}

async fn list_vhosts(State(db): State<Db>) -> Json<Vec<Vhost>> {
    Json(db.read().await.vhosts.values().cloned().collect())
}

async fn get_vhost(State(db): State<Db>, Path(vhost): Path<String>) -> Result<Json<Vhost>, StatusCode> {
    let broker = db.read().await;
    broker.vhosts.get(&vhost).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_vhost(State(db): State<Db>, Path(vhost): Path<String>) -> StatusCode {
    let mut broker = db.write().await;
    if broker.vhosts.contains_key(&vhost) {
        return StatusCode::NO_CONTENT;
    }
    broker.vhosts.insert(vhost.clone(), Vhost { name: vhost });
    StatusCode::CREATED
}

async fn delete_vhost(State(db): State<Db>, Path(vhost): Path<String>) -> StatusCode {
    let mut broker = db.write().await;
    if broker.vhosts.remove(&vhost).is_none() {
        return StatusCode::NOT_FOUND;
    }
    broker.exchanges.retain(|(v, _), _| *v != vhost);
    broker.queues.retain(|(v, _), _| *v != vhost);
    broker.bindings.retain(|b| b.vhost != vhost);
    StatusCode::NO_CONTENT
}

async fn list_exchanges(State(db): State<Db>) -> Json<Vec<Exchange>> {
    Json(db.read().await.exchanges.values().cloned().collect())
}

async fn get_exchange(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
) -> Result<Json<Exchange>, StatusCode> {
    let broker = db.read().await;
    broker
        .exchanges
        .get(&(vhost, name))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_exchange(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
    Json(input): Json<DeclareExchange>,
) -> StatusCode {
    let mut broker = db.write().await;
    if !broker.vhosts.contains_key(&vhost) {
        return StatusCode::NOT_FOUND;
    }
    let exchange = Exchange {
        name: name.clone(),
        vhost: vhost.clone(),
        kind: input.kind,
        durable: input.durable,
        auto_delete: input.auto_delete,
    };
    match broker.exchanges.insert((vhost, name), exchange) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::CREATED,
    }
}

async fn delete_exchange(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
) -> StatusCode {
    let mut broker = db.write().await;
    match broker.exchanges.remove(&(vhost, name)) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// Plain array without `page`, otherwise a page object like the broker's.
async fn list_queues(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Value> {
    let broker = db.read().await;
    let filtered: Vec<&Queue> = broker
        .queues
        .values()
        .filter(|q| params.name.as_ref().map_or(true, |name| q.name.contains(name.as_str())))
        .collect();

    let Some(page) = params.page else {
        return Json(json!(filtered));
    };
    let page_size = params.page_size.unwrap_or(100).max(1);
    let items: Vec<&Queue> = filtered
        .iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .copied()
        .collect();
    Json(json!({
        "filtered_count": filtered.len(),
        "item_count": items.len(),
        "items": items,
        "page": page,
        "page_count": filtered.len().div_ceil(page_size),
        "page_size": page_size,
        "total_count": broker.queues.len(),
    }))
}

async fn get_queue(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
) -> Result<Json<Queue>, StatusCode> {
    let broker = db.read().await;
    broker
        .queues
        .get(&(vhost, name))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_queue(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
    Json(input): Json<DeclareQueue>,
) -> StatusCode {
    let mut broker = db.write().await;
    if !broker.vhosts.contains_key(&vhost) {
        return StatusCode::NOT_FOUND;
    }
    let key = (vhost.clone(), name.clone());
    if broker.queues.contains_key(&key) {
        return StatusCode::NO_CONTENT;
    }
    broker.queues.insert(
        key,
        Queue {
            name,
            vhost,
            durable: input.durable,
            auto_delete: input.auto_delete,
            messages: 0,
        },
    );
    StatusCode::CREATED
}

async fn delete_queue(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
) -> StatusCode {
    let mut broker = db.write().await;
    if broker.queues.remove(&(vhost.clone(), name.clone())).is_none() {
        return StatusCode::NOT_FOUND;
    }
    broker
        .bindings
        .retain(|b| !(b.vhost == vhost && b.destination == name && b.destination_type == "queue"));
    StatusCode::NO_CONTENT
}

async fn purge_queue(
    State(db): State<Db>,
    Path((vhost, name)): Path<(String, String)>,
) -> StatusCode {
    let mut broker = db.write().await;
    match broker.queues.get_mut(&(vhost, name)) {
        Some(queue) => {
            queue.messages = 0;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_queue_bindings(
    State(db): State<Db>,
    Path((vhost, source, destination)): Path<(String, String, String)>,
) -> Json<Vec<Binding>> {
    let broker = db.read().await;
    Json(
        broker
            .bindings
            .iter()
            .filter(|b| {
                b.vhost == vhost
                    && b.source == source
                    && b.destination == destination
                    && b.destination_type == "queue"
            })
            .cloned()
            .collect(),
    )
}

async fn create_queue_binding(
    State(db): State<Db>,
    Path((vhost, source, destination)): Path<(String, String, String)>,
    Json(input): Json<DeclareBinding>,
) -> Response {
    let mut broker = db.write().await;
    let exchange_exists = broker.exchanges.contains_key(&(vhost.clone(), source.clone()));
    let queue_exists = broker.queues.contains_key(&(vhost.clone(), destination.clone()));
    if !exchange_exists || !queue_exists {
        return StatusCode::NOT_FOUND.into_response();
    }

    let properties_key = if input.routing_key.is_empty() {
        "~".to_string()
    } else {
        input.routing_key.clone()
    };
    let location = properties_key.clone();
    broker.bindings.push(Binding {
        source,
        vhost,
        destination,
        destination_type: "queue".to_string(),
        routing_key: input.routing_key,
        properties_key,
    });
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}
