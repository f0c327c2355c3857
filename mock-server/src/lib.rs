use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_IDS_COUNT: usize = 5000;
pub const DEFAULT_LIST_COUNT: usize = 20;
const MAX_LIST_COUNT: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub id_str: String,
    pub name: String,
    pub screen_name: String,
    pub description: String,
    pub followers_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Tweet>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tweet {
    pub id: u64,
    pub id_str: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entities {
    pub hashtags: Vec<Hashtag>,
    pub urls: Vec<serde_json::Value>,
    pub user_mentions: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hashtag {
    pub indices: [u32; 2],
    pub text: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursoredIds {
    pub ids: Vec<u64>,
    pub next_cursor: i64,
    pub next_cursor_str: String,
    pub previous_cursor: i64,
    pub previous_cursor_str: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursoredUsers {
    pub users: Vec<User>,
    pub next_cursor: i64,
    pub next_cursor_str: String,
    pub previous_cursor: i64,
    pub previous_cursor_str: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub errors: Vec<ErrorEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TargetQuery {
    pub screen_name: Option<String>,
    pub user_id: Option<u64>,
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdsQuery {
    pub cursor: Option<i64>,
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub cursor: Option<i64>,
    pub count: Option<usize>,
    pub skip_status: Option<bool>,
    pub include_user_entities: Option<bool>,
}

/// Which relationship list an endpoint works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Block,
    Mute,
}

/// Known accounts plus the authenticated user's blocks and mutes, newest
/// first.
#[derive(Debug)]
pub struct Store {
    pub directory: Vec<User>,
    pub blocks: Vec<u64>,
    pub mutes: Vec<u64>,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            directory: seed_users(),
            blocks: Vec::new(),
            mutes: Vec::new(),
        }
    }

    fn relation(&self, relation: Relation) -> &Vec<u64> {
        match relation {
            Relation::Block => &self.blocks,
            Relation::Mute => &self.mutes,
        }
    }

    fn relation_mut(&mut self, relation: Relation) -> &mut Vec<u64> {
        match relation {
            Relation::Block => &mut self.blocks,
            Relation::Mute => &mut self.mutes,
        }
    }

    fn user(&self, id: u64) -> Option<&User> {
        self.directory.iter().find(|user| user.id == id)
    }

    fn resolve(&self, query: &TargetQuery) -> Result<&User, ApiFailure> {
        let screen_name = query.screen_name.as_deref().filter(|name| !name.is_empty());
        let found = match (query.user_id, screen_name) {
            (Some(id), _) => self.user(id),
            (None, Some(name)) => self
                .directory
                .iter()
                .find(|user| user.screen_name.eq_ignore_ascii_case(name)),
            (None, None) => return Err(ApiFailure::missing_target()),
        };
        found.ok_or_else(ApiFailure::user_not_found)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// A Twitter-style error response.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: i64,
    message: &'static str,
}

impl ApiFailure {
    fn new(status: StatusCode, code: i64, message: &'static str) -> Self {
        Self { status, code, message }
    }

    fn missing_target() -> Self {
        Self::new(StatusCode::BAD_REQUEST, 38, "screen_name or user_id parameter is missing.")
    }

    fn user_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, 50, "User not found.")
    }

    fn invalid_cursor() -> Self {
        Self::new(StatusCode::BAD_REQUEST, 44, "cursor parameter is invalid.")
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, 89, "Invalid or expired token.")
    }

    fn page_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, 34, "Sorry, that page does not exist.")
    }

    fn invalid_parameter() -> Self {
        Self::new(StatusCode::BAD_REQUEST, 44, "One or more parameters are invalid.")
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        log::warn!("rejecting query: {rejection}");
        Self::invalid_parameter()
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            errors: vec![ErrorEntry {
                code: self.code,
                message: self.message.to_string(),
            }],
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .nest("/1.1/blocks", relation_routes(Relation::Block))
        .nest("/1.1/mutes/users", relation_routes(Relation::Mute))
        .fallback(|| async { ApiFailure::page_not_found() })
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A query string as extracted, so a malformed one becomes an `ApiFailure`.
type Params<T> = Result<Query<T>, QueryRejection>;

fn relation_routes(relation: Relation) -> Router<Db> {
    Router::new()
        .route(
            "/create.json",
            post(move |State(db): State<Db>, query: Params<TargetQuery>| create(db, relation, query)),
        )
        .route(
            "/destroy.json",
            post(move |State(db): State<Db>, query: Params<TargetQuery>| destroy(db, relation, query)),
        )
        .route(
            "/ids.json",
            get(move |State(db): State<Db>, query: Params<IdsQuery>| ids(db, relation, query)),
        )
        .route(
            "/list.json",
            get(move |State(db): State<Db>, query: Params<ListQuery>| list(db, relation, query)),
        )
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        log::warn!("rejecting {} {}: missing bearer token", request.method(), request.uri());
        return ApiFailure::unauthorized().into_response();
    }
    next.run(request).await
}

async fn create(
    db: Db,
    relation: Relation,
    query: Params<TargetQuery>,
) -> Result<Json<User>, ApiFailure> {
    let Query(query) = query?;
    let mut store = db.write().await;
    let user = store.resolve(&query)?.clone();
    let list = store.relation_mut(relation);
    if !list.contains(&user.id) {
        list.insert(0, user.id);
    }
    log::info!("{relation:?} created for @{}", user.screen_name);
    Ok(Json(render_user(user, query.include_entities, query.skip_status)))
}

async fn destroy(
    db: Db,
    relation: Relation,
    query: Params<TargetQuery>,
) -> Result<Json<User>, ApiFailure> {
    let Query(query) = query?;
    let mut store = db.write().await;
    let user = store.resolve(&query)?.clone();
    store.relation_mut(relation).retain(|id| *id != user.id);
    log::info!("{relation:?} destroyed for @{}", user.screen_name);
    Ok(Json(render_user(user, query.include_entities, query.skip_status)))
}

async fn ids(
    db: Db,
    relation: Relation,
    query: Params<IdsQuery>,
) -> Result<Json<CursoredIds>, ApiFailure> {
    let Query(query) = query?;
    let store = db.read().await;
    let all = store.relation(relation);
    let page = Page::locate(all.len(), query.cursor, query.count, DEFAULT_IDS_COUNT, DEFAULT_IDS_COUNT)?;
    Ok(Json(CursoredIds {
        ids: all[page.start..page.end].to_vec(),
        next_cursor: page.next_cursor,
        next_cursor_str: page.next_cursor.to_string(),
        previous_cursor: page.previous_cursor,
        previous_cursor_str: page.previous_cursor.to_string(),
    }))
}

async fn list(
    db: Db,
    relation: Relation,
    query: Params<ListQuery>,
) -> Result<Json<CursoredUsers>, ApiFailure> {
    let Query(query) = query?;
    let store = db.read().await;
    let all = store.relation(relation);
    let page = Page::locate(all.len(), query.cursor, query.count, DEFAULT_LIST_COUNT, MAX_LIST_COUNT)?;
    let users = all[page.start..page.end]
        .iter()
        .filter_map(|id| store.user(*id))
        .map(|user| render_user(user.clone(), query.include_user_entities, query.skip_status))
        .collect();
    Ok(Json(CursoredUsers {
        users,
        next_cursor: page.next_cursor,
        next_cursor_str: page.next_cursor.to_string(),
        previous_cursor: page.previous_cursor,
        previous_cursor_str: page.previous_cursor.to_string(),
    }))
}

fn render_user(mut user: User, include_entities: Option<bool>, skip_status: Option<bool>) -> User {
    if skip_status == Some(true) {
        user.status = None;
    } else if include_entities == Some(false) {
        if let Some(status) = user.status.as_mut() {
            status.entities = None;
        }
    }
    user
}

/// A window into a relationship list.
///
/// Cursors are offsets: `-1` (or none) is the first page, a positive cursor
/// is the offset of a later page, and a cursor below `-1` encodes offset
/// `-cursor - 1` of an earlier page. `0` means no page in that direction.
#[derive(Debug, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
    pub next_cursor: i64,
    pub previous_cursor: i64,
}

impl Page {
    pub fn locate(
        len: usize,
        cursor: Option<i64>,
        count: Option<usize>,
        default_count: usize,
        max_count: usize,
    ) -> Result<Self, ApiFailure> {
        let count = match count {
            None | Some(0) => default_count,
            Some(count) => count.min(max_count),
        };
        let start = match cursor {
            None | Some(-1) | Some(0) => 0,
            Some(cursor) if cursor > 0 => cursor as usize,
            Some(cursor) => (-(cursor + 1)) as usize,
        };
        if start > len {
            return Err(ApiFailure::invalid_cursor());
        }
        let end = (start + count).min(len);
        let next_cursor = if end < len { end as i64 } else { 0 };
        let previous_cursor = if start == 0 {
            0
        } else {
            -(start.saturating_sub(count) as i64) - 1
        };
        Ok(Self {
            start,
            end,
            next_cursor,
            previous_cursor,
        })
    }
}

fn seed_users() -> Vec<User> {
    let accounts: [(u64, &str, &str, &str); 8] = [
        (113419064, "golang", "Go", "Go will make you love programming again. #golang"),
        (165262228, "rustlang", "Rust Language", "A language empowering everyone. #rustlang"),
        (783214, "twitter", "Twitter", "What's happening? #twitter"),
        (6253282, "twitterapi", "Twitter API", "The Real Twitter API. #api"),
        (2244994945, "twitterdev", "Twitter Dev", "The voice of the #TwitterDev team"),
        (17874544, "twittersupport", "Twitter Support", "Here to help. #support"),
        (50393960, "billgates", "Bill Gates", "Sharing things I'm learning. #books"),
        (44196397, "elonmusk", "Elon Musk", "Mars & Cars, Chips & Dips. #mars"),
    ];
    accounts
        .iter()
        .enumerate()
        .map(|(n, (id, screen_name, name, text))| {
            let tweet_id = 1_000_000_000_000_000_000 + n as u64;
            let hashtag_at = text.find('#').unwrap_or(0);
            let tag = text[hashtag_at + 1..].split_whitespace().next().unwrap_or_default();
            User {
                id: *id,
                id_str: id.to_string(),
                name: name.to_string(),
                screen_name: screen_name.to_string(),
                description: format!("Official account of {name}"),
                followers_count: 1000 * (n as u64 + 1),
                status: Some(Tweet {
                    id: tweet_id,
                    id_str: tweet_id.to_string(),
                    text: text.to_string(),
                    entities: Some(Entities {
                        hashtags: vec![Hashtag {
                            indices: [hashtag_at as u32, (hashtag_at + 1 + tag.len()) as u32],
                            text: tag.to_string(),
                        }],
                        ..Default::default()
                    }),
                }),
            }
        })
        .collect()
}
