use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, CursoredIds, CursoredUsers, ErrorBody, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authorized(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, "Bearer test-token")
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/1.1/blocks/create.json?screen_name=golang")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 89);
}

#[tokio::test]
async fn non_bearer_scheme_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/1.1/blocks/ids.json")
                .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- create ---

#[tokio::test]
async fn mute_create_by_screen_name() {
    let resp = app()
        .oneshot(authorized("POST", "/1.1/mutes/users/create.json?screen_name=golang"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.screen_name, "golang");
    assert!(user.status.is_some());
}

#[tokio::test]
async fn block_create_by_user_id_with_options() {
    let resp = app()
        .oneshot(authorized(
            "POST",
            "/1.1/blocks/create.json?user_id=165262228&skip_status=true",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.screen_name, "rustlang");
    assert!(user.status.is_none());
}

#[tokio::test]
async fn create_without_entities() {
    let resp = app()
        .oneshot(authorized(
            "POST",
            "/1.1/blocks/create.json?screen_name=golang&include_entities=false",
        ))
        .await
        .unwrap();

    let user: User = body_json(resp).await;
    assert!(user.status.unwrap().entities.is_none());
}

#[tokio::test]
async fn create_unknown_user_returns_404() {
    let resp = app()
        .oneshot(authorized("POST", "/1.1/blocks/create.json?screen_name=nobody_here"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 50);
    assert_eq!(body.errors[0].message, "User not found.");
}

#[tokio::test]
async fn create_without_target_returns_400() {
    let resp = app()
        .oneshot(authorized("POST", "/1.1/mutes/users/create.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 38);
}

#[tokio::test]
async fn unknown_endpoint_returns_twitter_404() {
    let resp = app()
        .oneshot(authorized("GET", "/1.1/friends/ids.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 34);
}

// --- ids / list ---

#[tokio::test]
async fn ids_empty_has_zero_cursors() {
    let resp = app()
        .oneshot(authorized("GET", "/1.1/blocks/ids.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ids: CursoredIds = body_json(resp).await;
    assert!(ids.ids.is_empty());
    assert_eq!(ids.next_cursor, 0);
    assert_eq!(ids.next_cursor_str, "0");
    assert_eq!(ids.previous_cursor, 0);
}

#[tokio::test]
async fn ids_invalid_cursor_returns_400() {
    let resp = app()
        .oneshot(authorized("GET", "/1.1/mutes/users/ids.json?cursor=99"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 44);
}

// --- malformed queries ---

#[tokio::test]
async fn non_numeric_user_id_returns_twitter_400() {
    let resp = app()
        .oneshot(authorized("POST", "/1.1/blocks/create.json?user_id=abc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].code, 44);
}

#[tokio::test]
async fn non_numeric_cursor_returns_twitter_400() {
    let resp = app()
        .oneshot(authorized("GET", "/1.1/blocks/ids.json?cursor=x"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].code, 44);
}

// --- full lifecycle ---

#[tokio::test]
async fn block_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    for name in ["golang", "rustlang", "twitterapi"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(authorized("POST", &format!("/1.1/blocks/create.json?screen_name={name}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // blocking twice keeps one entry
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("POST", "/1.1/blocks/create.json?screen_name=golang"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // newest first, two per page
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/1.1/blocks/ids.json?count=2"))
        .await
        .unwrap();
    let first: CursoredIds = body_json(resp).await;
    assert_eq!(first.ids, vec![6253282, 165262228]);
    assert_eq!(first.next_cursor, 2);
    assert_eq!(first.previous_cursor, 0);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized(
            "GET",
            &format!("/1.1/blocks/ids.json?count=2&cursor={}", first.next_cursor),
        ))
        .await
        .unwrap();
    let second: CursoredIds = body_json(resp).await;
    assert_eq!(second.ids, vec![113419064]);
    assert_eq!(second.next_cursor, 0);
    assert_eq!(second.previous_cursor, -1);

    // mutes are a separate list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/1.1/mutes/users/ids.json"))
        .await
        .unwrap();
    let mutes: CursoredIds = body_json(resp).await;
    assert!(mutes.ids.is_empty());

    // list with skip_status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/1.1/blocks/list.json?skip_status=true"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: CursoredUsers = body_json(resp).await;
    assert_eq!(users.users.len(), 3);
    assert!(users.users.iter().all(|user| user.status.is_none()));

    // destroy
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("POST", "/1.1/blocks/destroy.json?user_id=113419064"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.screen_name, "golang");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/1.1/blocks/ids.json"))
        .await
        .unwrap();
    let ids: CursoredIds = body_json(resp).await;
    assert_eq!(ids.ids, vec![6253282, 165262228]);

    // destroying again is not an error
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("POST", "/1.1/blocks/destroy.json?user_id=113419064"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}
