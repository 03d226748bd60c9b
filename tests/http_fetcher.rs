use backoffice_console::fetcher::{FetchError, FetchRequest, Fetcher, Method};
use mockito::Matcher;
use serde_json::json;

mod common;

#[tokio::test]
async fn sends_query_and_identity_headers() {
    let mut backend = common::TestBackend::start().await;
    backend.auth.sign_in("tok-1");

    let mock = backend
        .server
        .mock("GET", "/api/v1/customers")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("size".into(), "20".into()),
            Matcher::UrlEncoded("sort".into(), "name,asc".into()),
        ]))
        .match_header("x-app-id", common::APP_ID)
        .match_header("x-app-version", common::APP_VERSION)
        .match_header("x-2fa-token", "")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("x-total-count", "57")
        .with_body(r#"[{"id":1,"name":"Amina"}]"#)
        .create_async()
        .await;

    let fetcher = backend.fetcher();
    let request = FetchRequest::get().params(vec![
        ("page".to_string(), "2".to_string()),
        ("size".to_string(), "20".to_string()),
        ("sort".to_string(), "name,asc".to_string()),
    ]);
    let response = fetcher.fetch("/customers", request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.total_count(), 57);
    assert_eq!(response.body, json!([{"id": 1, "name": "Amina"}]));
}

#[tokio::test]
async fn omits_bearer_token_when_auth_is_excluded() {
    let mut backend = common::TestBackend::start().await;
    backend.auth.sign_in("tok-1");
    backend.auth.set_two_factor_token("123456");

    let mock = backend
        .server
        .mock("GET", "/api/v1/ussd-menus")
        .match_header("authorization", Matcher::Missing)
        .match_header("x-2fa-token", "123456")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let fetcher = backend.fetcher();
    fetcher
        .fetch("/ussd-menus", FetchRequest::get().without_auth())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization() {
    let mut backend = common::TestBackend::start().await;

    let mock = backend
        .server
        .mock("GET", "/api/v1/charges")
        .match_header("authorization", Matcher::Missing)
        .match_header("x-app-id", common::APP_ID)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let response = backend
        .fetcher()
        .fetch("/charges", FetchRequest::get())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.total_count(), 0);
}

#[tokio::test]
async fn posts_json_body() {
    let mut backend = common::TestBackend::start().await;

    let mock = backend
        .server
        .mock("POST", "/api/v1/merchants")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "Duka la Mama"})))
        .with_status(201)
        .with_body(r#"{"id":12,"name":"Duka la Mama"}"#)
        .create_async()
        .await;

    let request = FetchRequest::with_json(Method::Post, &json!({"name": "Duka la Mama"})).unwrap();
    let response = backend.fetcher().fetch("/merchants", request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 201);
    assert_eq!(response.body["id"], 12);
}

#[tokio::test]
async fn empty_body_decodes_to_null() {
    let mut backend = common::TestBackend::start().await;

    let mock = backend
        .server
        .mock("DELETE", "/api/v1/staff/4")
        .with_status(204)
        .create_async()
        .await;

    let response = backend
        .fetcher()
        .fetch("/staff/4", FetchRequest::delete())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 204);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn error_status_carries_backend_message() {
    let mut backend = common::TestBackend::start().await;

    backend
        .server
        .mock("GET", "/api/v1/customers/99")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Customer 99 not found"}"#)
        .create_async()
        .await;

    let result = backend
        .fetcher()
        .fetch("/customers/99", FetchRequest::get())
        .await;

    assert_eq!(
        result,
        Err(FetchError::Status {
            status: 404,
            message: "Customer 99 not found".to_string(),
        })
    );
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut backend = common::TestBackend::start().await;

    backend
        .server
        .mock("GET", "/api/v1/customers")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let result = backend
        .fetcher()
        .fetch("/customers", FetchRequest::get())
        .await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}
