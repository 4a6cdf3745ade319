use httpmock::prelude::*;
use serde_json::json;
use whisk_client::{ActionOptions, ClientConfig, ClientError, ValidationError, WhiskClient};

fn client_for(server: &MockServer) -> WhiskClient {
    let config = ClientConfig::new(server.base_url(), "23bc46b1:secret").with_namespace("guest");
    WhiskClient::new(config).unwrap()
}

#[tokio::test]
async fn create_code_action_puts_shaped_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/namespaces/guest/actions/hello")
            .query_param("overwrite", "true")
            .json_body(json!({
                "exec": {"kind": "python:3", "code": "def main(args): return args"},
                "parameters": [{"key": "greeting", "value": "hi"}]
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"namespace": "guest", "name": "hello", "version": "0.0.1"}));
    });

    let options = ActionOptions::named("hello")
        .with_action("def main(args): return args")
        .with_kind("python:3")
        .with_param("greeting", json!("hi"));

    let response = client_for(&server).actions().update(&options).await.unwrap();
    mock.assert();
    assert_eq!(response["name"], json!("hello"));
}

#[tokio::test]
async fn create_sequence_in_other_namespace() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/namespaces/team/actions/pipeline/run")
            .json_body(json!({
                "exec": {"kind": "sequence", "components": ["/team/pipeline/a", "/team/pipeline/b"]}
            }));
        then.status(200).json_body(json!({"name": "run"}));
    });

    let options = ActionOptions::named("/team/pipeline/run")
        .with_sequence(["/team/pipeline/a", "/team/pipeline/b"]);
    client_for(&server).actions().create(&options).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn blocking_result_invoke_returns_output_only() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/guest/actions/hello")
            .query_param("blocking", "true")
            .json_body(json!({"name": "world"}));
        then.status(200).json_body(json!({
            "activationId": "5fa7c7a1",
            "response": {"status": "success", "success": true, "result": {"payload": "hello world"}}
        }));
    });

    let options = ActionOptions::named("hello")
        .blocking(true)
        .result_only(true)
        .with_param("name", json!("world"));
    let output = client_for(&server).actions().invoke(&options).await.unwrap();

    mock.assert();
    assert_eq!(output, json!({"payload": "hello world"}));
}

#[tokio::test]
async fn list_passes_paging_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/guest/actions")
            .query_param("skip", "5")
            .query_param("limit", "10");
        then.status(200).json_body(json!([{"name": "hello"}]));
    });

    let options = ActionOptions {
        skip: Some(5),
        limit: Some(10),
        ..Default::default()
    };
    let listed = client_for(&server).actions().list(&options).await.unwrap();
    mock.assert();
    assert_eq!(listed, json!([{"name": "hello"}]));
}

#[tokio::test]
async fn api_errors_pass_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/namespaces/guest/actions/gone");
        then.status(404)
            .json_body(json!({"error": "The requested resource does not exist."}));
    });

    let err = client_for(&server)
        .actions()
        .delete(&ActionOptions::named("gone"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn invalid_body_never_reaches_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let options = ActionOptions {
        sequence: Some(json!([])),
        ..ActionOptions::named("empty")
    };
    let err = client_for(&server).actions().create(&options).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::InvalidSequenceLength)
    ));
    mock.assert_hits(0);
}
