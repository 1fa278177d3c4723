//! Tests for the HTTP function client

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::domain::entities::{NetworkObject, LATEST_VERSION};

const ARN: &str = "arn:aws:lambda:us-east-1:123456789012:function:example-hello";

fn id() -> FunctionId {
    FunctionId::new("example", "hello").unwrap()
}

fn client(server: &MockServer) -> HttpFunctionClient {
    HttpFunctionClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn configuration() -> FunctionConfiguration {
    FunctionConfiguration {
        function_name: "example-hello".into(),
        handler: "example-hello.handler".into(),
        runtime: Some("nodejs18.x".into()),
        timeout: Some(10),
        vpc_config: NetworkObject::new(vec!["subnet-1".into()], vec!["sg-1".into()]),
        ..Default::default()
    }
}

#[tokio::test]
async fn describe_existing_function() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2015-03-31/functions/example-hello"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "Configuration": { "FunctionArn": ARN, "Runtime": "nodejs18.x" }
            })),
        )
        .mount(&server)
        .await;

    let state = client(&server).describe(&id()).await.unwrap();

    assert_eq!(
        state,
        RemoteFunctionState::Present {
            handle: ResourceHandle::new(ARN)
        }
    );
}

#[tokio::test]
async fn describe_not_found_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2015-03-31/functions/example-hello"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "Type": "User",
            "Message": "Function not found"
        })))
        .mount(&server)
        .await;

    let state = client(&server).describe(&id()).await.unwrap();

    assert_eq!(state, RemoteFunctionState::Absent);
}

#[tokio::test]
async fn describe_server_error_is_not_absence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
        .mount(&server)
        .await;

    let err = client(&server).describe(&id()).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 503,
            message: "throttled".into()
        }
    );
}

#[tokio::test]
async fn create_sends_configuration_and_base64_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2015-03-31/functions"))
        .and(body_partial_json(json!({
            "FunctionName": "example-hello",
            "Handler": "example-hello.handler",
            "Runtime": "nodejs18.x",
            "Timeout": 10,
            "Publish": false,
            "Code": { "ZipFile": "UEsDBA==" },
            "Tags": { "Team": "core" },
            "VpcConfig": { "SubnetIds": ["subnet-1"], "SecurityGroupIds": ["sg-1"] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "FunctionArn": ARN })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateFunctionRequest {
        configuration: configuration(),
        tags: [("Team".to_string(), "core".to_string())].into_iter().collect(),
        publish: false,
        code: Artifact::new(b"PK\x03\x04".to_vec()),
    };

    let handle = client(&server).create(&request).await.unwrap();

    assert_eq!(handle.as_str(), ARN);
}

#[tokio::test]
async fn create_conflict_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Function already exist: example-hello"
        })))
        .mount(&server)
        .await;

    let request = CreateFunctionRequest {
        configuration: configuration(),
        tags: Default::default(),
        publish: false,
        code: Artifact::new(b"zip".to_vec()),
    };

    let err = client(&server).create(&request).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Conflict("Function already exist: example-hello".into())
    );
}

#[tokio::test]
async fn create_alias_points_at_latest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2015-03-31/functions/example-hello/aliases"))
        .and(body_partial_json(json!({ "Name": "dev", "FunctionVersion": "$LATEST" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "AliasArn": format!("{}:dev", ARN) })),
        )
        .mount(&server)
        .await;

    let request = CreateAliasRequest {
        function_name: "example-hello".into(),
        name: "dev".into(),
        function_version: LATEST_VERSION.into(),
    };

    let handle = client(&server).create_alias(&request).await.unwrap();

    assert_eq!(handle.as_str(), format!("{}:dev", ARN));
}

#[tokio::test]
async fn update_code_puts_zip_file() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2015-03-31/functions/example-hello/code"))
        .and(body_partial_json(json!({ "ZipFile": "emlw", "Publish": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "FunctionArn": ARN })))
        .mount(&server)
        .await;

    let request = UpdateCodeRequest {
        function_name: "example-hello".into(),
        publish: false,
        code: Artifact::new(b"zip".to_vec()),
    };

    let handle = client(&server).update_code(&request).await.unwrap();

    assert_eq!(handle.as_str(), ARN);
}

#[tokio::test]
async fn update_config_puts_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2015-03-31/functions/example-hello/configuration"))
        .and(body_partial_json(json!({
            "Handler": "example-hello.handler",
            "VpcConfig": { "SubnetIds": ["subnet-1"], "SecurityGroupIds": ["sg-1"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "FunctionArn": ARN })))
        .mount(&server)
        .await;

    let request = UpdateConfigRequest {
        configuration: configuration(),
        tags: BTreeMap::new(),
    };

    let handle = client(&server).update_config(&request).await.unwrap();

    assert_eq!(handle.as_str(), ARN);
}

#[tokio::test]
async fn update_config_applies_tags_to_the_function() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2015-03-31/functions/example-hello/configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "FunctionArn": ARN })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/2017-03-31/tags/{}", ARN)))
        .and(body_json(json!({ "Tags": { "owner": "platform", "team": "core" } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateConfigRequest {
        configuration: configuration(),
        tags: [
            ("owner".to_string(), "platform".to_string()),
            ("team".to_string(), "core".to_string()),
        ]
        .into(),
    };

    let handle = client(&server).update_config(&request).await.unwrap();

    assert_eq!(handle.as_str(), ARN);
}

#[tokio::test]
async fn update_config_reports_tagging_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "FunctionArn": ARN })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "bad tag" })))
        .mount(&server)
        .await;

    let request = UpdateConfigRequest {
        configuration: configuration(),
        tags: [("owner".to_string(), "platform".to_string())].into(),
    };

    let err = client(&server).update_config(&request).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            message: "bad tag".into()
        }
    );
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Configuration": { "FunctionArn": ARN } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).with_token(Some("secret-token".into()));

    assert!(client.describe(&id()).await.unwrap().exists());
}

#[test]
fn configuration_body_omits_function_name() {
    let body = configuration_body(&configuration()).unwrap();
    assert!(body.get("FunctionName").is_none());
    assert_eq!(body["Handler"], "example-hello.handler");
}

#[test]
fn display_name_is_endpoint() {
    let client = HttpFunctionClient::new("http://localhost:9001/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.display_name(), "http://localhost:9001");
}
