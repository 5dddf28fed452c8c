//! Integration tests for the analysis client against a mocked endpoint.

use codementor_client::{AnalysisClient, ClientError};
use codementor_core::{AnalysisRequest, Language};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(code: &str, language: Language) -> AnalysisRequest {
    AnalysisRequest {
        code: code.to_string(),
        language,
    }
}

#[tokio::test]
async fn successful_analysis_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "code": "print('hi')",
            "language": "python",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanation": "E",
            "improvements": ["a", "b"],
            "documentation": "D",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalysisClient::with_endpoint(server.uri());
    let response = client
        .analyze(&request("print('hi')", Language::Python))
        .await
        .unwrap();

    assert_eq!(response.explanation, "E");
    assert_eq!(response.improvements, ["a", "b"]);
    assert_eq!(response.documentation, "D");
}

#[tokio::test]
async fn each_language_tag_is_sent_verbatim() {
    let server = MockServer::start().await;

    for language in Language::all() {
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_json(json!({
                "code": "x = 1",
                "language": language.tag(),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "explanation": language.tag(),
                "improvements": [],
                "documentation": "",
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = AnalysisClient::with_endpoint(server.uri());
    for language in Language::all() {
        let response = client.analyze(&request("x = 1", *language)).await.unwrap();
        assert_eq!(response.explanation, language.tag());
    }
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    // The body of a failed response carries detail the client must ignore.
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "model exploded"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalysisClient::with_endpoint(server.uri());
    let err = client
        .analyze(&request("x = 1", Language::Java))
        .await
        .unwrap_err();

    match err {
        ClientError::Status(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn failure_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalysisClient::with_endpoint(server.uri());
    assert!(client
        .analyze(&request("x = 1", Language::Typescript))
        .await
        .is_err());

    // MockServer verifies the expect(1) count on drop.
}

#[tokio::test]
async fn network_failure_is_an_error() {
    // Nothing listens here.
    let client = AnalysisClient::with_endpoint("http://127.0.0.1:9");
    let err = client
        .analyze(&request("x = 1", Language::Cpp))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn loose_response_shape_degrades_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanation": "only field",
        })))
        .mount(&server)
        .await;

    let client = AnalysisClient::with_endpoint(server.uri());
    let response = client
        .analyze(&request("x = 1", Language::Javascript))
        .await
        .unwrap();

    assert_eq!(response.explanation, "only field");
    assert!(response.improvements.is_empty());
    assert!(response.documentation.is_empty());
}
