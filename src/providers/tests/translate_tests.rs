use httpmock::prelude::*;
use serde_json::json;

use super::super::translate::{Translate, YandexTranslator};

#[tokio::test]
async fn posts_the_text_and_returns_the_translation() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/translate/v2/translate")
                .header("Authorization", "Api-Key secret")
                .json_body(json!({"targetLanguageCode": "ru", "texts": ["Hello"]}));
            then.status(200)
                .json_body(json!({"translations": [{"text": "Привет"}]}));
        })
        .await;

    let translator =
        YandexTranslator::with_endpoint(server.url("/translate/v2/translate"), "secret");

    assert_eq!(translator.translate("Hello").await, "Привет");
    mock.assert_async().await;
}

#[tokio::test]
async fn falls_back_to_the_input_when_the_service_is_unreachable() {
    // Discard port, nothing listens there.
    let translator = YandexTranslator::with_endpoint("http://127.0.0.1:9/translate", "key");

    assert_eq!(translator.translate("Hello").await, "Hello");
}

#[tokio::test]
async fn falls_back_to_the_input_on_server_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/translate/v2/translate");
            then.status(500).json_body(json!({"message": "quota exceeded"}));
        })
        .await;

    let translator =
        YandexTranslator::with_endpoint(server.url("/translate/v2/translate"), "key");

    assert_eq!(translator.translate("Hello").await, "Hello");
}

#[tokio::test]
async fn falls_back_to_the_input_on_a_malformed_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/translate/v2/translate");
            then.status(200).json_body(json!({"translations": []}));
        })
        .await;

    let translator =
        YandexTranslator::with_endpoint(server.url("/translate/v2/translate"), "key");

    assert_eq!(translator.translate("Hello").await, "Hello");
}
