//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: bot calls → wire encodings → decoded
//! results, and docs page → generated declaration file

use serde_json::{json, Value};
use telegram_bot_kit::schema::OutputFormat;
use telegram_bot_kit::{
    AllowedUpdate, Bot, BotConfig, Error, FileMeta, FormData, Generator, GeneratorConfig,
    RequestType,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:ABC-DEF";

fn bot(server: &MockServer) -> Bot {
    let config = BotConfig::builder().base_url(server.uri()).build();
    Bot::with_config(TOKEN, config).unwrap()
}

// ============================================================================
// Bot API Integration Tests
// ============================================================================

#[tokio::test]
async fn test_upload_file_from_disk() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123456:ABC-DEF/sendDocument"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 99}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("report.bin");
    let contents: Vec<u8> = (0..=255u8).rev().collect();
    std::fs::write(&file, &contents).unwrap();

    let mut form = FormData::new();
    form.append("chat_id", 42)
        .append("caption", "weekly report");
    form.append_file_read(
        "document",
        &file,
        Some(
            FileMeta::new()
                .filename("report.bin")
                .content_type("application/octet-stream"),
        ),
    )
    .await
    .unwrap();

    let sent: Value = bot(&server).request("sendDocument", form).await.unwrap();
    assert_eq!(sent["message_id"], 99);

    let received = server.received_requests().await.unwrap();
    let request = &received[0];
    let content_type = request
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(request
        .body
        .windows(contents.len())
        .any(|window| window == contents.as_slice()));

    let text = String::from_utf8_lossy(&request.body);
    assert!(text.contains("name=\"caption\"\r\n\r\nweekly report"));
    assert!(text.contains(
        "name=\"document\"; filename=\"report.bin\"\r\nContent-Type: application/octet-stream"
    ));
}

#[tokio::test]
async fn test_get_updates_with_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot123456:ABC-DEF/getUpdates"))
        .and(query_param("offset", "10"))
        .and(query_param("allowed_updates", r#"["message","callback_query"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [{"update_id": 10}, {"update_id": 11}]
        })))
        .mount(&server)
        .await;

    let params = json!({
        "offset": 10,
        "allowed_updates": [AllowedUpdate::Message, AllowedUpdate::CallbackQuery],
    });
    let updates: Vec<Value> = bot(&server)
        .request("getUpdates", (params, RequestType::QueryString))
        .await
        .unwrap();

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[1]["update_id"], 11);
}

#[tokio::test]
async fn test_encoding_tag_string_selects_encoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot123456:ABC-DEF/getWebhookInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"url": "", "pending_update_count": 0}
        })))
        .mount(&server)
        .await;

    let info: Value = bot(&server)
        .request("getWebhookInfo", json!("querystring"))
        .await
        .unwrap();
    assert_eq!(info["pending_update_count"], 0);
}

#[tokio::test]
async fn test_protocol_error_surfaces_code_and_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123456:ABC-DEF/sendMessage"))
        .and(body_json(json!({"chat_id": 1, "text": "hi"})))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&server)
        .await;

    let err = bot(&server)
        .request::<Value>("sendMessage", json!({"chat_id": 1, "text": "hi"}))
        .await
        .unwrap_err();

    assert!(err.is_telegram());
    let telegram = err.as_telegram().unwrap();
    assert_eq!(telegram.code(), Some(403));
    assert_eq!(telegram.message(), "Forbidden: bot was blocked by the user");
    assert_eq!(err.to_string(), "Forbidden: bot was blocked by the user");
}

#[tokio::test]
async fn test_unknown_encoding_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = bot(&server)
        .request::<Value>("getMe", json!("yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedEncoding(ref tag) if tag == "yaml"));
}

// ============================================================================
// Generator Integration Tests
// ============================================================================

const DOCS: &str = r##"<html><body>
<h4><a class="anchor" name="chat" href="#chat"></a>Chat</h4>
<p>This object represents a chat.</p>
<table class="table">
<tbody>
<tr><td>id</td><td>Integer</td><td>Unique identifier for this chat.</td></tr>
<tr><td>pinned_message</td><td>Message</td><td><em>Optional</em>. The most recent pinned message</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="getchat" href="#getchat"></a>getChat</h4>
<p>Use this method to get up to date information about the chat. Returns a Chat object on success.</p>
<table class="table">
<thead><tr><th>Parameter</th><th>Type</th><th>Required</th><th>Description</th></tr></thead>
<tbody>
<tr><td>chat_id</td><td>Integer or String</td><td>Yes</td><td>Unique identifier for the target chat</td></tr>
</tbody>
</table>
</body></html>"##;

#[tokio::test]
async fn test_generate_declarations_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bots/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOCS))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Telegram.d.ts");
    let docs_url = format!("{}/bots/api", server.uri());
    let config = GeneratorConfig::builder()
        .docs_url(&docs_url)
        .output(&output)
        .namespace("Bot")
        .build();

    let report = Generator::new(config).unwrap().run().await.unwrap();
    assert_eq!(report.types, 1);
    assert_eq!(report.methods, 1);
    assert_eq!(report.unknown_types, vec!["Message".to_string()]);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("export default Bot;\nnamespace Bot {\n"));
    assert!(written.contains("  type Message = any;\n"));
    assert!(written.contains("    pinned_message?: Message;\n"));
    assert!(written.contains("      chat_id: number | string;\n"));
    assert!(written.contains("      response: Chat;\n"));
    assert!(written.contains(&format!("@url {docs_url}#getchat")));
    assert!(written.ends_with("}\n"));
}

#[tokio::test]
async fn test_generate_json_schema_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bots/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOCS))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.json");
    let config = GeneratorConfig::builder()
        .docs_url(format!("{}/bots/api", server.uri()))
        .output(&output)
        .format(OutputFormat::Json)
        .build();

    Generator::new(config).unwrap().run().await.unwrap();

    let schema: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let get_chat = &schema["items"][1];
    assert_eq!(get_chat["title"], "getChat");
    assert_eq!(get_chat["is_method"], true);
    assert_eq!(get_chat["response"], json!({"kind": "named", "of": "Chat"}));
    assert_eq!(
        get_chat["fields"][0]["type"],
        json!({"kind": "union", "of": [{"kind": "number"}, {"kind": "string"}]})
    );
}
