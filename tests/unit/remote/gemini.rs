use super::*;
use base64::Engine as _;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct Captured {
    request_line: String,
    headers: String,
    body: serde_json::Value,
}

/// Serve exactly one HTTP exchange with a canned reply; the captured request comes back through
/// the join handle.
async fn serve_once(
    status: u16,
    reply: String,
) -> (String, tokio::task::JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = sock.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length")
                    .then(|| v.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = serde_json::from_slice(&buf[header_end..]).unwrap_or(serde_json::Value::Null);

        let response = format!(
            "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{reply}",
            reply.len()
        );
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();

        let mut lines = head.lines();
        Captured {
            request_line: lines.next().unwrap_or_default().to_owned(),
            headers: lines.collect::<Vec<_>>().join("\n").to_ascii_lowercase(),
            body,
        }
    });
    (format!("http://{addr}"), handle)
}

fn client(base_url: &str, timeout: Duration) -> GeminiClient {
    let config = MemebotConfig {
        api_key: Some("test-key".to_owned()),
        request_timeout: timeout,
        ..MemebotConfig::default()
    };
    GeminiClient::new(&config).unwrap().with_base_url(base_url)
}

fn text_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

fn ideas_json(n: usize) -> String {
    let idea = serde_json::json!({
        "title": "Bus Conductor Logic",
        "memeTemplate": {
            "templateName": "Expanding Brain",
            "topText": "Seat khali chha",
            "bottomText": "Khali chha, bhitra jaanus",
            "visualStyle": "crowded micro bus",
            "hashtags": ["#bus"]
        },
        "reelsScript": {
            "concept": "Conductor squeezes one more",
            "scenes": ["bus arrives"],
            "dialogue": "Aaunus aaunus!",
            "audioSuggestion": "horn",
            "textOverlays": "every day"
        },
        "captions": { "funny": "a", "relatable": "b", "deep": "c" }
    });
    serde_json::json!({ "ideas": vec![idea; n] }).to_string()
}

#[test]
fn missing_key_fails_at_construction() {
    let err = GeminiClient::new(&MemebotConfig::default()).unwrap_err();
    assert!(matches!(err, MemeError::Config(_)));
}

#[test]
fn response_helpers_pick_the_first_candidate() {
    let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
        "candidates": [{ "content": { "parts": [
            { "text": "{\"ideas\":" },
            { "text": "[]}" },
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
        ] } }]
    }))
    .unwrap();
    assert_eq!(resp.text().as_deref(), Some("{\"ideas\":[]}"));
    assert_eq!(resp.inline_data().map(|d| d.mime_type.as_str()), Some("image/png"));

    let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert!(empty.text().is_none());
    assert!(empty.inline_data().is_none());
}

#[tokio::test]
async fn idea_request_carries_schema_and_persona() {
    let (url, server) = serve_once(200, text_reply(&ideas_json(3))).await;
    let gemini = client(&url, Duration::from_secs(10));

    let ideas = gemini
        .generate_ideas(&IdeaRequest::new("Bus conductors"))
        .await
        .unwrap();
    assert_eq!(ideas.len(), 3);
    assert_eq!(ideas[0].meme_template.template_name, "Expanding Brain");

    let captured = server.await.unwrap();
    assert!(captured
        .request_line
        .starts_with("POST /models/gemini-2.5-flash:generateContent"));
    assert!(captured.headers.contains("x-goog-api-key: test-key"));
    let cfg = &captured.body["generationConfig"];
    assert_eq!(cfg["responseMimeType"], "application/json");
    assert_eq!(cfg["responseSchema"]["required"], serde_json::json!(["ideas"]));
    let system = captured.body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.contains("MemeBot Nepal"));
    let prompt = captured.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("Topic: Bus conductors"));
}

#[tokio::test]
async fn fenced_idea_payloads_are_accepted() {
    let fenced = format!("```json\n{}\n```", ideas_json(3));
    let (url, _server) = serve_once(200, text_reply(&fenced)).await;
    let ideas = client(&url, Duration::from_secs(10))
        .generate_ideas(&IdeaRequest::new("Momo"))
        .await
        .unwrap();
    assert_eq!(ideas.len(), 3);
}

#[tokio::test]
async fn error_statuses_become_request_errors() {
    let reply = serde_json::json!({ "error": { "code": 429, "message": "quota exhausted" } });
    let (url, _server) = serve_once(429, reply.to_string()).await;
    let err = client(&url, Duration::from_secs(10))
        .generate_ideas(&IdeaRequest::new("Momo"))
        .await
        .unwrap_err();
    assert!(err.is_request());
    assert!(err.to_string().contains("quota exhausted"));
}

#[tokio::test]
async fn empty_text_is_a_request_error() {
    let (url, _server) = serve_once(200, text_reply("  ")).await;
    let err = client(&url, Duration::from_secs(10))
        .generate_ideas(&IdeaRequest::new("Momo"))
        .await
        .unwrap_err();
    assert!(err.is_request());
}

#[tokio::test]
async fn image_bytes_are_base64_decoded() {
    let png = [0x89u8, b'P', b'N', b'G', 1, 2, 3];
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    let reply = serde_json::json!({
        "candidates": [{ "content": { "parts": [
            { "text": "here you go" },
            { "inlineData": { "mimeType": "image/png", "data": encoded } }
        ] } }]
    });
    let (url, server) = serve_once(200, reply.to_string()).await;
    let bytes = client(&url, Duration::from_secs(10))
        .generate_image("crowded micro bus")
        .await
        .unwrap();
    assert_eq!(bytes, png);

    let captured = server.await.unwrap();
    assert!(captured
        .request_line
        .starts_with("POST /models/gemini-2.5-flash-image:generateContent"));
    assert!(captured.body.get("generationConfig").is_none());
    let prompt = captured.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("Visual Description: crowded micro bus"));
    assert!(prompt.contains("Do NOT include any text"));
}

#[tokio::test]
async fn text_only_image_reply_is_a_request_error() {
    let (url, _server) = serve_once(200, text_reply("I cannot draw that")).await;
    let err = client(&url, Duration::from_secs(10))
        .generate_image("momo")
        .await
        .unwrap_err();
    assert!(err.is_request());
}

#[tokio::test]
async fn slow_servers_time_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let _hold = tokio::spawn(async move {
        let (sock, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(sock);
    });

    let err = client(&url, Duration::from_millis(200))
        .generate_image("momo")
        .await
        .unwrap_err();
    assert!(err.is_request());
    assert!(err.to_string().contains("timed out"));
}
