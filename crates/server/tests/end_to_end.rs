use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use salesq_core::config::{AppConfig, SecretsProvider};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDER_PATH: &str = "/sap/opu/odata/sap/API_SALES_ORDER_SRV/A_SalesOrder('48')";

struct Harness {
    address: SocketAddr,
    upstream: MockServer,
    _secrets: TempDir,
}

/// Serves the app on an ephemeral port with every collaborator pointed at one
/// mock upstream. The function endpoint is the app itself, so the sales
/// query reaches the URL generator over HTTP.
async fn start() -> Harness {
    let upstream = MockServer::start().await;
    let secrets = TempDir::new().expect("tempdir");
    fs::write(
        secrets.path().join("S4_System_Details.json"),
        json!({
            "S4_host_details": upstream.uri(),
            "S4_username": "SALES_BOT",
            "S4_password": "s3cr3t-pw",
        })
        .to_string(),
    )
    .expect("write secret");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let mut config = AppConfig::default();
    config.llm.endpoint = upstream.uri();
    config.knowledge_base.endpoint = upstream.uri();
    config.secrets.provider = SecretsProvider::File;
    config.secrets.directory = secrets.path().to_path_buf();
    config.functions.endpoint = format!("http://{address}");

    let app = salesq_server::app(Arc::new(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    Harness { address, upstream, _secrets: secrets }
}

async fn mount_url_generation(upstream: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/knowledgebases/H9BTQMHAEO/retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "retrievalResults": [
                {"content": {"text": "A_SalesOrder: SalesOrder, SoldToParty, TotalNetAmount"}}
            ]
        })))
        .expect(1)
        .mount(upstream)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/model/.+/invoke$"))
        .and(body_partial_json(json!({"max_tokens": 512})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": ORDER_PATH}]
        })))
        .expect(1)
        .mount(upstream)
        .await;
}

async fn invoke(harness: &Harness, function: &str, event: Value) -> Value {
    let response = reqwest::Client::new()
        .post(format!("http://{}/functions/{function}/invocations", harness.address))
        .json(&event)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.expect("json")
}

fn sales_event() -> Value {
    json!({
        "agent": "SalesAgent",
        "actionGroup": "SalesOrders",
        "function": "getSalesOrder",
        "inputText": "Share Sales Order details with sales order id 48",
    })
}

#[tokio::test]
async fn url_generator_returns_host_prefixed_path() {
    let harness = start().await;
    mount_url_generation(&harness.upstream).await;

    let result = invoke(
        &harness,
        "SAP-Odata-URL-Generation",
        json!({"query": "Share Sales Order details with sales order id 48"}),
    )
    .await;

    assert_eq!(
        result,
        json!({"statusCode": 200, "body": format!("{}{ORDER_PATH}", harness.upstream.uri())})
    );
}

#[tokio::test]
async fn sales_query_answers_through_url_generator_and_sap() {
    let harness = start().await;
    mount_url_generation(&harness.upstream).await;

    Mock::given(method("GET"))
        .and(path_regex(r"A_SalesOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": {"SalesOrder": "48", "TotalNetAmount": "1250.00", "TransactionCurrency": "EUR"}
        })))
        .expect(1)
        .mount(&harness.upstream)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/model/.+/invoke$"))
        .and(body_partial_json(json!({"max_tokens": 5000, "temperature": 0.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Sales order 48 totals 1250.00 EUR."}]
        })))
        .expect(1)
        .mount(&harness.upstream)
        .await;

    let result = invoke(&harness, "SAP-Sales-Order-Query", sales_event()).await;

    assert_eq!(result["statusCode"], 200);
    assert_eq!(result["body"]["messageVersion"], "1.0");
    assert_eq!(result["body"]["response"]["actionGroup"], "SalesOrders");
    assert_eq!(
        result["body"]["response"]["functionResponse"]["responseBody"]["TEXT"]["body"],
        "\"Sales order 48 totals 1250.00 EUR.\""
    );
}

#[tokio::test]
async fn sales_query_reports_sap_server_error() {
    let harness = start().await;
    mount_url_generation(&harness.upstream).await;

    Mock::given(method("GET"))
        .and(path_regex(r"A_SalesOrder"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.upstream)
        .await;

    let result = invoke(&harness, "SAP-Sales-Order-Query", sales_event()).await;

    assert_eq!(result["statusCode"], 500);
    let message = result["body"]["error"].as_str().expect("error message");
    assert!(message.contains("Error querying SAP system"), "{message}");
}
