use serde_json::Value;

/// Pulls the `message` field out of a JSON error body, if there is one.
pub(crate) async fn error_detail(response: reqwest::Response) -> String {
    let Ok(body) = response.json::<Value>().await else {
        return String::new();
    };

    body.get("message")
        .or_else(|| body.get("Message"))
        .and_then(Value::as_str)
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}
