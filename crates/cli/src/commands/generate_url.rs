use salesq_agent::url_generator;
use serde_json::json;
use uuid::Uuid;

use super::{block_on, load_config, CommandResult};

const COMMAND: &str = "generate-url";

pub fn run(query: &str) -> CommandResult {
    let config = match load_config(COMMAND) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let invocation_id = Uuid::new_v4().to_string();
    let event = json!({ "query": query });
    match block_on(COMMAND, url_generator::invoke(&config, &event, &invocation_id)) {
        Ok(response) => CommandResult::from_invocation(COMMAND, &response),
        Err(failure) => failure,
    }
}
