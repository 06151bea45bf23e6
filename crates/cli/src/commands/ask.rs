use salesq_agent::sales_query;
use serde_json::json;
use uuid::Uuid;

use super::{block_on, load_config, CommandResult};

const COMMAND: &str = "ask";

#[derive(Debug, Clone)]
pub struct AskArgs {
    pub input_text: String,
    pub agent: String,
    pub action_group: String,
    pub function: String,
}

/// Runs the sales query in-process. The URL generator hop still goes through
/// `functions.endpoint`, so a server must be reachable there.
pub fn run(args: &AskArgs) -> CommandResult {
    let config = match load_config(COMMAND) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let invocation_id = Uuid::new_v4().to_string();
    let event = json!({
        "agent": args.agent,
        "actionGroup": args.action_group,
        "function": args.function,
        "inputText": args.input_text,
    });
    match block_on(COMMAND, sales_query::invoke(&config, &event, &invocation_id)) {
        Ok(response) => CommandResult::from_invocation(COMMAND, &response),
        Err(failure) => failure,
    }
}
