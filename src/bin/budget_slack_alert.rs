use std::sync::Arc;

use budget_actions::config::RelayConfig;
use budget_actions::logging;
use budget_actions::relay_handler::RelayHandler;
use budget_actions::webhook::WebhookClient;
use lambda_runtime::{handler_fn, Context, Error};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let handler = Arc::new(RelayHandler::new(
        RelayConfig::from_env(),
        WebhookClient::default(),
    ));

    lambda_runtime::run(handler_fn(move |event: Value, _: Context| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event).await }
    }))
    .await?;
    Ok(())
}
