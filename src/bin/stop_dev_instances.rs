use std::sync::Arc;

use budget_actions::alert::BudgetEvent;
use budget_actions::config::StopConfig;
use budget_actions::ec2_instance_client::Ec2InstanceClient;
use budget_actions::logging;
use budget_actions::notification::SnsNotifier;
use budget_actions::stop_handler::StopHandler;
use lambda_runtime::{handler_fn, Context, Error};
use rusoto_core::Region;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = StopConfig::from_env()?;
    let notifier = SnsNotifier::new(Region::default(), config.topic_arn.clone());
    let handler = Arc::new(StopHandler::new(
        config,
        |region: &Region| Ec2InstanceClient::new(region.clone()),
        notifier,
    ));

    lambda_runtime::run(handler_fn(move |event: BudgetEvent, _: Context| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event).await }
    }))
    .await?;
    Ok(())
}
