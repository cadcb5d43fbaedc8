use std::time::Duration;

use futures::StreamExt;
use itempost::{
    config::ServiceConfig,
    delayed::AsyncItemService,
    model::Item,
    reactive::ReactiveItemService,
    service::ItemService,
    services::Services,
    stream::{ServiceStreamExt, StreamItemService},
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// posts one item through every invocation style
// delays are shortened so the whole run takes a couple of seconds
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ServiceConfig::builder()
        .delay(Duration::from_millis(200))
        .refresh_interval(Duration::from_millis(300))
        .sync_steps(5)
        .build();
    let services = Services::new(config);
    let item = Item::new("userId", "adCategory");

    let draft = services.blocking().create(&item);
    info!(draft_id = %draft.id, "blocking create");
    if let Err(err) = services.blocking().replace(&item) {
        warn!(%err, "blocking replace");
    }

    let draft = services.delayed().create(item.clone()).await?;
    info!(draft_id = %draft.id, "delayed create");

    let token = CancellationToken::new();
    let cancellable = services.delayed().clone().with_cancellation(token.clone());
    let pending = tokio::spawn(async move { cancellable.remove(Item::new("u", "c")).await });
    token.cancel();
    let result = pending.await?;
    info!(?result, "cancelled remove");

    let mut feed = services
        .stream()
        .sync()
        .on_completion(|cause| info!(?cause, "sync completed"));
    while let Some(step) = feed.next().await {
        let step = step?;
        info!(draft_id = %step.id, "sync step");
    }

    if let Some(reactive) = services.reactive() {
        let observer = reactive.replace(item.clone()).test().await;
        info!(error = ?observer.error(), "reactive replace");
        let draft = reactive.create(item).get().await?;
        info!(draft_id = %draft.id, "reactive create");
    }

    Ok(())
}
