//! One buoybot run: fetch, parse, persist, then publish or log.
//!
//! The pipeline owns its collaborators for the duration of the run. Fatal
//! errors are returned to the caller; any publishing failure is logged and
//! recorded in the outcome instead.

use crate::error::Result;
use crate::feed::FeedLayout;
use crate::fetch::FeedSource;
use crate::models::{PublishOutcome, RunOutcome};
use crate::observation::build_observation;
use crate::publish::Publisher;
use crate::report::{format_observation, publish_clock, should_publish};
use crate::storage::ObservationStore;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub struct Pipeline<F, S, P> {
    feed: F,
    store: S,
    publisher: P,
    layout: FeedLayout,
    dry_run: bool,
}

impl<F, S, P> Pipeline<F, S, P>
where
    F: FeedSource,
    S: ObservationStore,
    P: Publisher,
{
    pub fn new(feed: F, store: S, publisher: P) -> Self {
        Self {
            feed,
            store,
            publisher,
            layout: FeedLayout::default(),
            dry_run: false,
        }
    }

    pub fn with_layout(mut self, layout: FeedLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Skip persisting and publishing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run once for `station` with the wall clock at `now`
    pub async fn run(&mut self, station: &str, now: DateTime<Utc>) -> Result<RunOutcome> {
        let raw = self.feed.fetch(station).await?;
        let tokens = self.layout.extract(&raw)?;
        let observation = build_observation(&tokens)?;

        let summary = format_observation(&observation);

        if self.dry_run {
            info!("Dry run - not saving or publishing");
            return Ok(RunOutcome {
                observation,
                summary,
                row_id: None,
                publish: PublishOutcome::DryRun,
            });
        }

        let row_id = self.store.save(&observation)?;

        let local = publish_clock(now);
        info!("Local time {}", local);

        let publish = if should_publish(&local) {
            match self.publisher.publish(&summary).await {
                Ok(text) => {
                    info!("Status posted: {}", text);
                    PublishOutcome::Published(text)
                }
                Err(e) => {
                    warn!("Update error: {}", e);
                    PublishOutcome::Failed(e.to_string())
                }
            }
        } else {
            info!("Not at update interval - not publishing");
            PublishOutcome::Skipped
        };

        Ok(RunOutcome {
            observation,
            summary,
            row_id: Some(row_id),
            publish,
        })
    }

    /// Release the collaborators, e.g. to inspect a store after a run
    pub fn into_parts(self) -> (F, S, P) {
        (self.feed, self.store, self.publisher)
    }
}
