//! Purchase generator.
//!
//! A background service that fabricates one purchase per tick and writes it
//! through to the domain store and then to the event log. The two writes are
//! independent calls with no transaction around them: if the second one
//! fails, or the process dies between them, the store holds a purchase that
//! the log does not. Failed ticks are logged and the schedule carries on.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use liveshop_core::clock::SharedClock;
use liveshop_core::error::DomainError;
use liveshop_core::event_log::EventLog;
use liveshop_core::model::PurchaseEvent;
use liveshop_core::rng::DeterministicRng;
use liveshop_core::store::DomainStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::codec::{RECENT_PURCHASES_KEY, encode_entry};
use crate::domain::selection::{Catalog, select_purchase};

/// Time between two generation ticks.
pub const GENERATION_INTERVAL: Duration = Duration::from_secs(10);

/// Fabricates purchases from the current catalog.
///
/// Construct once at startup and either drive it with [`start`] or call
/// [`tick`] directly.
///
/// [`start`]: PurchaseGenerator::start
/// [`tick`]: PurchaseGenerator::tick
pub struct PurchaseGenerator {
    store: Arc<dyn DomainStore>,
    event_log: Arc<dyn EventLog>,
    clock: SharedClock,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl PurchaseGenerator {
    /// Creates a generator over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn DomainStore>,
        event_log: Arc<dyn EventLog>,
        clock: SharedClock,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self {
            store,
            event_log,
            clock,
            rng,
        }
    }

    async fn load_catalog(&self) -> Result<Catalog, DomainError> {
        let (users, events, products) = tokio::try_join!(
            self.store.list_users(),
            self.store.list_events(),
            self.store.list_products(),
        )?;
        Ok(Catalog {
            users,
            events,
            products,
        })
    }

    /// Runs one generation step: load the catalog, draw a purchase, persist
    /// it, then append it to the event log.
    ///
    /// The RNG mutex is locked only around the synchronous draw, never
    /// across an await.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if users, events or products is
    /// empty, or if the drawn product or event holds a value the event log
    /// cannot carry; nothing is written in either case. Returns
    /// `DomainError::Transport` if either store fails; when the event log
    /// append fails the purchase has already been persisted.
    #[instrument(skip(self), fields(correlation_id = %Uuid::new_v4()))]
    pub async fn tick(&self) -> Result<PurchaseEvent, DomainError> {
        let catalog = self.load_catalog().await?;

        let new_purchase = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            select_purchase(&catalog, self.clock.now(), &mut *rng)?
        };

        let purchase = self.store.insert_purchase(new_purchase).await?;

        let appended = match encode_entry(&purchase) {
            Ok(entry) => self.event_log.append(RECENT_PURCHASES_KEY, entry).await,
            Err(e) => Err(e),
        };
        if let Err(e) = appended {
            warn!(
                purchase_id = purchase.id,
                error = %e,
                "purchase persisted but missing from event log"
            );
            return Err(e);
        }

        info!(
            purchase_id = purchase.id,
            user_id = purchase.user_id,
            event_id = purchase.event_id,
            product = %purchase.product.name,
            quantity = purchase.quantity,
            "simulated purchase"
        );

        Ok(purchase)
    }

    async fn run_tick(&self) {
        match self.tick().await {
            Ok(_) => {}
            Err(DomainError::Validation(reason)) => {
                info!(%reason, "skipping generation tick");
            }
            Err(e) => error!(error = %e, "generation tick failed"),
        }
    }

    /// Spawns the generation loop on the current Tokio runtime.
    ///
    /// The first tick fires one `period` after the call. A tick that
    /// overruns delays the next one rather than bunching ticks up, so two
    /// ticks never overlap.
    #[must_use]
    pub fn start(self, period: Duration) -> GeneratorHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(period, shutdown_rx));
        GeneratorHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = period.as_secs(), "purchase generator started");

        loop {
            // Shutdown is only observed while waiting; a tick in progress
            // always runs to completion.
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }
            self.run_tick().await;
        }

        info!("purchase generator stopped");
    }
}

/// Handle to a running generation loop. Dropping it also stops the loop at
/// its next wait.
#[derive(Debug)]
pub struct GeneratorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl GeneratorHandle {
    /// Signals the loop to stop and waits until it has.
    pub async fn stop(self) {
        // The receiver is gone only if the loop already exited.
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "purchase generator task ended abnormally");
        }
    }
}
