//! NDVI analysis view: region selection, metric retrieval and classification.
//!
//! [`NdviView`] is the synchronous state machine. Every selection bumps the
//! request generation, and a resolved fetch is applied only when it carries the
//! current generation, so a slow answer for an old region can never overwrite
//! the outcome of a newer one. [`NdviController`] drives the view with a
//! [`MetricRetriever`], running each fetch on its own tokio task.

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use shared::{
    domain::{MetricReading, Region, VegetationMetric},
    protocol::{NdviPhase, NdviSnapshot},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    retrieval::{fetch_with_policy, MetricRetriever, RetrievalError, RetryPolicy},
    vegetation,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Fetch request issued for a non-empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTicket {
    pub generation: Generation,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NdviState {
    Idle,
    Loading { generation: Generation },
    MetricReady(MetricReading),
    Failed { error: RetrievalError },
}

impl NdviState {
    pub fn phase(&self) -> NdviPhase {
        match self {
            NdviState::Idle => NdviPhase::Idle,
            NdviState::Loading { .. } => NdviPhase::Loading,
            NdviState::MetricReady(_) => NdviPhase::MetricReady,
            NdviState::Failed { .. } => NdviPhase::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
pub struct NdviView {
    region: Region,
    generation: Generation,
    state: NdviState,
}

impl Default for NdviView {
    fn default() -> Self {
        Self::new()
    }
}

impl NdviView {
    pub fn new() -> Self {
        Self {
            region: Region::empty(),
            generation: Generation::default(),
            state: NdviState::Idle,
        }
    }

    /// Records a new selection, superseding anything in flight. Returns the
    /// fetch to run, or `None` when the region is empty and the view is idle.
    pub fn select_region(&mut self, region: Region) -> Option<MetricTicket> {
        self.generation = self.generation.next();
        self.region = region;
        debug!(
            generation = self.generation.0,
            points = self.region.len(),
            "region selected"
        );

        if self.region.is_empty() {
            self.state = NdviState::Idle;
            return None;
        }

        self.state = NdviState::Loading {
            generation: self.generation,
        };
        Some(MetricTicket {
            generation: self.generation,
            region: self.region.clone(),
        })
    }

    /// Applies a fetch outcome if it belongs to the current selection.
    pub fn resolve(
        &mut self,
        generation: Generation,
        result: Result<VegetationMetric, RetrievalError>,
    ) -> Resolution {
        let in_flight = matches!(
            self.state,
            NdviState::Loading { generation: current } if current == generation
        );
        if !in_flight {
            debug!(
                generation = generation.0,
                current = self.generation.0,
                "dropping stale metric result"
            );
            return Resolution::Stale;
        }

        self.state = match result {
            Ok(metric) => {
                let reading = vegetation::reading(metric);
                info!(
                    generation = generation.0,
                    metric = metric.value(),
                    status = %reading.status,
                    band = reading.band.id(),
                    "vegetation metric ready"
                );
                NdviState::MetricReady(reading)
            }
            Err(error) => {
                warn!(generation = generation.0, "metric retrieval failed: {error}");
                NdviState::Failed { error }
            }
        };
        Resolution::Applied
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> &NdviState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, NdviState::Loading { .. })
    }

    pub fn reading(&self) -> Option<&MetricReading> {
        match &self.state {
            NdviState::MetricReady(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn metric(&self) -> Option<VegetationMetric> {
        self.reading().map(|reading| reading.metric)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            NdviState::Failed { error } => Some(error.user_message()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> NdviSnapshot {
        let error = match &self.state {
            NdviState::Failed { error } => Some(error.to_api_error()),
            _ => None,
        };
        NdviSnapshot {
            phase: self.state.phase(),
            generation: self.generation.0,
            region: self.region.clone(),
            reading: self.reading().copied(),
            error,
        }
    }
}

#[derive(Debug)]
pub enum NdviEvent {
    MetricResolved {
        generation: Generation,
        result: Result<VegetationMetric, RetrievalError>,
    },
}

/// Owns an [`NdviView`] and runs its fetches against a retriever.
///
/// Must be used from inside a tokio runtime.
pub struct NdviController {
    view: NdviView,
    retriever: Arc<dyn MetricRetriever>,
    policy: RetryPolicy,
    events_tx: mpsc::UnboundedSender<NdviEvent>,
    events_rx: mpsc::UnboundedReceiver<NdviEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl NdviController {
    pub fn new(retriever: Arc<dyn MetricRetriever>, policy: RetryPolicy) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            view: NdviView::new(),
            retriever,
            policy,
            events_tx,
            events_rx,
            in_flight: None,
        }
    }

    pub fn view(&self) -> &NdviView {
        &self.view
    }

    pub fn select_region(&mut self, region: Region) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        let Some(ticket) = self.view.select_region(region) else {
            return;
        };

        let retriever = Arc::clone(&self.retriever);
        let policy = self.policy;
        let events_tx = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let fetch = fetch_with_policy(retriever.as_ref(), &ticket.region, &policy);
            let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err(RetrievalError::Internal(
                    "retrieval task panicked".to_string(),
                )),
            };
            let _ = events_tx.send(NdviEvent::MetricResolved {
                generation: ticket.generation,
                result,
            });
        }));
    }

    /// Applies every result that has already arrived without waiting.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) == Resolution::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next result and applies it.
    pub async fn next_event(&mut self) -> Option<Resolution> {
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Waits until the current selection has resolved.
    pub async fn settle(&mut self) -> &NdviState {
        while self.view.is_loading() {
            if self.next_event().await.is_none() {
                break;
            }
        }
        self.view.state()
    }

    fn apply(&mut self, event: NdviEvent) -> Resolution {
        match event {
            NdviEvent::MetricResolved { generation, result } => {
                let resolution = self.view.resolve(generation, result);
                if resolution == Resolution::Applied {
                    self.in_flight = None;
                }
                resolution
            }
        }
    }
}

impl Drop for NdviController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/ndvi_tests.rs"]
mod tests;
