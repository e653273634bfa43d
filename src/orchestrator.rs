//! # Search Orchestrator
//!
//! Sits between raw user text and the core: validates input, owns the
//! [`Dataset`], runs searches on a worker, and tells the presentation layer
//! what changed through [`Effect`]s.
//!
//! ## Search lifecycle
//!
//! ```text
//! Idle ──execute_search──▶ Validating ──▶ Rejected (status, back to Idle)
//!                                     └──▶ Searching ──complete_search──▶ Idle
//! ```
//!
//! At most one search is in flight. The worker runs on tokio's blocking pool
//! and posts a [`SearchOutcome`] to a channel; the UI loop drains that channel
//! with [`Orchestrator::poll_completed`] so every state change happens on the
//! UI side. An outcome computed against a dataset that has since been
//! replaced is discarded instead of highlighting a token that no longer
//! exists.
//!
//! `execute_search` must be called from within a tokio runtime.

use crate::dataset::{self, Dataset, DEFAULT_MAX_RANDOM_SIZE};
use crate::error::InputError;
use crate::search::{self, SearchResult, SearchTrace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Text shown in the status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loaded(usize),
    Searching(i32),
    Found(usize),
    NotFound,
    Discarded,
    Failed,
    Rejected(InputError),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Rejected(_) | Status::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Loaded(len) => write!(f, "Array loaded with {len} elements."),
            Status::Searching(target) => write!(f, "Searching for {target}..."),
            Status::Found(index) => write!(f, "Target value found at index {index}"),
            Status::NotFound => write!(f, "Target value not found."),
            Status::Discarded => write!(f, "Search result discarded: array changed."),
            Status::Failed => write!(f, "Search failed unexpectedly."),
            Status::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Status(Status),
    ClearStatus,
    /// The dataset was replaced or cleared: rebuild the token row and stop
    /// any highlight on the old one.
    DatasetReplaced,
    /// Play the highlight on token `index` of the current row.
    Highlight(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
}

/// Message from a search worker back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Dataset generation the search ran against
    pub generation: u64,
    pub target: i32,
    /// `None` if the worker died before producing a result
    pub trace: Option<SearchTrace>,
}

pub struct Orchestrator {
    dataset: Dataset,
    max_random_size: usize,
    rng: StdRng,
    in_flight: Option<u64>,
    /// Generation of an in-flight search cancelled by a reset; its outcome
    /// only releases the guard.
    silenced: Option<u64>,
    last_trace: Option<SearchTrace>,
    outcome_tx: UnboundedSender<SearchOutcome>,
    outcome_rx: UnboundedReceiver<SearchOutcome>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RANDOM_SIZE)
    }
}

impl Orchestrator {
    pub fn new(max_random_size: usize) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            dataset: Dataset::new(),
            max_random_size,
            rng: StdRng::from_os_rng(),
            in_flight: None,
            silenced: None,
            last_trace: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Use a deterministic random source for generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn max_random_size(&self) -> usize {
        self.max_random_size
    }

    pub fn phase(&self) -> SearchPhase {
        if self.in_flight.is_some() {
            SearchPhase::Searching
        } else {
            SearchPhase::Idle
        }
    }

    /// Probes of the most recently applied search.
    pub fn last_trace(&self) -> Option<&SearchTrace> {
        self.last_trace.as_ref()
    }

    /// Replace the dataset with comma-separated values from `raw`.
    pub fn submit_array(&mut self, raw: &str) -> Vec<Effect> {
        match dataset::parse_values(raw) {
            Ok(values) => self.replace_dataset(values),
            Err(err) => reject(err),
        }
    }

    /// Replace the dataset with `raw` random values in `[1, 100)`.
    pub fn generate_random(&mut self, raw_size: &str) -> Vec<Effect> {
        match dataset::parse_size(raw_size, self.max_random_size) {
            Ok(size) => {
                let values = dataset::random_values(size, &mut self.rng);
                self.replace_dataset(values)
            }
            Err(err) => reject(err),
        }
    }

    /// Back to the startup state. Safe to call repeatedly.
    ///
    /// A search still running keeps the in-flight guard until its outcome
    /// arrives, but that outcome produces no status.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.silenced = self.in_flight;
        self.dataset.clear();
        self.last_trace = None;
        tracing::info!("reset");
        vec![Effect::DatasetReplaced, Effect::ClearStatus]
    }

    /// Validate `raw_target` and start a search on a worker.
    pub fn execute_search(&mut self, raw_target: &str) -> Vec<Effect> {
        if self.in_flight.is_some() {
            return reject(InputError::SearchInProgress);
        }

        let snapshot = match self.dataset.snapshot() {
            Some(values) if !values.is_empty() => values,
            _ => return reject(InputError::EmptyDataset),
        };

        let target = match dataset::parse_target(raw_target) {
            Ok(target) => target,
            Err(err) => return reject(err),
        };

        let generation = self.dataset.generation();
        self.in_flight = Some(generation);
        tracing::debug!(needle = target, generation, len = snapshot.len(), "search dispatched");

        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let worker = tokio::task::spawn_blocking(move || search::trace(&snapshot, target));
            let trace = match worker.await {
                Ok(trace) => Some(trace),
                Err(err) => {
                    tracing::error!(error = %err, "search worker failed");
                    None
                }
            };
            // The receiver lives as long as the orchestrator; a send error
            // only means the application is shutting down.
            let _ = tx.send(SearchOutcome {
                generation,
                target,
                trace,
            });
        });

        vec![Effect::Status(Status::Searching(target))]
    }

    /// Apply a finished search. Releases the in-flight guard.
    pub fn complete_search(&mut self, outcome: SearchOutcome) -> Vec<Effect> {
        self.in_flight = None;

        if self.silenced.take() == Some(outcome.generation) {
            tracing::debug!(generation = outcome.generation, "outcome dropped after reset");
            return Vec::new();
        }

        let Some(trace) = outcome.trace else {
            return vec![Effect::Status(Status::Failed)];
        };

        if outcome.generation != self.dataset.generation() {
            tracing::debug!(
                searched = outcome.generation,
                current = self.dataset.generation(),
                "stale search outcome discarded"
            );
            return vec![Effect::Status(Status::Discarded)];
        }

        let result = trace.result;
        tracing::info!(
            needle = outcome.target,
            probes = trace.probes.len(),
            ?result,
            "search completed"
        );
        self.last_trace = Some(trace);

        match result {
            SearchResult::Found(index) => vec![
                Effect::Status(Status::Found(index)),
                Effect::Highlight(index),
            ],
            SearchResult::NotFound => vec![Effect::Status(Status::NotFound)],
        }
    }

    /// Apply every outcome that has arrived, without waiting.
    pub fn poll_completed(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            match self.outcome_rx.try_recv() {
                Ok(outcome) => effects.extend(self.complete_search(outcome)),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        effects
    }

    /// Wait for the in-flight search and apply it. Returns nothing if no
    /// search is running.
    pub async fn wait_completed(&mut self) -> Vec<Effect> {
        if self.in_flight.is_none() {
            return Vec::new();
        }
        match self.outcome_rx.recv().await {
            Some(outcome) => self.complete_search(outcome),
            None => Vec::new(),
        }
    }

    fn replace_dataset(&mut self, values: Vec<i32>) -> Vec<Effect> {
        self.dataset.replace(values);
        self.last_trace = None;
        let len = self.dataset.len();
        tracing::info!(len, generation = self.dataset.generation(), "dataset replaced");
        vec![Effect::DatasetReplaced, Effect::Status(Status::Loaded(len))]
    }
}

fn reject(err: InputError) -> Vec<Effect> {
    tracing::warn!(error = ?err, "input rejected");
    vec![Effect::Status(Status::Rejected(err))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(
            Status::Found(3).to_string(),
            "Target value found at index 3"
        );
        assert_eq!(Status::NotFound.to_string(), "Target value not found.");
        assert_eq!(
            Status::Rejected(InputError::EmptyDataset).to_string(),
            "Array is empty. Please input array data."
        );
        assert!(Status::Failed.is_error());
        assert!(!Status::NotFound.is_error());
    }

    #[test]
    fn test_worker_failure_releases_guard() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.in_flight = Some(0);
        let effects = orchestrator.complete_search(SearchOutcome {
            generation: 0,
            target: 1,
            trace: None,
        });
        assert_eq!(effects, vec![Effect::Status(Status::Failed)]);
        assert_eq!(orchestrator.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_reset_silences_pending_outcome() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.in_flight = Some(0);
        orchestrator.reset();
        assert_eq!(orchestrator.phase(), SearchPhase::Searching);

        let effects = orchestrator.complete_search(SearchOutcome {
            generation: 0,
            target: 1,
            trace: None,
        });
        assert!(effects.is_empty());
        assert_eq!(orchestrator.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_rejections_do_not_need_runtime() {
        let mut orchestrator = Orchestrator::default();
        let effects = orchestrator.execute_search("5");
        assert_eq!(
            effects,
            vec![Effect::Status(Status::Rejected(InputError::EmptyDataset))]
        );
    }
}
