use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::data::engine::AggregationEngine;
use crate::data::loader::{self, LoadError, LoadOptions, LoadReport};
use crate::data::model::{JobTitleBreakdown, YearlySummary};
use crate::data::sort::{sort_summaries, SortKey, SummarySort};

// ---------------------------------------------------------------------------
// Background load bookkeeping
// ---------------------------------------------------------------------------

/// A load running on a worker thread.  Dropping it closes the channel, so
/// the worker's result is discarded unread.
struct PendingLoad {
    /// Request id, used to label the load in logs.
    generation: u64,
    path: PathBuf,
    receiver: Receiver<Result<LoadReport, LoadError>>,
}

/// What the central area should show.  "Failed" and "loaded but empty" must
/// stay visually distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetView<'a> {
    NotLoaded,
    Loading,
    Failed(&'a str),
    Empty { skipped_rows: usize },
    Ready,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Owns the loaded records; uninitialised until a load succeeds.
    pub engine: AggregationEngine,

    /// Yearly summary snapshot, ordered by `sort`.
    pub summary: Vec<YearlySummary>,

    /// Active ordering of the yearly table.
    pub sort: SummarySort,

    /// Year picked in the table or chart (None = no selection).
    pub selected_year: Option<i32>,

    /// Job titles of `selected_year`.
    pub breakdown: Vec<JobTitleBreakdown>,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Rows dropped by the loader for the current dataset.
    pub skipped_rows: usize,

    /// Reason the last load failed, shown instead of the tables.
    pub load_error: Option<String>,

    /// Transient notice (e.g. export result) shown in the top bar.
    pub status_message: Option<String>,

    pub load_options: LoadOptions,

    pending: Option<PendingLoad>,
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            engine: AggregationEngine::default(),
            summary: Vec::new(),
            sort: SummarySort::default(),
            selected_year: None,
            breakdown: Vec::new(),
            source: None,
            skipped_rows: 0,
            load_error: None,
            status_message: None,
            load_options: LoadOptions::default(),
            pending: None,
            generation: 0,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded dataset and reset the selection.
    pub fn set_dataset(&mut self, source: PathBuf, report: LoadReport) {
        log::info!(
            "Loaded {} records from {} ({} rows skipped)",
            report.records.len(),
            source.display(),
            report.skipped_rows
        );

        self.engine.initialize(report.records);
        self.skipped_rows = report.skipped_rows;
        self.source = Some(source);
        self.load_error = None;
        self.refresh_summary();
        self.select_year(None);
    }

    /// Recompute the yearly snapshot from the engine.
    pub fn refresh_summary(&mut self) {
        self.summary = match self.engine.yearly_summary() {
            Ok(mut summary) => {
                sort_summaries(&mut summary, self.sort);
                summary
            }
            Err(e) => {
                log::debug!("No summary available: {e}");
                Vec::new()
            }
        };
    }

    /// Forward a year selection to the engine (None clears it).
    pub fn select_year(&mut self, year: Option<i32>) {
        let breakdown = match year {
            None => Ok(Vec::new()),
            Some(y) => self.engine.job_title_breakdown(y),
        };
        match breakdown {
            Ok(breakdown) => {
                self.selected_year = year;
                self.breakdown = breakdown;
            }
            Err(e) => {
                log::warn!("Ignoring year selection: {e}");
                self.selected_year = None;
                self.breakdown.clear();
            }
        }
    }

    /// Select `year`, or clear the selection if it is already selected.
    pub fn toggle_year(&mut self, year: i32) {
        if self.selected_year == Some(year) {
            self.select_year(None);
        } else {
            self.select_year(Some(year));
        }
    }

    /// Sort the yearly table by `key` (re-clicking flips the order).
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
        sort_summaries(&mut self.summary, self.sort);
    }

    // -- Loading --

    /// Start reading and parsing `path` on a worker thread.
    ///
    /// A pending load is superseded: its result is dropped unread.
    /// `on_done` runs on the worker once the result is available.
    pub fn request_load(&mut self, path: PathBuf, on_done: impl FnOnce() + Send + 'static) {
        if let Some(prev) = self.pending.take() {
            log::debug!(
                "Load #{} of {} superseded",
                prev.generation,
                prev.path.display()
            );
        }

        self.generation += 1;
        let generation = self.generation;
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        let options = self.load_options;

        std::thread::spawn(move || {
            let result = loader::load_file(&worker_path, &options);
            if tx.send(result).is_err() {
                log::debug!("Discarding result of superseded load #{generation}");
            }
            on_done();
        });

        self.status_message = None;
        self.pending = Some(PendingLoad {
            generation,
            path,
            receiver: rx,
        });
    }

    /// Re-read the current source file, if any.
    pub fn reload(&mut self, on_done: impl FnOnce() + Send + 'static) {
        if let Some(path) = self.source.clone() {
            self.request_load(path, on_done);
        }
    }

    /// Apply a finished background load.  Returns true if state changed.
    pub fn poll_pending(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                return false;
            }
            Err(TryRecvError::Disconnected) => Err(LoadError::Unavailable(
                "loader thread exited without a result".into(),
            )),
        };

        match result {
            Ok(report) => self.set_dataset(pending.path, report),
            Err(e) => self.fail_load(&pending.path, &e),
        }
        true
    }

    /// Drop the current dataset and remember why the load failed.
    fn fail_load(&mut self, path: &Path, err: &LoadError) {
        log::warn!("Failed to load {}: {err}", path.display());
        self.engine = AggregationEngine::default();
        self.summary.clear();
        self.select_year(None);
        self.skipped_rows = 0;
        self.source = Some(path.to_path_buf());
        self.load_error = Some(err.to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Which of the mutually exclusive dataset states to render.
    pub fn view(&self) -> DatasetView<'_> {
        if let Some(err) = &self.load_error {
            if !self.is_loading() {
                return DatasetView::Failed(err);
            }
        }
        if !self.engine.is_initialized() {
            return if self.is_loading() {
                DatasetView::Loading
            } else {
                DatasetView::NotLoaded
            };
        }
        if self.summary.is_empty() {
            DatasetView::Empty {
                skipped_rows: self.skipped_rows,
            }
        } else {
            DatasetView::Ready
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
