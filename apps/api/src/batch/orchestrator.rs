//! Renders many applicants, isolating each record's failure.
//!
//! Records are processed sequentially in input order: fetch (async I/O), then assemble on
//! the blocking pool. Every record ends as exactly one `RecordOutcome`; nothing a single
//! record does can stop the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::batch::archive::ArchiveEntry;
use crate::batch::source::{resolve_profile, ProfileSource};
use crate::render::{assemble_workbook, RenderContext};

/// Reason recorded for records never started because the run was cancelled.
pub const CANCELLED: &str = "cancelled";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub identifier: String,
    #[serde(default)]
    pub display_name_hint: Option<String>,
}

impl BatchItem {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name_hint: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    PartiallyCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Rendered {
        identifier: String,
        display_name_hint: Option<String>,
        /// Phonetic name of the rendered profile, used for archive naming.
        phonetic_name: String,
        workbook: Vec<u8>,
    },
    Failed {
        identifier: String,
        reason: String,
    },
}

impl RecordOutcome {
    pub fn identifier(&self) -> &str {
        match self {
            RecordOutcome::Rendered { identifier, .. } | RecordOutcome::Failed { identifier, .. } => {
                identifier
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RecordOutcome::Rendered { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordFailure {
    pub identifier: String,
    pub reason: String,
}

/// Stops the orchestrator from starting further records. The record in flight finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub state: BatchState,
    /// One outcome per input item, in input order.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> Vec<RecordFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                RecordOutcome::Failed { identifier, reason } => Some(RecordFailure {
                    identifier: identifier.clone(),
                    reason: reason.clone(),
                }),
                RecordOutcome::Rendered { .. } => None,
            })
            .collect()
    }

    /// "X succeeded, Y failed"
    pub fn summary(&self) -> String {
        format!("{} succeeded, {} failed", self.succeeded(), self.failed())
    }

    /// Successful records, ready for the archive builder. Moves the workbooks out.
    pub fn into_archive_entries(self) -> Vec<ArchiveEntry> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                RecordOutcome::Rendered {
                    identifier,
                    display_name_hint,
                    phonetic_name,
                    workbook,
                } => Some(ArchiveEntry {
                    identifier,
                    display_name: display_name_hint,
                    phonetic_name: Some(phonetic_name),
                    workbook,
                }),
                RecordOutcome::Failed { .. } => None,
            })
            .collect()
    }
}

pub struct BatchOrchestrator {
    batch_id: Uuid,
    state: BatchState,
    source: Arc<dyn ProfileSource>,
    ctx: RenderContext,
}

impl BatchOrchestrator {
    pub fn new(source: Arc<dyn ProfileSource>, ctx: RenderContext) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            state: BatchState::Idle,
            source,
            ctx,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Runs every item once. `on_progress` is called after each record.
    pub async fn run<F>(
        &mut self,
        items: Vec<BatchItem>,
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> BatchReport
    where
        F: FnMut(BatchProgress) + Send,
    {
        self.state = BatchState::Running;
        let total = items.len();
        info!("Batch {} started: {total} applicants", self.batch_id);

        let mut outcomes = Vec::with_capacity(total);
        for item in items {
            let outcome = if cancel.is_cancelled() {
                RecordOutcome::Failed {
                    identifier: item.identifier,
                    reason: CANCELLED.to_string(),
                }
            } else {
                self.process(item).await
            };
            if let RecordOutcome::Failed { identifier, reason } = &outcome {
                if reason != CANCELLED {
                    warn!("Batch {}: applicant {identifier} failed: {reason}", self.batch_id);
                }
            }
            outcomes.push(outcome);

            let progress = BatchProgress {
                processed: outcomes.len(),
                total,
            };
            info!("Batch {}: {}/{}", self.batch_id, progress.processed, progress.total);
            on_progress(progress);
        }

        let failed = outcomes.iter().any(|o| !o.is_success());
        self.state = if failed {
            BatchState::PartiallyCompleted
        } else {
            BatchState::Completed
        };

        let report = BatchReport {
            batch_id: self.batch_id,
            state: self.state,
            outcomes,
        };
        info!("Batch {} finished ({:?}): {}", self.batch_id, report.state, report.summary());
        report
    }

    async fn process(&self, item: BatchItem) -> RecordOutcome {
        let BatchItem {
            identifier,
            display_name_hint,
        } = item;

        let profile = match resolve_profile(self.source.as_ref(), &identifier).await {
            Ok(profile) => profile,
            Err(e) => {
                return RecordOutcome::Failed {
                    identifier,
                    reason: e.to_string(),
                }
            }
        };

        let ctx = self.ctx;
        let phonetic_name = profile.kana_name.display();
        let rendered = tokio::task::spawn_blocking(move || assemble_workbook(&profile, &ctx)).await;

        match rendered {
            Ok(Ok(bundle)) => RecordOutcome::Rendered {
                identifier,
                display_name_hint,
                phonetic_name,
                workbook: bundle.bytes,
            },
            Ok(Err(e)) => RecordOutcome::Failed {
                identifier,
                reason: e.to_string(),
            },
            // Panics inside assembly surface here and stay confined to this record.
            Err(e) => RecordOutcome::Failed {
                identifier,
                reason: format!("rendering task failed: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::archive::build_archive;
    use crate::batch::source::memory::MemorySource;
    use crate::layout::Locale;
    use crate::profile::fixtures::{complete_profile, text_of_len};
    use crate::profile::ApplicantProfile;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use std::sync::Mutex;
    use zip::ZipArchive;

    fn ctx() -> RenderContext {
        RenderContext::new(Locale::Ja, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    fn applicant(n: usize) -> ApplicantProfile {
        let mut p = complete_profile();
        p.applicant_id = format!("app-{n}");
        p.kana_name.first = format!("アン{n}");
        p
    }

    fn items(ids: &[&str]) -> Vec<BatchItem> {
        ids.iter().map(|id| BatchItem::new(*id)).collect()
    }

    #[tokio::test]
    async fn test_one_failed_fetch_does_not_affect_others() {
        let source = MemorySource::with_profiles((1..=5).map(applicant)).fail("app-3");
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        assert_eq!(orchestrator.state(), BatchState::Idle);

        let report = orchestrator
            .run(
                items(&["app-1", "app-2", "app-3", "app-4", "app-5"]),
                &CancelFlag::default(),
                |_| {},
            )
            .await;

        assert_eq!(report.state, BatchState::PartiallyCompleted);
        assert_eq!(orchestrator.state(), BatchState::PartiallyCompleted);
        assert_eq!(report.summary(), "4 succeeded, 1 failed");
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].identifier, "app-3");

        let order: Vec<&str> = report.outcomes.iter().map(|o| o.identifier()).collect();
        assert_eq!(order, vec!["app-1", "app-2", "app-3", "app-4", "app-5"]);

        let archive = build_archive(&report.into_archive_entries()).unwrap();
        let zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 4);
    }

    #[tokio::test]
    async fn test_archive_entries_are_the_successes_in_input_order() {
        let source = MemorySource::with_profiles((1..=3).map(applicant)).fail("app-2");
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        let report = orchestrator
            .run(items(&["app-3", "app-2", "app-1"]), &CancelFlag::default(), |_| {})
            .await;

        let entries = report.into_archive_entries();
        let ids: Vec<&str> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["app-3", "app-1"]);
        assert!(entries.iter().all(|e| e.workbook.starts_with(b"PK")));
    }

    #[tokio::test]
    async fn test_validation_failure_is_a_record_failure() {
        let mut short = applicant(2);
        short.narrative.why_this_country = text_of_len("x", 120);
        let source = MemorySource::with_profiles([applicant(1), short]);
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());

        let report = orchestrator
            .run(items(&["app-1", "app-2"]), &CancelFlag::default(), |_| {})
            .await;
        assert_eq!(report.succeeded(), 1);
        let failures = report.failures();
        assert_eq!(failures[0].identifier, "app-2");
        assert!(failures[0].reason.contains("currently 120"), "{}", failures[0].reason);
    }

    #[tokio::test]
    async fn test_progress_reported_after_each_record() {
        let source = MemorySource::with_profiles((1..=3).map(applicant));
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        let seen = Mutex::new(Vec::new());

        let report = orchestrator
            .run(items(&["app-1", "missing", "app-3"]), &CancelFlag::default(), |p| {
                seen.lock().unwrap().push((p.processed, p.total))
            })
            .await;
        assert_eq!(report.failed(), 1);
        assert_eq!(seen.into_inner().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_all_successful_is_completed() {
        let source = MemorySource::with_profiles((1..=2).map(applicant));
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        let report = orchestrator
            .run(items(&["app-1", "app-2"]), &CancelFlag::default(), |_| {})
            .await;
        assert_eq!(report.state, BatchState::Completed);
        assert!(report.failures().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_completed() {
        let mut orchestrator = BatchOrchestrator::new(Arc::new(MemorySource::default()), ctx());
        let report = orchestrator.run(Vec::new(), &CancelFlag::default(), |_| {}).await;
        assert_eq!(report.state, BatchState::Completed);
        assert_eq!(report.summary(), "0 succeeded, 0 failed");
    }

    #[tokio::test]
    async fn test_cancel_stops_scheduling_new_records() {
        let source = MemorySource::with_profiles((1..=3).map(applicant));
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        let cancel = CancelFlag::default();
        let trigger = cancel.clone();

        let report = orchestrator
            .run(items(&["app-1", "app-2", "app-3"]), &cancel, move |p| {
                if p.processed == 1 {
                    trigger.cancel();
                }
            })
            .await;

        assert_eq!(report.state, BatchState::PartiallyCompleted);
        assert_eq!(report.succeeded(), 1);
        let reasons: Vec<String> = report.failures().into_iter().map(|f| f.reason).collect();
        assert_eq!(reasons, vec![CANCELLED, CANCELLED]);
    }

    #[tokio::test]
    async fn test_phonetic_name_used_for_archive_when_no_hint() {
        let source = MemorySource::with_profiles([applicant(1)]);
        let mut orchestrator = BatchOrchestrator::new(Arc::new(source), ctx());
        let report = orchestrator
            .run(items(&["app-1"]), &CancelFlag::default(), |_| {})
            .await;
        let archive = build_archive(&report.into_archive_entries()).unwrap();
        assert_eq!(
            archive.file_names,
            vec!["グエン アン1_resume_workhistory_skills.xlsx"]
        );
    }
}
