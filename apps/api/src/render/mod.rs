// Rendering engine: ApplicantProfile -> three-sheet workbook.
// Everything here is synchronous and CPU-bound; async callers wrap it in
// tokio::task::spawn_blocking.

pub mod assembler;
pub mod handlers;
pub mod image;
pub mod rich_text;
pub mod sheet;
pub mod writer;
pub mod xlsx;

use chrono::NaiveDate;
use thiserror::Error;

use crate::layout::Locale;
use crate::profile::ValidationFailure;

pub use assembler::{assemble_workbook, DocumentBundle};

/// Inputs that aren't part of the profile but still change the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub locale: Locale,
    /// Date printed as "as of" on each sheet and used to compute age.
    pub as_of: NaiveDate,
}

impl RenderContext {
    pub fn new(locale: Locale, as_of: NaiveDate) -> Self {
        Self { locale, as_of }
    }

    /// Context dated today (UTC).
    pub fn today(locale: Locale) -> Self {
        Self::new(locale, chrono::Utc::now().date_naive())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("workbook could not be written: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
