use std::sync::Arc;

use crate::batch::ProfileSource;
use crate::layout::Locale;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where stored profiles come from. Default: PgProfileStore (Postgres + S3 photos).
    pub profiles: Arc<dyn ProfileSource>,
    /// Caption set used when the request has no `?locale=`.
    pub locale: Locale,
    pub batch_max_records: usize,
}
