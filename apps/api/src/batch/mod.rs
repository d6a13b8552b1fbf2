// Batch rendering: fetch many applicants, render each in isolation, zip the results.

pub mod archive;
pub mod handlers;
pub mod orchestrator;
pub mod source;
pub mod store;

pub use archive::ArchiveError;
pub use source::{resolve_profile, FetchError, ProfileSource};
pub use store::PgProfileStore;
