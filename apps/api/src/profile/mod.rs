// Applicant profile: the data model, the two-source normalizer and the completion scorer.
// Rendering only ever sees a normalized `ApplicantProfile` snapshot.

pub mod completeness;
#[cfg(test)]
pub mod fixtures;
pub mod model;
pub mod normalizer;

pub use completeness::{
    check_render_preconditions, compute_completion, CompletionScore, ValidationFailure,
};
pub use model::{ApplicantProfile, Photo, RegistrationRecord};
pub use normalizer::{normalize_profile, parse_profile_document};
