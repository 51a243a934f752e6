//! Error taxonomy for route planning.
//!
//! Only bad input and bad configuration fail a plan. Routing-service
//! degradation and solver shortfalls recover through local fallbacks and
//! surface as provenance flags on the result instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Fewer than two distinct points remained after deduplication.
    #[error("not enough distinct points to plan a route ({remaining} after deduplication)")]
    InsufficientPoints { remaining: usize },

    /// Travel speed used for time estimates must be positive.
    #[error("speed must be positive, got {0} km/h")]
    InvalidSpeed(f64),
}
