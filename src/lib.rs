//! route-planner core
//!
//! Computes a visiting order over a set of geographic points: deduplicate
//! noisy input, build a pairwise travel-cost matrix (OSRM with a haversine
//! fallback), solve the single-vehicle ordering problem under a time budget,
//! derive distance/time metrics, and resolve the road-following path
//! geometry for the chosen order.

pub mod dedupe;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod matrix;
pub mod metrics;
pub mod osrm;
pub mod pipeline;
pub mod solver;
pub mod traits;
