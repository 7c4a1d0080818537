//! tutorgrade-core: exercise model, evaluation engine, and grading records.
//!
//! This crate defines the exercise data model, the per-type scoring
//! strategies, and the submission/review records built on top of them.

pub mod engine;
pub mod error;
pub mod feedback;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod results;
pub mod review;
pub mod statistics;
pub mod submission;
pub mod writing;
