//! Shared domain types for the X1 dataset client.
//!
//! Holds the request/response models exchanged with the `/dataset` and
//! `/data` REST endpoints and the ontology form value shapes used by the
//! class configuration form.

pub mod dataset;
pub mod error;
pub mod ontology;
pub mod types;
