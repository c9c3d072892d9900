//! Shared data model for the mediaforge generation platform.
//!
//! Holds the model capability table, job specifications with their
//! normalization rules, the remote operation types, and the final
//! job outcome types. This crate performs no I/O.

pub mod capability;
pub mod error;
pub mod job;
pub mod operation;
pub mod outcome;
