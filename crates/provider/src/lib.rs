//! Remote generation provider client.
//!
//! Defines the [`client::OperationsClient`] trait the orchestrator
//! polls against, plus the [`http::HttpOperationsClient`] REST
//! implementation and its immutable [`config::ProviderConfig`].

pub mod client;
pub mod config;
pub mod http;

pub use client::{OperationsClient, ProviderError};
pub use config::ProviderConfig;
pub use http::HttpOperationsClient;
