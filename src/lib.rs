//! Itinerari - streaming assistant client for a travel-planning chat endpoint
//!
//! This library exposes modules for use in integration tests and benchmarks.

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod traits;
