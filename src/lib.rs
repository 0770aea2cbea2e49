//! agentlink - referral attribution and lead scoring backend
//!
//! # Features
//! - **server**: HTTP API (default)
//!
//! # Architecture
//! - `scoring`: questionnaire scoring and lead labels
//! - `attribution`: session-scoped referral code capture
//! - `resolver`: referral code to public agent info, cached
//! - `leads`: lead status vocabulary
//! - `storage`: referral link and lead persistence
//! - `services`: business rules shared by the API and CLI
//! - `api`: actix-web routes
//! - `config`: static configuration
//! - `system`: logging setup

#[cfg(feature = "server")]
pub mod api;
pub mod attribution;
pub mod cli;
pub mod config;
pub mod errors;
pub mod events;
pub mod leads;
pub mod resolver;
pub mod scoring;
pub mod services;
pub mod storage;
pub mod system;
