//! Core types and trait definitions for the lead intake service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend and the mail transport plug in through [`store::LeadStore`]
//! and [`notify::Notifier`]; [`service::LeadService`] ties them together.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod lead;
pub mod notify;
pub mod service;
pub mod store;

pub use error::{Error, Result};
