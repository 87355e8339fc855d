//! Core types and trait definitions for the Rolodex contact book.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the domain records, the request schemas and their validation rules, the
//! [`store::ContactStore`] persistence abstraction, and the services that
//! enforce ownership on top of it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod address;
pub mod contact;
pub mod credential;
pub mod error;
pub mod search;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, Result};
