//! Stratus Network Layer
//!
//! This crate provides the reqwest-backed implementation of the core
//! network fetch primitive.

pub mod client;

pub use client::{FetchConfig, HttpFetcher};
