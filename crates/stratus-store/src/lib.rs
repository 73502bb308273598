//! Stratus In-Memory Stores
//!
//! This crate provides a process-memory implementation of the core store
//! registry, for tests and for hosts without a persistent cache
//! subsystem.

pub mod memory;

pub use memory::{MemoryStore, MemoryStores};
