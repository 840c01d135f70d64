//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Performance tests for move generation
//! - `make_unmake.rs` - Make/take-back move correctness
//! - `search.rs` - End-to-end search behaviour
//! - `proptest.rs` - Property-based tests

mod proptest;
mod search;
