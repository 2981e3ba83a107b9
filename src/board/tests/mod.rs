//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `fen.rs` - FEN parsing and serialization
//! - `make_unmake.rs` - Reversible move application
//! - `movegen.rs` - Streaming enumerator behavior and move legality
//! - `edge_cases.rs` - Special positions and moves
//! - `perft.rs` - Exhaustive node counts against reference values
//! - `proptest.rs` - Property-based tests

mod movegen;
