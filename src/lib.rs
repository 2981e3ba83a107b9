// Crate root - export modules
pub mod board;

pub use board::pregenerate_tables;
