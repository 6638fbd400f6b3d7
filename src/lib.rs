//! Fixed-point matrix test vectors for RTL simulation.
//!
//! Draws random 8-bit signed matrices, multiplies them with widened
//! accumulation, and writes operands and products as concatenated
//! two's-complement bit strings, one text line per matrix row.

pub mod encode;
pub mod error;
pub mod generator;
pub mod matmul;
pub mod random;
pub mod serialize;

pub use encode::{to_signed_binary, BitWidth, OverflowMode};
pub use error::{GenError, Result};
pub use generator::{generate_and_save_data, DataConfig, DataGenerator, GenerationReport, Scenario};
pub use serialize::Entity;
