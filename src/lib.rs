//! Compiles arithmetic expression graphs into rank-1 constraint systems.
//!
//! build graph -> mark public -> allocate -> assign leaves -> evaluate ->
//! hand the constraint system and witness to the Spartan backend.
//!
//! ```text
//! let cs = CircuitBuilder::new();
//! let a = cs.input("a");
//! let b = cs.input("b");
//! let out = (1 - b) * a;
//! ```
pub mod bin_loader;
pub mod bits;
pub mod circuit;
pub mod config;
pub mod error;
pub mod node;
pub mod protocol;
pub mod r1cs;
pub mod scalar;
pub mod wire;
mod witness;

pub use bits::BitVector;
pub use circuit::{CircuitBuilder, VariableLayout};
pub use config::{BuilderConfig, ProverConfig};
pub use curve25519_dalek::Scalar as FieldValue;
pub use error::{Error, Result};
pub use node::{NodeId, NodeKind, Operand};
pub use wire::Wire;
