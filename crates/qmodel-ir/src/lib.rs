//! qmodel Model Intermediate Representation
//!
//! This crate provides the data structures for describing quantum programs
//! declaratively. A [`Model`] is built once through a [`ModelBuilder`],
//! stored as a JSON artifact, and later either lowered locally into a flat
//! gate list or handed to a remote synthesis platform.
//!
//! # Core Components
//!
//! - **Registers**: [`QReg`] handles returned by allocation, addressed through
//!   [`QubitRef`] (`register[index]`)
//! - **Gates**: [`StandardGate`] for the built-in gate set
//! - **Classical control**: [`ClassicalExpr`] and [`Predicate`] evaluated against
//!   a [`ClassicalEnv`] at lowering time
//! - **Operations**: [`Operation`] records (gate, conditional, repeat)
//! - **Model**: [`Model`], immutable once built
//! - **Lowering**: [`LoweredCircuit`], gate applications only
//! - **Artifacts**: [`write_artifact`] / [`read_artifact`] for `.qmod` files
//!
//! # Example: Entangling Two Qubits
//!
//! ```rust
//! use qmodel_ir::{ClassicalEnv, StandardGate, build_model};
//!
//! let model = build_model("entangle", |b| {
//!     let q = b.allocate(2, "q")?;
//!     b.h(q.bit(0))?.cx(q.bit(0), q.bit(1))?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let lowered = model.lower(&ClassicalEnv::new()).unwrap();
//! assert_eq!(lowered.gates.len(), 2);
//! assert_eq!(lowered.gates[1].gate, StandardGate::CX);
//! ```
//!
//! # Example: Loop With a Guard
//!
//! ```rust
//! use qmodel_ir::{ClassicalEnv, ClassicalExpr, build_model};
//!
//! let model = build_model("flips", |b| {
//!     let q = b.allocate(4, "q")?;
//!     b.repeat(4, |i, body| {
//!         body.conditional(ClassicalExpr::var("i").modulo(2).equals(0), |then| {
//!             then.x(q.bit(i))?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let lowered = model.lower(&ClassicalEnv::new()).unwrap();
//! assert_eq!(lowered.gates.len(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `SX` | 1 | Square root of X |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CY`, `CZ` | 2 | Controlled-Y and Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CP` | 2 | Controlled phase |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |

pub mod artifact;
pub mod builder;
pub mod classical;
pub mod error;
pub mod gate;
pub mod lowering;
pub mod model;
pub mod operation;
pub mod qubit;

pub use artifact::{ARTIFACT_EXTENSION, from_json, read_artifact, to_json, write_artifact};
pub use builder::{DEFAULT_LOOP_VAR, ModelBuilder, build_model};
pub use classical::{ClassicalEnv, ClassicalExpr, CmpOp, Predicate};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use lowering::{GateApplication, LoweredCircuit, lower};
pub use model::{FORMAT_VERSION, Model};
pub use operation::Operation;
pub use qubit::{QReg, QubitId, QubitRef};
