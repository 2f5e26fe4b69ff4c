//! `OpenQASM` Emitter for qmodel
//!
//! This crate renders lowered models as `OpenQASM` source so they can be
//! inspected or handed to tools that speak QASM. Classical control is
//! resolved before emission, so the output is a straight-line gate list.
//!
//! # Output Shape
//!
//! | Element | QASM 3 | QASM 2 |
//! |---------|--------|--------|
//! | Header | `OPENQASM 3.0;` | `OPENQASM 2.0;` + `include "qelib1.inc";` |
//! | Register | `qubit[5] q;` | `qreg q[5];` |
//! | Gate | `h q[0];`, `cx q[0], q[1];` | same |
//! | Angle | `rx(pi/4) q[0];` | same |
//! | Phase | `p(θ)`, `cp(θ)` | `u1(θ)`, `cu1(θ)` |
//!
//! # Example
//!
//! ```rust
//! use qmodel_ir::{ClassicalEnv, Model};
//! use qmodel_qasm3::emit_model;
//!
//! let model = Model::entangle().unwrap();
//! let qasm = emit_model(&model, &ClassicalEnv::new()).unwrap();
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("h q[0];"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```

mod emitter;
mod error;

pub use emitter::{emit, emit_model, emit_qasm2};
pub use error::{EmitError, EmitResult};
