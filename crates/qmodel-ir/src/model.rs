//! Immutable model produced by the builder.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::builder::{ModelBuilder, build_model, check_gate};
use crate::classical::{ClassicalEnv, ClassicalExpr};
use crate::error::{IrError, IrResult};
use crate::lowering::{LoweredCircuit, lower};
use crate::operation::Operation;
use crate::qubit::QReg;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// A declarative description of a quantum circuit.
///
/// Once built, a model cannot be modified; it is handed as-is to lowering,
/// serialization and synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    format_version: u32,
    name: String,
    registers: Vec<QReg>,
    operations: Vec<Operation>,
}

impl Model {
    pub(crate) fn from_parts(
        name: impl Into<String>,
        registers: Vec<QReg>,
        operations: Vec<Operation>,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            name: name.into(),
            registers,
            operations,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format version this model was written with.
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Declared registers, in declaration order.
    pub fn registers(&self) -> &[QReg] {
        &self.registers
    }

    /// Look up a register by name.
    pub fn register(&self, name: &str) -> Option<&QReg> {
        self.registers.iter().find(|r| r.name() == name)
    }

    /// Top-level operation records.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of qubits over all registers.
    ///
    /// Saturates at `u32::MAX`; [`Model::validate`] rejects such layouts.
    pub fn num_qubits(&self) -> u32 {
        total_qubits(&self.registers)
    }

    /// Number of gate records, counting every branch and iteration.
    pub fn gate_count(&self) -> usize {
        self.operations.iter().map(Operation::gate_count).sum()
    }

    /// Classical variables the model reads from its inputs.
    ///
    /// Loop variables are excluded inside the repeat that binds them.
    pub fn inputs(&self) -> BTreeSet<String> {
        let mut inputs = BTreeSet::new();
        collect_inputs(&self.operations, &mut vec![], &mut inputs);
        inputs
    }

    /// Lower the model for the given classical inputs.
    pub fn lower(&self, env: &ClassicalEnv) -> IrResult<LoweredCircuit> {
        lower(self, env)
    }

    /// Re-check structural invariants.
    ///
    /// Models from the builder always pass; this guards models that were
    /// deserialized from an artifact.
    pub fn validate(&self) -> IrResult<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(IrError::UnsupportedFormat {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }

        check_model_name(&self.name)?;

        let mut offset = 0u32;
        for (pos, reg) in self.registers.iter().enumerate() {
            if reg.size() == 0 {
                return Err(IrError::EmptyRegister(reg.name().to_string()));
            }
            if self.registers[..pos].iter().any(|r| r.name() == reg.name()) {
                return Err(IrError::DuplicateRegister(reg.name().to_string()));
            }
            if reg.offset() != offset {
                return Err(IrError::InvalidRegisterLayout(reg.name().to_string()));
            }
            offset = offset
                .checked_add(reg.size())
                .ok_or_else(|| IrError::TooManyQubits(reg.name().to_string()))?;
        }

        validate_operations(&self.registers, &self.operations)
    }

    // =========================================================================
    // Pre-built models
    // =========================================================================

    /// Two entangled qubits: H on qubit 0, then CX(0, 1).
    pub fn entangle() -> IrResult<Self> {
        build_model("entangle", |b| {
            let q = b.allocate(2, "q")?;
            b.h(q.bit(0))?.cx(q.bit(0), q.bit(1))?;
            Ok(())
        })
    }

    /// Flip every even-indexed qubit of an `n`-qubit register.
    ///
    /// The loop body guards each flip with `i % 2 == 0`, so the parity test
    /// happens at lowering time rather than at build time.
    pub fn alternating_flips(n: u32) -> IrResult<Self> {
        build_model("alternating_flips", |b| {
            let q = b.allocate(n, "q")?;
            b.repeat(n, |i, body| {
                body.conditional(ClassicalExpr::var("i").modulo(2).equals(0), |then| {
                    then.x(q.bit(i))?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
    }

    /// GHZ state preparation on `n` qubits.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut b = ModelBuilder::new();
        let q = b.allocate(n, "q")?;
        b.h(q.bit(0))?;
        b.repeat(n.saturating_sub(1), |i, body| {
            body.cx(q.bit(i), q.bit(i + 1))?;
            Ok(())
        })?;
        Ok(b.finish("ghz"))
    }
}

pub(crate) fn total_qubits(registers: &[QReg]) -> u32 {
    registers
        .iter()
        .fold(0u32, |total, reg| total.saturating_add(reg.size()))
}

pub(crate) fn check_model_name(name: &str) -> IrResult<()> {
    if name.trim().is_empty() || name.chars().any(char::is_control) {
        return Err(IrError::InvalidModelName(name.to_string()));
    }
    Ok(())
}

fn collect_inputs(operations: &[Operation], bound: &mut Vec<String>, out: &mut BTreeSet<String>) {
    for op in operations {
        match op {
            Operation::Gate { .. } => {}
            Operation::Conditional { predicate, body } => {
                out.extend(
                    predicate
                        .variables()
                        .into_iter()
                        .filter(|name| !bound.contains(name)),
                );
                collect_inputs(body, bound, out);
            }
            Operation::Repeat {
                var, iterations, ..
            } => {
                bound.push(var.clone());
                for iteration in iterations {
                    collect_inputs(iteration, bound, out);
                }
                bound.pop();
            }
        }
    }
}

fn validate_operations(registers: &[QReg], operations: &[Operation]) -> IrResult<()> {
    for op in operations {
        match op {
            Operation::Gate { gate, qubits } => check_gate(registers, gate, qubits)?,
            Operation::Conditional { body, .. } => validate_operations(registers, body)?,
            Operation::Repeat {
                count, iterations, ..
            } => {
                if iterations.len() != *count as usize {
                    return Err(IrError::RepeatCountMismatch {
                        count: *count,
                        iterations: iterations.len(),
                    });
                }
                for iteration in iterations {
                    validate_operations(registers, iteration)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::qubit::QubitRef;

    #[test]
    fn test_entangle_model() {
        let model = Model::entangle().unwrap();
        assert_eq!(model.num_qubits(), 2);
        assert_eq!(model.gate_count(), 2);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_alternating_flips_shape() {
        let model = Model::alternating_flips(10).unwrap();
        assert_eq!(model.operations().len(), 1);
        // Every iteration carries a guarded flip; the guard decides later.
        assert_eq!(model.gate_count(), 10);
    }

    #[test]
    fn test_ghz_model() {
        let model = Model::ghz(4).unwrap();
        assert_eq!(model.num_qubits(), 4);
        assert_eq!(model.gate_count(), 4);
    }

    #[test]
    fn test_ghz_single_qubit() {
        let model = Model::ghz(1).unwrap();
        assert_eq!(model.gate_count(), 1);
    }

    #[test]
    fn test_inputs_exclude_loop_variables() {
        assert!(Model::alternating_flips(4).unwrap().inputs().is_empty());

        let model = build_model("guarded", |b| {
            let q = b.allocate(2, "q")?;
            b.conditional(ClassicalExpr::var("mode").equals(1), |then| {
                then.h(q.bit(0))?;
                Ok(())
            })?;
            b.repeat(2, |i, body| {
                body.conditional(ClassicalExpr::var("i").less_than("limit"), |then| {
                    then.x(q.bit(i))?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            model.inputs().into_iter().collect::<Vec<_>>(),
            vec!["limit".to_string(), "mode".to_string()]
        );
    }

    #[test]
    fn test_allocation_past_qubit_range() {
        let mut b = ModelBuilder::new();
        b.allocate(u32::MAX, "a").unwrap();
        assert!(matches!(
            b.allocate(1, "b").unwrap_err(),
            IrError::TooManyQubits(name) if name == "b"
        ));
    }

    #[test]
    fn test_model_name_must_be_printable() {
        let err = build_model("line\nbreak", |b| {
            b.allocate(1, "q")?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, IrError::InvalidModelName(_)));
        assert!(build_model("  ", |_| Ok(())).is_err());
    }

    #[test]
    fn test_register_lookup() {
        let model = Model::entangle().unwrap();
        assert_eq!(model.register("q").map(QReg::size), Some(2));
        assert!(model.register("r").is_none());
    }

    #[test]
    fn test_validate_catches_tampered_operations() {
        let mut b = ModelBuilder::new();
        b.allocate(2, "q").unwrap();
        let mut model = b.finish("tampered");
        model.operations.push(Operation::single_qubit_gate(
            StandardGate::X,
            QubitRef::new("q", 9),
        ));
        assert!(matches!(
            model.validate().unwrap_err(),
            IrError::OutOfRange { index: 9, .. }
        ));
    }

    #[test]
    fn test_validate_catches_repeat_mismatch() {
        let mut b = ModelBuilder::new();
        b.allocate(1, "q").unwrap();
        let mut model = b.finish("tampered");
        model.operations.push(Operation::Repeat {
            var: "i".into(),
            count: 3,
            iterations: vec![vec![]],
        });
        assert!(matches!(
            model.validate().unwrap_err(),
            IrError::RepeatCountMismatch { count: 3, iterations: 1 }
        ));
    }
}
