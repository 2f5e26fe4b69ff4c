//! Declarative model builder.
//!
//! A [`ModelBuilder`] accumulates [`Operation`] records over the registers it
//! has allocated. Conditional and repeat bodies are plain closures that run
//! immediately on a nested builder; nothing is deferred to lowering except
//! the evaluation of classical predicates.

use crate::classical::Predicate;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::model::{Model, check_model_name};
use crate::operation::Operation;
use crate::qubit::{QReg, QubitRef};

/// Loop variable name used by [`ModelBuilder::repeat`].
pub const DEFAULT_LOOP_VAR: &str = "i";

/// Builder for a quantum model.
///
/// This provides a high-level API for declaring registers and emitting
/// operations, with convenient methods for common gates.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    /// Registers visible to this builder.
    registers: Vec<QReg>,
    /// Operations emitted so far.
    operations: Vec<Operation>,
    /// Counter for the next global qubit id.
    next_qubit_id: u32,
    /// Nesting depth; bodies of conditionals and repeats are > 0.
    depth: u32,
}

impl ModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh builder for a nested body, sharing this builder's registers.
    fn nested(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            operations: vec![],
            next_qubit_id: self.next_qubit_id,
            depth: self.depth + 1,
        }
    }

    /// Allocate a register of `size` qubits, all in |0⟩.
    ///
    /// Registers can only be allocated at the top level of a model, not
    /// inside a conditional or repeat body.
    pub fn allocate(&mut self, size: u32, name: impl Into<String>) -> IrResult<QReg> {
        let name = name.into();
        if self.depth > 0 {
            return Err(IrError::AllocationInBody(name));
        }
        if size == 0 {
            return Err(IrError::EmptyRegister(name));
        }
        if self.register(&name).is_some() {
            return Err(IrError::DuplicateRegister(name));
        }
        let Some(next) = self.next_qubit_id.checked_add(size) else {
            return Err(IrError::TooManyQubits(name));
        };
        let reg = QReg::new(name, size, self.next_qubit_id);
        self.next_qubit_id = next;
        self.registers.push(reg.clone());
        Ok(reg)
    }

    /// Append a gate record after checking its operands.
    pub fn apply(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitRef>,
    ) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        check_gate(&self.registers, &gate, &qubits)?;
        self.operations.push(Operation::Gate { gate, qubits });
        Ok(self)
    }

    /// Append a block that is kept only if `predicate` holds when the model
    /// is lowered.
    pub fn conditional<F>(&mut self, predicate: impl Into<Predicate>, body: F) -> IrResult<&mut Self>
    where
        F: FnOnce(&mut ModelBuilder) -> IrResult<()>,
    {
        let mut inner = self.nested();
        body(&mut inner)?;
        self.operations.push(Operation::Conditional {
            predicate: predicate.into(),
            body: inner.operations,
        });
        Ok(self)
    }

    /// Append `count` iterations of `body`, with the loop index bound to `i`.
    pub fn repeat<F>(&mut self, count: u32, body: F) -> IrResult<&mut Self>
    where
        F: FnMut(u32, &mut ModelBuilder) -> IrResult<()>,
    {
        self.repeat_as(DEFAULT_LOOP_VAR, count, body)
    }

    /// Append `count` iterations of `body`, with the loop index bound to `var`.
    ///
    /// `body` is invoked once per index in `0..count`, each time on a fresh
    /// nested builder, so iterations cannot observe each other's output.
    pub fn repeat_as<F>(&mut self, var: impl Into<String>, count: u32, mut body: F) -> IrResult<&mut Self>
    where
        F: FnMut(u32, &mut ModelBuilder) -> IrResult<()>,
    {
        let mut iterations = Vec::with_capacity(count as usize);
        for index in 0..count {
            let mut inner = self.nested();
            body(index, &mut inner)?;
            iterations.push(inner.operations);
        }
        self.operations.push(Operation::Repeat {
            var: var.into(),
            count,
            iterations,
        });
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Tdg, [qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::SX, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rx(theta), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Ry(theta), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rz(theta), [qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::P(theta), [qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitRef, target: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::CX, [control, target])
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitRef, target: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::CY, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitRef, target: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitRef, q2: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::Swap, [q1, q2])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitRef, target: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::CP(theta), [control, target])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitRef, c2: QubitRef, target: QubitRef) -> IrResult<&mut Self> {
        self.apply(StandardGate::CCX, [c1, c2, target])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Look up a register by name.
    pub fn register(&self, name: &str) -> Option<&QReg> {
        self.registers.iter().find(|r| r.name() == name)
    }

    /// Registers declared so far.
    pub fn registers(&self) -> &[QReg] {
        &self.registers
    }

    /// Operations emitted so far.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of qubits allocated.
    pub fn num_qubits(&self) -> u32 {
        self.next_qubit_id
    }

    /// Consume the builder into an immutable model.
    pub fn finish(self, name: impl Into<String>) -> Model {
        Model::from_parts(name, self.registers, self.operations)
    }
}

/// Build a model by running `entry` once on a fresh builder.
///
/// The whole operation sequence is produced eagerly; the first error
/// aborts construction.
pub fn build_model<F>(name: impl Into<String>, entry: F) -> IrResult<Model>
where
    F: FnOnce(&mut ModelBuilder) -> IrResult<()>,
{
    let mut builder = ModelBuilder::new();
    entry(&mut builder)?;
    let model = builder.finish(name);
    check_model_name(model.name())?;
    Ok(model)
}

/// Check a gate application against the declared registers.
pub(crate) fn check_gate(
    registers: &[QReg],
    gate: &StandardGate,
    qubits: &[QubitRef],
) -> IrResult<()> {
    let expected = gate.num_qubits();
    let got = u32::try_from(qubits.len()).unwrap_or(u32::MAX);
    if expected != got {
        return Err(IrError::QubitCountMismatch {
            gate_name: gate.name().to_string(),
            expected,
            got,
        });
    }

    for (pos, qubit) in qubits.iter().enumerate() {
        let reg = registers
            .iter()
            .find(|r| r.name() == qubit.register)
            .ok_or_else(|| IrError::UnknownRegister(qubit.register.clone()))?;
        if !reg.contains(qubit.index) {
            return Err(IrError::OutOfRange {
                register: qubit.register.clone(),
                index: qubit.index,
                size: reg.size(),
                gate_name: Some(gate.name().to_string()),
            });
        }
        if qubits[..pos].contains(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit: qubit.to_string(),
                gate_name: Some(gate.name().to_string()),
            });
        }
    }

    Ok(())
}
