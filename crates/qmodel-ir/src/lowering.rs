//! Lowering a model into a flat gate sequence.
//!
//! Conditionals are resolved against a [`ClassicalEnv`] and repeats are
//! spliced in index order, with the loop variable bound while its body is
//! lowered. The result holds gate applications only.

use serde::{Deserialize, Serialize};

use crate::classical::ClassicalEnv;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::model::Model;
use crate::operation::Operation;
use crate::qubit::{QReg, QubitId, QubitRef};

/// A gate applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateApplication {
    /// The gate.
    pub gate: StandardGate,
    /// Operands, in gate order.
    pub qubits: Vec<QubitRef>,
}

impl GateApplication {
    /// Gate name.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }
}

/// A model with all classical control resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoweredCircuit {
    /// Name of the source model.
    pub name: String,
    /// Registers of the source model.
    pub registers: Vec<QReg>,
    /// Gate applications in execution order.
    pub gates: Vec<GateApplication>,
}

impl LoweredCircuit {
    /// Total number of qubits.
    pub fn num_qubits(&self) -> u32 {
        crate::model::total_qubits(&self.registers)
    }

    /// Number of gate applications.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if no gate survived lowering.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Resolve a qubit reference to its global id.
    pub fn qubit_id(&self, qubit: &QubitRef) -> IrResult<QubitId> {
        self.registers
            .iter()
            .find(|r| r.name() == qubit.register)
            .ok_or_else(|| IrError::UnknownRegister(qubit.register.clone()))?
            .qubit_id(qubit.index)
    }

    /// Count of each gate name, sorted by name.
    pub fn gate_histogram(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = vec![];
        for app in &self.gates {
            match counts.iter_mut().find(|(name, _)| *name == app.name()) {
                Some((_, n)) => *n += 1,
                None => counts.push((app.name(), 1)),
            }
        }
        counts.sort_by_key(|(name, _)| *name);
        counts
    }
}

/// Lower `model` for the classical inputs in `env`.
pub fn lower(model: &Model, env: &ClassicalEnv) -> IrResult<LoweredCircuit> {
    let mut env = env.clone();
    let mut gates = vec![];
    lower_into(model.operations(), &mut env, &mut gates)?;
    Ok(LoweredCircuit {
        name: model.name().to_string(),
        registers: model.registers().to_vec(),
        gates,
    })
}

fn lower_into(
    operations: &[Operation],
    env: &mut ClassicalEnv,
    out: &mut Vec<GateApplication>,
) -> IrResult<()> {
    for op in operations {
        match op {
            Operation::Gate { gate, qubits } => out.push(GateApplication {
                gate: gate.clone(),
                qubits: qubits.clone(),
            }),
            Operation::Conditional { predicate, body } => {
                if predicate.evaluate(env)? {
                    lower_into(body, env, out)?;
                }
            }
            Operation::Repeat {
                var, iterations, ..
            } => {
                let shadowed = env.get(var);
                let mut result = Ok(());
                for (index, iteration) in iterations.iter().enumerate() {
                    env.set(var.clone(), index as i64);
                    result = lower_into(iteration, env, out);
                    if result.is_err() {
                        break;
                    }
                }
                // Restore the outer binding, if any.
                match shadowed {
                    Some(value) => env.set(var.clone(), value),
                    None => env.unset(var),
                };
                result?;
            }
        }
    }
    Ok(())
}
