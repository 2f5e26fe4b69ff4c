//! Operation records accumulated by the model builder.

use serde::{Deserialize, Serialize};

use crate::classical::Predicate;
use crate::gate::StandardGate;
use crate::qubit::QubitRef;

/// One record in a model's operation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// A gate applied to one or more qubits.
    Gate {
        /// The gate.
        gate: StandardGate,
        /// Operands, in gate order (controls first).
        qubits: Vec<QubitRef>,
    },
    /// A body included only when the predicate holds at lowering time.
    Conditional {
        /// Classical guard.
        predicate: Predicate,
        /// Guarded operations.
        body: Vec<Operation>,
    },
    /// A bounded loop, already expanded per index.
    Repeat {
        /// Classical name the loop index is bound to.
        var: String,
        /// Number of iterations.
        count: u32,
        /// Operations produced for each index, `iterations[i]` for index `i`.
        iterations: Vec<Vec<Operation>>,
    },
}

impl Operation {
    /// Create a gate record.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitRef>) -> Self {
        Operation::Gate {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate record.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitRef) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate record.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitRef, q2: QubitRef) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Check if this is a gate record.
    pub fn is_gate(&self) -> bool {
        matches!(self, Operation::Gate { .. })
    }

    /// Check if this is a conditional block.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Operation::Conditional { .. })
    }

    /// Check if this is a repetition.
    pub fn is_repeat(&self) -> bool {
        matches!(self, Operation::Repeat { .. })
    }

    /// Get the gate if this is a gate record.
    pub fn as_gate(&self) -> Option<(&StandardGate, &[QubitRef])> {
        match self {
            Operation::Gate { gate, qubits } => Some((gate, qubits)),
            _ => None,
        }
    }

    /// Get the name of the record.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate { gate, .. } => gate.name(),
            Operation::Conditional { .. } => "if",
            Operation::Repeat { .. } => "repeat",
        }
    }

    /// Number of gate records in this record, counting nested bodies
    /// regardless of whether their guards would hold.
    pub fn gate_count(&self) -> usize {
        match self {
            Operation::Gate { .. } => 1,
            Operation::Conditional { body, .. } => body.iter().map(Operation::gate_count).sum(),
            Operation::Repeat { iterations, .. } => iterations
                .iter()
                .flatten()
                .map(Operation::gate_count)
                .sum(),
        }
    }

    /// Visit every qubit reference in this record, including nested ones.
    pub fn for_each_qubit<F: FnMut(&StandardGate, &QubitRef)>(&self, f: &mut F) {
        match self {
            Operation::Gate { gate, qubits } => {
                for q in qubits {
                    f(gate, q);
                }
            }
            Operation::Conditional { body, .. } => {
                for op in body {
                    op.for_each_qubit(f);
                }
            }
            Operation::Repeat { iterations, .. } => {
                for op in iterations.iter().flatten() {
                    op.for_each_qubit(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classical::ClassicalExpr;

    #[test]
    fn test_gate_record() {
        let op = Operation::single_qubit_gate(StandardGate::H, QubitRef::new("q", 0));
        assert!(op.is_gate());
        assert_eq!(op.name(), "h");
        let (gate, qubits) = op.as_gate().unwrap();
        assert_eq!(*gate, StandardGate::H);
        assert_eq!(qubits.len(), 1);
    }

    #[test]
    fn test_nested_gate_count() {
        let flip = Operation::single_qubit_gate(StandardGate::X, QubitRef::new("q", 0));
        let cond = Operation::Conditional {
            predicate: ClassicalExpr::var("i").equals(0),
            body: vec![flip.clone(), flip.clone()],
        };
        let rep = Operation::Repeat {
            var: "i".into(),
            count: 2,
            iterations: vec![vec![cond.clone()], vec![flip]],
        };
        assert!(cond.is_conditional());
        assert!(rep.is_repeat());
        assert_eq!(cond.gate_count(), 2);
        assert_eq!(rep.gate_count(), 3);
        assert_eq!(rep.name(), "repeat");
    }

    #[test]
    fn test_serde_tagging() {
        let op = Operation::two_qubit_gate(
            StandardGate::CX,
            QubitRef::new("q", 0),
            QubitRef::new("q", 1),
        );
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "gate");
        assert_eq!(json["qubits"][1]["index"], 1);
    }
}
