//! Property-based tests for QASM emission.
//!
//! Every gate application in a lowered model becomes exactly one statement,
//! in order, and emission is deterministic.

use proptest::prelude::*;
use qmodel_ir::{ClassicalEnv, LoweredCircuit, ModelBuilder, QReg};
use qmodel_qasm3::{emit, emit_qasm2};

/// Gate operations applied to a single register.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(u32, f64),
    CX(u32, u32),
}

impl GateOp {
    fn apply(self, b: &mut ModelBuilder, q: &QReg) {
        let _ = match self {
            GateOp::H(i) => b.h(q.bit(i)).map(|_| ()),
            GateOp::X(i) => b.x(q.bit(i)).map(|_| ()),
            GateOp::Rz(i, theta) => b.rz(theta, q.bit(i)).map(|_| ()),
            GateOp::CX(c, t) => b.cx(q.bit(c), q.bit(t)).map(|_| ()),
        };
    }
}

fn arb_gate_op(num_qubits: u32) -> BoxedStrategy<GateOp> {
    if num_qubits < 2 {
        prop_oneof![
            (0..num_qubits).prop_map(GateOp::H),
            (0..num_qubits).prop_map(GateOp::X),
            (0..num_qubits, -3.0_f64..3.0).prop_map(|(i, t)| GateOp::Rz(i, t)),
        ]
        .boxed()
    } else {
        prop_oneof![
            (0..num_qubits).prop_map(GateOp::H),
            (0..num_qubits).prop_map(GateOp::X),
            (0..num_qubits, -3.0_f64..3.0).prop_map(|(i, t)| GateOp::Rz(i, t)),
            (0..num_qubits, 0..num_qubits)
                .prop_filter("Control and target must differ", |(c, t)| c != t)
                .prop_map(|(c, t)| GateOp::CX(c, t)),
        ]
        .boxed()
    }
}

fn arb_lowered() -> impl Strategy<Value = LoweredCircuit> {
    (1_u32..=5).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=12).prop_map(move |ops| {
            let mut b = ModelBuilder::new();
            let q = b.allocate(n, "q").unwrap();
            for op in ops {
                op.apply(&mut b, &q);
            }
            b.finish("random").lower(&ClassicalEnv::new()).unwrap()
        })
    })
}

/// Statement lines: everything after the declarations that is not blank.
fn gate_lines(qasm: &str) -> Vec<&str> {
    qasm.lines()
        .filter(|l| !l.is_empty())
        .filter(|l| !l.starts_with("OPENQASM") && !l.starts_with("include"))
        .filter(|l| !l.starts_with("//"))
        .filter(|l| !l.starts_with("qubit[") && !l.starts_with("qreg "))
        .collect()
}

proptest! {
    #[test]
    fn one_statement_per_gate(circuit in arb_lowered()) {
        let qasm = emit(&circuit).unwrap();
        let lines = gate_lines(&qasm);
        prop_assert_eq!(lines.len(), circuit.gates.len());
        for (line, app) in lines.iter().zip(&circuit.gates) {
            prop_assert!(line.starts_with(app.gate.name()));
            prop_assert!(line.ends_with(';'));
        }
    }

    #[test]
    fn qasm2_has_same_statement_count(circuit in arb_lowered()) {
        let qasm3 = emit(&circuit).unwrap();
        let qasm2 = emit_qasm2(&circuit).unwrap();
        prop_assert_eq!(gate_lines(&qasm2).len(), gate_lines(&qasm3).len());
    }

    #[test]
    fn emission_is_deterministic(circuit in arb_lowered()) {
        prop_assert_eq!(emit(&circuit).unwrap(), emit(&circuit).unwrap());
    }
}
