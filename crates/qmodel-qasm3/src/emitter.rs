//! QASM emitter for lowered models.

use qmodel_ir::{ClassicalEnv, GateApplication, LoweredCircuit, Model, QReg, QubitRef, StandardGate};

use crate::error::{EmitError, EmitResult};

/// Emit a lowered circuit as QASM3 source code.
pub fn emit(circuit: &LoweredCircuit) -> EmitResult<String> {
    let mut emitter = Emitter::new(Dialect::Qasm3);
    emitter.emit_circuit(circuit)
}

/// Lower `model` for `env` and emit it as QASM3.
pub fn emit_model(model: &Model, env: &ClassicalEnv) -> EmitResult<String> {
    emit(&model.lower(env)?)
}

/// Emit a lowered circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];`) and gate names
/// follow `qelib1.inc` (`u1` for the phase gate, `cu1` for controlled phase).
pub fn emit_qasm2(circuit: &LoweredCircuit) -> EmitResult<String> {
    let mut emitter = Emitter::new(Dialect::Qasm2);
    emitter.emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

struct Emitter {
    dialect: Dialect,
    output: String,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &LoweredCircuit) -> EmitResult<String> {
        match self.dialect {
            Dialect::Qasm3 => self.writeln("OPENQASM 3.0;"),
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
        }
        self.writeln(&format!("// model: {}", circuit.name.escape_debug()));
        self.writeln("");

        for reg in &circuit.registers {
            self.emit_register(reg)?;
        }
        if !circuit.registers.is_empty() {
            self.writeln("");
        }

        for app in &circuit.gates {
            self.emit_gate(app)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_register(&mut self, reg: &QReg) -> EmitResult<()> {
        if !is_identifier(reg.name()) {
            return Err(EmitError::InvalidIdentifier(reg.name().to_string()));
        }
        let line = match self.dialect {
            Dialect::Qasm3 => format!("qubit[{}] {};", reg.size(), reg.name()),
            Dialect::Qasm2 => format!("qreg {}[{}];", reg.name(), reg.size()),
        };
        self.writeln(&line);
        Ok(())
    }

    fn emit_gate(&mut self, app: &GateApplication) -> EmitResult<()> {
        let name = self.gate_name(&app.gate);
        let params = emit_params(&app.gate)?;
        let qubits = emit_qubits(&app.qubits);

        if params.is_empty() {
            self.writeln(&format!("{name} {qubits};"));
        } else {
            self.writeln(&format!("{name}({params}) {qubits};"));
        }
        Ok(())
    }

    fn gate_name(&self, gate: &StandardGate) -> &'static str {
        match (self.dialect, gate) {
            (Dialect::Qasm2, StandardGate::P(_)) => "u1",
            (Dialect::Qasm2, StandardGate::CP(_)) => "cu1",
            _ => gate.name(),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_params(gate: &StandardGate) -> EmitResult<String> {
    gate.parameters()
        .into_iter()
        .map(|v| {
            if v.is_finite() {
                Ok(emit_angle(v))
            } else {
                Err(EmitError::NonFiniteAngle {
                    gate: gate.name().to_string(),
                    value: v,
                })
            }
        })
        .collect::<EmitResult<Vec<_>>>()
        .map(|params| params.join(", "))
}

/// Format an angle, recognizing common fractions of pi.
///
/// Other values use the shortest text that parses back to the same `f64`.
fn emit_angle(v: f64) -> String {
    let pi = std::f64::consts::PI;
    let named = [
        (pi, "pi"),
        (pi / 2.0, "pi/2"),
        (pi / 4.0, "pi/4"),
        (-pi, "-pi"),
        (-pi / 2.0, "-pi/2"),
        (-pi / 4.0, "-pi/4"),
    ];
    named
        .iter()
        .find(|(value, _)| v == *value)
        .map_or_else(|| format!("{v}"), |(_, text)| (*text).to_string())
}

fn emit_qubits(qubits: &[QubitRef]) -> String {
    qubits
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmodel_ir::build_model;

    fn lowered(model: &Model) -> LoweredCircuit {
        model.lower(&ClassicalEnv::new()).unwrap()
    }

    #[test]
    fn test_emit_entangle() {
        let qasm = emit(&lowered(&Model::entangle().unwrap())).unwrap();

        assert!(qasm.starts_with("OPENQASM 3.0;\n"));
        assert!(qasm.contains("// model: entangle"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
    }

    #[test]
    fn test_emit_parameterized() {
        let model = build_model("rot", |b| {
            let q = b.allocate(1, "q")?;
            b.rx(std::f64::consts::PI / 2.0, q.bit(0))?.rz(0.125, q.bit(0))?;
            Ok(())
        })
        .unwrap();

        let qasm = emit(&lowered(&model)).unwrap();
        assert!(qasm.contains("rx(pi/2) q[0];"));
        assert!(qasm.contains("rz(0.125) q[0];"));
    }

    #[test]
    fn test_small_and_near_pi_angles_keep_precision() {
        let near_pi = std::f64::consts::PI + 1e-12;
        let model = build_model("fine", |b| {
            let q = b.allocate(1, "q")?;
            b.rz(1e-7, q.bit(0))?
                .rx(near_pi, q.bit(0))?
                .ry(-1.905_988_712_786_855_8, q.bit(0))?;
            Ok(())
        })
        .unwrap();

        let qasm = emit(&lowered(&model)).unwrap();
        assert!(qasm.contains("rz(0.0000001) q[0];"), "{qasm}");
        assert!(!qasm.contains("rx(pi)"));

        let angles: Vec<f64> = qasm
            .lines()
            .filter_map(|l| l.split_once('(')?.1.split_once(')'))
            .map(|(angle, _)| angle.parse().unwrap())
            .collect();
        assert_eq!(angles, vec![1e-7, near_pi, -1.905_988_712_786_855_8]);
    }

    #[test]
    fn test_model_name_cannot_break_out_of_comment() {
        let mut circuit = lowered(&Model::entangle().unwrap());
        circuit.name = "x\nqubit[9] evil;\rreset q;".into();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("// model: x\\nqubit[9] evil;\\rreset q;\n"));
        assert!(!qasm.lines().any(|l| l.starts_with("qubit[9]")));
        assert!(!qasm.contains('\r'));
    }

    #[test]
    fn test_emit_multiple_registers() {
        let model = build_model("pair", |b| {
            let data = b.allocate(2, "data")?;
            let anc = b.allocate(1, "anc")?;
            b.ccx(data.bit(0), data.bit(1), anc.bit(0))?;
            Ok(())
        })
        .unwrap();

        let qasm = emit(&lowered(&model)).unwrap();
        assert!(qasm.contains("qubit[2] data;\nqubit[1] anc;"));
        assert!(qasm.contains("ccx data[0], data[1], anc[0];"));
    }

    #[test]
    fn test_emit_model_resolves_conditionals() {
        let qasm = emit_model(&Model::alternating_flips(4).unwrap(), &ClassicalEnv::new()).unwrap();
        assert!(qasm.contains("x q[0];"));
        assert!(qasm.contains("x q[2];"));
        assert!(!qasm.contains("x q[1];"));
        assert!(!qasm.contains("x q[3];"));
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let model = build_model("nan", |b| {
            let q = b.allocate(1, "q")?;
            b.ry(f64::NAN, q.bit(0))?;
            Ok(())
        })
        .unwrap();

        let err = emit(&lowered(&model)).unwrap_err();
        assert!(matches!(err, EmitError::NonFiniteAngle { ref gate, .. } if gate == "ry"));
    }

    #[test]
    fn test_invalid_register_name_rejected() {
        let model = build_model("bad", |b| {
            b.allocate(1, "2fast")?;
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            emit(&lowered(&model)).unwrap_err(),
            EmitError::InvalidIdentifier(_)
        ));
    }

    #[test]
    fn test_emit_qasm2_entangle() {
        let qasm = emit_qasm2(&lowered(&Model::entangle().unwrap())).unwrap();

        assert!(qasm.contains("OPENQASM 2.0;"));
        assert!(qasm.contains("include \"qelib1.inc\";"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(!qasm.contains("qubit["));
        assert!(!qasm.contains("OPENQASM 3.0;"));
    }

    #[test]
    fn test_emit_qasm2_phase_names() {
        let model = build_model("phase", |b| {
            let q = b.allocate(2, "q")?;
            b.p(std::f64::consts::PI / 4.0, q.bit(0))?
                .cp(-std::f64::consts::PI / 2.0, q.bit(0), q.bit(1))?;
            Ok(())
        })
        .unwrap();

        let circuit = lowered(&model);
        let qasm2 = emit_qasm2(&circuit).unwrap();
        assert!(qasm2.contains("u1(pi/4) q[0];"));
        assert!(qasm2.contains("cu1(-pi/2) q[0], q[1];"));

        let qasm3 = emit(&circuit).unwrap();
        assert!(qasm3.contains("p(pi/4) q[0];"));
        assert!(qasm3.contains("cp(-pi/2) q[0], q[1];"));
    }
}
