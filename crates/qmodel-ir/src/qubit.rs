//! Quantum registers and qubit references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::{IrError, IrResult};

/// Global position of a qubit within a model.
///
/// Registers are laid out contiguously in declaration order, so the
/// first qubit of the second register follows the last qubit of the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// A qubit addressed by register name and index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitRef {
    /// The register this qubit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: u32,
}

impl QubitRef {
    /// Create a reference without checking bounds.
    pub fn new(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for QubitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A named, fixed-size quantum register.
///
/// Every qubit starts in |0⟩. Valid indices are `0..size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QReg {
    name: String,
    size: u32,
    offset: u32,
}

impl QReg {
    pub(crate) fn new(name: impl Into<String>, size: u32, offset: u32) -> Self {
        Self {
            name: name.into(),
            size,
            offset,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits in the register.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Global id of the register's first qubit.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The valid indices of this register.
    pub fn indices(&self) -> Range<u32> {
        0..self.size
    }

    /// Check whether `index` is a valid position.
    pub fn contains(&self, index: u32) -> bool {
        index < self.size
    }

    /// Reference the qubit at `index`, failing if it is out of range.
    pub fn at(&self, index: u32) -> IrResult<QubitRef> {
        if !self.contains(index) {
            return Err(IrError::OutOfRange {
                register: self.name.clone(),
                index,
                size: self.size,
                gate_name: None,
            });
        }
        Ok(QubitRef::new(&self.name, index))
    }

    /// Reference the qubit at `index`.
    ///
    /// Bounds are checked later, when the reference is used by a gate.
    pub fn bit(&self, index: u32) -> QubitRef {
        QubitRef::new(&self.name, index)
    }

    /// References to every qubit in the register, in order.
    pub fn bits(&self) -> Vec<QubitRef> {
        self.indices().map(|i| self.bit(i)).collect()
    }

    /// Global id of the qubit at `index`.
    pub fn qubit_id(&self, index: u32) -> IrResult<QubitId> {
        self.at(index)?;
        Ok(QubitId(self.offset + index))
    }
}

impl fmt::Display for QReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}
