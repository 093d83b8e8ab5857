// Copyright © 2026 HQS Quantum Simulations GmbH. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the
// License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either
// express or implied. See the License for the specific language governing permissions and
// limitations under the License.

//! The QORE data model: gate kinds, signed controls, and operation records.

use std::f64::consts::PI;

/// The closed set of gate kinds a QORE input program may use.
///
/// `spec.md` §3 fixes this enumeration; every kind has fixed arity (`Swap` takes two
/// targets, everything else takes one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    SDag,
    T,
    TDag,
    V,
    VDag,
    Rx,
    Ry,
    Rz,
    Not,
    Swap,
}

impl GateKind {
    /// Number of target qubits this kind requires.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Swap => 2,
            _ => 1,
        }
    }

    /// True for the Pauli-family kinds used by `is_pauli_family` (`spec.md` §4.2).
    pub fn is_pauli_family(self) -> bool {
        matches!(
            self,
            GateKind::X
                | GateKind::Y
                | GateKind::Z
                | GateKind::S
                | GateKind::SDag
                | GateKind::T
                | GateKind::TDag
                | GateKind::V
                | GateKind::VDag
        )
    }

    /// True for kinds that carry a continuous rotation angle.
    pub fn is_rotation(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }
}

/// A signed control qubit: positive controls fire on `|1⟩`, negative on `|0⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub qubit: usize,
    pub positive: bool,
}

impl Control {
    pub fn positive(qubit: usize) -> Self {
        Control {
            qubit,
            positive: true,
        }
    }

    pub fn negative(qubit: usize) -> Self {
        Control {
            qubit,
            positive: false,
        }
    }
}

/// A single parsed QORE operation.
///
/// `target` holds every target qubit (one, except for `Swap` which holds two).
/// `rotation` is `None` for gates that do not carry an explicit angle token, in which
/// case callers treat the default as π per `spec.md` §4.1 step 2.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: GateKind,
    pub target: Vec<usize>,
    pub controls: Vec<Control>,
    pub rotation: Option<f64>,
    /// 1-based source line, kept for diagnostics.
    pub line: usize,
}

impl Operation {
    /// The angle to use for this op: the explicit token if present, else π.
    pub fn angle(&self) -> f64 {
        self.rotation.unwrap_or(PI)
    }

    /// The sole target qubit, for non-SWAP kinds.
    pub fn target_qubit(&self) -> usize {
        self.target[0]
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }
}
