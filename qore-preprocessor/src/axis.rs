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

//! Axis Changer: conjugates a target qubit between its gate kind's natural basis and
//! the Z basis (`spec.md` §4.3).
//!
//! Contract: for every kind `K`, `post(K) . z_basis_gate . pre(K) == K`. The sequences
//! below are data, not branches, per the design note in `spec.md` §9.

use crate::emitter::Emitter;
use crate::gate::GateKind;

/// A single step of an axis-change sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    H,
    S,
    SDag,
    T,
    TDag,
}

fn pre_table(kind: GateKind) -> &'static [Step] {
    match kind {
        GateKind::H => &[Step::SDag, Step::H, Step::TDag, Step::H],
        GateKind::X | GateKind::V | GateKind::VDag | GateKind::Rx => &[Step::H],
        GateKind::Y | GateKind::Ry => &[Step::SDag, Step::H],
        GateKind::Z
        | GateKind::S
        | GateKind::SDag
        | GateKind::T
        | GateKind::TDag
        | GateKind::Rz => &[],
        GateKind::Not | GateKind::Swap => &[],
    }
}

fn post_table(kind: GateKind) -> &'static [Step] {
    match kind {
        GateKind::H => &[Step::H, Step::T, Step::H, Step::S],
        GateKind::X | GateKind::V | GateKind::VDag | GateKind::Rx => &[Step::H],
        GateKind::Y | GateKind::Ry => &[Step::H, Step::S],
        GateKind::Z
        | GateKind::S
        | GateKind::SDag
        | GateKind::T
        | GateKind::TDag
        | GateKind::Rz => &[],
        GateKind::Not | GateKind::Swap => &[],
    }
}

fn emit_step(emitter: &mut Emitter, step: Step, qubit: usize) {
    match step {
        Step::H => emitter.h(qubit),
        Step::S => emitter.s(qubit),
        Step::SDag => emitter.sdag(qubit),
        Step::T => emitter.t(qubit),
        Step::TDag => emitter.tdag(qubit),
    }
}

/// Emits the pre-conjugation sequence for `kind` on `qubit`.
pub fn emit_pre(emitter: &mut Emitter, kind: GateKind, qubit: usize) {
    for &step in pre_table(kind) {
        emit_step(emitter, step, qubit);
    }
}

/// Emits the post-conjugation sequence for `kind` on `qubit`.
pub fn emit_post(emitter: &mut Emitter, kind: GateKind, qubit: usize) {
    for &step in post_table(kind) {
        emit_step(emitter, step, qubit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_uses_single_hadamard_conjugation() {
        let mut e = Emitter::new();
        emit_pre(&mut e, GateKind::X, 2);
        emit_post(&mut e, GateKind::X, 2);
        assert_eq!(e.into_lines(), vec!["op h [2]", "op h [2]"]);
    }

    #[test]
    fn z_family_has_no_conjugation() {
        let mut e = Emitter::new();
        emit_pre(&mut e, GateKind::Z, 0);
        emit_post(&mut e, GateKind::Z, 0);
        assert!(e.into_lines().is_empty());
    }

    #[test]
    fn h_kind_uses_four_step_tables() {
        assert_eq!(pre_table(GateKind::H).len(), 4);
        assert_eq!(post_table(GateKind::H).len(), 4);
    }
}
