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

//! Gate Classifier: maps a parsed `Operation` to a dispatch category (`spec.md` §4.2).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::gate::{GateKind, Operation};
use crate::math::is_pi;

/// Dispatch category computed for one `Operation`, consumed by the Driver (`spec.md` §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// 0 controls, `kind == Swap`.
    Swap,
    /// 0 controls, directly emittable single-qubit gate.
    DirectNoControl,
    /// 0 controls, needs an axis change around a Z-basis gate.
    AxisNoControl,
    /// 1+ controls, reduces to axis change around a single multi-controlled NOT.
    NotReducible,
    /// 1+ controls, Pauli-family kind: routed through `multZ`.
    PauliFamily,
    /// 1+ controls, rotation kind: routed through `multRZ`.
    Rotation,
}

/// Classifies `op` per `spec.md` §4.2 and §4.7's dispatch table.
pub fn classify(op: &Operation) -> Dispatch {
    let controlled = !op.controls.is_empty();
    if !controlled {
        if op.kind == GateKind::Swap {
            return Dispatch::Swap;
        }
        if is_noncontrolled_direct(op) {
            return Dispatch::DirectNoControl;
        }
        return Dispatch::AxisNoControl;
    }
    if is_not_reducible_under_control(op) {
        Dispatch::NotReducible
    } else if op.kind.is_pauli_family() {
        Dispatch::PauliFamily
    } else {
        Dispatch::Rotation
    }
}

/// `is_noncontrolled_direct` from `spec.md` §4.2.
pub fn is_noncontrolled_direct(op: &Operation) -> bool {
    match op.kind {
        GateKind::H | GateKind::S | GateKind::SDag | GateKind::T | GateKind::TDag => true,
        GateKind::Z | GateKind::Rz => true,
        GateKind::X | GateKind::Rx => is_pi(op.angle()),
        _ => false,
    }
}

/// `is_not_reducible_under_control` from `spec.md` §4.2.
///
/// `Z` is deliberately absent here even though its controlled form always carries an
/// effective angle of π: §8 scenario 2 classifies a controlled `Z` as Pauli-family and
/// routes it through `multZ`, not through the bare-NOT shortcut. `X`/`Y`/`Rx`/`Ry`/`Rz`
/// keep the shortcut, since it is the cheaper, semantically-equivalent expansion for
/// those kinds.
pub fn is_not_reducible_under_control(op: &Operation) -> bool {
    match op.kind {
        GateKind::H => true,
        GateKind::X | GateKind::Y | GateKind::Rx | GateKind::Ry | GateKind::Rz => {
            is_pi(op.angle())
        }
        _ => false,
    }
}

/// `effective_angle` from `spec.md` §4.2: the fixed angle a Pauli-family kind
/// represents, or the raw rotation for continuous kinds.
pub fn effective_angle(op: &Operation) -> f64 {
    match op.kind {
        GateKind::X | GateKind::Y | GateKind::Z => PI,
        GateKind::S | GateKind::V => FRAC_PI_2,
        GateKind::SDag | GateKind::VDag => -FRAC_PI_2,
        GateKind::T => FRAC_PI_4,
        GateKind::TDag => -FRAC_PI_4,
        _ => op.angle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Control;

    fn op(kind: GateKind, controls: Vec<Control>, rotation: Option<f64>) -> Operation {
        Operation {
            kind,
            target: vec![0],
            controls,
            rotation,
            line: 1,
        }
    }

    #[test]
    fn uncontrolled_h_is_direct() {
        assert_eq!(classify(&op(GateKind::H, vec![], None)), Dispatch::DirectNoControl);
    }

    #[test]
    fn controlled_x_at_pi_is_not_reducible() {
        let o = op(GateKind::X, vec![Control::positive(1)], None);
        assert_eq!(classify(&o), Dispatch::NotReducible);
    }

    #[test]
    fn controlled_z_at_pi_is_pauli_family() {
        let o = op(GateKind::Z, vec![Control::positive(0)], Some(PI));
        assert_eq!(classify(&o), Dispatch::PauliFamily);
    }

    #[test]
    fn controlled_s_is_pauli_family() {
        let o = op(GateKind::S, vec![Control::positive(1)], None);
        assert_eq!(classify(&o), Dispatch::PauliFamily);
    }

    #[test]
    fn controlled_rz_with_arbitrary_angle_is_rotation() {
        let o = op(GateKind::Rz, vec![Control::positive(1)], Some(0.77));
        assert_eq!(classify(&o), Dispatch::Rotation);
    }

    #[test]
    fn swap_has_no_controls_by_construction() {
        let o = op(GateKind::Swap, vec![], None);
        assert_eq!(classify(&o), Dispatch::Swap);
    }

    #[test]
    fn effective_angle_table() {
        assert_eq!(effective_angle(&op(GateKind::T, vec![], None)), FRAC_PI_4);
        assert_eq!(effective_angle(&op(GateKind::SDag, vec![], None)), -FRAC_PI_2);
    }
}
