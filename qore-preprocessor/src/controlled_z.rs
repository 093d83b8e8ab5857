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

//! Controlled-Z Engine: `multZ` and `multRZ` reduce a multi-controlled Z/RZ to Toffoli
//! plus single-qubit Z rotations (`spec.md` §4.5).

use crate::ancilla::AncillaRegistry;
use crate::emitter::Emitter;
use crate::error::Result;
use crate::gate::Control;
use crate::toffoli::ntoff;

/// The `phase_boolsum` identity from the glossary: `C^k-Z(θ) = ntoff . Z(θ)_target . ntoff`.
/// The inner `Z` is always emitted raw (never angle-collapsed) — it is an internal
/// primitive of this engine, not a user-visible gate choice.
fn phase_boolsum(
    theta: f64,
    target: usize,
    controls: &[Control],
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    ntoff(controls, target, role_set, registry, emitter)?;
    emitter.z_raw(target, theta);
    ntoff(controls, target, role_set, registry, emitter)
}

fn negate_controls(controls: &[Control], emitter: &mut Emitter) {
    for c in controls {
        if !c.positive {
            emitter.x(c.qubit);
        }
    }
}

/// `controls` with every sign forced positive — used once the caller has already
/// emitted the X conjugation, so nested `ntoff`/`phase_boolsum` calls do not conjugate
/// the same negative controls a second time.
fn as_positive(controls: &[Control]) -> Vec<Control> {
    controls.iter().map(|c| Control::positive(c.qubit)).collect()
}

/// `multRZ`: a controlled rotation that is genuinely continuous. Unrolled exactly
/// once — unlike `multZ`, it never iterates (`spec.md` §9 design note: rotation angles
/// compose linearly under the phase-boolsum identity, so a single level suffices).
pub fn mult_rz(
    theta: f64,
    target: usize,
    controls: &[Control],
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    negate_controls(controls, emitter);
    let positive = as_positive(controls);
    let half = theta / 2.0;
    phase_boolsum(half, target, &positive, role_set, registry, emitter)?;
    negate_controls(controls, emitter);
    Ok(())
}

/// `multZ`: a controlled Pauli-family gate, reduced via clean-ancilla delegation when
/// possible and iterative halving otherwise (`spec.md` §4.5).
pub fn mult_z(
    theta: f64,
    target: usize,
    controls: &[Control],
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    negate_controls(controls, emitter);
    let positive = as_positive(controls);

    if positive.len() == 1 {
        one_control(theta, target, positive[0].qubit, role_set, registry, emitter)?;
    } else if let Some(a) = registry.find_clean(role_set) {
        let mut extended_role: Vec<usize> = role_set.to_vec();
        extended_role.push(a);
        ntoff(&positive, a, &extended_role, registry, emitter)?;
        {
            let mut guard = registry.borrow_clean(a);
            let a = guard.qubit();
            one_control(theta, target, a, &extended_role, guard.registry_mut(), emitter)?;
        }
        ntoff(&positive, a, &extended_role, registry, emitter)?;
    } else {
        iterative_halving(theta, target, &positive, role_set, registry, emitter)?;
    }

    negate_controls(controls, emitter);
    Ok(())
}

/// The "exactly 1 control" branch shared by `multZ`'s direct and clean-ancilla paths.
fn one_control(
    theta: f64,
    target: usize,
    control: usize,
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    let half = theta / 2.0;
    let c = [Control::positive(control)];
    phase_boolsum(half, target, &c, role_set, registry, emitter)?;
    emitter.z_collapsed(target, half);
    emitter.z_collapsed(control, half);
    Ok(())
}

/// The no-clean-ancilla fallback: repeatedly halve θ, apply `phase_boolsum` against the
/// full remaining control set, then promote one control to be the next target
/// (`spec.md` §4.5's "redesignate one of the controls as the new target").
fn iterative_halving(
    theta: f64,
    target: usize,
    controls: &[Control],
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    let half = theta / 2.0;
    if controls.len() == 1 {
        return one_control(theta, target, controls[0].qubit, role_set, registry, emitter);
    }
    phase_boolsum(half, target, controls, role_set, registry, emitter)?;
    emitter.z_collapsed(target, half);
    let mut remaining = controls.to_vec();
    let new_target = remaining.pop().unwrap().qubit;
    iterative_halving(half, new_target, &remaining, role_set, registry, emitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancilla::AncillaRegistry;
    use std::f64::consts::PI;

    #[test]
    fn scenario_2_single_control_pi() {
        // op z [1] [0] pi
        let controls = [Control::positive(0)];
        let mut registry = AncillaRegistry::new(4);
        registry.retire_role_set(&[0, 1]);
        let mut emitter = Emitter::new();
        mult_z(PI, 1, &controls, &[0, 1], &mut registry, &mut emitter).unwrap();
        let lines = emitter.into_lines();
        assert_eq!(
            lines,
            vec![
                "op not [1] [0]",
                "op z [1] 1.5707963267948966",
                "op not [1] [0]",
                "op s [1]",
                "op s [0]",
            ]
        );
    }

    #[test]
    fn multz_with_clean_ancilla_restores_it() {
        let controls = [Control::positive(0), Control::positive(1)];
        let mut registry = AncillaRegistry::new(5);
        registry.retire_role_set(&[0, 1, 2]);
        let before = registry.clean_count();
        let mut emitter = Emitter::new();
        mult_z(PI, 2, &controls, &[0, 1, 2], &mut registry, &mut emitter).unwrap();
        assert_eq!(registry.clean_count(), before);
        assert!(!emitter.lines().is_empty());
    }

    #[test]
    fn multz_without_ancilla_uses_iterative_halving() {
        let controls = [
            Control::positive(0),
            Control::positive(1),
            Control::positive(2),
        ];
        let mut registry = AncillaRegistry::new(4);
        registry.retire_role_set(&[0, 1, 2, 3]);
        let mut emitter = Emitter::new();
        mult_z(PI, 3, &controls, &[0, 1, 2, 3], &mut registry, &mut emitter).unwrap();
        assert!(!emitter.lines().is_empty());
    }

    #[test]
    fn mult_rz_does_not_iterate() {
        let controls = [Control::positive(0), Control::positive(1)];
        let mut registry = AncillaRegistry::new(5);
        registry.retire_role_set(&[0, 1, 2]);
        let mut emitter = Emitter::new();
        mult_rz(0.77, 2, &controls, &[0, 1, 2], &mut registry, &mut emitter).unwrap();
        assert!(!emitter.lines().is_empty());
    }
}
