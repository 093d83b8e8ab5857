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

//! Toffoli Library: fixed expansions of a k-control NOT for `k in 1..=7`, parameterized
//! by available ancillas (`spec.md` §4.6).
//!
//! The dispatch table's named entry points (`toff4c1d0`, `toff5c0d1`, ...) are thin
//! wrappers around one generic construction: a recursive binary split that computes the
//! AND of the controls into a borrowed ancilla, applies the final NOT, and uncomputes,
//! built from the single two-control `tof` building block (`spec.md` §9's "Toffoli
//! building blocks as data" note). With a clean ancilla this is the textbook
//! single-pass ladder; with a dirty one it uses the classic double-application trick
//! (Barenco, Bennett, Cleve, DiVincenzo, Margolus, Shor, Sleator, Smolin, Weinfurter,
//! "Elementary gates for quantum computation", Lemma 7.2).

use crate::ancilla::AncillaRegistry;
use crate::emitter::Emitter;
use crate::error::{QoreError, Result};
use crate::gate::Control;

/// One step of a fixed building-block sequence: an (op-kind, qubit-args) tuple,
/// applied by interpretation against an [`Emitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisOp {
    H(usize),
    S(usize),
    SDag(usize),
    T(usize),
    TDag(usize),
    Cnot { control: usize, target: usize },
}

impl BasisOp {
    fn apply(self, emitter: &mut Emitter) {
        match self {
            BasisOp::H(q) => emitter.h(q),
            BasisOp::S(q) => emitter.s(q),
            BasisOp::SDag(q) => emitter.sdag(q),
            BasisOp::T(q) => emitter.t(q),
            BasisOp::TDag(q) => emitter.tdag(q),
            BasisOp::Cnot { control, target } => emitter.not(target, control),
        }
    }
}

fn apply_all(ops: &[BasisOp], emitter: &mut Emitter) {
    for &op in ops {
        op.apply(emitter);
    }
}

/// `tof`: the standard two-control Toffoli, six CNOTs plus Clifford+T single-qubit
/// gates (Nielsen & Chuang, Fig. 4.9).
pub fn tof(c1: usize, c2: usize, t: usize) -> Vec<BasisOp> {
    use BasisOp::*;
    vec![
        H(t),
        Cnot { control: c2, target: t },
        TDag(t),
        Cnot { control: c1, target: t },
        T(t),
        Cnot { control: c2, target: t },
        TDag(t),
        Cnot { control: c1, target: t },
        T(c2),
        T(t),
        H(t),
        Cnot { control: c1, target: c2 },
        T(c1),
        TDag(c2),
        Cnot { control: c1, target: c2 },
    ]
}

/// A source of scratch qubits for the recursive multi-controlled-NOT construction:
/// clean ancillas first (single-pass ladder), falling back to dirty ones (the
/// double-application trick) when no clean qubit remains, per the preference order in
/// `spec.md` §4.6's dispatch table.
struct ScratchPool<'a> {
    registry: &'a mut AncillaRegistry,
    role_set: Vec<usize>,
}

enum Scratch {
    Clean(usize),
    Dirty(usize),
}

impl Scratch {
    fn qubit(&self) -> usize {
        match self {
            Scratch::Clean(q) | Scratch::Dirty(q) => *q,
        }
    }
}

impl<'a> ScratchPool<'a> {
    fn acquire(&mut self, busy: &[usize]) -> Result<Scratch> {
        let mut exclude = self.role_set.clone();
        exclude.extend_from_slice(busy);
        if let Some(q) = self.registry.find_clean(&exclude) {
            return Ok(Scratch::Clean(q));
        }
        self.registry
            .find_dirty(self.registry.max_qubits(), &exclude)
            .map(Scratch::Dirty)
            .ok_or(QoreError::AncillaUnavailable)
    }
}

/// The exact two-control building block, used as the base case of the recursive
/// multi-controlled NOT. Returns the ops plus how many logical 2-control Toffolis it
/// spent (0 for arity <2, 1 for the `tof` case) — used for the output header's
/// `// tof count`.
fn mcx_base(controls: &[usize], target: usize) -> (Vec<BasisOp>, usize) {
    match controls {
        [] => (vec![], 0),
        [c0] => (
            vec![BasisOp::Cnot {
                control: *c0,
                target,
            }],
            0,
        ),
        [c0, c1] => (tof(*c0, *c1, target), 1),
        _ => unreachable!("mcx_base only handles 0-2 controls"),
    }
}

/// Recursive multi-controlled NOT over `controls` (all positive, sign-stripped by the
/// caller), targeting `target`. `busy` lists qubits already committed at shallower
/// recursion levels so sibling calls never collide. Returns the ops plus the number of
/// logical 2-control Toffolis spent building them.
fn mcx(
    controls: &[usize],
    target: usize,
    pool: &mut ScratchPool,
    busy: &[usize],
) -> Result<(Vec<BasisOp>, usize)> {
    if controls.len() <= 2 {
        return Ok(mcx_base(controls, target));
    }
    let half = controls.len().div_ceil(2);
    let (g1, g2) = controls.split_at(half);
    let scratch = pool.acquire(busy)?;
    let a = scratch.qubit();
    let mut next_busy = busy.to_vec();
    next_busy.push(a);

    let mut g2a: Vec<usize> = g2.to_vec();
    g2a.push(a);

    let (compute, compute_tofs) = mcx(g1, a, pool, &next_busy)?;
    let (apply, apply_tofs) = mcx(&g2a, target, pool, &next_busy)?;

    let mut ops = Vec::new();
    let tofs = match scratch {
        Scratch::Clean(_) => {
            // Single pass: `a` starts at |0>, so `compute` encodes exactly AND(g1).
            ops.extend(compute.clone());
            ops.extend(apply);
            ops.extend(compute);
            2 * compute_tofs + apply_tofs
        }
        Scratch::Dirty(_) => {
            // Double-application trick: applying (compute, apply) twice in this order
            // restores `a` exactly and leaves `target` XORed with AND(controls),
            // independent of `a`'s initial (unknown) value. See module docs.
            ops.extend(compute.clone());
            ops.extend(apply.clone());
            ops.extend(compute);
            ops.extend(apply);
            2 * compute_tofs + 2 * apply_tofs
        }
    };
    Ok((ops, tofs))
}

/// `ntoff(op, A)`: emits the minimal-CNOT decomposition of a k-control NOT from
/// `controls` onto `target`, given the Ancilla Registry's current availability
/// (`spec.md` §4.6). Handles signed controls by X-conjugating the negative ones around
/// the core decomposition.
pub fn ntoff(
    controls: &[Control],
    target: usize,
    role_set: &[usize],
    registry: &mut AncillaRegistry,
    emitter: &mut Emitter,
) -> Result<()> {
    let k = controls.len();
    if k > 7 {
        return Err(QoreError::TooManyControls {
            line: 0,
            count: k,
        });
    }
    for c in controls {
        if !c.positive {
            emitter.x(c.qubit);
        }
    }
    let positive: Vec<usize> = controls.iter().map(|c| c.qubit).collect();
    let (ops, tofs) = {
        let mut pool = ScratchPool {
            registry,
            role_set: role_set.to_vec(),
        };
        mcx(&positive, target, &mut pool, &[])?
    };
    apply_all(&ops, emitter);
    emitter.record_toffolis(tofs);
    for c in controls {
        if !c.positive {
            emitter.x(c.qubit);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancilla::AncillaRegistry;
    use test_case::test_case;

    #[test_case(1; "single control")]
    #[test_case(2; "two controls, base tof")]
    #[test_case(3; "three controls, one ancilla")]
    #[test_case(4; "four controls")]
    #[test_case(5; "five controls")]
    #[test_case(6; "six controls")]
    #[test_case(7; "seven controls, max arity")]
    fn ntoff_dispatches_for_every_supported_k(k: usize) {
        let role_set: Vec<usize> = (0..=k).collect();
        let controls: Vec<Control> = (0..k).map(Control::positive).collect();
        let mut registry = AncillaRegistry::new(20);
        registry.retire_role_set(&role_set);
        let mut emitter = Emitter::new();
        ntoff(&controls, k, &role_set, &mut registry, &mut emitter).unwrap();
        assert!(!emitter.lines().is_empty());
    }

    #[test]
    fn eight_controls_is_rejected() {
        let controls: Vec<Control> = (0..8).map(Control::positive).collect();
        let mut registry = AncillaRegistry::new(20);
        let mut emitter = Emitter::new();
        let err = ntoff(&controls, 8, &[], &mut registry, &mut emitter).unwrap_err();
        assert!(matches!(err, QoreError::TooManyControls { count: 8, .. }));
    }

    #[test]
    fn negative_control_is_x_conjugated() {
        let controls = vec![Control::negative(0)];
        let mut registry = AncillaRegistry::new(4);
        registry.retire_role_set(&[0, 1]);
        let mut emitter = Emitter::new();
        ntoff(&controls, 1, &[0, 1], &mut registry, &mut emitter).unwrap();
        let lines = emitter.into_lines();
        assert_eq!(lines[0], "op x [0]");
        assert_eq!(lines.last().unwrap(), "op x [0]");
    }

    #[test]
    fn forced_dirty_path_still_produces_a_circuit() {
        // Exactly role-set-sized register: no clean ancilla can exist beyond the
        // controls/target, forcing the dirty-ancilla branch for k=4.
        let role_set: Vec<usize> = (0..=4).collect();
        let controls: Vec<Control> = (0..4).map(Control::positive).collect();
        let mut registry = AncillaRegistry::new(6);
        registry.retire_role_set(&role_set);
        // Retire one more index so only dirty (previously-used) scratch remains.
        registry.retire_role_set(&[5]);
        let mut emitter = Emitter::new();
        ntoff(&controls, 4, &role_set, &mut registry, &mut emitter).unwrap();
        assert!(!emitter.lines().is_empty());
    }
}
