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

//! Basis Emitter: single-line textual emission of the restricted output gate set.
//!
//! Mirrors the match-and-`format!` shape of `roqoqo_qasm::interface::call_operation`,
//! specialized to the QORE output grammar (`spec.md` §4.4, §6).

use crate::math::{classify_angle, NamedAngle};

/// Accumulates emitted output lines plus the running stats the final header needs.
#[derive(Debug, Default)]
pub struct Emitter {
    lines: Vec<String>,
    max_qubit_seen: Option<usize>,
    tof_count: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter::default()
    }

    fn touch(&mut self, qubit: usize) {
        self.max_qubit_seen = Some(self.max_qubit_seen.map_or(qubit, |m| m.max(qubit)));
    }

    pub fn h(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op h [{t}]"));
    }

    pub fn x(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op x [{t}]"));
    }

    pub fn z(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op z [{t}]"));
    }

    pub fn s(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op s [{t}]"));
    }

    pub fn sdag(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op si [{t}]"));
    }

    pub fn t(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op t [{t}]"));
    }

    pub fn tdag(&mut self, t: usize) {
        self.touch(t);
        self.lines.push(format!("op ti [{t}]"));
    }

    /// A parameterized Z rotation emitted verbatim, with no angle-to-gate collapse.
    /// Used by the Controlled-Z Engine's `phase_boolsum` primitive (`spec.md` §4.5).
    pub fn z_raw(&mut self, t: usize, theta: f64) {
        self.touch(t);
        self.lines.push(format!("op z [{t}] {theta:?}"));
    }

    /// Emits a Z rotation, collapsing to a named Clifford+T gate when `theta` matches
    /// one of π, ±π/2, ±π/4 within tolerance (`spec.md` §4.7 "directly implementable").
    pub fn z_collapsed(&mut self, t: usize, theta: f64) {
        match classify_angle(theta) {
            Some(NamedAngle::Z) => self.z(t),
            Some(NamedAngle::S) => self.s(t),
            Some(NamedAngle::SDag) => self.sdag(t),
            Some(NamedAngle::T) => self.t(t),
            Some(NamedAngle::TDag) => self.tdag(t),
            None => self.z_raw(t, theta),
        }
    }

    /// `op not [target] [control]` — note the target-then-control order is inverted
    /// relative to the input syntax (`spec.md` §4.4).
    pub fn not(&mut self, target: usize, control: usize) {
        self.touch(target);
        self.touch(control);
        self.lines.push(format!("op not [{target}] [{control}]"));
    }

    /// Number of emitted lines that begin with `op` (all of them, by construction) —
    /// exposed separately so the header-accuracy property in `spec.md` §8 has an
    /// independent thing to check against.
    pub fn op_count(&self) -> usize {
        self.lines.len()
    }

    pub fn max_qubit_seen(&self) -> Option<usize> {
        self.max_qubit_seen
    }

    /// Adds `n` to the running count of logical 2-control Toffolis spent so far, for
    /// the output header's `// tof count` (`spec.md` §4.7).
    pub fn record_toffolis(&mut self, n: usize) {
        self.tof_count += n;
    }

    pub fn tof_count(&self) -> usize {
        self.tof_count
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
