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

//! Ancilla Registry: tracks clean/used qubits and hands out scoped ancilla borrows.
//!
//! `spec.md` §4.8: each qubit lives in `{CLEAN, USED}`. The `CLEAN -> USED` transition is
//! one-shot and permanent. Within a single op, ancillas borrowed by `multZ`/`ntoff`
//! become transiently `BUSY` and must return to `CLEAN` before the op completes — we
//! model that with a guard that releases on drop, so every exit path (including `?`)
//! restores the bit.

use bitvec::prelude::*;

/// `A[0..max_qubits)` from `spec.md` §3: `true` means clean (never used, not busy).
pub struct AncillaRegistry {
    clean: BitVec,
}

impl AncillaRegistry {
    pub fn new(max_qubits: usize) -> Self {
        AncillaRegistry {
            clean: bitvec![1; max_qubits],
        }
    }

    pub fn max_qubits(&self) -> usize {
        self.clean.len()
    }

    /// Marks every qubit in `role_set` permanently used. Called once per op by the
    /// Driver before classification (`spec.md` §4.7 step 1).
    pub fn retire_role_set(&mut self, role_set: &[usize]) {
        for &q in role_set {
            self.clean.set(q, false);
        }
    }

    /// Number of qubits still clean.
    pub fn clean_count(&self) -> usize {
        self.clean.count_ones()
    }

    /// Lowest-index-first scan for a clean ancilla outside `exclude`.
    pub fn find_clean(&self, exclude: &[usize]) -> Option<usize> {
        (0..self.clean.len()).find(|&i| self.clean[i] && !exclude.contains(&i))
    }

    /// Lowest-index-first scan for any unused (dirty-eligible) index outside
    /// `exclude` — clean or previously-used, it does not matter, a dirty ancilla's
    /// state is arbitrary and must be restored by the caller regardless.
    pub fn find_dirty(&self, max_qubits: usize, exclude: &[usize]) -> Option<usize> {
        (0..max_qubits).find(|i| !exclude.contains(i))
    }

    /// Borrows a clean ancilla, marking it busy (i.e. temporarily not clean) for the
    /// scope of the returned guard. Released automatically when the guard drops,
    /// matching `spec.md` §4.8's "return to CLEAN before that op completes".
    pub fn borrow_clean(&mut self, qubit: usize) -> AncillaBorrow<'_> {
        debug_assert!(self.clean[qubit], "borrow_clean on a non-clean qubit");
        self.clean.set(qubit, false);
        AncillaBorrow {
            registry: self,
            qubit,
        }
    }
}

/// A scoped, LIFO-discipline ancilla borrow. Dropping it restores the bit to clean.
pub struct AncillaBorrow<'a> {
    registry: &'a mut AncillaRegistry,
    qubit: usize,
}

impl AncillaBorrow<'_> {
    pub fn qubit(&self) -> usize {
        self.qubit
    }

    /// Mutable access to the registry for nested borrows/lookups within this guard's
    /// scope (e.g. a nested `ntoff` call that itself needs to find scratch qubits).
    pub fn registry_mut(&mut self) -> &mut AncillaRegistry {
        self.registry
    }
}

impl Drop for AncillaBorrow<'_> {
    fn drop(&mut self) {
        self.registry.clean.set(self.qubit, true);
    }
}
