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

//! Lowers a QORE program containing multi-controlled gates (up to seven signed
//! controls) into one using only single-qubit Clifford+T gates, parameterized Z
//! rotations, and the 2-control Toffoli.
//!
//! The entry point is [`preprocess`]; everything else is exposed for composing a
//! custom pipeline (e.g. tests that want to classify or decompose a single op).

pub mod ancilla;
pub mod axis;
pub mod classifier;
pub mod controlled_z;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod gate;
pub mod math;
pub mod parser;
pub mod toffoli;

pub use error::{QoreError, Result};

/// Parses `input` as a QORE program and lowers every multi-controlled gate into the
/// restricted output gate set, returning the finished text (header included).
///
/// `max_qubits` is the configured qubit universe (`spec.md` §6/§7, CLI-overridable,
/// default 100) the Ancilla Registry is sized from. It is independent of the input's
/// own `// max qubit` header line, which only declares how many qubits the program
/// itself references — a decomposition may still need to reach past that declared
/// count for scratch space.
pub fn preprocess(input: &str, max_qubits: usize) -> Result<String> {
    let program = parser::parse(input)?;
    driver::run(&program, max_qubits)
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn scenario_2_end_to_end() {
        let input = "// max qubit 2\n// ops count 1\nop z [1] [0] 3.141592653589793\n";
        let out = preprocess(input, 2).unwrap();
        let body: Vec<&str> = out.lines().skip(3).collect();
        assert_eq!(
            body,
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
    fn determinism_same_input_twice() {
        let input = "// max qubit 4\n// ops count 2\nop h [0]\nop x [3] [0,1,2]\n";
        assert_eq!(preprocess(input, 4).unwrap(), preprocess(input, 4).unwrap());
    }

    #[test]
    fn output_uses_only_the_restricted_gate_set() {
        let input = "// max qubit 4\n// ops count 2\nop h [0]\nop x [3] [0,1,2]\n";
        let out = preprocess(input, 4).unwrap();
        for line in out.lines().skip(3) {
            let kind = line
                .strip_prefix("op ")
                .and_then(|rest| rest.split_whitespace().next())
                .unwrap();
            assert!(
                matches!(kind, "h" | "x" | "z" | "s" | "t" | "si" | "ti" | "not"),
                "unexpected output gate kind `{kind}` in line `{line}`"
            );
        }
    }
}
