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

//! QORE Parser: a two-pass read of the header plus operation lines (`spec.md` §4.1).

use std::collections::HashSet;

use crate::error::{QoreError, Result};
use crate::gate::{Control, GateKind, Operation};

/// The parsed header plus the full operation list.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub max_qubits: usize,
    pub ops_declared: usize,
    pub shots: Option<u64>,
    pub debug: bool,
    pub operations: Vec<Operation>,
}

/// Parses a full QORE text stream into a [`ParsedProgram`].
pub fn parse(input: &str) -> Result<ParsedProgram> {
    let lines: Vec<&str> = input.lines().collect();
    let mut cursor = 0usize;

    let max_qubits = parse_required_header(&lines, &mut cursor, "// max qubit ", "max qubit")?;
    let ops_declared = parse_required_header(&lines, &mut cursor, "// ops count ", "ops count")?;

    let mut shots = None;
    let mut debug = false;
    while cursor < lines.len() {
        let trimmed = lines[cursor].trim();
        if let Some(rest) = trimmed.strip_prefix("// shots ") {
            shots = Some(rest.trim().parse::<u64>().map_err(|_| QoreError::HeaderMissing {
                reason: format!("malformed `// shots` line {}", cursor + 1),
            })?);
            cursor += 1;
        } else if trimmed == "// debug" {
            debug = true;
            cursor += 1;
        } else {
            break;
        }
    }

    let mut operations = Vec::with_capacity(ops_declared);
    while cursor < lines.len() && operations.len() < ops_declared {
        let raw = lines[cursor];
        let line_no = cursor + 1;
        cursor += 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        let Some(rest) = trimmed.strip_prefix("op ") else {
            continue;
        };
        operations.push(parse_op_line(rest, line_no)?);
    }

    if operations.len() < ops_declared {
        log::warn!(
            "ops count mismatch: declared {} but only {} were present",
            ops_declared,
            operations.len()
        );
    }

    Ok(ParsedProgram {
        max_qubits,
        ops_declared,
        shots,
        debug,
        operations,
    })
}

fn parse_required_header(
    lines: &[&str],
    cursor: &mut usize,
    prefix: &str,
    label: &str,
) -> Result<usize> {
    while *cursor < lines.len() && lines[*cursor].trim().is_empty() {
        *cursor += 1;
    }
    if *cursor >= lines.len() {
        return Err(QoreError::HeaderMissing {
            reason: format!("expected `{label}` header, found end of input"),
        });
    }
    let trimmed = lines[*cursor].trim();
    let value = trimmed
        .strip_prefix(prefix)
        .and_then(|rest| rest.trim().parse::<usize>().ok())
        .ok_or_else(|| QoreError::HeaderMissing {
            reason: format!("expected `{label}` header on line {}", *cursor + 1),
        })?;
    *cursor += 1;
    Ok(value)
}

/// Splits `"[0,1] [-2,3] 0.5"`-shaped text into its bracket groups plus any trailing
/// text after the last `]`.
fn bracket_groups(text: &str) -> std::result::Result<(Vec<&str>, &str), ()> {
    let mut groups = Vec::new();
    let mut rest = text;
    loop {
        let Some(open) = rest.find('[') else { break };
        let Some(close_rel) = rest[open..].find(']') else {
            return Err(());
        };
        let close = open + close_rel;
        groups.push(&rest[open + 1..close]);
        rest = &rest[close + 1..];
        if groups.len() > 2 {
            return Err(());
        }
        if rest.trim_start().starts_with('[') {
            continue;
        }
        break;
    }
    Ok((groups, rest.trim()))
}

fn parse_qubit_list(text: &str, line: usize) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|source| QoreError::InvalidQubitIndex { line, source })
        })
        .collect()
}

fn parse_control_list(text: &str, line: usize) -> Result<Vec<Control>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            if let Some(rest) = token.strip_prefix('-') {
                rest.trim()
                    .parse::<usize>()
                    .map(Control::negative)
                    .map_err(|source| QoreError::InvalidQubitIndex { line, source })
            } else {
                token
                    .parse::<usize>()
                    .map(Control::positive)
                    .map_err(|source| QoreError::InvalidQubitIndex { line, source })
            }
        })
        .collect()
}

fn gate_kind_from_token(token: &str, line: usize) -> Result<GateKind> {
    // Matched in precedence order per `spec.md` §4.1 step 3: longer/overlapping
    // prefixes first (e.g. `si` before `s`).
    Ok(match token {
        "swap" => GateKind::Swap,
        "not" => GateKind::Not,
        "rx" => GateKind::Rx,
        "ry" => GateKind::Ry,
        "rz" => GateKind::Rz,
        "si" => GateKind::SDag,
        "ti" => GateKind::TDag,
        "vi" => GateKind::VDag,
        "s" => GateKind::S,
        "t" => GateKind::T,
        "v" => GateKind::V,
        "h" => GateKind::H,
        "x" => GateKind::X,
        "y" => GateKind::Y,
        "z" => GateKind::Z,
        _ => return Err(QoreError::UnknownGate {
            line,
            token: token.to_string(),
        }),
    })
}

fn parse_op_line(rest: &str, line: usize) -> Result<Operation> {
    let first_bracket = rest.find('[').ok_or(QoreError::BracketMismatch { line })?;
    let kind_token = rest[..first_bracket].trim();
    let kind = gate_kind_from_token(kind_token, line)?;

    let (groups, trailing) =
        bracket_groups(&rest[first_bracket..]).map_err(|_| QoreError::BracketMismatch { line })?;
    if groups.is_empty() || groups.len() > 2 {
        return Err(QoreError::BracketMismatch { line });
    }

    let target = parse_qubit_list(groups[0], line)?;
    let controls = if groups.len() == 2 {
        parse_control_list(groups[1], line)?
    } else {
        Vec::new()
    };

    // Per spec.md §4.1 step 2, only a controlled op's trailing text is parsed as a
    // rotation angle; an uncontrolled op always falls back to the default of π.
    let rotation = if groups.len() == 2 && !trailing.is_empty() {
        Some(
            trailing
                .parse::<f64>()
                .map_err(|source| QoreError::InvalidAngle { line, source })?,
        )
    } else {
        None
    };

    if target.len() != kind.arity() {
        return Err(QoreError::ArityError {
            line,
            expected: kind.arity(),
            found: target.len(),
        });
    }

    let mut seen: HashSet<usize> = HashSet::new();
    for &q in &target {
        if !seen.insert(q) {
            return Err(QoreError::DuplicateQubit { line, qubit: q });
        }
    }
    for c in &controls {
        if !seen.insert(c.qubit) {
            return Err(QoreError::DuplicateQubit { line, qubit: c.qubit });
        }
    }
    if controls.len() > 7 {
        return Err(QoreError::TooManyControls {
            line,
            count: controls.len(),
        });
    }

    Ok(Operation {
        kind,
        target,
        controls,
        rotation,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1_single_h() {
        let input = "// max qubit 1\n// ops count 1\nop h [0]\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.max_qubits, 1);
        assert_eq!(parsed.ops_declared, 1);
        assert_eq!(parsed.operations.len(), 1);
        assert_eq!(parsed.operations[0].kind, GateKind::H);
        assert_eq!(parsed.operations[0].target, vec![0]);
    }

    #[test]
    fn optional_header_lines_in_either_order() {
        let input = "// max qubit 2\n// ops count 0\n// debug\n// shots 100\n";
        let parsed = parse(input).unwrap();
        assert!(parsed.debug);
        assert_eq!(parsed.shots, Some(100));
    }

    #[test]
    fn missing_header_errors() {
        let input = "op h [0]\n";
        assert!(matches!(parse(input), Err(QoreError::HeaderMissing { .. })));
    }

    #[test]
    fn controlled_z_with_angle_and_negative_control() {
        let input = "// max qubit 2\n// ops count 1\nop z [1] [-0] 1.5\n";
        let parsed = parse(input).unwrap();
        let op = &parsed.operations[0];
        assert_eq!(op.controls, vec![Control::negative(0)]);
        assert_eq!(op.rotation, Some(1.5));
    }

    #[test]
    fn unknown_gate_is_rejected() {
        let input = "// max qubit 1\n// ops count 1\nop frobnicate [0]\n";
        assert!(matches!(parse(input), Err(QoreError::UnknownGate { .. })));
    }

    #[test]
    fn duplicate_qubit_across_roles_is_rejected() {
        let input = "// max qubit 2\n// ops count 1\nop x [0] [0]\n";
        assert!(matches!(parse(input), Err(QoreError::DuplicateQubit { .. })));
    }

    #[test]
    fn fewer_ops_than_declared_is_a_warning_not_an_error() {
        let input = "// max qubit 1\n// ops count 2\nop h [0]\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.operations.len(), 1);
    }

    #[test]
    fn swap_parses_two_targets() {
        let input = "// max qubit 2\n// ops count 1\nop swap [0,1]\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.operations[0].target, vec![0, 1]);
    }
}
