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

//! Balanced-modulo angle classification (`spec.md` §3).

use std::f64::consts::PI;

/// Tolerance used when comparing a rotation angle against a named multiple of π.
pub const ANGLE_TOLERANCE: f64 = 1e-13;

/// Balanced modulo: the representative of `a` modulo `b` in `[-b/2, b/2)`.
pub fn bmod(a: f64, b: f64) -> f64 {
    let r = a - b * (a / b).round();
    if r >= b / 2.0 {
        r - b
    } else if r < -b / 2.0 {
        r + b
    } else {
        r
    }
}

/// A named single-qubit Z-rotation angle a controlled gate can collapse to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedAngle {
    Z,
    S,
    SDag,
    T,
    TDag,
}

/// Classifies `theta` against π, ±π/2, ±π/4 within [`ANGLE_TOLERANCE`], per the
/// angle-to-gate collapse table in `spec.md` §4.7. Returns `None` when no named angle
/// matches, in which case callers must emit a raw parameterized `z` line.
pub fn classify_angle(theta: f64) -> Option<NamedAngle> {
    let near = |target: f64| bmod(theta - target, 2.0 * PI).abs() < ANGLE_TOLERANCE;
    if near(PI) {
        Some(NamedAngle::Z)
    } else if near(PI / 2.0) {
        Some(NamedAngle::S)
    } else if near(-PI / 2.0) {
        Some(NamedAngle::SDag)
    } else if near(PI / 4.0) {
        Some(NamedAngle::T)
    } else if near(-PI / 4.0) {
        Some(NamedAngle::TDag)
    } else {
        None
    }
}

/// True iff `theta` is equivalent to π within tolerance — the condition `spec.md` §4.2
/// uses for `is_not_reducible_under_control` and the 0-control direct-emit rule.
pub fn is_pi(theta: f64) -> bool {
    bmod(theta - PI, 2.0 * PI).abs() < ANGLE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmod_wraps_into_balanced_range() {
        assert!((bmod(3.0 * PI, 2.0 * PI) - PI).abs() < 1e-12 || (bmod(3.0 * PI, 2.0 * PI) + PI).abs() < 1e-12);
        assert!(bmod(0.0, 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn classify_angle_matches_named_fractions() {
        assert_eq!(classify_angle(PI), Some(NamedAngle::Z));
        assert_eq!(classify_angle(PI / 2.0), Some(NamedAngle::S));
        assert_eq!(classify_angle(-PI / 2.0), Some(NamedAngle::SDag));
        assert_eq!(classify_angle(PI / 4.0), Some(NamedAngle::T));
        assert_eq!(classify_angle(-PI / 4.0), Some(NamedAngle::TDag));
        assert_eq!(classify_angle(0.3), None);
    }

    #[test]
    fn is_pi_detects_default_angle() {
        assert!(is_pi(PI));
        assert!(!is_pi(PI / 2.0));
    }
}
