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

//! Error taxonomy for the QORE preprocessor.
//!
//! Every variant here is fatal: the driver aborts the whole run on the first one and the
//! CLI leaves no partial output file on disk.

use thiserror::Error;

/// Errors produced while parsing or lowering a QORE program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QoreError {
    /// The `// max qubit N` or `// ops count M` header line is missing or malformed.
    #[error("header missing or malformed: {reason}")]
    HeaderMissing {
        /// Human-readable description of what was expected.
        reason: String,
    },

    /// Fewer op lines were present than the declared `ops count`.
    #[error("ops count mismatch: header declared {declared}, found {found}")]
    OpsCountMismatch {
        /// Value declared in the header.
        declared: usize,
        /// Number of op lines actually read.
        found: usize,
    },

    /// A gate token outside the closed QORE gate set.
    #[error("unknown gate `{token}` on line {line}")]
    UnknownGate {
        /// The offending token.
        token: String,
        /// 1-based source line number.
        line: usize,
    },

    /// Unbalanced brackets, or more than two bracket groups, on an op line.
    #[error("bracket mismatch on line {line}")]
    BracketMismatch {
        /// 1-based source line number.
        line: usize,
    },

    /// Wrong number of target qubits for the gate kind (SWAP needs 2, all others need 1).
    #[error("arity error on line {line}: expected {expected} target(s), found {found}")]
    ArityError {
        /// 1-based source line number.
        line: usize,
        /// Expected target count for this gate kind.
        expected: usize,
        /// Actual target count parsed.
        found: usize,
    },

    /// The same qubit index appears in two roles (e.g. both target and control) in one op.
    #[error("qubit {qubit} appears in two roles on line {line}")]
    DuplicateQubit {
        /// 1-based source line number.
        line: usize,
        /// The duplicated qubit index.
        qubit: usize,
    },

    /// More than seven controls on a single op.
    #[error("too many controls on line {line}: {count} (maximum 7)")]
    TooManyControls {
        /// 1-based source line number.
        line: usize,
        /// Number of controls parsed.
        count: usize,
    },

    /// Internal invariant violation: the ancilla registry could not satisfy a request
    /// that the dispatch table guarantees is always satisfiable. Indicates a library bug.
    #[error("no ancilla available for a decomposition that requires one (internal error)")]
    AncillaUnavailable,

    /// A rotation angle token could not be parsed as a float.
    #[error("invalid rotation angle on line {line}: {source}")]
    InvalidAngle {
        /// 1-based source line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A qubit index token could not be parsed as an integer.
    #[error("invalid qubit index on line {line}: {source}")]
    InvalidQubitIndex {
        /// 1-based source line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QoreError>;
