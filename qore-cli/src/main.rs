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

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Lowers a QORE program's multi-controlled gates into the restricted output gate set.
#[derive(Parser)]
#[command(name = "preprocess")]
struct Cli {
    /// Path to the input QORE program.
    input: PathBuf,

    /// Output path. Defaults to `<input>_preprocessed`.
    output: Option<PathBuf>,

    /// Qubit universe size. Defaults to 100.
    #[arg(default_value_t = 100)]
    max_qubits: usize,
}

fn default_output_path(input: &std::path::Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push("_preprocessed");
    PathBuf::from(name)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let output_path = cli.output.clone().unwrap_or_else(|| default_output_path(&cli.input));
    log::info!(
        "preprocessing {} -> {} (max_qubits={})",
        cli.input.display(),
        output_path.display(),
        cli.max_qubits
    );

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input file {}", cli.input.display()))?;

    let result = qore_preprocessor::preprocess(&input, cli.max_qubits);
    let output = match result {
        Ok(output) => output,
        Err(err) => {
            log::error!("preprocessing failed: {err}");
            anyhow::bail!(err);
        }
    };

    // Write to a temp file in the output's directory, then rename into place, so a
    // crash mid-write never leaves a partial output file (spec §6/§7).
    let dir = output_path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::Builder::new()
        .prefix(".qore-preprocess-")
        .tempfile_in(dir.unwrap_or_else(|| std::path::Path::new(".")))
        .context("failed to create temporary output file")?;
    use std::io::Write as _;
    tmp.write_all(output.as_bytes())
        .context("failed to write temporary output file")?;
    tmp.persist(&output_path)
        .with_context(|| format!("failed to finalize output file {}", output_path.display()))?;

    log::info!("wrote {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_appends_suffix() {
        let input = PathBuf::from("circuit.qore");
        assert_eq!(default_output_path(&input), PathBuf::from("circuit.qore_preprocessed"));
    }
}
