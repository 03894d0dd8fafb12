// Expands the presets object into the job matrix consumed by the workflow's
// `strategy.matrix` via a `matrix=<json>` output line.

use anyhow::Result;
use serde::Serialize;

use crate::preset_config::PresetMap;

/// One row of the generated job matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub preset: String,

    #[serde(rename = "runs-on")]
    pub runs_on: String,

    pub toolchain: String,

    /// Artifact configuration forwarded JSON-encoded, the shape the
    /// `generate-steps --artifact` flag consumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

/// The matrix in GitHub's `include` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub include: Vec<MatrixEntry>,
}

/// Build the matrix from the validated presets, filling `runs-on` and
/// `toolchain` from the defaults wherever a preset leaves them out.
pub fn construct_matrix(
    presets: &PresetMap,
    default_runs_on: &str,
    default_toolchain: &str,
) -> Result<Matrix> {
    let mut include = Vec::with_capacity(presets.len());

    for (name, config) in presets {
        let artifact = match &config.artifact {
            Some(artifact) => Some(serde_json::to_string(artifact)?),
            None => None,
        };

        include.push(MatrixEntry {
            preset: name.clone(),
            runs_on: config
                .runs_on
                .clone()
                .unwrap_or_else(|| default_runs_on.to_string()),
            toolchain: config
                .toolchain
                .clone()
                .unwrap_or_else(|| default_toolchain.to_string()),
            artifact,
        });
    }

    Ok(Matrix { include })
}

/// Render the `matrix=<json>` output line.
pub fn render_output(matrix: &Matrix) -> Result<String> {
    Ok(format!("matrix={}", serde_json::to_string(matrix)?))
}
