// Derives the per-stage build commands and artifact configuration for one
// configure preset, emitted as `key=value` output lines for the workflow.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cmake_presets::{CMakePresets, RelatedPresets};
use crate::preset_config::ArtifactConfig;

/// The command line for each pipeline stage. Stages with no related preset
/// stay empty and the workflow skips them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCommands {
    pub configure: String,
    pub build: String,
    pub test: String,
    pub package: String,
}

/// Inputs to the step generator, mapped from the CLI flags.
#[derive(Debug, Clone)]
pub struct StepsOptions {
    /// The configure preset to generate steps for.
    pub preset: String,

    /// Store artifacts even when the preset supplies no artifact config.
    pub default_store_artifact: bool,

    /// Retention days used when the artifact config does not set one.
    pub default_retention_days: u32,

    /// Artifact config forwarded from the matrix entry; empty means unset.
    pub artifact: ArtifactConfig,

    /// The Actions checkout root, when running inside a workflow.
    pub workspace: Option<PathBuf>,
}

/// The generated outputs: stage commands plus the optional JSON-encoded
/// artifact configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepsOutput {
    pub commands: StepCommands,
    pub artifact: Option<String>,
}

/// Artifact payload handed to the upload step. The path list is collapsed to
/// a newline-joined string, the shape upload-artifact's `path` input takes.
#[derive(Debug, Serialize)]
struct ArtifactOutput {
    path: String,
    retention_days: u32,
}

/// Derive the stage commands from the related presets. The first related
/// preset of each kind wins.
pub fn derive_commands(configure_preset: &str, related: &RelatedPresets) -> StepCommands {
    let mut commands = StepCommands {
        configure: format!("cmake --preset {}", configure_preset),
        ..StepCommands::default()
    };

    if let Some(build) = related.build.first() {
        commands.build = format!("cmake --build --preset {}", build);
    }
    if let Some(test) = related.test.first() {
        commands.test = format!("ctest --preset {}", test);
    }
    if let Some(package) = related.package.first() {
        commands.package = format!("cmake --build --preset {} --target package", package);
    }

    commands
}

/// The binary dir as the workflow should reference it: relative to the
/// workspace when inside it, otherwise relative to the project root,
/// otherwise as resolved.
pub fn relative_binary_dir(
    binary_dir: &Path,
    project_root: &Path,
    workspace: Option<&Path>,
) -> String {
    if let Some(workspace) = workspace {
        if let Ok(relative) = binary_dir.strip_prefix(workspace) {
            return relative.display().to_string();
        }
    }

    if let Ok(relative) = binary_dir.strip_prefix(project_root) {
        return relative.display().to_string();
    }

    binary_dir.display().to_string()
}

/// Generate the stage commands and artifact config for the preset named in
/// `options`, reading `CMakePresets.json` from the project root.
pub fn generate_steps(project_root: &Path, options: &StepsOptions) -> Result<StepsOutput> {
    let presets = CMakePresets::load(project_root)?;

    if presets.configure_preset(&options.preset).is_none() {
        anyhow::bail!("Preset '{}' not found in the CMake project", options.preset);
    }

    let related = presets.related_presets(&options.preset);
    tracing::debug!(
        "Related presets for '{}': build={:?} test={:?} package={:?}",
        options.preset,
        related.build,
        related.test,
        related.package
    );

    let commands = derive_commands(&options.preset, &related);

    let binary_dir = presets.resolve_binary_dir(&options.preset)?;
    let relative = relative_binary_dir(&binary_dir, project_root, options.workspace.as_deref());

    let artifact = if !options.artifact.is_empty() || options.default_store_artifact {
        let paths = options
            .artifact
            .path
            .clone()
            .unwrap_or_else(|| vec![relative]);
        let payload = ArtifactOutput {
            path: paths.join("\n"),
            retention_days: options
                .artifact
                .retention_days
                .unwrap_or(options.default_retention_days),
        };
        Some(serde_json::to_string(&payload)?)
    } else {
        None
    };

    Ok(StepsOutput { commands, artifact })
}

/// Render the `key=value` output lines, one per stage plus the artifact.
/// An unset artifact is emitted as an empty value.
pub fn render_output_lines(output: &StepsOutput) -> Vec<String> {
    vec![
        format!("configure={}", output.commands.configure),
        format!("build={}", output.commands.build),
        format!("test={}", output.commands.test),
        format!("package={}", output.commands.package),
        format!("artifact={}", output.artifact.as_deref().unwrap_or("")),
    ]
}
