// Entry point for the `builder-gen` binary.
//
// Each subcommand is one single-shot generation tool used by the CMake
// builder workflow. Environment extraction lives here; the library modules
// take explicit parameters.

use clap::{Parser, Subcommand};
use std::env;
use std::path::{Path, PathBuf};

use builder_common::constants::{return_code, variables};
use builder_common::Selectors;
use builder_gen::preset_config::ArtifactConfig;
use builder_gen::steps_generator::StepsOptions;
use builder_gen::{action_assembler, matrix_builder, preset_config, steps_generator};

#[derive(Parser)]
#[command(name = "builder-gen", about = "CMake builder CI generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the dynamic composite setup action from the RUNS_ON,
    /// TOOLCHAIN, and PRESET environment selectors
    GenerateAction,

    /// Validate a presets JSON object
    ValidatePresets {
        /// Presets json object
        #[arg(long)]
        presets: String,
    },

    /// Construct the build matrix from a presets JSON object
    ConstructMatrix {
        /// Default runs-on parameter
        #[arg(long)]
        default_runs_on: String,

        /// Default toolchain parameter
        #[arg(long)]
        default_toolchain: String,

        /// Presets json object
        #[arg(long)]
        presets: String,
    },

    /// Generate build steps from a CMake configure preset
    GenerateSteps {
        /// Root directory of the CMake project
        #[arg(long)]
        cmake_project_root: PathBuf,

        /// Store artifacts even when the preset supplies no artifact config
        /// (true/false/yes/no/1/0)
        #[arg(long, value_parser = parse_boolean)]
        default_store_artifact: Option<bool>,

        /// Default retention days for artifacts
        #[arg(long)]
        default_artifact_retention_days: u32,

        /// The preset to use
        #[arg(long)]
        preset: String,

        /// Artifact configuration as JSON
        /// (e.g. {"path": ["dir1", "!dir1/**/*.md"], "retention_days": 5})
        #[arg(long, default_value = "")]
        artifact: String,
    },
}

/// Boolean flag parser accepting the workflow's spellings.
fn parse_boolean(value: &str) -> Result<bool, String> {
    const POSITIVE: &[&str] = &["true", "1", "yes", "y", "on"];
    const NEGATIVE: &[&str] = &["false", "0", "no", "n", "off"];

    let lower = value.to_lowercase();
    if POSITIVE.contains(&lower.as_str()) {
        Ok(true)
    } else if NEGATIVE.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(format!(
            "'{value}' is not a valid boolean value; expected one of {POSITIVE:?} or {NEGATIVE:?}"
        ))
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber for diagnostics
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::GenerateAction => generate_action(),
        Commands::ValidatePresets { presets } => validate_presets(&presets),
        Commands::ConstructMatrix {
            default_runs_on,
            default_toolchain,
            presets,
        } => construct_matrix(&default_runs_on, &default_toolchain, &presets),
        Commands::GenerateSteps {
            cmake_project_root,
            default_store_artifact,
            default_artifact_retention_days,
            preset,
            artifact,
        } => generate_steps(
            &cmake_project_root,
            preset,
            default_store_artifact.unwrap_or(false),
            default_artifact_retention_days,
            &artifact,
        ),
    }
}

fn generate_action() -> i32 {
    let selectors = Selectors::from_env();

    match action_assembler::assemble(Path::new("."), &selectors) {
        Ok(Some(path)) => {
            tracing::info!("Wrote '{}'", path.display());
            return_code::SUCCESS
        }
        // Nothing to delegate is a clean outcome, not an error.
        Ok(None) => return_code::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return_code::TERMINATED_ERROR
        }
    }
}

fn validate_presets(presets: &str) -> i32 {
    match preset_config::parse_presets(presets) {
        Ok(_) => {
            println!("Presets validation successful");
            return_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return_code::TERMINATED_ERROR
        }
    }
}

fn construct_matrix(default_runs_on: &str, default_toolchain: &str, presets: &str) -> i32 {
    let result = preset_config::parse_presets(presets)
        .map_err(anyhow::Error::from)
        .and_then(|map| {
            let matrix = matrix_builder::construct_matrix(&map, default_runs_on, default_toolchain)?;
            matrix_builder::render_output(&matrix)
        });

    match result {
        Ok(line) => {
            println!("{line}");
            return_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return_code::TERMINATED_ERROR
        }
    }
}

fn generate_steps(
    project_root: &Path,
    preset: String,
    default_store_artifact: bool,
    default_retention_days: u32,
    artifact: &str,
) -> i32 {
    let result = ArtifactConfig::parse(artifact)
        .map_err(anyhow::Error::from)
        .and_then(|artifact| {
            let options = StepsOptions {
                preset,
                default_store_artifact,
                default_retention_days,
                artifact,
                workspace: env::var(variables::GITHUB_WORKSPACE).ok().map(PathBuf::from),
            };
            steps_generator::generate_steps(project_root, &options)
        });

    match result {
        Ok(output) => {
            for line in steps_generator::render_output_lines(&output) {
                println!("{line}");
            }
            return_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            return_code::TERMINATED_ERROR
        }
    }
}
