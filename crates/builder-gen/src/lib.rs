// builder-gen: CI generation tools for the CMake builder workflow.
// Each module backs one subcommand of the `builder-gen` binary; all of them
// are single-shot build-time utilities with no state across invocations.

pub mod action_assembler;
pub mod cmake_presets;
pub mod matrix_builder;
pub mod preset_config;
pub mod steps_generator;

// Re-export commonly used items at crate root
pub use action_assembler::{assemble, ActionCandidate, CandidateKind};
pub use cmake_presets::{CMakePresets, RelatedPresets};
pub use matrix_builder::{construct_matrix, Matrix, MatrixEntry};
pub use preset_config::{parse_presets, ArtifactConfig, PresetDefinition, PresetError, PresetMap};
pub use steps_generator::{generate_steps, StepCommands, StepsOptions, StepsOutput};
