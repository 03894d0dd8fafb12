// Constants shared across the CI generator tools.

// ---------------------------------------------------------------------------
// Path constants
// ---------------------------------------------------------------------------

pub mod path {
    /// Root of the per-platform sub-action tree, relative to the checkout.
    pub const ACTIONS_ROOT_DIRECTORY: &str = "./.github/actions/cmake-builder";

    /// Sub-directory holding the platform base setup action.
    pub const BASE_DIRECTORY: &str = "base";

    /// Sub-directory holding per-toolchain setup actions.
    pub const TOOLCHAINS_DIRECTORY: &str = "toolchains";

    /// Sub-directory holding per-preset setup actions.
    pub const PRESETS_DIRECTORY: &str = "presets";

    /// Directory the generated composite action is written into.
    pub const GENERATED_ACTION_DIRECTORY: &str = "./.select-setup-actions";

    pub const ACTION_MANIFEST_YML_FILE: &str = "action.yml";
    pub const ACTION_MANIFEST_YAML_FILE: &str = "action.yaml";

    pub const CMAKE_PRESETS_FILE: &str = "CMakePresets.json";
}

// ---------------------------------------------------------------------------
// Environment variables
// ---------------------------------------------------------------------------

pub mod variables {
    /// Platform selector, e.g. `linux` or `windows`.
    pub const RUNS_ON: &str = "RUNS_ON";

    /// Toolchain selector, e.g. `gcc` or `msvc`.
    pub const TOOLCHAIN: &str = "TOOLCHAIN";

    /// Preset selector, e.g. `debug` or `release`.
    pub const PRESET: &str = "PRESET";

    /// Checkout root set by the Actions runner.
    pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";
}

// ---------------------------------------------------------------------------
// ReturnCode
// ---------------------------------------------------------------------------

/// Process return / exit codes.
pub mod return_code {
    pub const SUCCESS: i32 = 0;
    pub const TERMINATED_ERROR: i32 = 1;
}

// ---------------------------------------------------------------------------
// Secret slots
// ---------------------------------------------------------------------------

/// Names of the generic secret-slot inputs declared by the generated action
/// and forwarded to every delegated step. The generator has no knowledge of
/// what each slot semantically holds.
pub const SECRET_SLOTS: &[&str] = &["secret1", "secret2", "secret3", "secret4"];
