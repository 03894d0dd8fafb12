// Assembles the dynamic composite setup action.
//
// Probes the per-platform sub-action tree for an optional base, toolchain,
// and preset action and, when at least one exists, writes a composite action
// manifest that delegates to each of them in that order, forwarding the four
// generic secret-slot inputs.

use anyhow::Result;
use std::path::{Path, PathBuf};

use builder_common::constants::{self, SECRET_SLOTS};
use builder_common::{IOUtil, Selectors};

/// The kind of a candidate sub-action.
///
/// Declaration order is load-bearing: the generated composite runs base
/// first (it establishes environment prerequisites), then toolchain, then
/// preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Base,
    Toolchain,
    Preset,
}

impl CandidateKind {
    /// Upper-case label used in log output.
    pub fn label(&self) -> &'static str {
        match self {
            CandidateKind::Base => "BASE",
            CandidateKind::Toolchain => "TOOLCHAIN",
            CandidateKind::Preset => "PRESET",
        }
    }
}

/// One probed location that may hold a delegatable sub-action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCandidate {
    pub kind: CandidateKind,

    /// Path relative to the checkout, exactly as referenced from the
    /// generated manifest.
    pub path: String,
}

/// Derive the three candidate paths from the selectors, in execution order.
pub fn candidate_paths(selectors: &Selectors) -> [ActionCandidate; 3] {
    let platform_root = format!(
        "{}/{}",
        constants::path::ACTIONS_ROOT_DIRECTORY,
        selectors.runs_on
    );

    [
        ActionCandidate {
            kind: CandidateKind::Base,
            path: format!("{}/{}", platform_root, constants::path::BASE_DIRECTORY),
        },
        ActionCandidate {
            kind: CandidateKind::Toolchain,
            path: format!(
                "{}/{}/{}",
                platform_root,
                constants::path::TOOLCHAINS_DIRECTORY,
                selectors.toolchain
            ),
        },
        ActionCandidate {
            kind: CandidateKind::Preset,
            path: format!(
                "{}/{}/{}",
                platform_root,
                constants::path::PRESETS_DIRECTORY,
                selectors.preset
            ),
        },
    ]
}

/// Keep the candidates whose existence flag is set, preserving order.
pub fn plan_delegations(
    candidates: [ActionCandidate; 3],
    exists: [bool; 3],
) -> Vec<ActionCandidate> {
    candidates
        .into_iter()
        .zip(exists)
        .filter_map(|(candidate, found)| found.then_some(candidate))
        .collect()
}

/// Render the composite action manifest for the planned delegations.
///
/// The header declares the four secret-slot inputs; each delegation entry
/// forwards all of them unconditionally, so an unset slot and an empty slot
/// are indistinguishable downstream.
pub fn render_manifest(delegations: &[ActionCandidate]) -> String {
    let mut content = String::from(
        "name: Dynamic Setup Action\ndescription: Dynamically generated action\n\n# Input definitions for secrets\ninputs:\n",
    );

    for (index, slot) in SECRET_SLOTS.iter().enumerate() {
        content.push_str(&format!(
            "  {}:\n    description: \"Generic secret slot {}\"\n    required: false\n",
            slot,
            index + 1
        ));
    }

    content.push_str("\nruns:\n  using: composite\n  steps:\n");

    for delegation in delegations {
        content.push_str(&format!("    - uses: {}\n      with:\n", delegation.path));
        for slot in SECRET_SLOTS {
            content.push_str(&format!("        {slot}: ${{{{ inputs.{slot} }}}}\n"));
        }
    }

    content
}

/// Probe the candidates under `root` and, when at least one exists, write
/// the composite manifest to the generated-action directory.
///
/// Returns the path of the written manifest, or `None` when no candidate was
/// found. The "nothing found" outcome is a clean success, not an error; it
/// is the common case for many selector combinations.
pub fn assemble(root: &Path, selectors: &Selectors) -> Result<Option<PathBuf>> {
    let candidates = candidate_paths(selectors);

    let mut exists = [false; 3];
    for (flag, candidate) in exists.iter_mut().zip(&candidates) {
        *flag = IOUtil::contains_action_manifest(&root.join(&candidate.path));
    }

    if !exists.iter().any(|&found| found) {
        tracing::info!("No actions found, exiting gracefully");
        return Ok(None);
    }

    for (candidate, found) in candidates.iter().zip(exists) {
        if found {
            tracing::info!("Found {} action", candidate.kind.label());
        }
    }

    let delegations = plan_delegations(candidates, exists);
    let content = render_manifest(&delegations);

    let output_dir = root.join(constants::path::GENERATED_ACTION_DIRECTORY);
    IOUtil::ensure_directory(&output_dir)?;

    let output_file = output_dir.join(constants::path::ACTION_MANIFEST_YML_FILE);
    IOUtil::write_text(&output_file, &content)?;

    tracing::info!("Generated action file content:");
    tracing::info!("{}", content);

    Ok(Some(output_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create `<root>/<relative>/<file>` with a stub action manifest.
    fn write_action(root: &Path, relative: &str, file: &str) {
        let dir = root.join(relative);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), "name: stub\nruns:\n  using: composite\n  steps: []\n")
            .unwrap();
    }

    fn toolchain_path(runs_on: &str, toolchain: &str) -> String {
        format!(".github/actions/cmake-builder/{runs_on}/toolchains/{toolchain}")
    }

    #[test]
    fn candidate_paths_are_in_execution_order() {
        let selectors = Selectors::new("linux", "gcc", "release");
        let candidates = candidate_paths(&selectors);

        assert_eq!(candidates[0].kind, CandidateKind::Base);
        assert_eq!(
            candidates[0].path,
            "./.github/actions/cmake-builder/linux/base"
        );
        assert_eq!(candidates[1].kind, CandidateKind::Toolchain);
        assert_eq!(
            candidates[1].path,
            "./.github/actions/cmake-builder/linux/toolchains/gcc"
        );
        assert_eq!(candidates[2].kind, CandidateKind::Preset);
        assert_eq!(
            candidates[2].path,
            "./.github/actions/cmake-builder/linux/presets/release"
        );
    }

    #[test]
    fn plan_keeps_only_existing_candidates_in_order() {
        let candidates = candidate_paths(&Selectors::new("linux", "gcc", "release"));
        let planned = plan_delegations(candidates.clone(), [true, false, true]);

        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].kind, CandidateKind::Base);
        assert_eq!(planned[1].kind, CandidateKind::Preset);

        assert!(plan_delegations(candidates, [false, false, false]).is_empty());
    }

    #[test]
    fn nothing_found_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let selectors = Selectors::new("windows", "msvc", "debug");

        let written = assemble(dir.path(), &selectors).unwrap();

        assert!(written.is_none());
        assert!(!dir.path().join(".select-setup-actions").exists());
    }

    #[test]
    fn single_candidate_produces_single_delegation() {
        let dir = tempfile::tempdir().unwrap();
        write_action(dir.path(), &toolchain_path("linux", "gcc"), "action.yml");

        let written = assemble(dir.path(), &Selectors::new("linux", "gcc", "release"))
            .unwrap()
            .unwrap();
        let content = fs::read_to_string(&written).unwrap();

        assert_eq!(content.matches("- uses:").count(), 1);
        assert!(content.contains("- uses: ./.github/actions/cmake-builder/linux/toolchains/gcc"));
        for slot in SECRET_SLOTS {
            assert!(content.contains(&format!("{slot}: ${{{{ inputs.{slot} }}}}")));
        }
    }

    #[test]
    fn yaml_extension_alone_counts_as_existing() {
        let dir = tempfile::tempdir().unwrap();
        write_action(dir.path(), &toolchain_path("linux", "clang"), "action.yaml");

        let written = assemble(dir.path(), &Selectors::new("linux", "clang", "debug")).unwrap();

        assert!(written.is_some());
    }

    #[test]
    fn delegations_keep_fixed_order_when_all_exist() {
        let dir = tempfile::tempdir().unwrap();
        write_action(
            dir.path(),
            ".github/actions/cmake-builder/linux/base",
            "action.yml",
        );
        write_action(dir.path(), &toolchain_path("linux", "gcc"), "action.yml");
        write_action(
            dir.path(),
            ".github/actions/cmake-builder/linux/presets/release",
            "action.yaml",
        );

        let written = assemble(dir.path(), &Selectors::new("linux", "gcc", "release"))
            .unwrap()
            .unwrap();
        let content = fs::read_to_string(&written).unwrap();

        let base = content.find("linux/base").unwrap();
        let toolchain = content.find("toolchains/gcc").unwrap();
        let preset = content.find("presets/release").unwrap();
        assert!(base < toolchain);
        assert!(toolchain < preset);
        assert_eq!(content.matches("- uses:").count(), 3);
    }

    #[test]
    fn rerun_overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_action(
            dir.path(),
            ".github/actions/cmake-builder/windows/base",
            "action.yml",
        );
        write_action(dir.path(), &toolchain_path("linux", "gcc"), "action.yml");

        let first = assemble(dir.path(), &Selectors::new("windows", "msvc", "debug"))
            .unwrap()
            .unwrap();
        assert!(fs::read_to_string(&first).unwrap().contains("windows/base"));

        let second = assemble(dir.path(), &Selectors::new("linux", "gcc", "release"))
            .unwrap()
            .unwrap();
        let content = fs::read_to_string(&second).unwrap();

        assert_eq!(first, second);
        assert!(!content.contains("windows"));
        assert_eq!(content.matches("- uses:").count(), 1);
    }

    #[test]
    fn rendered_manifest_is_valid_composite_yaml() {
        let candidates = candidate_paths(&Selectors::new("linux", "gcc", "release"));
        let content = render_manifest(&plan_delegations(candidates, [true, true, true]));

        let yaml: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
        assert_eq!(
            yaml.get("name").and_then(|v| v.as_str()),
            Some("Dynamic Setup Action")
        );

        let inputs = yaml.get("inputs").and_then(|v| v.as_mapping()).unwrap();
        assert_eq!(inputs.len(), 4);
        for slot in SECRET_SLOTS {
            let input = inputs.get(*slot).unwrap();
            assert_eq!(
                input.get("required").and_then(|v| v.as_bool()),
                Some(false)
            );
        }

        let runs = yaml.get("runs").unwrap();
        assert_eq!(
            runs.get("using").and_then(|v| v.as_str()),
            Some("composite")
        );
        let steps = runs.get("steps").and_then(|v| v.as_sequence()).unwrap();
        assert_eq!(steps.len(), 3);
        for step in steps {
            let with = step.get("with").and_then(|v| v.as_mapping()).unwrap();
            assert_eq!(with.len(), 4);
        }
    }
}
