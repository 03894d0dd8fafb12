// Model of the project's CMakePresets.json, limited to what the step
// generator consumes: preset lookup, the relation between configure presets
// and their build/test/package presets, and binaryDir resolution.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use builder_common::constants;

/// An `inherits` entry, which CMake allows as a single name or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Inherits {
    One(String),
    Many(Vec<String>),
}

impl Inherits {
    pub fn names(&self) -> &[String] {
        match self {
            Inherits::One(name) => std::slice::from_ref(name),
            Inherits::Many(names) => names,
        }
    }
}

/// A configure preset. Fields the generator does not consume (generator,
/// cache variables, conditions) are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurePreset {
    pub name: String,

    #[serde(default)]
    pub inherits: Option<Inherits>,

    #[serde(default)]
    pub binary_dir: Option<String>,
}

/// A build, test, or package preset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentPreset {
    pub name: String,

    #[serde(default)]
    pub inherits: Option<Inherits>,

    #[serde(default)]
    pub configure_preset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CMakePresetsFile {
    configure_presets: Vec<ConfigurePreset>,
    build_presets: Vec<DependentPreset>,
    test_presets: Vec<DependentPreset>,
    package_presets: Vec<DependentPreset>,
}

/// Names of the build/test/package presets related to one configure preset,
/// in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedPresets {
    pub build: Vec<String>,
    pub test: Vec<String>,
    pub package: Vec<String>,
}

/// The parsed presets file together with the project root it came from.
#[derive(Debug, Clone)]
pub struct CMakePresets {
    project_root: PathBuf,
    file: CMakePresetsFile,
}

impl CMakePresets {
    /// Load `CMakePresets.json` from the project root.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(constants::path::CMAKE_PRESETS_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Self::from_json(project_root, &content)
    }

    /// Parse a presets document against the given project root.
    pub fn from_json(project_root: &Path, json: &str) -> Result<Self> {
        let file: CMakePresetsFile = serde_json::from_str(json).with_context(|| {
            format!(
                "Failed to parse {} under '{}'",
                constants::path::CMAKE_PRESETS_FILE,
                project_root.display()
            )
        })?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            file,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Look up a configure preset by name.
    pub fn configure_preset(&self, name: &str) -> Option<&ConfigurePreset> {
        self.file
            .configure_presets
            .iter()
            .find(|preset| preset.name == name)
    }

    /// Find the build/test/package presets tied to a configure preset,
    /// either through their own `configurePreset` field or through one
    /// reached via their `inherits` chain.
    pub fn related_presets(&self, configure_name: &str) -> RelatedPresets {
        RelatedPresets {
            build: related_in(&self.file.build_presets, configure_name),
            test: related_in(&self.file.test_presets, configure_name),
            package: related_in(&self.file.package_presets, configure_name),
        }
    }

    /// Resolve a configure preset's binary directory.
    ///
    /// Takes the preset's own `binaryDir`, or the nearest one along its
    /// `inherits` chain, defaulting to `build`; then expands the
    /// `${sourceDir}` and `${presetName}` macros against the project root
    /// and the preset being resolved. Unknown macros pass through untouched.
    pub fn resolve_binary_dir(&self, configure_name: &str) -> Result<PathBuf> {
        let preset = self.configure_preset(configure_name).with_context(|| {
            format!("Preset '{}' not found in the CMake project", configure_name)
        })?;

        let template = self
            .inherited_binary_dir(preset, &mut HashSet::new())
            .unwrap_or("build");

        let source_dir = self.project_root.to_string_lossy();
        let expanded = template
            .replace("${sourceDir}", source_dir.as_ref())
            .replace("${presetName}", configure_name);

        Ok(PathBuf::from(expanded))
    }

    /// Walk the `inherits` chain (depth-first, declaration order) for the
    /// first explicit `binaryDir`.
    fn inherited_binary_dir<'a>(
        &'a self,
        preset: &'a ConfigurePreset,
        visited: &mut HashSet<&'a str>,
    ) -> Option<&'a str> {
        if !visited.insert(&preset.name) {
            return None;
        }

        if let Some(dir) = preset.binary_dir.as_deref() {
            return Some(dir);
        }

        for parent_name in preset.inherits.iter().flat_map(Inherits::names) {
            if let Some(parent) = self.configure_preset(parent_name) {
                if let Some(dir) = self.inherited_binary_dir(parent, visited) {
                    return Some(dir);
                }
            }
        }

        None
    }
}

/// Collect the names of presets in `list` whose effective configure preset
/// is `configure_name`.
fn related_in(list: &[DependentPreset], configure_name: &str) -> Vec<String> {
    let by_name: HashMap<&str, &DependentPreset> = list
        .iter()
        .map(|preset| (preset.name.as_str(), preset))
        .collect();

    list.iter()
        .filter(|preset| {
            effective_configure_preset(preset, &by_name, &mut HashSet::new())
                == Some(configure_name)
        })
        .map(|preset| preset.name.clone())
        .collect()
}

/// A dependent preset's configure preset, following `inherits` when the
/// preset does not name one itself.
fn effective_configure_preset<'a>(
    preset: &'a DependentPreset,
    by_name: &HashMap<&str, &'a DependentPreset>,
    visited: &mut HashSet<&'a str>,
) -> Option<&'a str> {
    if !visited.insert(&preset.name) {
        return None;
    }

    if let Some(configure) = preset.configure_preset.as_deref() {
        return Some(configure);
    }

    for parent_name in preset.inherits.iter().flat_map(Inherits::names) {
        if let Some(parent) = by_name.get(parent_name.as_str()) {
            if let Some(configure) = effective_configure_preset(parent, by_name, visited) {
                return Some(configure);
            }
        }
    }

    None
}
