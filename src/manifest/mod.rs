//! Project descriptor loading from an external manifest.
//!
//! The pipeline itself never decides what it is packaging; the name and
//! version come from a manifest supplied by the project being packaged.
//! Two formats are accepted: a JSON manifest with top-level `name` and
//! `version` fields (`package.json` style) and a TOML manifest carrying
//! them in a `[package]` table. The file is read and parsed exactly once.

use crate::error::{PackagerError, Result};
use serde::Deserialize;
use std::path::Path;

/// The externally supplied `{name, version}` pair driving all versioned
/// naming. Immutable for the duration of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescriptor {
    /// Project name (a single path component, e.g. "espocrm")
    pub name: String,
    /// Semantic version string (e.g. "2.3.0")
    pub version: String,
}

impl ProjectDescriptor {
    /// Creates a descriptor directly, bypassing manifest loading.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, version: V) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The versioned package folder name: `<name>-<version>`.
    ///
    /// Used both for the release subfolder and for the archive's internal
    /// root entry, which must match byte-for-byte.
    pub fn package_dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// The release output directory name: `installer-<version>`.
    pub fn release_dir_name(&self) -> String {
        format!("installer-{}", self.version)
    }

    /// The archive artifact file name: `<name>-<version>.zip`.
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.package_dir_name())
    }

    /// Checks that the descriptor can safely drive path naming.
    ///
    /// The name must be a plain, non-empty path component and the version
    /// must parse as a semantic version.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("'name' must not be empty".to_string());
        }
        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(format!("'name' is not a safe path component: {:?}", self.name));
        }
        if let Err(e) = semver::Version::parse(&self.version) {
            return Err(format!("'version' is not a semantic version: {}", e));
        }
        Ok(())
    }
}

/// Partial view of a JSON manifest; everything else in the file is the
/// project's business.
#[derive(Deserialize)]
struct RawJsonManifest {
    name: Option<String>,
    version: Option<String>,
}

/// Loads and validates the project descriptor from `path`.
///
/// Dispatches on the file extension: `.toml` manifests are read through
/// their `[package]` table, anything else is treated as JSON.
///
/// # Errors
///
/// Fails if the manifest cannot be read, does not parse, or carries a
/// missing/unsafe name or version.
pub fn load(path: &Path) -> Result<ProjectDescriptor> {
    let contents = std::fs::read_to_string(path).map_err(|source| PackagerError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let descriptor = if is_toml {
        parse_toml(path, &contents)?
    } else {
        parse_json(path, &contents)?
    };

    descriptor
        .validate()
        .map_err(|reason| PackagerError::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        })?;

    log::debug!(
        "loaded descriptor {} v{} from {}",
        descriptor.name,
        descriptor.version,
        path.display()
    );
    Ok(descriptor)
}

fn parse_json(path: &Path, contents: &str) -> Result<ProjectDescriptor> {
    let raw: RawJsonManifest = serde_json::from_str(contents)?;

    let name = raw.name.ok_or_else(|| missing(path, "name"))?;
    let version = raw.version.ok_or_else(|| missing(path, "version"))?;
    Ok(ProjectDescriptor { name, version })
}

fn parse_toml(path: &Path, contents: &str) -> Result<ProjectDescriptor> {
    let value: toml::Value = toml::from_str(contents)?;

    let package = value
        .get("package")
        .ok_or_else(|| missing(path, "[package]"))?;
    let name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing(path, "package.name"))?;
    let version = package
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing(path, "package.version"))?;

    Ok(ProjectDescriptor::new(name, version))
}

fn missing(path: &Path, field: &str) -> PackagerError {
    PackagerError::InvalidManifest {
        path: path.to_path_buf(),
        reason: format!("missing {}", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_a_json_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "package.json",
            r#"{"name": "acme", "version": "2.3.0", "private": true}"#,
        );

        let descriptor = load(&path).unwrap();
        assert_eq!(descriptor.name, "acme");
        assert_eq!(descriptor.version, "2.3.0");
        assert_eq!(descriptor.package_dir_name(), "acme-2.3.0");
        assert_eq!(descriptor.release_dir_name(), "installer-2.3.0");
        assert_eq!(descriptor.archive_file_name(), "acme-2.3.0.zip");
    }

    #[test]
    fn loads_a_toml_manifest_through_its_package_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "Project.toml",
            "[package]\nname = \"acme\"\nversion = \"2.3.0\"\n",
        );

        let descriptor = load(&path).unwrap();
        assert_eq!(descriptor.name, "acme");
        assert_eq!(descriptor.version, "2.3.0");
    }

    #[test]
    fn missing_version_is_an_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "package.json", r#"{"name": "acme"}"#);

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn non_semver_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "package.json",
            r#"{"name": "acme", "version": "latest"}"#,
        );

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("semantic version"));
    }

    #[test]
    fn path_separators_in_the_name_are_rejected() {
        let descriptor = ProjectDescriptor::new("../evil", "1.0.0");
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn missing_manifest_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }
}
