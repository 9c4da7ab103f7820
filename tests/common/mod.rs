//! Shared fixture for pipeline and CLI integration tests.
//!
//! Builds a miniature installer project in a temp directory: shell
//! commands, installation modes, system configuration, a license and the
//! bootstrap install script, all carrying the pre-release text the
//! pipeline is expected to rewrite.

#![allow(dead_code)] // not every test binary uses every helper

use release_packager::manifest::ProjectDescriptor;
use release_packager::packager::{Packager, Settings, SettingsBuilder};
use std::path::{Path, PathBuf};

pub const NAME: &str = "acme";
pub const VERSION: &str = "2.3.0";

pub struct ProjectFixture {
    dir: tempfile::TempDir,
}

impl ProjectFixture {
    /// Full fixture: every source the default file sets expect.
    pub fn new() -> Self {
        let fixture = Self::empty();
        let root = fixture.path().to_path_buf();

        write_file(
            &root.join("package.json"),
            &format!(r#"{{"name": "{NAME}", "version": "{VERSION}", "private": true}}"#),
        );
        write_executable(
            &root.join("commands/command.sh"),
            "#!/bin/bash\n\
             # Copyright (c) 2014-2021 Yu\n\
             echo \"installer MASTER\"\n\
             curl -L https://github.com/acme/acme-installer/archive/refs/heads/master.zip\n\
             cd acme-installer-master\n",
        );
        write_file(
            &root.join("commands/.env.sample"),
            "ACME_ENV=production\n",
        );
        write_file(
            &root.join("installation-modes/letsencrypt/prepare.sh"),
            "#!/bin/bash\necho letsencrypt\n",
        );
        write_file(
            &root.join("system-configuration/nginx/acme.conf"),
            "server { listen 80; }\n",
        );
        write_file(
            &root.join("LICENSE"),
            "Copyright (c) 2014-2021 Yu\nAll rights reserved.\n",
        );
        write_executable(
            &root.join("install.sh"),
            "#!/bin/bash\n\
             # Copyright (c) 2014-2021 Yu\n\
             echo \"Running installer MASTER\"\n\
             wget https://github.com/acme/acme-installer/archive/refs/heads/master.zip\n\
             unzip -o master.zip -d acme-installer-master\n",
        );

        fixture
    }

    /// Bare temp directory with no sources at all.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_root(&self) -> PathBuf {
        self.path().join("build")
    }

    pub fn release_dir(&self) -> PathBuf {
        self.build_root().join(format!("installer-{VERSION}"))
    }

    pub fn package_dir(&self) -> PathBuf {
        self.release_dir().join(format!("{NAME}-{VERSION}"))
    }

    pub fn archive_path(&self) -> PathBuf {
        self.release_dir().join(format!("{NAME}-{VERSION}.zip"))
    }

    pub fn settings(&self) -> Settings {
        SettingsBuilder::new()
            .descriptor(ProjectDescriptor::new(NAME, VERSION))
            .project_dir(self.path())
            .build()
            .expect("build fixture settings")
    }

    pub fn packager(&self) -> Packager {
        Packager::new(self.settings())
    }

    /// Directories under the build root matching the release pattern.
    pub fn release_outputs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = std::fs::read_dir(self.build_root())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| {
                        p.is_dir()
                            && p.file_name()
                                .and_then(|n| n.to_str())
                                .is_some_and(|n| n.starts_with("installer-"))
                    })
                    .collect()
            })
            .unwrap_or_default();
        dirs.sort();
        dirs
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture directory");
    }
    std::fs::write(path, contents).expect("write fixture file");
}

pub fn write_executable(path: &Path, contents: &str) {
    write_file(path, contents);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("set fixture mode");
    }
}
