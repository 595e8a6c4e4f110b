//! Host-specific names and conventions for JDK installations.

use std::path::{Path, PathBuf};

/// File and command names that differ between Windows and Unix hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Interpreter executable inside `bin/`.
    pub interpreter: &'static str,
    /// Compiler executable inside `bin/`.
    pub compiler: &'static str,
    /// Metadata file at the installation root.
    pub metadata_file: &'static str,
    /// Version key inside the metadata file.
    pub version_key: &'static str,
    /// Program used to ask the OS where the interpreter resolves to.
    pub locate_program: &'static str,
    /// Arguments passed to `locate_program` before the interpreter name.
    pub locate_args: &'static [&'static str],
    /// Separator between search-path entries.
    pub path_separator: char,
}

impl Layout {
    /// Windows conventions.
    pub const WINDOWS: Layout = Layout {
        interpreter: "java.exe",
        compiler: "javac.exe",
        metadata_file: "release",
        version_key: "JAVA_VERSION",
        locate_program: "where",
        locate_args: &[],
        path_separator: ';',
    };

    /// Linux and macOS conventions.
    pub const UNIX: Layout = Layout {
        interpreter: "java",
        compiler: "javac",
        metadata_file: "release",
        version_key: "JAVA_VERSION",
        locate_program: "which",
        locate_args: &["-a"],
        path_separator: ':',
    };

    /// Conventions of the host this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::UNIX
        }
    }

    /// Interpreter name without any executable extension.
    pub fn interpreter_stem(&self) -> &'static str {
        self.interpreter
            .strip_suffix(".exe")
            .unwrap_or(self.interpreter)
    }

    /// `bin/` directory of an installation.
    pub fn bin_dir(&self, install: &Path) -> PathBuf {
        install.join("bin")
    }

    /// Path to the interpreter of an installation.
    pub fn interpreter_path(&self, install: &Path) -> PathBuf {
        self.bin_dir(install).join(self.interpreter)
    }

    /// Path to the compiler of an installation.
    pub fn compiler_path(&self, install: &Path) -> PathBuf {
        self.bin_dir(install).join(self.compiler)
    }

    /// Path to the metadata file of an installation.
    pub fn metadata_path(&self, install: &Path) -> PathBuf {
        install.join(self.metadata_file)
    }

    /// Whether both required executables exist under `install/bin`.
    pub fn has_executables(&self, install: &Path) -> bool {
        self.interpreter_path(install).is_file() && self.compiler_path(install).is_file()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::host()
    }
}
