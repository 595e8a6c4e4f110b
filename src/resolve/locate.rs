//! Finding the interpreter the OS search path resolves to.

use std::path::{Path, PathBuf};

use crate::exec::CommandRunner;
use crate::layout::Layout;
use crate::paths;

/// Path fragments of app-virtualization stubs and version-manager shims.
/// Neither points into a real installation.
const SHIM_MARKERS: &[&str] = &["windowsapps", "shims"];

/// Ask the OS where the interpreter resolves to.
///
/// Returns the first real interpreter path, or `None` if the locate command
/// fails or lists nothing usable.
pub fn locate_interpreter(runner: &dyn CommandRunner, layout: &Layout) -> Option<PathBuf> {
    let stem = layout.interpreter_stem();
    let mut args: Vec<&str> = layout.locate_args.to_vec();
    args.push(stem);

    let output = match runner.run(layout.locate_program, &args) {
        Ok(output) if output.success => output,
        Ok(_) => {
            tracing::debug!("{} found no {}", layout.locate_program, stem);
            return None;
        }
        Err(e) => {
            tracing::debug!("{} failed: {}", layout.locate_program, e);
            return None;
        }
    };

    parse_locate_output(&output.stdout, layout)
}

/// First line of locate output naming a real interpreter.
pub fn parse_locate_output(output: &str, layout: &Layout) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_shim(line))
        .find(|line| {
            paths::last_segment(line).is_some_and(|name| {
                name.eq_ignore_ascii_case(layout.interpreter)
                    || name.eq_ignore_ascii_case(layout.interpreter_stem())
            })
        })
        .map(PathBuf::from)
}

/// Installation root of an interpreter binary: two levels up.
///
/// Symlinks are followed first where the OS uses them to select a default
/// (`/usr/bin/java` through `/etc/alternatives`).
pub fn installation_root(interpreter: &Path) -> Option<PathBuf> {
    let resolved = if cfg!(unix) {
        std::fs::canonicalize(interpreter).unwrap_or_else(|_| interpreter.to_path_buf())
    } else {
        interpreter.to_path_buf()
    };
    resolved.parent()?.parent().map(paths::normalize)
}

fn is_shim(line: &str) -> bool {
    let lowered = line.to_lowercase();
    SHIM_MARKERS.iter().any(|m| lowered.contains(m))
}
