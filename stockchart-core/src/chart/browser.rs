//! Launch the platform's default browser on a local file.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Spawn the system opener for `path` and return without waiting for it.
pub fn open_in_browser(path: &Path) -> io::Result<()> {
    let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    opener_command(&target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_child| ())
}

#[cfg(target_os = "macos")]
fn opener_command(target: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(target: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    // Empty title argument so `start` does not treat a quoted path as one.
    cmd.args(["/C", "start", ""]).arg(target);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(target: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}
