use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

pub(crate) fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut cmd = clipboard_cmd();
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run {program}"))?;
    {
        let stdin = child
            .stdin
            .as_mut()
            .context("clipboard command has no stdin")?;
        stdin
            .write_all(data)
            .with_context(|| format!("failed to write to {program}"))?;
    }
    // Close stdin so the command sees EOF.
    drop(child.stdin.take());
    let status = child.wait().with_context(|| format!("failed to wait on {program}"))?;
    if !status.success() {
        anyhow::bail!("{program} exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
