//! Best-effort notification that persisted environment state changed.

use std::sync::Arc;

use crate::error::{JdkSwitchError, Result};
use crate::exec::{command_line, CommandRunner};

/// Tells running programs that environment variables changed.
pub trait Broadcaster: Send + Sync {
    /// Send the notification. Callers log failures and carry on.
    fn broadcast(&self) -> Result<()>;
}

/// Broadcasts `WM_SETTINGCHANGE` with `"Environment"` to every top-level
/// window through PowerShell.
#[derive(Clone)]
pub struct PowerShellBroadcaster {
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for PowerShellBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerShellBroadcaster").finish_non_exhaustive()
    }
}

const BROADCAST_SCRIPT: &str = concat!(
    "Add-Type -Namespace Win32 -Name NativeMethods -MemberDefinition '",
    "[DllImport(\"user32.dll\", SetLastError = true, CharSet = CharSet.Auto)] ",
    "public static extern IntPtr SendMessageTimeout(IntPtr hWnd, uint Msg, UIntPtr wParam, ",
    "string lParam, uint fuFlags, uint uTimeout, out UIntPtr lpdwResult);'; ",
    "$result = [UIntPtr]::Zero; ",
    "[Win32.NativeMethods]::SendMessageTimeout([IntPtr]0xFFFF, 0x1A, [UIntPtr]::Zero, ",
    "'Environment', 2, 5000, [ref]$result) | Out-Null"
);

impl PowerShellBroadcaster {
    /// Create a broadcaster that runs PowerShell through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Broadcaster for PowerShellBroadcaster {
    fn broadcast(&self) -> Result<()> {
        let args = ["-NoProfile", "-NonInteractive", "-Command", BROADCAST_SCRIPT];
        let output = self.runner.run("powershell", &args)?;
        if output.success {
            Ok(())
        } else {
            Err(JdkSwitchError::CommandFailed {
                command: command_line("powershell", &args[..3]),
                code: output.exit_code,
            })
        }
    }
}

/// Does nothing. Used where new shells pick up changes on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl Broadcaster for NoopBroadcaster {
    fn broadcast(&self) -> Result<()> {
        Ok(())
    }
}
