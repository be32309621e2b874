//! Printer installation and default-printer selection.
//!
//! Windows offers several ways to connect a shared printer and make it the
//! default. Which ones work depends on the OS build (`wmic` is gone from
//! recent Windows 11 images), so [`WindowsInstaller`] tries each available
//! mechanism in turn and stops at the first success.

mod mechanism;

pub use mechanism::{wql_escape, Mechanism};

use crate::error::{InstallError, InstallResult};
use crate::types::SharedPrinter;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Connects a discovered printer to this machine.
#[async_trait]
pub trait PrinterInstaller: Send + Sync {
    /// Add the printer connection.
    async fn install(&self, printer: &SharedPrinter) -> InstallResult<()>;

    /// Make the printer the default.
    async fn set_default(&self, printer: &SharedPrinter) -> InstallResult<()>;
}

/// Runs one external command to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`; `Err` carries a readable failure reason.
    async fn run(&self, program: &str, args: &[String]) -> Result<(), String>;
}

/// Runs commands with `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<(), String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(format!("{} ({})", output.status, detail))
    }
}

/// Windows installer trying print UI, WMI and PowerShell in order.
pub struct WindowsInstaller<R = SystemRunner> {
    mechanisms: Vec<Mechanism>,
    runner: R,
}

impl WindowsInstaller<SystemRunner> {
    /// Pick mechanisms based on what this Windows installation ships.
    pub fn detect() -> Self {
        let wmic_available = wmic_path().is_some_and(|p| p.exists());
        if !wmic_available {
            warn!("wmic.exe not found; falling back to print UI and PowerShell");
        }
        Self::new(Mechanism::available(wmic_available), SystemRunner)
    }
}

impl<R: CommandRunner> WindowsInstaller<R> {
    /// Create an installer over explicit mechanisms and runner.
    pub fn new(mechanisms: Vec<Mechanism>, runner: R) -> Self {
        Self { mechanisms, runner }
    }

    async fn first_success<F>(
        &self,
        action: &'static str,
        printer: &SharedPrinter,
        command_for: F,
    ) -> InstallResult<()>
    where
        F: Fn(Mechanism, &SharedPrinter) -> Option<(&'static str, Vec<String>)>,
    {
        let mut failures = Vec::new();

        for &mechanism in &self.mechanisms {
            let Some((program, args)) = command_for(mechanism, printer) else {
                continue;
            };
            debug!(%mechanism, program, ?args, "trying to {}", action);

            match self.runner.run(program, &args).await {
                Ok(()) => {
                    info!(%mechanism, path = %printer, "{} succeeded", action);
                    return Ok(());
                }
                Err(reason) => {
                    warn!(%mechanism, %reason, "{} failed", action);
                    failures.push(
                        InstallError::CommandFailed {
                            mechanism: mechanism.name(),
                            reason,
                        }
                        .to_string(),
                    );
                }
            }
        }

        Err(InstallError::AllMechanismsFailed {
            action,
            path: printer.unc_path(),
            failures,
        })
    }
}

#[async_trait]
impl<R: CommandRunner> PrinterInstaller for WindowsInstaller<R> {
    async fn install(&self, printer: &SharedPrinter) -> InstallResult<()> {
        self.first_success("install", printer, Mechanism::install_command)
            .await
    }

    async fn set_default(&self, printer: &SharedPrinter) -> InstallResult<()> {
        self.first_success("set default", printer, Mechanism::set_default_command)
            .await
    }
}

/// Installer for platforms without a supported mechanism.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedInstaller;

#[async_trait]
impl PrinterInstaller for UnsupportedInstaller {
    async fn install(&self, _printer: &SharedPrinter) -> InstallResult<()> {
        Err(InstallError::UnsupportedPlatform(std::env::consts::OS))
    }

    async fn set_default(&self, _printer: &SharedPrinter) -> InstallResult<()> {
        Err(InstallError::UnsupportedPlatform(std::env::consts::OS))
    }
}

/// The installer for the current platform.
pub fn platform_installer() -> Box<dyn PrinterInstaller> {
    if cfg!(windows) {
        Box::new(WindowsInstaller::detect())
    } else {
        Box::new(UnsupportedInstaller)
    }
}

fn wmic_path() -> Option<PathBuf> {
    let root = std::env::var_os("SystemRoot")?;
    Some(
        PathBuf::from(root)
            .join("System32")
            .join("wbem")
            .join("wmic.exe"),
    )
}

/// Whether the process runs with elevated privileges.
///
/// Unix checks the effective user id. Windows asks `net session`, which only
/// succeeds from an elevated shell.
pub async fn is_privileged() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(windows)]
    {
        holds_admin_session(&SystemRunner).await
    }
    #[cfg(not(any(unix, windows)))]
    {
        true
    }
}

/// Run `net session` through `runner`; success means an elevated token.
pub async fn holds_admin_session<R>(runner: &R) -> bool
where
    R: CommandRunner + ?Sized,
{
    match runner.run("net", &["session".to_string()]).await {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "net session refused");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Records every call; fails programs listed in `failing`.
    #[derive(Default)]
    struct ScriptedRunner {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, _args: &[String]) -> Result<(), String> {
            self.calls.lock().unwrap().push(program.to_string());
            if self.failing.contains(&program) {
                Err("exit code: 1".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn printer() -> SharedPrinter {
        SharedPrinter::new(Ipv4Addr::new(192, 168, 0, 102), "LaserJet")
    }

    #[tokio::test]
    async fn test_first_mechanism_wins() {
        let installer = WindowsInstaller::new(
            Mechanism::available(true),
            ScriptedRunner::default(),
        );
        assert_ok!(installer.set_default(&printer()).await);
        assert_eq!(*installer.runner.calls.lock().unwrap(), vec!["rundll32"]);
    }

    #[tokio::test]
    async fn test_falls_back_in_order() {
        let runner = ScriptedRunner {
            failing: vec!["rundll32", "wmic"],
            ..ScriptedRunner::default()
        };
        let installer = WindowsInstaller::new(Mechanism::available(true), runner);
        assert_ok!(installer.set_default(&printer()).await);
        assert_eq!(
            *installer.runner.calls.lock().unwrap(),
            vec!["rundll32", "wmic", "powershell"]
        );
    }

    #[tokio::test]
    async fn test_install_skips_wmic() {
        let runner = ScriptedRunner {
            failing: vec!["rundll32"],
            ..ScriptedRunner::default()
        };
        let installer = WindowsInstaller::new(Mechanism::available(true), runner);
        assert_ok!(installer.install(&printer()).await);
        assert_eq!(
            *installer.runner.calls.lock().unwrap(),
            vec!["rundll32", "powershell"]
        );
    }

    #[tokio::test]
    async fn test_all_mechanisms_fail() {
        let runner = ScriptedRunner {
            failing: vec!["rundll32", "powershell"],
            ..ScriptedRunner::default()
        };
        let installer = WindowsInstaller::new(Mechanism::available(false), runner);
        let err = assert_err!(installer.install(&printer()).await);
        match err {
            InstallError::AllMechanismsFailed { failures, path, .. } => {
                assert_eq!(failures.len(), 2);
                assert_eq!(path, r"\\192.168.0.102\LaserJet");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_admin_session_follows_exit_status() {
        let elevated = ScriptedRunner::default();
        assert!(holds_admin_session(&elevated).await);
        assert_eq!(*elevated.calls.lock().unwrap(), vec!["net"]);

        let limited = ScriptedRunner {
            failing: vec!["net"],
            ..ScriptedRunner::default()
        };
        assert!(!holds_admin_session(&limited).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unix_privilege_is_effective_uid() {
        let root = unsafe { libc::geteuid() == 0 };
        assert_eq!(is_privileged().await, root);
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let err = assert_err!(UnsupportedInstaller.install(&printer()).await);
        assert!(matches!(err, InstallError::UnsupportedPlatform(_)));
    }
}
