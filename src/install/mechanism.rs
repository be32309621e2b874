//! Command lines for each Windows printer mechanism.

use crate::types::SharedPrinter;
use std::fmt;

/// A way of driving the Windows print subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// `rundll32 printui.dll,PrintUIEntry`, present on every release.
    PrintUi,
    /// `wmic printer ... call setdefaultprinter`; default only.
    Wmic,
    /// PrintManagement / CIM cmdlets.
    PowerShell,
}

impl Mechanism {
    /// Mechanisms in the order they should be tried.
    pub fn available(wmic: bool) -> Vec<Self> {
        let mut mechanisms = vec![Self::PrintUi];
        if wmic {
            mechanisms.push(Self::Wmic);
        }
        mechanisms.push(Self::PowerShell);
        mechanisms
    }

    /// Short name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::PrintUi => "printui",
            Self::Wmic => "wmic",
            Self::PowerShell => "powershell",
        }
    }

    /// Program and arguments that add the printer connection.
    pub fn install_command(self, printer: &SharedPrinter) -> Option<(&'static str, Vec<String>)> {
        let path = printer.unc_path();
        match self {
            Self::PrintUi => Some((
                "rundll32",
                vec![
                    "printui.dll,PrintUIEntry".to_string(),
                    "/in".to_string(),
                    "/q".to_string(),
                    "/n".to_string(),
                    path,
                ],
            )),
            Self::Wmic => None,
            Self::PowerShell => Some((
                "powershell",
                powershell_args(format!("Add-Printer -ConnectionName '{}'", ps_escape(&path))),
            )),
        }
    }

    /// Program and arguments that make the printer the default.
    pub fn set_default_command(
        self,
        printer: &SharedPrinter,
    ) -> Option<(&'static str, Vec<String>)> {
        let path = printer.unc_path();
        match self {
            Self::PrintUi => Some((
                "rundll32",
                vec![
                    "printui.dll,PrintUIEntry".to_string(),
                    "/y".to_string(),
                    "/q".to_string(),
                    "/n".to_string(),
                    path,
                ],
            )),
            Self::Wmic => Some((
                "wmic",
                vec![
                    "printer".to_string(),
                    "where".to_string(),
                    format!("Name='{}'", wql_escape(&path)),
                    "call".to_string(),
                    "setdefaultprinter".to_string(),
                ],
            )),
            Self::PowerShell => Some((
                "powershell",
                powershell_args(format!(
                    "$p = Get-CimInstance -ClassName Win32_Printer -Filter \"Name='{}'\"; \
                     if (-not $p) {{ exit 1 }}; \
                     Invoke-CimMethod -InputObject $p -MethodName SetDefaultPrinter | Out-Null",
                    ps_dq_escape(&wql_escape(&path))
                )),
            )),
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Escape a value for a single-quoted WQL string literal.
pub fn wql_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape for a PowerShell single-quoted string.
fn ps_escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape for a PowerShell double-quoted string.
fn ps_dq_escape(value: &str) -> String {
    value
        .replace('`', "``")
        .replace('$', "`$")
        .replace('"', "`\"")
}

fn powershell_args(script: String) -> Vec<String> {
    vec![
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        script,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn printer(share: &str) -> SharedPrinter {
        SharedPrinter::new(Ipv4Addr::new(192, 168, 0, 102), share)
    }

    #[test]
    fn test_available_order() {
        assert_eq!(
            Mechanism::available(true),
            vec![Mechanism::PrintUi, Mechanism::Wmic, Mechanism::PowerShell]
        );
        assert_eq!(
            Mechanism::available(false),
            vec![Mechanism::PrintUi, Mechanism::PowerShell]
        );
    }

    #[test]
    fn test_printui_install() {
        let (program, args) = Mechanism::PrintUi.install_command(&printer("LaserJet")).unwrap();
        assert_eq!(program, "rundll32");
        assert_eq!(args.last().unwrap(), r"\\192.168.0.102\LaserJet");
        assert!(args.contains(&"/in".to_string()));
    }

    #[test]
    fn test_wmic_has_no_install() {
        assert!(Mechanism::Wmic.install_command(&printer("LaserJet")).is_none());
    }

    #[test]
    fn test_wmic_default_escapes_path() {
        let (_, args) = Mechanism::Wmic
            .set_default_command(&printer("LaserJet"))
            .unwrap();
        assert_eq!(args[2], r"Name='\\\\192.168.0.102\\LaserJet'");
    }

    #[test]
    fn test_powershell_quotes() {
        let (program, args) = Mechanism::PowerShell
            .install_command(&printer("Bob's Printer"))
            .unwrap();
        assert_eq!(program, "powershell");
        assert_eq!(
            args.last().unwrap(),
            r"Add-Printer -ConnectionName '\\192.168.0.102\Bob''s Printer'"
        );
    }

    #[test]
    fn test_powershell_default_filter() {
        let (_, args) = Mechanism::PowerShell
            .set_default_command(&printer("Cost$Centre"))
            .unwrap();
        let script = args.last().unwrap();
        assert!(script.contains(r#"-Filter "Name='\\\\192.168.0.102\\Cost`$Centre'""#));
        assert!(script.contains("SetDefaultPrinter"));
    }

    #[test]
    fn test_wql_escape() {
        assert_eq!(wql_escape(r"\\h\it's"), r"\\\\h\\it\'s");
    }
}
