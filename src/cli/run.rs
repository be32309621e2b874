//! Run and discover subcommand implementation.
//!
//! Both share the sweep; `run` additionally hands the selected printer to
//! the platform installer.

use crate::cli::OutputFormat;
use crate::config::{AppSettings, DiscoveryConfig};
use crate::error::{CliResult, DiscoveryResult};
use crate::install::{self, PrinterInstaller};
use crate::interfaces::{local_interfaces, select_interface};
use crate::output;
use crate::report::DiscoveryReport;
use crate::scanner::{derive_from_str, Discoverer};
use crate::types::{RangePolicy, SharedPrinter};
use chrono::Utc;
use clap::{Args, Parser};
use std::time::Duration;
use tracing::{info, warn};

/// Options controlling a sweep.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Interface to scan from (default: first LAN-looking interface)
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,

    /// Address block to scan instead of the interface's, e.g. 192.168.0.0/24
    #[arg(short, long, value_name = "CIDR")]
    pub block: Option<String>,

    /// Host range: "bounded" (.100-.110), "full", or START-END suffixes
    #[arg(short, long, value_name = "POLICY")]
    pub range: Option<RangePolicy>,

    /// SMB connect timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Share listing timeout in milliseconds (0 = wait indefinitely)
    #[arg(long, value_name = "MS")]
    pub share_timeout: Option<u64>,

    /// Prefer the first printer whose share name contains this text
    #[arg(short, long, value_name = "NAME")]
    pub prefer: Option<String>,

    /// Output format for the report
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl ScanArgs {
    /// Merge flags over persisted settings into a run configuration.
    pub fn resolve(&self, settings: &AppSettings) -> CliResult<DiscoveryConfig> {
        let mut config = DiscoveryConfig::from_settings(settings)?;

        if let Some(ms) = self.timeout {
            config = config.with_probe_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.share_timeout {
            config = config.with_share_timeout(Duration::from_millis(ms));
        }
        if let Some(policy) = self.range {
            config = config.with_range_policy(policy);
        }
        if let Some(name) = &self.prefer {
            config = config.with_preferred_printer(name);
        }

        config.validate()?;
        Ok(config)
    }

    /// Output format from flags, falling back to settings.
    pub fn output_format(&self, settings: &AppSettings) -> OutputFormat {
        self.output.unwrap_or_else(|| {
            settings.output_format.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "ignoring output_format setting");
                OutputFormat::Plain
            })
        })
    }

    /// Enumerate, select, derive, sweep and pick a target.
    ///
    /// The report is printed before the selection is handed back, so the
    /// operator sees what was probed even when nothing qualified.
    async fn sweep(&self, settings: &AppSettings, verbose: bool, quiet: bool) -> CliResult<Sweep> {
        let config = self.resolve(settings)?;
        let format = self.output_format(settings);
        let plain = format == OutputFormat::Plain;

        let interfaces = local_interfaces()?;
        let requested = self.interface.as_deref().or(settings.interface.as_deref());
        let selected = select_interface(&interfaces, requested)?.clone();
        info!(interface = %selected, "selected interface");

        let block = self.block.clone().unwrap_or_else(|| selected.cidr());
        let candidates = derive_from_str(&block, config.range_policy)?;

        if !quiet && plain {
            output::print_scan_header(&selected, &block, config.range_policy, candidates.len());
        }

        let discoverer = Discoverer::from_config(&config);
        let discoverer = if verbose && plain {
            discoverer.with_progress()
        } else {
            discoverer
        };

        let started_at = Utc::now();
        let discovery = discoverer.run(candidates).await;
        let selection = discovery
            .select_target(config.preferred_printer.as_deref())
            .cloned();

        let report = DiscoveryReport::new(started_at, selected, block, config.range_policy, discovery)
            .with_target(selection.as_ref().ok().cloned());
        output::print_report(&report, format)?;

        Ok(Sweep {
            config,
            report,
            selection,
        })
    }
}

/// A finished sweep and its target selection.
struct Sweep {
    config: DiscoveryConfig,
    report: DiscoveryReport,
    selection: DiscoveryResult<SharedPrinter>,
}

/// Discover printers and make the first one the default.
#[derive(Parser, Debug, Clone, Default)]
pub struct RunCommand {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Discover and select a target but do not install it
    #[arg(long)]
    pub dry_run: bool,
}

impl RunCommand {
    /// Execute the run command.
    pub async fn execute(&self, settings: &AppSettings, verbose: bool, quiet: bool) -> CliResult<()> {
        let sweep = self.scan.sweep(settings, verbose, quiet).await?;
        let installer = install::platform_installer();
        self.act_on(sweep.selection, installer.as_ref(), quiet).await
    }

    /// Hand a selected target to `installer`.
    ///
    /// A failed selection is returned untouched and the installer is never
    /// called.
    async fn act_on(
        &self,
        selection: DiscoveryResult<SharedPrinter>,
        installer: &dyn PrinterInstaller,
        quiet: bool,
    ) -> CliResult<()> {
        let target = selection?;

        if self.dry_run {
            if !quiet {
                output::print_info(&format!("Dry run: would set {} as default", target));
            }
            return Ok(());
        }

        if !install::is_privileged().await {
            output::print_warning("not running with elevated privileges; installation may fail");
        }

        configure(installer, &target, quiet).await
    }
}

/// Install `target` and make it the default.
async fn configure(
    installer: &dyn PrinterInstaller,
    target: &SharedPrinter,
    quiet: bool,
) -> CliResult<()> {
    installer.install(target).await?;
    if !quiet {
        output::print_success(&format!("Installed {}", target));
    }

    installer.set_default(target).await?;
    if !quiet {
        output::print_success(&format!("{} is now the default printer", target));
    }
    Ok(())
}

/// Discover printers and report them without installing.
#[derive(Parser, Debug, Clone, Default)]
pub struct DiscoverCommand {
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl DiscoverCommand {
    /// Execute the discover command.
    pub async fn execute(&self, settings: &AppSettings, verbose: bool, quiet: bool) -> CliResult<()> {
        let sweep = self.scan.sweep(settings, verbose, quiet).await?;
        sweep.selection?;

        let note = selection_note(
            sweep.report.printers.len(),
            sweep.config.preferred_printer.as_deref(),
        );
        if let Some(note) = note.filter(|_| !quiet) {
            output::print_info(&note);
        }
        Ok(())
    }
}

/// How the target was picked, when there was a choice to make.
fn selection_note(printers: usize, preferred: Option<&str>) -> Option<String> {
    if printers < 2 {
        return None;
    }
    Some(match preferred {
        Some(name) => format!(
            "{} printers found; the target is the first whose name contains '{}'",
            printers, name
        ),
        None => format!("{} printers found; the target is the first to answer", printers),
    })
}
