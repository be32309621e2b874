//! Interfaces subcommand implementation.

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::interfaces::{local_interfaces, select_interface};
use crate::output;
use clap::Parser;

/// List usable interfaces and mark the one a run would use.
#[derive(Parser, Debug, Clone, Default)]
pub struct InterfacesCommand {
    /// Show which interface this name would select
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,
}

impl InterfacesCommand {
    /// Execute the interfaces command.
    pub fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        let interfaces = local_interfaces()?;
        let requested = self.interface.as_deref().or(settings.interface.as_deref());

        let selected = match select_interface(&interfaces, requested) {
            Ok(iface) => Some(iface),
            Err(e) => {
                output::print_warning(&e.to_string());
                None
            }
        };

        output::print_interfaces(&interfaces, selected);
        Ok(())
    }
}
