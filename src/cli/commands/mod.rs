pub mod payments;
pub mod system;

use crate::cli::registry::CommandRegistry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in payments::definitions()
        .into_iter()
        .chain(system::definitions())
    {
        registry.register(entry);
    }
    registry.alias("ls", "list");
    registry.alias("quit", "exit");
    registry.alias("paynow", "pay-now");
}

/// Header, greeting, and the current list, shown when an interactive session starts.
pub(crate) fn print_welcome(context: &ShellContext) {
    payments::print_screen(context, true);
}
