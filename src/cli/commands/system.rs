use crate::cli::errors::CommandError;
use crate::cli::help;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::utils::paths;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("status", "Show session settings", "status", cmd_status),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Bundul {}", env!("CARGO_PKG_VERSION")));
    output::info(format!(
        "  Data dir     : {}",
        paths::app_data_dir().display()
    ));
    output::info(format!("  Today        : {}", context.screen.today()));
    output::info(format!(
        "  Due soon     : within {} days",
        context.screen.query().due_soon_window_days
    ));
    output::info(format!(
        "  Banner time  : {} ms",
        context.config.confirmation_timeout_ms
    ));
    output::info(format!(
        "  State        : {}",
        context.screen.workflow_state().name()
    ));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.registry.get(&command) {
            help::print_command(&context.registry, entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
