use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::engine::FilterMode;

fn usage_with_aliases(registry: &CommandRegistry, entry: &CommandEntry) -> String {
    let aliases = registry.aliases_for(entry.name);
    if aliases.is_empty() {
        entry.usage.to_string()
    } else {
        format!("{} ({})", entry.usage, aliases.join(", "))
    }
}

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    for entry in registry.list() {
        output::info(format!(
            "  {:<28} {}",
            usage_with_aliases(registry, entry),
            entry.description
        ));
    }
    let modes: Vec<&str> = FilterMode::MODES.iter().map(|mode| mode.as_str()).collect();
    output::muted(format!("Filters: {}", modes.join(", ")));
    output::muted("Type `help <command>` for one command.");
}

pub fn print_command(registry: &CommandRegistry, entry: &CommandEntry) {
    output::section(entry.name);
    output::info(format!("  {}", entry.description));
    output::info(format!("  Usage: {}", usage_with_aliases(registry, entry)));
}
