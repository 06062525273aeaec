use std::sync::Arc;

use chrono::{Local, Timelike};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::info;

use crate::{
    catalog::Catalog,
    cli::{
        commands,
        errors::{CliError, CommandError},
        output::{self, OutputPreferences},
        prompts,
        registry::CommandRegistry,
        render,
    },
    config::{today_override, Config, ConfigManager},
    screen::PaymentsScreen,
    storage::JsonFileStore,
    time::{Clock, PinnedDayClock, SystemClock},
    utils::paths,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub screen: PaymentsScreen,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });

        let base = paths::app_data_dir();
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let clock: Arc<dyn Clock> = match today_override()? {
            Some(today) => Arc::new(PinnedDayClock::new(today)),
            None => Arc::new(SystemClock),
        };
        let catalog = Arc::new(Catalog::demo_for(clock.today())?);
        let store = JsonFileStore::in_dir(&base)?;
        info!(path = %store.path().display(), "opening payment store");

        let mut screen =
            PaymentsScreen::new(catalog, Box::new(store), clock).with_config(&config);
        screen.on_focus();

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            screen,
            theme: ColorfulTheme::default(),
            config,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("bundul [{}]> ", self.screen.query().filter)
    }

    pub fn greeting(&self) -> String {
        render::greeting(
            Local::now().hour(),
            self.config.greeting_name.as_deref(),
        )
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        // A confirmation banner may have expired while the user was typing.
        if self.screen.tick() {
            output::info("Confirmation dismissed.");
        }
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(prompts::confirm_exit(&self.theme)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::muted("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}
