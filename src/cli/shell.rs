use std::{
    collections::HashMap,
    io::{self, StdinLock},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::errors::CliError;
use crate::cli::output;
use crate::cli::shell_context::{CliMode, LoopControl, ShellContext};
use crate::engine::FilterMode;

/// Set to read commands from stdin without prompts or colour.
pub const SCRIPT_MODE_ENV: &str = "BUNDUL_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let result = match mode {
        CliMode::Interactive => {
            crate::cli::commands::print_welcome(&context);
            EditorSource::new(PaymentsHelper::for_context(&context))
                .and_then(|mut source| drive(&mut context, &mut source))
        }
        CliMode::Script => drive(&mut context, &mut StdinSource::new()),
    };
    context.screen.teardown();
    result
}

enum LineEvent {
    Line(String),
    Interrupted,
    Closed,
}

/// Where the shell reads its next command from.
trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<LineEvent, CliError>;
}

struct EditorSource {
    editor: Editor<PaymentsHelper, DefaultHistory>,
}

impl EditorSource {
    fn new(helper: PaymentsHelper) -> Result<Self, CliError> {
        let mut editor = Editor::<PaymentsHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self, prompt: &str) -> Result<LineEvent, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.trim()).ok();
                }
                Ok(LineEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(LineEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(LineEvent::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

struct StdinSource {
    lines: io::Lines<StdinLock<'static>>,
}

impl StdinSource {
    fn new() -> Self {
        Self {
            lines: io::stdin().lines(),
        }
    }
}

impl LineSource for StdinSource {
    fn next_line(&mut self, _prompt: &str) -> Result<LineEvent, CliError> {
        match self.lines.next() {
            Some(line) => Ok(LineEvent::Line(line?)),
            None => Ok(LineEvent::Closed),
        }
    }
}

fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        match source.next_line(&context.prompt())? {
            LineEvent::Line(line) => run_line(context, &line)?,
            LineEvent::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            LineEvent::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Goodbye.");
                }
                break;
            }
        }
    }
    Ok(())
}

fn run_line(context: &mut ShellContext, line: &str) -> Result<(), CliError> {
    let tokens = match tokenize(line) {
        Ok(Some(tokens)) => tokens,
        Ok(None) => return Ok(()),
        Err(err) => {
            output::warning(format!("Could not read `{}`: {}", line.trim(), err));
            return Ok(());
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(());
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(LoopControl::Continue) => Ok(()),
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(())
        }
        Err(err) => context.report_error(err),
    }
}

/// Splits a command line into words. Blank lines and `#` comments yield `None`.
fn tokenize(line: &str) -> Result<Option<Vec<String>>, shell_words::ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    shell_words::split(trimmed).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgumentKind {
    Filter,
    PaymentId,
    Command,
}

impl ArgumentKind {
    fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "filter" => Some(ArgumentKind::Filter),
            "pay" => Some(ArgumentKind::PaymentId),
            "help" => Some(ArgumentKind::Command),
            _ => None,
        }
    }
}

/// Tab completion for command names and their first argument.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct PaymentsHelper {
    commands: Vec<&'static str>,
    arguments: HashMap<&'static str, ArgumentKind>,
    payments: Vec<(u32, String)>,
}

impl PaymentsHelper {
    fn for_context(context: &ShellContext) -> Self {
        let registry = &context.registry;
        let payments = context
            .screen
            .catalog()
            .records()
            .iter()
            .map(|record| (record.id, record.service.clone()))
            .collect();
        Self::new(
            registry
                .names()
                .map(|name| (name, registry.aliases_for(name)))
                .collect(),
            payments,
        )
    }

    fn new(commands: Vec<(&'static str, Vec<&'static str>)>, payments: Vec<(u32, String)>) -> Self {
        let mut arguments = HashMap::new();
        for (name, aliases) in &commands {
            if let Some(kind) = ArgumentKind::for_command(name) {
                arguments.insert(*name, kind);
                for alias in aliases {
                    arguments.insert(*alias, kind);
                }
            }
        }
        let mut commands: Vec<&'static str> = commands.into_iter().map(|(name, _)| name).collect();
        commands.sort_unstable();
        Self {
            commands,
            arguments,
            payments,
        }
    }

    fn command_pairs(&self, needle: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|name| name.starts_with(needle))
            .map(|name| plain_pair(name))
            .collect()
    }

    fn argument_pairs(&self, kind: ArgumentKind, needle: &str) -> Vec<Pair> {
        match kind {
            ArgumentKind::Command => self.command_pairs(needle),
            ArgumentKind::Filter => FilterMode::MODES
                .iter()
                .map(|mode| mode.as_str())
                .filter(|mode| mode.to_ascii_lowercase().starts_with(needle))
                .map(plain_pair)
                .collect(),
            ArgumentKind::PaymentId => self
                .payments
                .iter()
                .filter(|(id, _)| id.to_string().starts_with(needle))
                .map(|(id, service)| Pair {
                    display: format!("{} {}", id, service),
                    replacement: id.to_string(),
                })
                .collect(),
        }
    }
}

fn plain_pair(text: &str) -> Pair {
    Pair {
        display: text.to_string(),
        replacement: text.to_string(),
    }
}

impl Completer for PaymentsHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let words: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();

        let candidates = match words.as_slice() {
            [] => self.command_pairs(&needle),
            [command] => match self.arguments.get(command.as_str()) {
                Some(kind) => self.argument_pairs(*kind, &needle),
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        Ok((start, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> PaymentsHelper {
        PaymentsHelper::new(
            vec![
                ("list", vec!["ls"]),
                ("filter", vec![]),
                ("pay", vec![]),
                ("pay-now", vec![]),
                ("help", vec![]),
            ],
            vec![(5, "Disney+".to_string()), (7, "Microsoft 365".to_string())],
        )
    }

    fn complete(line: &str) -> (usize, Vec<Pair>) {
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        helper().complete(line, line.len(), &ctx).unwrap()
    }

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|pair| pair.replacement.as_str()).collect()
    }

    #[test]
    fn parses_quoted_arguments() {
        let tokens = tokenize(r#"search "apple one""#).unwrap().unwrap();
        assert_eq!(tokens, vec!["search".to_string(), "apple one".to_string()]);
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(tokenize("   ").unwrap(), None);
        assert_eq!(tokenize("  # pay 5 tomorrow").unwrap(), None);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = tokenize(r#"search "open"#).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn first_word_completes_commands() {
        let (start, pairs) = complete("pa");
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["pay", "pay-now"]);
    }

    #[test]
    fn filter_and_list_offer_modes() {
        let (start, pairs) = complete("filter d");
        assert_eq!(start, 7);
        assert_eq!(replacements(&pairs), vec!["dueSoon"]);

        let (_, pairs) = complete("ls ");
        assert_eq!(replacements(&pairs), vec!["all", "dueSoon", "paid"]);
    }

    #[test]
    fn pay_offers_catalog_ids_with_names() {
        let (start, pairs) = complete("pay ");
        assert_eq!(start, 4);
        assert_eq!(replacements(&pairs), vec!["5", "7"]);
        assert_eq!(pairs[0].display, "5 Disney+");

        let (_, pairs) = complete("pay 7");
        assert_eq!(replacements(&pairs), vec!["7"]);
    }

    #[test]
    fn help_offers_command_names() {
        let (_, pairs) = complete("help fi");
        assert_eq!(replacements(&pairs), vec!["filter"]);
    }

    #[test]
    fn later_arguments_get_no_candidates() {
        let (_, pairs) = complete("pay 5 ");
        assert!(pairs.is_empty());
        let (_, pairs) = complete("search ");
        assert!(pairs.is_empty());
    }
}
