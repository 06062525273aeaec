use crate::catalog::PaymentRecord;
use crate::cli::errors::CommandError;
use crate::cli::output::{self, section as output_section};
use crate::cli::prompts::PayLaterDialog;
use crate::cli::registry::CommandEntry;
use crate::cli::render::{self, SCREEN_TITLE};
use crate::cli::shell_context::{CliMode, CommandResult, ShellContext};
use crate::currency::format_currency;
use crate::engine::{EmptyState, FilterMode};
use crate::time::Urgency;
use crate::workflow::WorkflowState;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show the payment list with insights",
            "list [all|dueSoon|paid]",
            cmd_list,
        ),
        CommandEntry::new(
            "search",
            "Filter by service name (no text clears)",
            "search [text]",
            cmd_search,
        ),
        CommandEntry::new(
            "filter",
            "Switch between all, dueSoon, and paid",
            "filter <mode>",
            cmd_filter,
        ),
        CommandEntry::new("pay", "Open the details of a payment", "pay <id>", cmd_pay),
        CommandEntry::new("later", "Postpone the open payment", "later", cmd_later),
        CommandEntry::new("confirm", "Answer yes to the pay-later prompt", "confirm", cmd_confirm),
        CommandEntry::new("cancel", "Answer no to the pay-later prompt", "cancel", cmd_cancel),
        CommandEntry::new("close", "Close the payment details", "close", cmd_close),
        CommandEntry::new("pay-now", "Mark the open payment as paid", "pay-now", cmd_pay_now),
        CommandEntry::new("dismiss", "Hide the confirmation banner", "dismiss", cmd_dismiss),
        CommandEntry::new("refresh", "Reload paid payments from storage", "refresh", cmd_refresh),
        CommandEntry::new("history", "Show paid payments in payment order", "history", cmd_history),
        CommandEntry::new("show", "Show the open dialog or banner", "show", cmd_show),
    ]
}

pub(crate) fn print_screen(context: &ShellContext, with_greeting: bool) {
    let view = context.screen.view();
    let query = context.screen.query();

    output_section(SCREEN_TITLE);
    if with_greeting {
        output::info(context.greeting());
    }
    let search = if query.search.trim().is_empty() {
        String::new()
    } else {
        format!("  search: \"{}\"", query.search.trim())
    };
    output::muted(format!("Filter: {}{}", render::filter_label(view.filter), search));
    for line in render::insight_lines(&view) {
        output::info(line);
    }

    if let Some(banner) = context.screen.confirmation_banner() {
        print_banner(banner);
    }

    if let Some(state) = view.empty_state {
        print_empty_state(state);
        return;
    }

    let today = context.screen.today();
    for record in &view.filtered_payments {
        let line = render::payment_line(record);
        match render::due_badge(record, view.filter, today, query.due_soon_window_days) {
            Some(badge) => output::info(format!(
                "{}  {}",
                line,
                output::badge(&badge.label, badge.urgency == Urgency::Urgent)
            )),
            None => output::info(line),
        }
    }
}

fn print_empty_state(state: EmptyState) {
    let [title, subtitle] = render::empty_state_lines(state);
    output::info(title);
    output::muted(subtitle);
}

fn print_details(record: &PaymentRecord) {
    output_section("Payment Details");
    for line in render::detail_lines(record) {
        output::info(format!("  {}", line));
    }
    output::muted("Next: `pay-now`, `later` or `close`.");
}

fn print_banner(record: &PaymentRecord) {
    for line in render::banner_lines(record) {
        output::success(line);
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(mode) = args.first() {
        let mode: FilterMode = mode.parse()?;
        context.screen.set_filter(mode);
    }
    print_screen(context, false);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.screen.search(args.join(" "));
    print_screen(context, false);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("Usage: filter <all|dueSoon|paid>".into()))?;
    let mode: FilterMode = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("Unknown filter `{}`", raw)))?;
    context.screen.set_filter(mode);
    print_screen(context, false);
    Ok(())
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("Usage: pay <id>".into()))?;
    let id: u32 = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a payment id", raw)))?;
    let record = context.screen.select_for_payment(id)?.clone();
    print_details(&record);
    Ok(())
}

fn cmd_later(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode == CliMode::Script {
        context.screen.pay_later()?;
        if let Some(record) = context.screen.selected_payment() {
            output::info(render::pay_later_question(record));
        }
        output::muted("Type `confirm` or `cancel`.");
        return Ok(());
    }

    let mut dialog = PayLaterDialog::new(&context.theme);
    let postponed = context.screen.pay_later_with(&mut dialog)?;
    if let Some(err) = dialog.into_error() {
        return Err(err.into());
    }
    report_pay_later(context, postponed);
    Ok(())
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.screen.resolve_pay_later(true)?;
    report_pay_later(context, true);
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.screen.resolve_pay_later(false)?;
    report_pay_later(context, false);
    Ok(())
}

fn report_pay_later(context: &ShellContext, postponed: bool) {
    if postponed {
        output::info("Payment postponed.");
    } else if let Some(record) = context.screen.selected_payment() {
        print_details(record);
    }
}

fn cmd_close(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.screen.close_detail()?;
    output::info("Details closed.");
    Ok(())
}

fn cmd_pay_now(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let confirmation = context.screen.confirm_payment()?;
    print_banner(&confirmation.record);
    if !confirmation.persisted {
        output::warning("Could not save payment history. It will be lost when the shell exits.");
    }
    Ok(())
}

fn cmd_dismiss(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.screen.dismiss_confirmation() {
        output::info("Confirmation dismissed.");
    } else {
        output::warning("No confirmation to dismiss.");
    }
    Ok(())
}

fn cmd_refresh(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.screen.refresh();
    if report.fell_back {
        output::warning("Stored payment history was unreadable; starting empty.");
    } else if report.skipped > 0 {
        output::warning(format!("Skipped {} unreadable paid payment(s).", report.skipped));
    }
    print_screen(context, false);
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Paid History");
    let history = context.screen.paid_history();
    if history.is_empty() {
        print_empty_state(EmptyState::NoHistory);
        return Ok(());
    }
    for record in history {
        output::info(render::payment_line(record));
    }
    output::info(format!(
        "Total paid: {}",
        format_currency(context.screen.view().paid_total)
    ));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.screen.workflow_state() {
        WorkflowState::Idle => output::info("Nothing open."),
        WorkflowState::DetailShown { selected } => print_details(selected),
        WorkflowState::AwaitingPayLaterConfirmation { selected } => {
            output::info(render::pay_later_question(selected));
            output::muted("Type `confirm` or `cancel`.");
        }
        WorkflowState::Confirming { banner } => print_banner(banner),
    }
    Ok(())
}
