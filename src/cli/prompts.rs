use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{catalog::PaymentRecord, cli::render, workflow::PayLaterPrompt};

/// Asks the pay-later question with a dialoguer yes/no prompt.
///
/// A failed prompt counts as "no"; the error is kept for the caller to report.
pub struct PayLaterDialog<'a> {
    theme: &'a ColorfulTheme,
    error: Option<dialoguer::Error>,
}

impl<'a> PayLaterDialog<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme, error: None }
    }

    pub fn into_error(self) -> Option<dialoguer::Error> {
        self.error
    }
}

impl PayLaterPrompt for PayLaterDialog<'_> {
    fn confirm_pay_later(&mut self, record: &PaymentRecord) -> bool {
        let answer = Confirm::with_theme(self.theme)
            .with_prompt(render::pay_later_question(record))
            .default(false)
            .interact();
        match answer {
            Ok(answer) => answer,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }
}

pub fn confirm_exit(theme: &ColorfulTheme) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(theme)
        .with_prompt("Leave Bundul?")
        .default(true)
        .interact()
}
