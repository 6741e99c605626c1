//! Terminal implementations of the [`Prompter`] port.
//!
//! [`DialoguerPrompter`] is compiled only with the `interactive` feature.  A
//! cancelled prompt (Esc, `q`, or Ctrl-C) comes back as
//! [`PromptAnswer::Cancelled`]; any other terminal failure is an `io::Error`.

use std::io;

#[cfg(feature = "interactive")]
use dialoguer::{Input, Select, theme::ColorfulTheme};

use jotl_core::application::ports::{PromptAnswer, Prompter};
use jotl_core::domain::SelectionStep;

#[cfg(feature = "interactive")]
use crate::progress::restore_cursor;

/// Whether this build can ask questions at all.
pub const PROMPTS_AVAILABLE: bool = cfg!(feature = "interactive");

/// The prompter for this build.
pub fn terminal_prompter() -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        Box::new(DialoguerPrompter::new())
    }
    #[cfg(not(feature = "interactive"))]
    {
        Box::new(DisabledPrompter)
    }
}

/// Fails every prompt.  Used when the `interactive` feature is off.
#[cfg_attr(feature = "interactive", allow(dead_code))]
pub struct DisabledPrompter;

impl Prompter for DisabledPrompter {
    fn input(&self, header: &str) -> io::Result<PromptAnswer<String>> {
        Err(disabled(header))
    }

    fn select(&self, step: &SelectionStep) -> io::Result<PromptAnswer<usize>> {
        Err(disabled(step.header))
    }
}

#[cfg_attr(feature = "interactive", allow(dead_code))]
fn disabled(header: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("interactive prompts are not compiled in (asked: {header})"),
    )
}

/// Prompts on stderr using the colorful dialoguer theme.
#[cfg(feature = "interactive")]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

#[cfg(feature = "interactive")]
impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

#[cfg(feature = "interactive")]
impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn input(&self, header: &str) -> io::Result<PromptAnswer<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(header)
            .allow_empty(true)
            .interact_text()
            .map(PromptAnswer::Answered)
            .map_err(io::Error::from);
        cancelled_on_interrupt(answer, restore_cursor)
    }

    fn select(&self, step: &SelectionStep) -> io::Result<PromptAnswer<usize>> {
        let items = option_labels(step);
        let answer = Select::with_theme(&self.theme)
            .with_prompt(step.header)
            .items(&items)
            .default(step.default_index())
            .interact_opt()
            .map_err(io::Error::from)
            .map(|choice| match choice {
                Some(index) => PromptAnswer::Answered(index),
                None => PromptAnswer::Cancelled,
            });
        cancelled_on_interrupt(answer, restore_cursor)
    }
}

/// `label - description` for every option, in catalog order.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn option_labels(step: &SelectionStep) -> Vec<String> {
    step.options
        .iter()
        .map(|option| format!("{} - {}", option.label, option.description))
        .collect()
}

/// Ctrl-C surfaces from the terminal as `Interrupted`.
///
/// dialoguer hides the cursor while a select is open and does not show it
/// again when the read is interrupted, so `cleanup` runs on that path.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn cancelled_on_interrupt<T>(
    answer: io::Result<PromptAnswer<T>>,
    cleanup: impl FnOnce(),
) -> io::Result<PromptAnswer<T>> {
    match answer {
        Ok(answer) => Ok(answer),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            cleanup();
            Ok(PromptAnswer::Cancelled)
        }
        Err(e) => Err(e),
    }
}
