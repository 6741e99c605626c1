//! Spinner implementation of the [`Indicator`] port.

use std::borrow::Cow;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use jotl_core::application::ports::Indicator;

/// An `indicatif` spinner on stderr.  Frames advance only when the core's
/// progress thread calls [`Indicator::tick`].
pub struct SpinnerIndicator {
    bar: ProgressBar,
}

impl SpinnerIndicator {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message);
        Self { bar }
    }

    /// A spinner that draws nothing, for quiet and machine-readable runs.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Indicator for SpinnerIndicator {
    fn tick(&mut self) {
        self.bar.tick();
    }

    fn release(&mut self) {
        let drawn = !self.bar.is_hidden();
        self.bar.finish_and_clear();
        if drawn {
            restore_cursor();
        }
    }
}

/// Show the cursor again.  Writes nothing unless stderr is a terminal.
pub fn restore_cursor() {
    let term = Term::stderr();
    if term.is_term() {
        let _ = term.show_cursor();
    }
}
