//! Interactive prompts.
//!
//! The flow only talks to the [`Prompter`] trait. With the `cli` feature,
//! [`TerminalPrompter`] implements it on top of `dialoguer`; tests drive the
//! flow with a scripted implementation instead.

use crate::error::Result;

/// The three kinds of question the watermark flow asks.
pub trait Prompter {
    /// Ask a yes/no question. `default` is used when the user just hits enter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Prompt`] if the question could not be asked.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Ask for free text. Without a default, an empty answer is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Prompt`] if the question could not be asked.
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Ask the user to pick one of `items`, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Prompt`] if the question could not be asked.
    fn select(&mut self, message: &str, items: &[&str]) -> Result<usize>;
}

#[cfg(feature = "cli")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "cli")]
mod terminal {
    use dialoguer::theme::ColorfulTheme;
    use dialoguer::{Confirm, Input, Select};

    use super::Prompter;
    use crate::error::{Error, Result};

    fn prompt_err(e: dialoguer::Error) -> Error {
        Error::Prompt(e.to_string())
    }

    /// [`Prompter`] backed by the controlling terminal.
    #[derive(Default)]
    pub struct TerminalPrompter {
        theme: ColorfulTheme,
    }

    impl TerminalPrompter {
        /// Create a prompter using the colourful `dialoguer` theme.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Prompter for TerminalPrompter {
        fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(message)
                .default(default)
                .interact()
                .map_err(prompt_err)
        }

        fn input(&mut self, message: &str, default: Option<&str>) -> Result<String> {
            let mut input = Input::<String>::with_theme(&self.theme).with_prompt(message);
            input = match default {
                Some(default) => input.default(default.to_string()),
                None => input.allow_empty(true),
            };
            input.interact_text().map_err(prompt_err)
        }

        fn select(&mut self, message: &str, items: &[&str]) -> Result<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(message)
                .items(items)
                .default(0)
                .interact()
                .map_err(prompt_err)
        }
    }
}
