//! Interactively stamp a text or image watermark onto a picture.
//!
//! The crate asks a short, fixed sequence of questions (is the user ready,
//! which file, whether to adjust it first, which watermark), then writes
//! `<name>-with-watermark.<ext>` next to the input.
//!
//! # Quick Start
//!
//! ```no_run
//! use watermark_manager::{apply_adjustment, output_filename, save_image, Adjustment, Watermark};
//! use std::path::Path;
//!
//! let input = Path::new("img/photo.jpg");
//! let mut img = watermark_manager::open_image(input).unwrap();
//! apply_adjustment(&mut img, Some(Adjustment::IncreaseContrast));
//! Watermark::text("DRAFT").apply(&mut img).unwrap();
//! save_image(&img, &output_filename(input)).unwrap();
//! ```
//!
//! # Interactive runs
//!
//! [`flow::run`] drives the whole dialogue through any [`Prompter`]. With the
//! default `cli` feature, [`TerminalPrompter`] asks on the terminal.
//!
//! ```no_run
//! use watermark_manager::{flow, Settings, TerminalPrompter};
//!
//! let outcome = flow::run(&mut TerminalPrompter::new(), &Settings::default()).unwrap();
//! println!("{outcome:?}");
//! ```

#![deny(missing_docs)]

pub mod adjust;
pub mod blending;
mod engine;
pub mod error;
pub mod flow;
pub mod prompt;
pub mod text;
pub mod watermark;

pub use adjust::{apply_adjustment, Adjustment};
pub use engine::{
    ensure_writable_format, is_supported_image, open_image, output_filename, save_image,
    OUTPUT_SUFFIX,
};
pub use error::{Error, Result};
pub use flow::{Choices, Outcome, Settings};
pub use prompt::Prompter;
#[cfg(feature = "cli")]
pub use prompt::TerminalPrompter;
pub use watermark::{Watermark, WatermarkKind};
