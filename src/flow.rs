//! The interactive watermarking run.
//!
//! A run is a straight line: confirm, pick the input, optionally adjust it,
//! pick a watermark, apply it and save. Every step takes the values the
//! previous one produced; nothing is asked twice and nothing loops back.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::adjust::{apply_adjustment, Adjustment};
use crate::engine::{ensure_writable_format, open_image, output_filename, save_image};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::watermark::{Watermark, WatermarkKind};

const GREETING: &str = "Hi! Welcome to \"Watermark manager\". Copy your image files to the image \
                        folder. Then you'll be able to use them in the app. Are you ready?";
const INPUT_PROMPT: &str = "What file do you want to mark?";
const EDIT_PROMPT: &str = "Do you want to edit the image?";
const ADJUSTMENT_PROMPT: &str = "Choose a modification:";
const KIND_PROMPT: &str = "Choose a watermark type:";
const TEXT_PROMPT: &str = "Type your watermark text:";
const ASSET_PROMPT: &str = "Type your watermark name:";

/// Where images are read from and written to, and the prompt defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the input, the watermark asset and the output.
    pub image_dir: PathBuf,
    /// Suggested input file name.
    pub default_input: String,
    /// Suggested watermark asset name.
    pub default_watermark: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("img"),
            default_input: "test.jpg".to_string(),
            default_watermark: "logo.png".to_string(),
        }
    }
}

/// Everything the user decided during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    /// Input file name, relative to the image directory.
    pub input: String,
    /// The adjustment, if the user chose to edit.
    pub adjustment: Option<Adjustment>,
    /// The watermark, with its asset path already resolved.
    pub watermark: Watermark,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The user was not ready; nothing was read or written.
    Declined,
    /// The watermarked image was written.
    Written {
        /// Path of the new file.
        output: PathBuf,
        /// What the user chose along the way.
        choices: Choices,
    },
}

/// Run the whole interactive flow once.
///
/// # Errors
///
/// Returns the first prompt, decode, render or encode error; nothing after
/// the failing step runs.
pub fn run<P: Prompter>(prompter: &mut P, settings: &Settings) -> Result<Outcome> {
    if !prompter.confirm(GREETING, true)? {
        log::info!("User is not ready, exiting");
        return Ok(Outcome::Declined);
    }

    let input = prompter.input(INPUT_PROMPT, Some(&settings.default_input))?;
    let input_path = settings.image_dir.join(&input);
    let output = output_filename(&input_path);

    let mut image = open_image(&input_path)?;
    ensure_writable_format(&output)?;

    let adjustment = ask_adjustment(prompter)?;
    apply_adjustment(&mut image, adjustment);

    let watermark = ask_watermark(prompter, settings)?;
    log::info!("Chose {}", watermark.kind());
    write_watermarked(image, &watermark, &output)?;

    Ok(Outcome::Written {
        output,
        choices: Choices {
            input,
            adjustment,
            watermark,
        },
    })
}

/// Ask whether to edit and, if so, which adjustment to apply.
///
/// # Errors
///
/// Propagates prompt failures.
pub fn ask_adjustment<P: Prompter>(prompter: &mut P) -> Result<Option<Adjustment>> {
    if !prompter.confirm(EDIT_PROMPT, false)? {
        return Ok(None);
    }

    let labels = Adjustment::ALL.map(Adjustment::label);
    let idx = prompter.select(ADJUSTMENT_PROMPT, &labels)?;
    pick(&Adjustment::ALL, idx).map(Some)
}

/// Ask for the watermark type and its parameter.
///
/// # Errors
///
/// Propagates prompt failures.
pub fn ask_watermark<P: Prompter>(prompter: &mut P, settings: &Settings) -> Result<Watermark> {
    let labels = WatermarkKind::ALL.map(WatermarkKind::label);
    let idx = prompter.select(KIND_PROMPT, &labels)?;

    match pick(&WatermarkKind::ALL, idx)? {
        WatermarkKind::Text => {
            let text = prompter.input(TEXT_PROMPT, None)?;
            Ok(Watermark::text(text))
        }
        WatermarkKind::Image => {
            let name = prompter.input(ASSET_PROMPT, Some(&settings.default_watermark))?;
            Ok(Watermark::image(settings.image_dir.join(name)))
        }
    }
}

/// Apply `watermark` to `image` and save the result to `output`.
///
/// # Errors
///
/// Returns watermark or save errors.
pub fn write_watermarked(mut image: RgbaImage, watermark: &Watermark, output: &Path) -> Result<()> {
    watermark.apply(&mut image)?;
    save_image(&image, output)
}

fn pick<T: Copy>(options: &[T], idx: usize) -> Result<T> {
    options
        .get(idx)
        .copied()
        .ok_or_else(|| Error::Prompt(format!("selection {idx} out of range")))
}
