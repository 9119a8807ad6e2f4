use std::collections::VecDeque;
use std::path::Path;

use image::{Rgba, RgbImage, RgbaImage};
use watermark_manager::adjust::contrast;
use watermark_manager::watermark::apply_image_watermark;
use watermark_manager::{
    flow, open_image, Adjustment, Error, Outcome, Prompter, Result, Settings, Watermark,
};

/// A prompter that replays canned answers and records what it was asked.
#[derive(Default)]
struct Scripted {
    confirms: VecDeque<bool>,
    inputs: VecDeque<&'static str>,
    selects: VecDeque<usize>,
    asked: Vec<String>,
}

impl Scripted {
    fn new(confirms: &[bool], inputs: &[&'static str], selects: &[usize]) -> Self {
        Self {
            confirms: confirms.iter().copied().collect(),
            inputs: inputs.iter().copied().collect(),
            selects: selects.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for Scripted {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        self.asked.push(message.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no answer for {message:?}")))
    }

    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        self.asked.push(message.to_string());
        let answer = self
            .inputs
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no answer for {message:?}")))?;
        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer.to_string(),
        })
    }

    fn select(&mut self, message: &str, _items: &[&str]) -> Result<usize> {
        self.asked.push(message.to_string());
        self.selects
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no answer for {message:?}")))
    }
}

fn settings_for(dir: &Path) -> Settings {
    Settings {
        image_dir: dir.to_path_buf(),
        ..Settings::default()
    }
}

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 255 / w) as u8, (y * 255 / h) as u8, 120, 255])
    })
}

#[test]
fn declining_readiness_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = Scripted::new(&[false], &[], &[]);

    let outcome = flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    assert_eq!(outcome, Outcome::Declined);
    assert_eq!(prompter.asked.len(), 1);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn text_watermark_on_default_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    RgbImage::from_pixel(300, 200, image::Rgb([255, 255, 255]))
        .save(dir.path().join("test.jpg"))
        .unwrap();

    // ready, default input, no edit, text watermark "DRAFT"
    let mut prompter = Scripted::new(&[true, false], &["", "DRAFT"], &[0]);
    let outcome = flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    let expected = dir.path().join("test-with-watermark.jpg");
    match outcome {
        Outcome::Written { output, choices } => {
            assert_eq!(output, expected);
            assert_eq!(choices.input, "test.jpg");
            assert_eq!(choices.adjustment, None);
            assert_eq!(choices.watermark, Watermark::text("DRAFT"));
        }
        Outcome::Declined => panic!("run was declined"),
    }

    let written = open_image(&expected).unwrap();
    assert_eq!(written.dimensions(), (300, 200));
    let centre = written.get_pixel(150, 100);
    let corner = written.get_pixel(2, 2);
    assert!(corner[0] > 240, "corner should stay white: {corner:?}");
    let darkest = written.pixels().map(|p| p[0]).min().unwrap();
    assert!(darkest < 100, "text should leave dark ink (centre {centre:?})");
    // Input is left as it was.
    assert!(dir.path().join("test.jpg").exists());
}

#[test]
fn contrast_then_logo_on_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = gradient(120, 90);
    input.save(dir.path().join("photo.png")).unwrap();
    let logo = RgbaImage::from_fn(50, 50, |x, _| {
        if x < 25 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 128])
        }
    });
    logo.save(dir.path().join("logo.png")).unwrap();

    // ready, photo.png, edit -> contrast, image watermark with default logo
    let mut prompter = Scripted::new(&[true, true], &["photo.png", ""], &[1, 1]);
    let outcome = flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    let Outcome::Written { output, choices } = outcome else {
        panic!("run was declined");
    };
    assert_eq!(output, dir.path().join("photo-with-watermark.png"));
    assert_eq!(choices.adjustment, Some(Adjustment::IncreaseContrast));
    assert_eq!(choices.watermark, Watermark::image(dir.path().join("logo.png")));

    let mut expected = input.clone();
    contrast(&mut expected, 0.3);
    apply_image_watermark(&mut expected, &logo);

    assert_eq!(open_image(&output).unwrap(), expected);
}

#[test]
fn skipping_edit_hands_decoded_image_to_watermark() {
    let dir = tempfile::tempdir().unwrap();
    let input = gradient(40, 30);
    input.save(dir.path().join("plain.png")).unwrap();
    RgbaImage::new(10, 10)
        .save(dir.path().join("clear.png"))
        .unwrap();

    // A fully transparent logo changes nothing, so the output is the input.
    let mut prompter = Scripted::new(&[true, false], &["plain.png", "clear.png"], &[1]);
    flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    let written = open_image(&dir.path().join("plain-with-watermark.png")).unwrap();
    assert_eq!(written, input);
}

#[test]
fn each_adjustment_matches_its_menu_entry() {
    for (idx, adjustment) in Adjustment::ALL.iter().enumerate() {
        let dir = tempfile::tempdir().unwrap();
        let input = gradient(16, 16);
        input.save(dir.path().join("in.png")).unwrap();
        RgbaImage::new(1, 1).save(dir.path().join("clear.png")).unwrap();

        let mut prompter = Scripted::new(&[true, true], &["in.png", "clear.png"], &[idx, 1]);
        flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

        let mut expected = input.clone();
        adjustment.apply(&mut expected);
        let written = open_image(&dir.path().join("in-with-watermark.png")).unwrap();
        assert_eq!(written, expected, "{adjustment}");
    }
}

#[test]
fn missing_input_aborts_before_watermark_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = Scripted::new(&[true], &["missing.jpg"], &[]);

    let err = flow::run(&mut prompter, &settings_for(dir.path())).unwrap_err();

    assert!(matches!(err, Error::Open { .. }), "{err}");
    assert_eq!(prompter.asked.len(), 2);
    assert!(!dir.path().join("missing-with-watermark.jpg").exists());
}

#[test]
fn missing_watermark_asset_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    gradient(20, 20).save(dir.path().join("a.png")).unwrap();

    let mut prompter = Scripted::new(&[true, false], &["a.png", "nope.png"], &[1]);
    let err = flow::run(&mut prompter, &settings_for(dir.path())).unwrap_err();

    assert!(matches!(err, Error::Open { .. }), "{err}");
    assert!(!dir.path().join("a-with-watermark.png").exists());
}

#[test]
fn text_mode_does_not_need_a_logo() {
    let dir = tempfile::tempdir().unwrap();
    gradient(64, 48).save(dir.path().join("a.png")).unwrap();

    // No logo.png exists; text mode must not try to open one.
    let mut prompter = Scripted::new(&[true, false], &["a.png", ""], &[0]);
    flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    let written = open_image(&dir.path().join("a-with-watermark.png")).unwrap();
    assert_eq!(written.dimensions(), (64, 48));
}

#[test]
fn unsupported_output_format_fails_before_editing() {
    let dir = tempfile::tempdir().unwrap();
    gradient(8, 8)
        .save(dir.path().join("anim.gif"))
        .unwrap();

    let mut prompter = Scripted::new(&[true], &["anim.gif"], &[]);
    let err = flow::run(&mut prompter, &settings_for(dir.path())).unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(_)), "{err}");
    assert_eq!(prompter.asked.len(), 2);
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = gradient(10, 10);
    input.save(dir.path().join("x.png")).unwrap();
    RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]))
        .save(dir.path().join("x-with-watermark.png"))
        .unwrap();

    let mut prompter = Scripted::new(&[true, false], &["x.png", ""], &[0]);
    flow::run(&mut prompter, &settings_for(dir.path())).unwrap();

    let written = open_image(&dir.path().join("x-with-watermark.png")).unwrap();
    assert_eq!(written, input);
}

#[cfg(unix)]
#[test]
fn unwritable_output_is_a_save_error() {
    let full = Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    gradient(32, 24).save(dir.path().join("a.png")).unwrap();
    let output = dir.path().join("a-with-watermark.png");
    std::os::unix::fs::symlink(full, &output).unwrap();

    let mut prompter = Scripted::new(&[true, false], &["a.png", "FULL"], &[0]);
    let err = flow::run(&mut prompter, &settings_for(dir.path())).unwrap_err();

    assert!(matches!(err, Error::Save { .. }), "{err}");
    assert!(err.to_string().contains("a-with-watermark.png"), "{err}");
}
