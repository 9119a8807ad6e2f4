use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use watermark_manager::{flow, Outcome, Settings, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "watermark-manager",
    about = "Interactively stamp a text or image watermark onto a picture",
    version,
    after_help = "Run without arguments and answer the questions.\n\n\
                  Put your images in the image directory (default: ./img) first. The result \
                  is written next to the input as <name>-with-watermark.<ext>."
)]
struct Cli {
    /// Directory holding the input image, watermark asset and output
    #[arg(long, default_value = "img")]
    image_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn init_logger(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose && cli.quiet {
        eprintln!("Error: Cannot specify both --verbose and --quiet");
        process::exit(1);
    }

    init_logger(&cli);

    let settings = Settings {
        image_dir: cli.image_dir,
        ..Settings::default()
    };

    match flow::run(&mut TerminalPrompter::new(), &settings) {
        Ok(Outcome::Declined) => {}
        Ok(Outcome::Written { output, .. }) => {
            if !cli.quiet {
                eprintln!("[OK] {}", output.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
