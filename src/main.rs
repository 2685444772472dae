//! pdf-letter CLI - render a letter described in JSON to PDF

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use pdf_letter::pagesize::PagePreset;
use pdf_letter::{render_letter, resolve_signature, LayoutConfig, LetterContent, LetterFonts};

#[derive(Parser)]
#[command(name = "pdf-letter")]
#[command(version)]
#[command(about = "Lay out a letter and render it to PDF", long_about = None)]
struct Cli {
    /// Letter as JSON (id, senderName, senderAddress, receiverName, receiverAddress,
    /// subject, bodyText, renderDate, signatureUrl)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Layout configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Paper size, overriding the configuration
    #[arg(long, value_name = "a4|letter")]
    page_size: Option<PagePreset>,

    /// TrueType font for regular text; requires --font-bold
    #[arg(long, value_name = "FILE", requires = "font_bold")]
    font_regular: Option<PathBuf>,

    /// TrueType font for bold text; requires --font-regular
    #[arg(long, value_name = "FILE", requires = "font_regular")]
    font_bold: Option<PathBuf>,

    /// Output file (letter_{id}.pdf if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the PDF to stdout as base64 instead of writing a file
    #[arg(long, conflicts_with = "output")]
    base64: bool,

    /// Seconds to wait for a signature download
    #[arg(long, default_value = "10")]
    timeout: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LetterFile {
    #[serde(flatten)]
    letter: LetterContent,
    signature_url: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let LetterFile {
        mut letter,
        signature_url,
    } = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;

    let mut config = match &cli.config {
        Some(path) => LayoutConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(page) = cli.page_size {
        config.page = page;
    }

    let fonts = match (&cli.font_regular, &cli.font_bold) {
        (Some(regular), Some(bold)) => LetterFonts::load_truetype(fs::read(regular)?, fs::read(bold)?)?,
        _ => LetterFonts::default(),
    };

    if let Some(url) = signature_url.filter(|url| !url.trim().is_empty()) {
        let client = reqwest::Client::new();
        letter.signature =
            Some(resolve_signature(&client, &url, Duration::from_secs(cli.timeout)).await);
    }

    let rendered = render_letter(&letter, &config, &fonts)?;

    if cli.base64 {
        println!("{}", rendered.to_base64());
    } else {
        let path = cli.output.unwrap_or_else(|| PathBuf::from(&rendered.filename));
        fs::write(&path, &rendered.bytes)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
