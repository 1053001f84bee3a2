use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use snowpdf::{format_pdf_date, parse_pdf_date, Color, Document, PdfConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "snowpdf",
    about = "Generate PDF documents full of snowmen",
    version,
    author
)]
struct Cli {
    /// Log every object written
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a PDF with one snowman per page
    Create {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Muffler color of a page; repeat for more pages
        /// (e.g. "red", "#ff8000", "0.2,0.4,1", "gray:0.5", "cmyk:0,1,1,0")
        #[arg(short, long = "muffler", value_name = "COLOR")]
        mufflers: Vec<Color>,

        /// Snowman size relative to the standard size
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,

        /// Page width in points
        #[arg(long, requires = "height")]
        width: Option<f64>,

        /// Page height in points
        #[arg(long, requires = "width")]
        height: Option<f64>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        creator: Option<String>,

        /// Creation date, e.g. "D:20181224235959+09'00'" (default: now)
        #[arg(long)]
        creation_date: Option<String>,

        /// PDF version written to the header
        #[arg(long)]
        pdf_version: Option<String>,

        /// Write content streams uncompressed
        #[arg(long)]
        no_compress: bool,

        /// JSON file with generation settings; flags take precedence
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the current time as a PDF date, or convert one to RFC 3339
    Date {
        /// PDF date to parse
        #[arg(long, value_name = "DATE")]
        parse: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Create {
            output,
            mufflers,
            scale,
            width,
            height,
            title,
            author,
            subject,
            creator,
            creation_date,
            pdf_version,
            no_compress,
            config,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => PdfConfig::default(),
            };
            if no_compress {
                config = config.with_compress(false);
            }
            if let Some(version) = pdf_version {
                config = config.with_version(version);
            }

            let mut doc = Document::with_config(config);
            if let (Some(width), Some(height)) = (width, height) {
                doc.set_page_size(width, height)?;
            }

            let mut info = HashMap::new();
            for (key, value) in [
                ("title", title),
                ("author", author),
                ("subject", subject),
                ("creator", creator),
                ("creationDate", creation_date),
            ] {
                if let Some(value) = value {
                    info.insert(key.to_string(), value);
                }
            }
            doc.set_doc_info(&info)
                .context("Invalid document information")?;

            let mufflers = if mufflers.is_empty() {
                vec![doc.config().muffler]
            } else {
                mufflers
            };
            for muffler in mufflers {
                doc.add_page_scaled(muffler, scale)
                    .with_context(|| format!("Cannot add a page with muffler {muffler}"))?;
            }

            let bytes = doc
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::debug!(document = %doc, "saved");

            println!(
                "Created {} ({} pages, {} bytes)",
                output.display(),
                doc.page_count(),
                bytes
            );
        }

        Commands::Date { parse } => match parse {
            Some(date) => {
                let parsed = parse_pdf_date(&date)?;
                println!("{}", parsed.to_rfc3339());
            }
            None => println!("{}", format_pdf_date(&Local::now())),
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("snowpdf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snowpdf=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &Path) -> Result<PdfConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
