//! Build a Fillable PDF Form
//!
//! Renders a JSON form description to a fillable PDF.
//!
//! Usage:
//!   cargo run --release --bin build_form -- form.json
//!   cargo run --release --bin build_form -- form.json -o order.pdf --logo logo.png
//!   cargo run --release --bin build_form -- form.json --plan

use form_oxide::backend::RecordingBackend;
use form_oxide::export::{self, DEFAULT_FILE_NAME};
use form_oxide::writer::PdfWriterConfig;
use form_oxide::{FormAssembler, FormSpec, PdfBackend, RenderReporter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

struct BuildConfig {
    input: PathBuf,
    output: PathBuf,
    logo: Option<PathBuf>,
    plan: bool,
    verbose: bool,
}

impl BuildConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = PathBuf::from(DEFAULT_FILE_NAME);
        let mut logo = None;
        let mut plan = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = PathBuf::from(&args[i]);
                    }
                },
                "--logo" => {
                    i += 1;
                    if i < args.len() {
                        logo = Some(PathBuf::from(&args[i]));
                    }
                },
                "--plan" => {
                    plan = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other if input.is_none() && !other.starts_with('-') => {
                    input = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Some(Self {
            input: input?,
            output,
            logo,
            plan,
            verbose,
        })
    }
}

fn print_usage() {
    eprintln!("Usage: build_form <form.json> [-o out.pdf] [--logo file] [--plan] [-v]");
}

async fn run(config: &BuildConfig) -> form_oxide::Result<()> {
    let mut store = FormSpec::from_path(&config.input)?.into_store()?;
    if let Some(logo) = &config.logo {
        store.set_logo(export::read_logo(logo).await?);
    }

    let document = store.document();
    log::info!(
        "Loaded \"{}\": {} elements, {} theme, {} font",
        document.title(),
        store.len(),
        document.theme().display_name(),
        document.font().display_name()
    );

    let assembler = FormAssembler::default();
    let reporter = RenderReporter::new();

    if config.plan {
        let rendered = assembler
            .render(document, RecordingBackend::new(), &reporter)
            .await?;
        print!("{}", String::from_utf8_lossy(&rendered.bytes));
        return Ok(());
    }

    let start = Instant::now();
    let backend = PdfBackend::with_config(PdfWriterConfig::default().with_title(document.title()));
    let path = export::save_pdf(
        &assembler,
        document,
        backend,
        &reporter,
        &config.output,
    )
    .await?;

    println!(
        "Wrote {} ({} elements) in {:.2?}",
        path.display(),
        store.len(),
        start.elapsed()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let Some(config) = BuildConfig::from_args() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
