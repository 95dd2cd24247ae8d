use clap::Parser;
use config::Config;
use error::EcoSortResult;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod error;
mod guidance;
mod image_classifier;
mod image_preprocessor;
mod library;
mod pipeline;
mod report;
mod waste_label;

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify a waste photo and print recycling guidance")]
struct Args {
    /// Image to classify (PNG, JPEG or BMP)
    #[arg(short, long)]
    image: PathBuf,

    /// Write a PDF report to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ONNX model, overrides the configuration file
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// TOML guidance table, overrides the configuration file
    #[arg(short, long)]
    guidance: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.is_fatal() => {
            eprintln!("startup failed: {}", error);
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> EcoSortResult<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.model.onnx_model_path = model;
    }
    if let Some(guidance) = args.guidance {
        config.guidance.path = Some(guidance);
    }

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(
        config.logger.timezone(),
        config.logger.level,
    ));

    let pipeline = pipeline::startup::startup(&config, logger.clone())?;

    let bytes = std::fs::read(&args.image).map_err(|e| {
        error::EcoSortError::invalid_image(format!("cannot read {}: {}", args.image.display(), e))
    })?;
    let classified = pipeline.classify(&bytes)?;

    println!("{}", pipeline::render::distribution(&classified.result));
    println!("{}", pipeline::render::summary(&classified));
    if let Some(fact) = pipeline.guidance().random_fact(&mut rand::rng()) {
        println!("Did you know? {}", fact);
    }

    if let Some(path) = args.report {
        let file = File::create(&path).map_err(error::EcoSortError::ReportWrite)?;
        pipeline.write_report(&classified, &mut BufWriter::new(file))?;
        logger.info(&format!("report saved to {}", path.display()));
    }

    Ok(())
}
