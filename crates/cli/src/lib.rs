use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use rsrc_extract::{ExtractorConfig, RunReport};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rsrc-forms")]
#[command(
    about = "Extract the action matrix and form schema from a legacy form-details dump",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// JSON or TOML file with paths and form allow-lists
    #[arg(long)]
    config: Option<PathBuf>,

    /// Form-details text dump
    #[arg(long, env = "RSRC_FORM_DETAILS")]
    form_details: Option<PathBuf>,

    /// Action-to-ticket mapping CSV
    #[arg(long, env = "RSRC_TICKET_MAP")]
    ticket_map: Option<PathBuf>,

    /// Where to write the action matrix CSV
    #[arg(long, env = "RSRC_MATRIX_OUT")]
    matrix_out: Option<PathBuf>,

    /// Where to write the form schema JSON
    #[arg(long, env = "RSRC_SCHEMA_OUT")]
    schema_out: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout carries only the summary)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Defaults, then the config file, then env/flags
    fn resolve_config(&self) -> Result<ExtractorConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ExtractorConfig::default(),
        };

        if let Some(path) = &self.form_details {
            config.form_details.clone_from(path);
        }
        if let Some(path) = &self.ticket_map {
            config.action_ticket_map.clone_from(path);
        }
        if let Some(path) = &self.matrix_out {
            config.matrix_out.clone_from(path);
        }
        if let Some(path) = &self.schema_out {
            config.schema_out.clone_from(path);
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn print_summary(report: &RunReport) {
    println!("{}", report.matrix_summary());
    println!("{}", report.schema_summary());
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = cli.resolve_config()?;
    log::debug!("resolved config: {config:?}");

    let report = rsrc_extract::run(&config).with_context(|| {
        format!(
            "Extraction failed (form details: {}, ticket map: {})",
            config.form_details.display(),
            config.action_ticket_map.display()
        )
    })?;
    print_summary(&report);
    Ok(())
}
