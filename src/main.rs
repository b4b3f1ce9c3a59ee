use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use lcl_quote::{QuoteEngine, QuoteResponse, Settings, handle_quote_request};
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(
        long,
        help = "(Optional) Sets the tariff configuration file path.",
        required = false
    )]
    pub config: Option<String>,

    #[arg(
        long,
        help = "Adds the shipment description JSON file, or - for stdin.",
        default_value = "-"
    )]
    pub shipment: String,

    #[arg(long, help = "(Optional) Pretty-prints the JSON response.", required = false)]
    pub pretty: bool,
}

fn read_shipment(path: &str) -> Result<String> {
    if path == "-" {
        let mut data = String::new();
        io::stdin()
            .read_to_string(&mut data)
            .context("reading shipment from stdin")?;
        Ok(data)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading shipment file {path}"))
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let args = Args::parse();

    let settings = Settings::load(&args.config)?;
    let engine = QuoteEngine::new(&settings)?;

    info!(
        "Loaded tariff {} ({} categories)",
        engine.tariffs().version(),
        engine.tariffs().len()
    );

    let data = read_shipment(&args.shipment)?;
    let response = handle_quote_request(&engine, &data)?;
    let rendered = lcl_quote::handlers::quote::render_response(&response, args.pretty)?;

    println!("{rendered}");

    Ok(match response {
        QuoteResponse::Quoted { .. } => ExitCode::SUCCESS,
        QuoteResponse::Rejected { .. } => ExitCode::from(2),
    })
}
