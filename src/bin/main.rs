use taskload::*;

use anyhow::{anyhow, Context};
use clap::Parser;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the target endpoint
    url: String,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Duration of the run in seconds
    #[arg(short, long, default_value_t = 30)]
    duration: u64,

    /// Bearer token sent as an Authorization header
    #[arg(short, long)]
    token: Option<String>,

    /// Extra header in "Name: value" form, may be repeated
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
}

fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header {:?} is missing a ':'", raw))?;
    let name: HeaderName = name.trim().parse()?;
    let value: HeaderValue = value.trim().parse()?;
    Ok((name, value))
}

fn build_headers(token: Option<&str>, raw: &[String]) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
    }
    for raw in raw {
        let (name, value) = parse_header(raw).with_context(|| format!("bad header {:?}", raw))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = model::LoadConfig {
        url: args.url,
        headers: build_headers(args.token.as_deref(), &args.headers)?,
        workers: args.workers,
        duration: Duration::from_secs(args.duration),
    };

    driver::run(config).await
}
