//! cfddns - update Cloudflare DNS A records with the current public IP.

use cfddns::cloudflare::CloudflareClient;
use cfddns::config::{derive_zone, TokenSource};
use cfddns::detector::IpDetector;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfddns")]
#[command(about = "Update Cloudflare DNS A records with the machine's current public IP")]
#[command(version)]
struct Cli {
    /// File containing the API token
    #[arg(short, long, value_name = "FILE", conflicts_with = "env_var")]
    file: Option<PathBuf>,

    /// Env var name containing the API token [default: CLOUDFLARE_API_TOKEN]
    #[arg(short, long, value_name = "VAR")]
    env_var: Option<String>,

    /// Zone name; default is the domain name of the first sub-domain
    #[arg(short, long, value_name = "NAME")]
    zone: Option<String>,

    /// Sub-domains to update (e.g. www.example.com)
    #[arg(value_name = "SUB_DOMAIN", required = true)]
    sub_domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Token first: if no source yields one, no network call is made.
    let token = TokenSource::from_args(cli.file, cli.env_var).resolve()?;

    let ip = IpDetector::new().detect().await?;

    let zone = cli
        .zone
        .unwrap_or_else(|| derive_zone(&cli.sub_domains[0]));

    let client = CloudflareClient::new(&token)?;

    let mut any_failed = false;

    for record in &cli.sub_domains {
        match client.update_sub_domain(&zone, record, &ip).await {
            Ok(updated) => println!("{}", updated),
            Err(e) => {
                eprintln!("{}: {}", record, e);
                any_failed = true;
            }
        }
    }

    if any_failed {
        std::process::exit(1);
    }

    Ok(())
}
