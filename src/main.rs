use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use k8s_annotation_values::inspect::{inspect_object, read_manifests};
use k8s_annotation_values::schema::KeySpec;

mod config;

use crate::config::Settings;

/// Parse typed annotations from Kubernetes manifests
#[derive(Parser, Debug)]
#[command(name = "annotation-inspect", version, about)]
struct Args {
    /// Manifest file, or - for stdin
    manifest: PathBuf,

    /// Settings file (yaml, json or toml)
    #[arg(short, long, env = "ANNOTATION_INSPECT_CONFIG")]
    config: Option<PathBuf>,

    /// Annotation to read, added to the keys from the settings file
    #[arg(short, long = "key", value_name = "KEY=TYPE")]
    keys: Vec<KeySpec>,

    /// Pretty print the JSON reports
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = Settings::new(args.config.as_deref())?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        settings
            .log_filter
            .clone()
            .unwrap_or_else(|| "k8s_annotation_values=info,annotation_inspect=info".into())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    #[cfg(debug_assertions)]
    warn!("Debug assertions enabled");

    settings.keys.extend(args.keys);
    if settings.keys.is_empty() {
        bail!("no annotation keys given, use --key KEY=TYPE or a settings file");
    }
    debug!("inspecting {} annotation keys", settings.keys.len());

    let input = if args.manifest.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("unable to read manifest from stdin")?;
        input
    } else {
        std::fs::read_to_string(&args.manifest)
            .with_context(|| format!("unable to read {}", args.manifest.display()))?
    };

    let objects = read_manifests(&input).context("unable to parse manifest")?;
    info!("read {} objects", objects.len());

    for object in &objects {
        let report = inspect_object(object, &settings.keys);
        let output = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{output}");
    }

    Ok(())
}
