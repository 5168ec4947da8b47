//! WSR-88D file inspector.
//!
//! Decodes Level II archives (AR2V) and Level III product files and prints
//! a summary of each:
//! - Volume header, VCP and message counts for archives
//! - Per-elevation radial counts and available moments
//! - WMO/AWIPS identifiers, product code and blocks for products

mod summary;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use summary::{ArchiveSummary, InputKind, ProductSummary, Summary};
use wsr88d_parser::{DecoderConfig, Level2File, Level3File};

#[derive(Parser, Debug)]
#[command(name = "wsr88d-inspect")]
#[command(about = "Inspect WSR-88D Level II archives and Level III products")]
struct Args {
    /// Files to decode
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print summaries as JSON, one object per line
    #[arg(long)]
    json: bool,

    /// Reject VCP messages whose size field disagrees with their cuts
    #[arg(long)]
    strict_vcp_size: bool,

    /// Keep messages without a decoder in archive output
    #[arg(long)]
    keep_unrecognized: bool,

    /// Upper bound on a reassembled multi-segment message, bytes
    #[arg(long)]
    max_reassembly_bytes: Option<usize>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// `WSR88D_*` environment defaults, then command-line overrides.
    fn decoder_config(&self) -> Result<DecoderConfig> {
        let mut config = DecoderConfig::from_env();
        if self.strict_vcp_size {
            config.strict_vcp_size = true;
        }
        if self.keep_unrecognized {
            config.skip_unrecognized = false;
        }
        if let Some(max) = self.max_reassembly_bytes {
            config.max_reassembly_bytes = max;
        }
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid decoder configuration: {}", e))?;
        Ok(config)
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn inspect(path: &Path, config: &DecoderConfig) -> Result<Summary> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data = Bytes::from(data);

    let summary = match InputKind::detect(&data) {
        InputKind::Level2Archive => {
            let file = Level2File::from_bytes(data, config)
                .with_context(|| format!("Failed to decode archive {}", path.display()))?;
            info!(
                path = %path.display(),
                messages = file.records.len(),
                "Decoded Level II archive"
            );
            Summary::Archive(ArchiveSummary::from_file(&file))
        }
        InputKind::Level3Product => {
            let file = Level3File::from_bytes(data)
                .with_context(|| format!("Failed to decode product {}", path.display()))?;
            info!(
                path = %path.display(),
                product = ?file.product_code(),
                "Decoded Level III product"
            );
            Summary::Product(ProductSummary::from_file(&file))
        }
    };
    Ok(summary)
}

fn main() -> Result<ExitCode> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let config = args.decoder_config()?;
    info!(?config, files = args.files.len(), "Starting inspection");

    let mut failures = 0usize;
    for path in &args.files {
        match inspect(path, &config) {
            Ok(summary) if args.json => println!("{}", serde_json::to_string(&summary)?),
            Ok(summary) => {
                println!("{}:", path.display());
                print!("{}", summary);
            }
            Err(e) => {
                error!(path = %path.display(), error = %format!("{:#}", e), "Inspection failed");
                eprintln!("{}: {:#}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        archive_file, level3_file, moment_block, temp_test_dir, write_test_file, GenericRadial,
        GraphicProductBuilder,
    };

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "wsr88d-inspect",
            "--strict-vcp-size",
            "--keep-unrecognized",
            "--max-reassembly-bytes",
            "65536",
            "volume.ar2v",
        ]);
        let config = args.decoder_config().unwrap();

        assert!(config.strict_vcp_size);
        assert!(!config.skip_unrecognized);
        assert_eq!(config.max_reassembly_bytes, 65536);
        assert_eq!(args.files, vec![PathBuf::from("volume.ar2v")]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let args = Args::parse_from(["wsr88d-inspect", "--max-reassembly-bytes", "0", "x"]);
        assert!(args.decoder_config().is_err());
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["wsr88d-inspect"]).is_err());
    }

    #[test]
    fn test_inspect_detects_file_kind() {
        let dir = temp_test_dir();
        let config = DecoderConfig::default();

        let archive = write_test_file(
            dir.path(),
            "KTLX_V06",
            &archive_file(&[GenericRadial::with_moments(vec![moment_block(
                "REF",
                8,
                &[2, 3],
                2.0,
                66.0,
            )])
            .encode()]),
        );
        assert!(matches!(
            inspect(&archive, &config).unwrap(),
            Summary::Archive(_)
        ));

        let product = write_test_file(
            dir.path(),
            "sn.last",
            &level3_file("N0QTLX", &GraphicProductBuilder::new(94).build()),
        );
        assert!(matches!(
            inspect(&product, &config).unwrap(),
            Summary::Product(_)
        ));

        let missing = dir.path().join("missing");
        let err = inspect(&missing, &config).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
    }
}
