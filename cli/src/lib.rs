pub mod headless;
pub mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use slidesynth_common::SynthConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "slidesynth")]
#[command(about = "Transform PDFs into presentation slides with AI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Backend base URL (e.g., http://127.0.0.1:5000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive upload and slide browser
    Interactive {
        /// PDF to upload right away
        file: Option<PathBuf>,
    },
    /// Check that the backend is reachable
    Health,
    /// Upload a PDF and print the generated slides
    Upload {
        /// Path to the PDF
        file: PathBuf,
        /// Also download the generated presentation
        #[arg(long)]
        download: bool,
        /// Directory to save the presentation into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Download the presentation generated for an uploaded PDF
    Download {
        /// Name of the uploaded PDF, e.g. deck.pdf
        filename: String,
        /// Directory to save the presentation into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli).await?;

    let interactive = matches!(cli.command, None | Some(Commands::Interactive { .. }));
    logging::init(&config, cli.debug, interactive)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Interactive { file }) => {
            slidesynth_tui::run_interactive(&config, file).await?;
        }
        Some(Commands::Health) => {
            headless::health(&config).await?;
        }
        Some(Commands::Upload {
            file,
            download,
            out,
        }) => {
            let out = out.unwrap_or_else(|| config.download_dir.clone());
            headless::upload(&config, file, download, out).await?;
        }
        Some(Commands::Download { filename, out }) => {
            let out = out.unwrap_or_else(|| config.download_dir.clone());
            headless::download(&config, &filename, &out).await?;
        }
        None => {
            // Default to interactive mode
            slidesynth_tui::run_interactive(&config, None).await?;
        }
    }

    Ok(())
}

/// Config file, then `SLIDESYNTH_*` variables, then command line flags.
pub async fn load_config(cli: &Cli) -> Result<SynthConfig> {
    let config = match &cli.config {
        Some(path) => SynthConfig::load_from(path).await?,
        None => SynthConfig::load().await?,
    };
    let mut config = config.apply_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_flags() {
        let cli = Cli::try_parse_from([
            "slidesynth",
            "--api-url",
            "http://backend:5000",
            "upload",
            "deck.pdf",
            "--download",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:5000"));
        match cli.command {
            Some(Commands::Upload {
                file,
                download,
                out,
            }) => {
                assert_eq!(file, PathBuf::from("deck.pdf"));
                assert!(download);
                assert_eq!(out, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_command_means_interactive() {
        let cli = Cli::try_parse_from(["slidesynth", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SynthConfig {
            api_url: "http://from-file:5000".into(),
            ..Default::default()
        }
        .save_to(&path)
        .await
        .unwrap();

        let cli = Cli::try_parse_from([
            "slidesynth",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "http://from-flag:5000",
            "health",
        ])
        .unwrap();
        let config = load_config(&cli).await.unwrap();
        assert_eq!(config.api_url, "http://from-flag:5000");
    }
}
