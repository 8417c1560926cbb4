mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use perfsort_ai::Grader;
use perfsort_core::{FailurePolicy, GradeConfig};
use tracing_subscriber::EnvFilter;

/// Grade source files by performance risk with a local LLM and sort them into folders.
#[derive(Parser, Debug)]
#[command(name = "perfsort", version)]
struct Cli {
    /// TOML config file; flags below override its values.
    #[arg(short, long, env = "PERFSORT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory to scan for source files.
    #[arg(short, long, env = "PERFSORT_INPUT")]
    input: Option<PathBuf>,

    /// Directory receiving one folder per category.
    #[arg(short, long, env = "PERFSORT_OUTPUT")]
    output: Option<PathBuf>,

    /// File name suffix to grade, e.g. `.cs`.
    #[arg(short, long, env = "PERFSORT_SUFFIX")]
    suffix: Option<String>,

    /// Generate endpoint URL.
    #[arg(long, env = "PERFSORT_ENDPOINT")]
    endpoint: Option<String>,

    /// Model name passed to the endpoint.
    #[arg(short, long, env = "PERFSORT_MODEL")]
    model: Option<String>,

    /// Number of files graded concurrently.
    #[arg(short, long, env = "PERFSORT_JOBS")]
    jobs: Option<usize>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "PERFSORT_TIMEOUT")]
    timeout: Option<u64>,

    /// Stop at the first file that fails instead of skipping it.
    #[arg(long)]
    fail_fast: bool,
}

impl Cli {
    /// Resolve the effective config: defaults, then the config file, then flags.
    fn into_config(self) -> anyhow::Result<GradeConfig> {
        let mut config = match &self.config {
            Some(path) => GradeConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GradeConfig::default(),
        };

        if let Some(v) = self.input {
            config.input_dir = v;
        }
        if let Some(v) = self.output {
            config.output_dir = v;
        }
        if let Some(v) = self.suffix {
            config.suffix = v;
        }
        if let Some(v) = self.endpoint {
            config.endpoint = v;
        }
        if let Some(v) = self.model {
            config.model = v;
        }
        if let Some(v) = self.jobs {
            config.concurrency = v;
        }
        if let Some(v) = self.timeout {
            config.request_timeout_secs = Some(v);
        }
        if self.fail_fast {
            config.on_error = FailurePolicy::Abort;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("perfsort v{}", env!("CARGO_PKG_VERSION"));

    let config = Cli::parse().into_config()?;
    let grader = Grader::from_config(&config).context("building grader")?;
    let stats = pipeline::run_pipeline(&config, &grader).await?;

    if stats.failed > 0 {
        tracing::warn!(failed = stats.failed, "some files could not be graded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["perfsort"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = parse(&[]).into_config().unwrap();
        assert_eq!(config, GradeConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--input",
            "src",
            "--output",
            "out",
            "--suffix",
            ".rs",
            "--model",
            "qwen2.5-coder:7b",
            "--jobs",
            "3",
            "--timeout",
            "60",
            "--fail-fast",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("src"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.suffix, ".rs");
        assert_eq!(config.model, "qwen2.5-coder:7b");
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.request_timeout_secs, Some(60));
        assert_eq!(config.on_error, FailurePolicy::Abort);
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"from-file\"\nsuffix = \".py\"").unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--model", "from-flag"])
            .into_config()
            .unwrap();
        assert_eq!(config.model, "from-flag");
        assert_eq!(config.suffix, ".py");
    }

    #[test]
    fn zero_jobs_is_rejected() {
        assert!(parse(&["--jobs", "0"]).into_config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = parse(&["--config", "/definitely/not/here.toml"])
            .into_config()
            .unwrap_err();
        assert!(format!("{err:#}").contains("loading config"));
    }
}
