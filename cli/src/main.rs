#![deny(missing_docs)]

//! # OAS HTML CLI
//!
//! Renders an OpenAPI / Swagger document into one static HTML page.
//!
//! With no arguments it reads `swagger.json` and writes `index.html` in the
//! working directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use oas_html_core::{
    generate, CommonMark, EscapeMode, FsBundler, GeneratorConfig, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Render an OpenAPI document as a static HTML page")]
struct Cli {
    /// Path to the OpenAPI / Swagger document (JSON or YAML).
    #[clap(short, long, env = "OAS_HTML_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the HTML page. Overwritten on success.
    #[clap(short, long, env = "OAS_HTML_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// HTML-escape document strings instead of trusting the document.
    #[clap(long, env = "OAS_HTML_ESCAPE")]
    escape_html: bool,

    /// Log pipeline progress (otherwise `RUST_LOG` applies).
    #[clap(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            escape: EscapeMode::from_flag(self.escape_html),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();

    match generate(&config, &FsBundler::new(), &CommonMark::new()) {
        Ok(path) => {
            println!("Documentation generated: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error generating documentation: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["oas-html"]).unwrap();
        let config = cli.config();
        assert_eq!(config.input, PathBuf::from("swagger.json"));
        assert_eq!(config.output, PathBuf::from("index.html"));
        assert_eq!(config.escape, EscapeMode::Trusted);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "oas-html",
            "-i",
            "api/openapi.yaml",
            "--output",
            "site/api.html",
            "--escape-html",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.input, PathBuf::from("api/openapi.yaml"));
        assert_eq!(config.output, PathBuf::from("site/api.html"));
        assert_eq!(config.escape, EscapeMode::Escaped);
    }
}
