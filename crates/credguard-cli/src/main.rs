//! CLI entry point for credguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `credguard-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use credguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown,
    render_text, run_check, run_explain, runtime_error_report, serialize_report, to_renderable,
    verdict_exit_code,
};
use credguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "credguard",
    version,
    about = "Service-account credential normalization and validation sensor"
)]
struct Cli {
    /// Path to credguard config TOML.
    #[arg(long, default_value = "credguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|compat or custom).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    /// Override the structural minimum key length.
    #[arg(long)]
    min_key_length: Option<u32>,

    /// Override the structural maximum key length.
    #[arg(long)]
    max_key_length: Option<u32>,

    /// Enable the live authentication probe for this run.
    #[arg(long)]
    test_auth: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a credential and write the JSON report.
    Check {
        /// Read the credential from recognized environment variables.
        #[arg(long)]
        env: bool,

        /// Read the credential from a file (JSON, base64, or PEM-bearing).
        #[arg(long)]
        file: Option<Utf8PathBuf>,

        /// Inline credential JSON text.
        #[arg(long)]
        json: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/credguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/credguard/report.md")]
        markdown_out: Utf8PathBuf,

        /// Print the human-readable report to stdout.
        #[arg(long)]
        print: bool,
    },

    /// Render the human-readable text report from an existing JSON report.
    Report {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/credguard/report.json")]
        report: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/credguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/credguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit (default 10, per GHA best practices).
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "credential.key_structure") or code
        /// (e.g., "WRONG_KEY_TYPE") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            env,
            ref file,
            ref json,
            ref report_out,
            write_markdown,
            ref markdown_out,
            print,
        } => cmd_check(
            &cli,
            env,
            file.clone(),
            json.clone(),
            report_out.clone(),
            write_markdown,
            markdown_out.clone(),
            print,
        ),
        Commands::Report { report } => cmd_report(report),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_check(
    cli: &Cli,
    env: bool,
    file: Option<Utf8PathBuf>,
    json: Option<String>,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
    print: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_findings: cli.max_findings,
            min_key_length: cli.min_key_length,
            max_key_length: cli.max_key_length,
            test_authentication: cli.test_auth.then_some(true),
        };

        let sources_given = usize::from(json.is_some()) + usize::from(file.is_some()) + usize::from(env);
        if sources_given > 1 {
            anyhow::bail!("choose one input source: --env, --file, or --json");
        }

        let input = if let Some(text) = json {
            credguard_source::from_text(text)
        } else if let Some(path) = file {
            credguard_source::load_file(&path).context("load credential file")?
        } else {
            // Default: snapshot the recognized environment variables.
            credguard_source::from_env()
        };

        let output = run_check(CheckInput {
            input,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(&report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if write_markdown {
            let md = render_markdown(&renderable);
            write_text_file(&markdown_out, &md).context("write markdown")?;
        }
        if print {
            print!("{}", render_text(&renderable));
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(&report_out, &report);
            eprintln!("credguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(
    path: &camino::Utf8Path,
    report: &credguard_types::CredguardReport,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_report(report_path: Utf8PathBuf) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    print!("{}", render_text(&to_renderable(&report)));
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let annotations = render_annotations(&to_renderable(&report), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", credguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                credguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
