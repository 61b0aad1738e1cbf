//! chronobench CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chronobench",
    version,
    about = "Temporal KG question-answering eval harness"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate questions from a fact set without asking any model
    Generate {
        /// Path to .toml fact set file
        #[arg(long)]
        facts: PathBuf,

        /// Question kinds (comma-separated, default: all implemented)
        #[arg(long)]
        kinds: Option<String>,

        /// Distractor years on each side of the interval (yes/no only)
        #[arg(long)]
        falsy_years: Option<u32>,

        /// Ask a yes/no question for every interval year, not only the first
        #[arg(long)]
        all_years: bool,

        /// Drop the "in the year" / "In which year" phrasing
        #[arg(long)]
        no_year_hint: bool,

        /// Keep predicate surface forms instead of lemmas
        #[arg(long)]
        no_lemma: bool,

        /// Where to write the generated questions as JSON (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the full pipeline: generate, ask models, score, summarize
    Run {
        /// Path to .toml fact set file
        #[arg(long)]
        facts: PathBuf,

        /// Models to evaluate (e.g. "huggingface/bigscience/T0pp,mock/mock-model")
        #[arg(long)]
        models: Option<String>,

        /// Question kinds (comma-separated, default: all implemented)
        #[arg(long)]
        kinds: Option<String>,

        /// Max concurrent inference requests
        #[arg(long, default_value = "4")]
        parallelism: usize,

        /// Distractor years on each side of the interval (yes/no only)
        #[arg(long)]
        falsy_years: Option<u32>,

        /// Output directory
        #[arg(long, default_value = "./chronobench-results")]
        output: PathBuf,

        /// Output format: json, markdown, csv, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Treat stored answers as enveloped inference payloads
        #[arg(long)]
        wrapped_answers: bool,
    },

    /// Validate fact set TOML files
    Validate {
        /// Path to fact set file or directory
        #[arg(long)]
        facts: PathBuf,
    },

    /// Compare two run reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example fact set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chronobench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            facts,
            kinds,
            falsy_years,
            all_years,
            no_year_hint,
            no_lemma,
            output,
        } => commands::generate::execute(
            facts,
            kinds,
            falsy_years,
            all_years,
            no_year_hint,
            no_lemma,
            output,
        ),
        Commands::Run {
            facts,
            models,
            kinds,
            parallelism,
            falsy_years,
            output,
            format,
            config,
            wrapped_answers,
        } => {
            commands::run::execute(
                facts,
                models,
                kinds,
                parallelism,
                falsy_years,
                output,
                format,
                config,
                wrapped_answers,
            )
            .await
        }
        Commands::Validate { facts } => commands::validate::execute(facts),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
