//! javaprep CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "javaprep",
    version,
    about = "Java interview practice with AI feedback"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated interview and get AI feedback
    Interview {
        /// Path to a question bank .toml file or directory
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Number of questions (default: interview_size from config)
        #[arg(long)]
        count: Option<usize>,

        /// Directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Seed for question sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Browse questions with filters
    Study {
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Exact category title
        #[arg(long)]
        category: Option<String>,

        /// Search the question and reference answer
        #[arg(long)]
        keyword: Option<String>,

        /// Difficulties (comma-separated: easy,medium,hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// Only questions with this status
        #[arg(long)]
        status: Option<String>,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Include reference answers
        #[arg(long)]
        answers: bool,

        /// Progress directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Set the study status of a question
    Mark {
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Question id
        #[arg(long)]
        id: u32,

        /// not_started, learned, needs_review, important
        #[arg(long)]
        status: String,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show study progress
    Progress {
        #[arg(long)]
        bank: Option<PathBuf>,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Review questions as flashcards
    Flashcards {
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Only cards with this status
        #[arg(long)]
        status: Option<String>,

        /// Seed for the card order
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init {
        /// Configure the offline mock evaluator instead of Gemini
        #[arg(long)]
        mock: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("javaprep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Interview {
            bank,
            count,
            output,
            format,
            seed,
        } => commands::interview::execute(config, bank, count, output, format, seed).await,
        Commands::Study {
            bank,
            category,
            keyword,
            difficulty,
            status,
            page,
            answers,
            data_dir,
        } => commands::study::execute(
            config, bank, category, keyword, difficulty, status, page, answers, data_dir,
        ),
        Commands::Mark {
            bank,
            id,
            status,
            data_dir,
        } => commands::mark::execute(config, bank, id, status, data_dir),
        Commands::Progress { bank, data_dir } => {
            commands::progress::execute(config, bank, data_dir)
        }
        Commands::Flashcards {
            bank,
            status,
            seed,
            data_dir,
        } => commands::flashcards::execute(config, bank, status, seed, data_dir),
        Commands::Validate { bank } => commands::validate::execute(config, bank),
        Commands::Init { mock } => commands::init::execute(mock),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
