//! tutorgrade CLI: grade answers, review submissions, and report progress.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::OutputFormat;

#[derive(Parser)]
#[command(name = "tutorgrade", version, about = "Language-exercise grading engine")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one answer against an exercise
    Grade {
        /// Path to .toml exercise set or directory
        #[arg(long)]
        exercise_set: PathBuf,

        /// Exercise id
        #[arg(long)]
        exercise: String,

        /// Answer as JSON (e.g. '["a","c"]', '{"b1":"soy"}', '"Good morning"')
        #[arg(long)]
        answer: String,

        /// Student id (defaults to `default_student` from config)
        #[arg(long)]
        student: Option<String>,

        /// Seconds the student spent on the exercise
        #[arg(long)]
        time_spent: Option<u64>,

        /// Append the submission to the submission log
        #[arg(long)]
        record: bool,

        /// Output format: text, json
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate exercise set TOML files
    Validate {
        /// Path to exercise set file or directory
        #[arg(long)]
        exercise_set: PathBuf,
    },

    /// List submissions awaiting teacher review
    Pending {
        /// Output format: text, json
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Apply a teacher review to a logged submission
    Review {
        /// Submission id
        #[arg(long)]
        id: String,

        /// Awarded points
        #[arg(long)]
        score: f64,

        /// Feedback shown to the student
        #[arg(long)]
        feedback: String,

        /// Reviewer id (defaults to `default_reviewer` from config)
        #[arg(long)]
        reviewer: Option<String>,

        /// Correction annotation (repeatable)
        #[arg(long)]
        correction: Vec<String>,

        /// Suggestion annotation (repeatable)
        #[arg(long)]
        suggestion: Vec<String>,

        /// Praise annotation (repeatable)
        #[arg(long)]
        praise: Vec<String>,
    },

    /// Show progress per student and per exercise
    Stats {
        /// Output format: text, json
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Create starter config and example exercise set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tutorgrade=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command {
        Commands::Grade {
            exercise_set,
            exercise,
            answer,
            student,
            time_spent,
            record,
            format,
        } => commands::grade::execute(commands::grade::GradeArgs {
            exercise_set,
            exercise,
            answer,
            student,
            time_spent,
            record,
            format,
            config: config_path,
        }),
        Commands::Validate { exercise_set } => commands::validate::execute(exercise_set),
        Commands::Pending { format } => commands::pending::execute(format, config_path),
        Commands::Review {
            id,
            score,
            feedback,
            reviewer,
            correction,
            suggestion,
            praise,
        } => commands::review::execute(commands::review::ReviewArgs {
            id,
            score,
            feedback,
            reviewer,
            correction,
            suggestion,
            praise,
            config: config_path,
        }),
        Commands::Stats { format } => commands::stats::execute(format, config_path),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
