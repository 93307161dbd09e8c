mod app;
mod config;
mod logging;
mod media;
mod render;
mod runner;

use std::path::PathBuf;

use analyzer_core::UploadOptions;
use clap::{Parser, Subcommand};

use crate::app::SummarizeSource;

#[derive(Parser)]
#[command(name = "analyzer", about = "Terminal client for the paper analysis service")]
struct Cli {
    /// Path to the RON config file.
    #[arg(long, default_value = ".analyzer.ron")]
    config: PathBuf,

    /// Override the backend base URL from the config.
    #[arg(long)]
    backend: Option<String>,

    /// Also write logs to ./analyzer.log.
    #[arg(long)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit papers for full analysis.
    Upload {
        /// PDF or image files to upload.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Extract questions from the papers.
        #[arg(long)]
        extract_questions: bool,

        /// Analyze question difficulty.
        #[arg(long)]
        difficulty_analysis: bool,

        /// Classify questions by topic.
        #[arg(long)]
        topic_classification: bool,

        /// Suggest answers for extracted questions.
        #[arg(long)]
        answer_suggestions: bool,
    },
    /// Extract text from one file and predict its topics.
    Analyze {
        /// PDF or image file to analyze.
        file: PathBuf,
    },
    /// Summarize raw text or a file.
    Summarize {
        /// Text to summarize.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// File to summarize.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log_file);

    let mut config = config::load_config(&cli.config);
    if let Some(backend) = cli.backend {
        config.backend_url = backend;
    }

    match cli.command {
        Command::Upload {
            files,
            extract_questions,
            difficulty_analysis,
            topic_classification,
            answer_suggestions,
        } => {
            // CLI flags add to whatever the config pre-checks.
            let defaults = config.upload_options();
            let options = UploadOptions {
                extract_questions: defaults.extract_questions || extract_questions,
                difficulty_analysis: defaults.difficulty_analysis || difficulty_analysis,
                topic_classification: defaults.topic_classification || topic_classification,
                answer_suggestions: defaults.answer_suggestions || answer_suggestions,
            };
            app::run_upload(&config, &files, options)
        }
        Command::Analyze { file } => app::run_analyze(&config, &file),
        Command::Summarize { text, file } => {
            let source = match (text, file) {
                (Some(text), None) => SummarizeSource::Text(text),
                (None, Some(path)) => SummarizeSource::File(path),
                // clap enforces exactly one of the two.
                _ => anyhow::bail!("pass exactly one of --text or --file"),
            };
            app::run_summarize(&config, source)
        }
    }
}
