//! Command-line definitions for `qa-gates`.

use clap::{ArgAction, Parser, Subcommand};
use qg_protocol::status::GateStatus;
use std::path::{Path, PathBuf};

/// Evaluate QA quality gates and promote validated templates.
#[derive(Parser, Debug)]
#[command(name = "qa-gates")]
#[command(about = "QA quality gate evaluation and stage promotion", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root holding `.qa-gates/config.toml`. Relative paths in
    /// other arguments are resolved against it.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolves `path` against `--root` unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score scanner output against the quality gates
    ///
    /// Exits 0 when every gate passed, 1 otherwise.
    Evaluate {
        /// Directory containing one subdirectory per gate area
        #[arg(long, default_value = "qa-results")]
        results_root: PathBuf,

        /// Security scanner output [default: <results-root>/security]
        #[arg(long)]
        security_results: Option<PathBuf>,

        /// Compliance reports [default: <results-root>/compliance]
        #[arg(long)]
        compliance_results: Option<PathBuf>,

        /// Code quality reports [default: <results-root>/quality]
        #[arg(long)]
        quality_results: Option<PathBuf>,

        /// Performance baseline [default: <results-root>/performance]
        #[arg(long)]
        performance_results: Option<PathBuf>,

        /// Where to write the evaluation document
        #[arg(short, long, default_value = "reports/qa-evaluation.json")]
        output: PathBuf,
    },

    /// Check the overall status of a stored evaluation
    ///
    /// Prints the bare status as the last line. Exits 0 only for PASSED.
    Status {
        #[arg(long, default_value = "reports/qa-evaluation.json")]
        evaluation_file: PathBuf,
    },

    /// Write the promotion report for an evaluation
    Report {
        #[arg(long, default_value = "reports/qa-evaluation.json")]
        qa_evaluation: PathBuf,

        /// Target stage [default: promotion.target_stage from config]
        #[arg(long)]
        target: Option<String>,

        /// Promotion decision to record (PASSED, FAILED, ...)
        #[arg(long)]
        status: GateStatus,

        #[arg(short, long, default_value = "reports/qa-promotion-report.json")]
        output: PathBuf,
    },

    /// Promote templates to the next stage
    ///
    /// Exits 0 only when every template was promoted.
    Promote {
        #[arg(long)]
        source_dir: PathBuf,

        #[arg(long)]
        target_dir: PathBuf,

        /// Evaluation document authorising the promotion
        #[arg(long)]
        qa_results: PathBuf,
    },

    /// Summarise the task list in a markdown file
    Checklist {
        file: PathBuf,

        /// Print the parsed items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a starter `.qa-gates/` directory
    Init {
        /// Overwrite an existing `.qa-gates/` directory
        #[arg(long)]
        force: bool,

        /// Only write `config.toml`
        #[arg(long)]
        minimal: bool,
    },
}
