use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Find Python modules moved between two branches and rewrite the imports
/// that still point at their old locations
#[derive(Parser, Debug)]
#[command(name = "renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,
}

/// Common path filtering arguments
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Include glob patterns
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// File extensions to rewrite [default: py,pyi]
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Reduce the level of "smart" filtering. Can be repeated.
    /// -u: Don't respect .gitignore files
    /// -uu: Don't respect any ignore files, include hidden files
    #[arg(short = 'u', long = "unrestricted", action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub unrestricted: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two branches and write the list of moved modules
    Analyze {
        /// Root of the git repository to analyze
        project_path: PathBuf,

        /// Branch the modifications are compared against [default: master]
        #[arg(long)]
        compare_with: Option<String>,

        /// Branch holding the modifications [default: current branch]
        #[arg(long)]
        branch: Option<String>,

        /// Where to write the rename list [default: list_output.json]
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Rewrite imports according to a rename list
    Rename {
        /// Project directories (or files) to rewrite
        #[arg(required = true, num_args = 1..)]
        project_paths: Vec<PathBuf>,

        /// Rename list written by `analyze` (or a legacy `imports_to_move = [...]` .py file)
        import_file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Show what would change without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Preview format for changes
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Append a timestamped record of the run to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show version information
    Version {
        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}
