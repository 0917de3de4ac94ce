use crate::config::{CliOverrides, Config, Tool};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folder-contents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concatenate every file under a directory into one text file")]
#[command(
    long_about = "Walks ROOT, skipping excluded directories and files, and writes each remaining \
                  file as a '--- File: <path> ---' header followed by its contents."
)]
#[command(after_help = "EXAMPLES:\n  \
    folder-contents\n  \
    folder-contents ./frontend --output frontend.txt\n  \
    folder-contents --exclude-dir dist,coverage --exclude-file .env\n  \
    folder-contents --config foldertools.toml -v")]
pub struct ContentsCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "folder-tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write a tree-style listing of a directory to a text file")]
#[command(
    long_about = "Walks ROOT, skipping excluded directories, and writes an indented listing of \
                  every directory and non-excluded file with sorted entries."
)]
#[command(after_help = "EXAMPLES:\n  \
    folder-tree\n  \
    folder-tree ./frontend --output frontend_tree.txt\n  \
    folder-tree --max-depth 2 --dry-run\n  \
    folder-tree --no-default-excludes --exclude-dir .git")]
pub struct TreeCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file (overwritten on every run)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional directory names to prune (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_dir: Option<Vec<String>>,

    /// Additional file names to leave out (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_file: Option<Vec<String>>,

    /// Start from empty exclusion lists instead of the built-in ones
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Maximum number of directory levels to descend below ROOT
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for messages and the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Walk and report without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl CommonArgs {
    pub fn load_config(&self, tool: Tool) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(tool, &overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_file(self.output.clone())
            .with_exclude_dirs(self.exclude_dir.clone())
            .with_exclude_files(self.exclude_file.clone())
            .with_no_default_excludes(self.no_default_excludes)
            .with_max_depth(self.max_depth)
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn config_output_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("foldertools.toml"))
    }
}
