pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{CommonArgs, ContentsCli, OutputFormat, TreeCli};
pub use config::{CliOverrides, Config, ExclusionConfig, Tool, ToolConfig, WalkConfig};
pub use error::{FolderToolsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ContentExtractor, ExtractionProgress, OutputManager, RunReport, SkippedEntry, TreePrinter,
    TreeStats, WalkEvent,
};
pub use scanner::{DirectoryWalker, ExclusionSet, TraversalNode};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use extractor::EventCallback;
use std::path::Path;

/// Runs either utility with a resolved configuration and operator output.
pub struct FolderTools {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl FolderTools {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_args(args: &CommonArgs, tool: Tool) -> Result<Self> {
        let config = args.load_config(tool)?;
        Ok(Self::new(
            config,
            args.output_mode(),
            args.verbosity_level(),
            args.quiet,
        ))
    }

    /// Build the walker for one tool from its exclusion settings.
    pub fn walker_for(&self, tool: Tool) -> Result<DirectoryWalker> {
        let exclusions = ExclusionSet::new(&self.config.tool(tool).exclusions)?;
        Ok(DirectoryWalker::new(exclusions).with_max_depth(self.config.walk.max_depth))
    }

    /// Content Extractor: concatenate every non-excluded file under `root`.
    pub fn extract_contents(&self, root: &Path, dry_run: bool) -> Result<RunReport> {
        let output_file = self.config.contents.output_file.as_path();
        let extractor = ContentExtractor::new(self.walker_for(Tool::Contents)?);

        self.output_formatter
            .start_operation(&format!("Extracting file contents from {}", root.display()));

        let spinner = self.progress_manager.create_walk_spinner("Extracting");
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let on_event: EventCallback<'_> = &|event| {
            ui::progress::update_walk_progress(&spinner, event);
            match event {
                WalkEvent::Skipped(skipped) => output.warning(&skipped.to_string()),
                WalkEvent::File(path) => output.debug(&format!("Added {}", path.display())),
                WalkEvent::Directory(_) => {}
            }
        };

        let progress = if dry_run {
            // an output file left by an earlier run would be skipped for real
            extractor
                .with_output_path(std::fs::canonicalize(output_file).ok())
                .extract(root, &mut std::io::sink(), Some(on_event))
        } else {
            extractor.extract_to_file(root, output_file, Some(on_event))
        };
        let progress = match progress {
            Ok(progress) => progress,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("Extracted {} files", progress.files_processed),
            progress.elapsed(),
        );
        self.progress_manager.clear();

        if dry_run {
            self.output_formatter.success(&format!(
                "Dry run: {} files would be extracted to {}",
                progress.files_processed,
                output_file.display()
            ));
        } else {
            self.output_formatter.success(&format!(
                "File contents extracted to {}",
                output_file.display()
            ));
        }

        let written_to = (!dry_run).then_some(output_file);
        let report = RunReport::from_extraction(root, written_to, &progress);
        self.output_formatter.print_run_report(&report);

        Ok(report)
    }

    /// Tree Printer: write a sorted, indented listing of `root`. A dry run
    /// prints the tree to stdout instead of the output file.
    pub fn print_tree(&self, root: &Path, dry_run: bool) -> Result<RunReport> {
        let output_file = self.config.tree.output_file.as_path();
        let printer = TreePrinter::new(self.walker_for(Tool::Tree)?);

        self.output_formatter
            .start_operation(&format!("Generating folder tree for {}", root.display()));

        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let on_event: EventCallback<'_> = &|event| {
            if let WalkEvent::Skipped(skipped) = event {
                output.warning(&skipped.to_string());
            }
        };

        let stats = if dry_run {
            let (listing, stats) = printer.render_to_string(root, Some(on_event))?;
            if self.output_formatter.mode() != OutputMode::Json {
                print!("{}", listing);
            }
            stats
        } else {
            printer.render_to_file(root, output_file, Some(on_event))?
        };

        if dry_run {
            self.output_formatter.success(&format!(
                "Dry run: {} directories and {} files listed",
                stats.directories, stats.files
            ));
        } else {
            self.output_formatter.success(&format!(
                "Folder tree structure generated to {}",
                output_file.display()
            ));
        }

        let written_to = (!dry_run).then_some(output_file);
        let report = RunReport::from_tree(root, written_to, &stats);
        self.output_formatter.print_run_report(&report);

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// `--generate-config` for either binary. Returns the process exit code.
    pub fn run_generate_config(tool: Tool, path: &Path) -> i32 {
        match Self::generate_sample_config(path) {
            Ok(()) => {
                println!("Generated sample configuration file: {}", path.display());
                println!("\nTo use this configuration:");
                println!("  {} --config {}", tool.name(), path.display());
                0
            }
            Err(e) => {
                eprintln!("Failed to generate configuration file: {}", e.user_message());
                if let Some(suggestion) = e.suggestion() {
                    eprintln!("Suggestion: {}", suggestion);
                }
                1
            }
        }
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &FolderToolsError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Exit code for a fatal error. Skipped files never reach this point: a run
/// that completes exits 0.
pub fn exit_code_for(error: &FolderToolsError) -> i32 {
    match error {
        FolderToolsError::RootNotFound { .. } | FolderToolsError::RootNotDirectory { .. } => 2,
        FolderToolsError::Config { .. } | FolderToolsError::InvalidPattern { .. } => 3,
        _ => 1,
    }
}
