use crate::error::{FolderToolsError, UserFriendlyError};
use crate::extractor::RunReport;
use crate::ui::progress::format_duration;
use crate::ui::ProgressManager;
use console::{style, Emoji, StyledObject, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

/// Kind of operator message. Decides the stream, the verbosity threshold
/// and how the line is decorated in each mode.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Success,
    Error,
    Warning,
    Operation,
    Debug,
}

impl Level {
    /// `None` means the message is printed even in quiet mode.
    fn threshold(self) -> Option<u8> {
        match self {
            Level::Success | Level::Error => None,
            Level::Warning => Some(0),
            Level::Operation => Some(1),
            Level::Debug => Some(2),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Warning)
    }

    fn json_name(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Operation => "operation_start",
            Level::Debug => "debug",
        }
    }

    fn plain_label(self) -> &'static str {
        match self {
            Level::Success => "SUCCESS",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Operation => "STARTING",
            Level::Debug => "DEBUG",
        }
    }
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Skipped files are reported through here, so it shows by default.
    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Operation, operation);
    }

    pub fn print_user_friendly_error(&self, error: &FolderToolsError) {
        self.error(&error.user_message());

        let Some(suggestion) = error.suggestion() else {
            return;
        };

        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "suggestion",
                "message": suggestion
            })),
            OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            OutputMode::Human if self.use_colors => eprintln!(
                "{}{}",
                INFO,
                style(format!("Suggestion: {}", suggestion)).cyan()
            ),
            OutputMode::Human => eprintln!("Suggestion: {}", suggestion),
        }
    }

    /// Detailed summary shown with `-v`; JSON mode always emits the report.
    pub fn print_run_report(&self, report: &RunReport) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human if self.should_show_message(1) => self.print_human_report(report),
            OutputMode::Plain if self.should_show_message(1) => self.print_plain_report(report),
            _ => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn emit(&self, level: Level, message: &str) {
        if let Some(min) = level.threshold() {
            if !self.should_show_message(min) {
                return;
            }
        }

        let line = match self.mode {
            OutputMode::Json => return self.print_json_message(level.json_name(), message),
            OutputMode::Plain => format!("{}: {}", level.plain_label(), message),
            OutputMode::Human => self.human_line(level, message),
        };

        if level.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn human_line(&self, level: Level, message: &str) -> String {
        if !self.use_colors {
            let prefix = match level {
                Level::Success => "✓ ",
                Level::Error => "✗ ",
                Level::Warning => "! ",
                Level::Operation => "> ",
                Level::Debug => "  DEBUG: ",
            };
            return format!("{}{}", prefix, message);
        }

        let (emoji, styled): (String, StyledObject<&str>) = match level {
            Level::Success => (CHECKMARK.to_string(), style(message).green().bold()),
            Level::Error => (CROSS.to_string(), style(message).red().bold()),
            Level::Warning => (WARNING.to_string(), style(message).yellow()),
            Level::Operation => (ROCKET.to_string(), style(message).bold()),
            Level::Debug => ("  ".to_string(), style(message).dim()),
        };
        format!("{}{}", emoji, styled)
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &RunReport) {
        println!();
        if self.use_colors {
            let title = format!("{} summary", report.tool);
            println!("{} {}", SPARKLES, style(title).bold().cyan());
        } else {
            println!("=== {} summary ===", report.tool);
        }
        println!();

        let rows = [
            ("Directories", report.directories.to_string()),
            ("Files", report.files.to_string()),
            ("Bytes written", format_bytes(report.bytes_written)),
            ("Time taken", format_duration(report.duration)),
        ];

        println!("  {:<14} {}", "Root:", report.root.display());
        if let Some(ref output) = report.output_file {
            println!("  {:<14} {}", "Output file:", output.display());
        }
        for (label, value) in rows {
            println!("  {:<14} {}", format!("{}:", label), self.highlight(value));
        }

        if report.has_skipped() {
            println!();
            println!("Skipped entries:");
            for skipped in &report.skipped {
                println!("  - {}", skipped);
            }
        }

        if self.use_colors {
            println!("{}", style("─".repeat(60)).dim());
        } else {
            println!("{}", "-".repeat(60));
        }
    }

    fn print_plain_report(&self, report: &RunReport) {
        println!("REPORT: {} completed", report.tool);
        println!("Root: {}", report.root.display());
        if let Some(ref output) = report.output_file {
            println!("Output: {}", output.display());
        }
        println!("Directories: {}", report.directories);
        println!("Files: {}", report.files);
        println!("Size: {} bytes", report.bytes_written);
        println!("Duration: {:?}", report.duration);

        if report.has_skipped() {
            println!("Skipped: {}", report.skipped.len());
        }
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Routes messages around an active spinner so lines are not torn.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(formatter: &'a OutputFormatter, progress_manager: Option<&'a ProgressManager>) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        match self.progress_manager {
            Some(pm) => pm.suspend(|| f(self.formatter)),
            None => f(self.formatter),
        }
    }

    pub fn warning(&self, message: &str) {
        self.suspend_and_print(|f| f.warning(message));
    }

    pub fn debug(&self, message: &str) {
        self.suspend_and_print(|f| f.debug(message));
    }
}
