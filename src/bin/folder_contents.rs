use clap::Parser;
use foldertools::{exit_code_for, ContentsCli, FolderTools, OutputFormatter, OutputMode, Tool};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = ContentsCli::parse();
    let args = &cli.common;

    if args.generate_config {
        return FolderTools::run_generate_config(Tool::Contents, &args.config_output_path());
    }

    let tools = match FolderTools::from_args(args, Tool::Contents) {
        Ok(tools) => tools,
        Err(e) => {
            OutputFormatter::new(OutputMode::Human, 0, false).print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };

    // per-file failures are reported as warnings and never change the exit code
    match tools.extract_contents(&args.root, args.dry_run) {
        Ok(_) => 0,
        Err(e) => {
            tools.handle_error(&e);
            exit_code_for(&e)
        }
    }
}
