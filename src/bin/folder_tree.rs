use clap::Parser;
use foldertools::{exit_code_for, FolderTools, OutputFormatter, OutputMode, Tool, TreeCli};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = TreeCli::parse();
    let args = &cli.common;

    if args.generate_config {
        return FolderTools::run_generate_config(Tool::Tree, &args.config_output_path());
    }

    let tools = match FolderTools::from_args(args, Tool::Tree) {
        Ok(tools) => tools,
        Err(e) => {
            OutputFormatter::new(OutputMode::Human, 0, false).print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };

    match tools.print_tree(&args.root, args.dry_run) {
        Ok(_) => 0,
        Err(e) => {
            tools.handle_error(&e);
            exit_code_for(&e)
        }
    }
}
