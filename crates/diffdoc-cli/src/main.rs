use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use diffdoc_config::Config;
use diffdoc_engine::{
    Context, Interpreter, ProcessExecutor, Representation, UnifiedPatcher, compile_document,
    convert_document,
};

#[derive(Parser)]
#[command(name = "diffdoc", version)]
#[command(about = "Verify and render literate documents built from evolving code snippets")]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of ~/.config/diffdoc/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a document and print the rendered result
    Compile {
        /// Document to compile
        path: PathBuf,
    },
    /// Rewrite one block between its diff and replace forms
    Convert {
        /// Document containing the block
        path: PathBuf,
        /// Line the block starts on
        #[arg(long)]
        line: usize,
        /// Target form, `diff` or `replace`
        #[arg(long)]
        to: Representation,
        /// Overwrite the document instead of printing the result
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let executor = executor_from_config(&config);
    let context = Context::new(&executor, &UnifiedPatcher);

    match cli.command {
        Command::Compile { path } => {
            let source = read_document(&path)?;
            let output = compile_document(&source, &context)
                .with_context(|| format!("failed to compile {}", path.display()))?;
            print!("{output}");
        }
        Command::Convert {
            path,
            line,
            to,
            write,
        } => {
            let source = read_document(&path)?;
            let converted = convert_document(&source, line, to, &context)
                .with_context(|| format!("failed to convert {}", path.display()))?;
            // Later blocks may depend on the exact text that was rewritten.
            compile_document(&converted, &context).with_context(|| {
                format!("{} no longer compiles after conversion", path.display())
            })?;

            if write {
                fs::write(&path, &converted)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("rewrote line {line} of {} as {to}", path.display());
            } else {
                print!("{converted}");
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let shown = path.map_or_else(Config::config_path, Path::to_path_buf);
    log::info!("Config path: {}", shown.display());
    Ok(Config::load_or_default(path)?)
}

fn executor_from_config(config: &Config) -> ProcessExecutor {
    let mut executor = ProcessExecutor::new(config.execution.timeout());
    for (language, settings) in &config.languages {
        if let Some(interpreter) =
            Interpreter::from_command(&settings.command, settings.extension.clone())
        {
            executor = executor.with_interpreter(language.as_str(), interpreter);
        }
    }
    executor
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
