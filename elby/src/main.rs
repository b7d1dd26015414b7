use std::fs;

use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, info};

use elby::backends::{Backend, BackendType};
use elby::parser::{parse_source, read_source, tokenize};

#[derive(Parser)]
#[command(name = "elby")]
#[command(about = "Front end for the elby scripting language", version)]
struct Cli {
    /// More logging (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a source file
    Tokens {
        /// Source file
        input: String,
    },

    /// Parse a source file and dump the tree
    Parse {
        /// Source file
        input: String,
    },

    /// Render the tree with one of the backends
    Render {
        /// Source file
        input: String,

        /// Output format
        #[arg(short, long, default_value = "tree")]
        format: String,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List supported output formats
    Formats,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            let tokens = tokenize(&source)?;
            for token in &tokens {
                println!("{:>4}  {}", token.line(), token);
            }
        }
        Commands::Parse { input } => {
            let source = read_source(&input)?;
            parse_source(&source, |ast| println!("{:#?}", ast))?;
        }
        Commands::Render {
            input,
            format,
            output,
        } => {
            let Some(backend_type) = BackendType::from_name(&format) else {
                return Err(format!("unknown format: {}", format).into());
            };

            let source = read_source(&input)?;
            let rendered = parse_source(&source, |ast| backend_type.create().render(ast))?;

            match output {
                Some(path) => {
                    fs::write(&path, &rendered)?;
                    info!("wrote {} bytes to {}", rendered.len(), path);
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Formats => {
            println!("Supported formats:");
            for backend in BackendType::all() {
                println!("  {:8} - {}", backend.name(), backend.description());
            }
        }
    }

    Ok(())
}
