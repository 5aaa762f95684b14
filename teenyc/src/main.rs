use anyhow::Context;
use clap::Parser;
use teeny::frontend::Compiler;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "teenyc", version, about = "Teeny Tiny compiler")]
struct Cli {
    /// the `.teeny` source file
    source: PathBuf,

    /// where to write the generated C
    #[arg(short, long, default_value = "out.c")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    println!("Teeny Tiny Compiler");

    let compiler = Compiler::new(&args.source, &args.output);
    compiler
        .compile()
        .with_context(|| format!("failed to compile {}", args.source.display()))?;

    log::info!("wrote {}", compiler.output().display());
    println!("Compiling completed.");
    Ok(())
}
