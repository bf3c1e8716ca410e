use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use std::path::{Path, PathBuf};

use tims_asm::{assemble_file, default_output_path, Assembly};
use tims_rs::disasm::listing;
use tims_rs::{
    image, load_program, Cpu, CpuConfig, IntExecutor, MemoryStore, StorePaths, StreamConsole,
    TimsDecoder,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "TIMS assembler and machine", long_about=None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file into a flat word image
    Assemble {
        #[arg(value_name = "SRCFILE")]
        input: PathBuf,
        /// Output image (default: <stem>Asm.<ext> next to the source)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Export labels to JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,
    },
    /// Disassemble an assembled image
    List {
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        /// Address printed for the first word (hex or dec)
        #[arg(long, value_parser = parse_u32, default_value = "0")]
        base: u32,
    },
    /// Clear memory, assemble, load and execute
    Run {
        #[arg(value_name = "SRCFILE")]
        input: PathBuf,
        /// Word address to load at and start from (hex or dec)
        #[arg(short, long, value_parser = parse_u32, default_value = "0")]
        load_addr: u32,
        /// Raw memory store file
        #[arg(long, default_value = "memory.dat")]
        memory: PathBuf,
        /// Formatted memory dump
        #[arg(long, default_value = "memory_f.dat")]
        mirror: PathBuf,
        /// Stop with an error after this many instructions
        #[arg(long)]
        step_limit: Option<u64>,
    },
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

/// Print per-line diagnostics, then the outcome banner. Errors out on a bad program.
fn assemble_and_report(input: &Path, output: &Path) -> Result<Assembly> {
    let assembly = assemble_file(input, output)?;
    for w in &assembly.warnings {
        println!("{w}");
    }
    for e in &assembly.errors {
        println!("{e}");
    }
    assembly.check(input)?;
    println!(
        "\nAssembled \"{}\" to \"{}\"\n",
        input.display(),
        output.display()
    );
    Ok(assembly)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble {
            input,
            output,
            symbols,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&input));
            let assembly = assemble_and_report(&input, &output)?;
            if let Some(path) = symbols {
                std::fs::write(path, serde_json::to_string_pretty(&assembly.labels.to_kv())?)?;
            }
        }
        Command::List { input, base } => {
            let words = image::read_words(&input)?;
            for line in listing(&words, base) {
                println!("{line}");
            }
        }
        Command::Run {
            input,
            load_addr,
            memory,
            mirror,
            step_limit,
        } => {
            let mut store = MemoryStore::open_or_create(StorePaths { memory, mirror })?;
            store.clear()?;

            let output = default_output_path(&input);
            let assembly = assemble_and_report(&input, &output)?;

            load_program(&mut store, &assembly.words, load_addr)?;
            println!(
                "\nLoaded \"{}\" to TIMS memory word {}\n",
                output.display(),
                load_addr
            );

            let mut cpu = Cpu::new(CpuConfig {
                step_limit,
                ..CpuConfig::default()
            });
            cpu.reset(load_addr);
            let mut console = StreamConsole::stdio();
            cpu.run(&mut store, &TimsDecoder::new(), &IntExecutor, &mut console)?;
        }
    }
    Ok(())
}
