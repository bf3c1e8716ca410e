use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tims_rs::{
    image, load_program, Cpu, CpuConfig, IntExecutor, MemoryStore, StorePaths, StreamConsole,
    TimsDecoder,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Load an assembled TIMS program into memory and run it"
)]
struct Opts {
    /// Word address to load at and start executing from (hex or dec)
    #[arg(short, long, value_parser = parse_u32, default_value = "0")]
    load_addr: u32,
    /// Raw memory store file
    #[arg(long, default_value = "memory.dat")]
    memory: PathBuf,
    /// Formatted memory dump, regenerated on every mutation
    #[arg(long, default_value = "memory_f.dat")]
    mirror: PathBuf,
    /// Keep the current store contents instead of clearing before the load
    #[arg(long)]
    no_clear: bool,
    /// Stop with an error after this many instructions
    #[arg(long)]
    step_limit: Option<u64>,
    /// Print final registers as JSON
    #[arg(long)]
    json: bool,
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let paths = StorePaths {
        memory: opts.memory,
        mirror: opts.mirror,
    };
    let mut store = MemoryStore::open_or_create(paths)?;
    if !opts.no_clear {
        store.clear()?;
    }

    let words = image::read_words(&opts.input)?;
    load_program(&mut store, &words, opts.load_addr)?;
    println!(
        "\nLoaded \"{}\" to TIMS memory word {}\n",
        opts.input.display(),
        opts.load_addr
    );

    let mut cpu = Cpu::new(CpuConfig {
        step_limit: opts.step_limit,
        ..CpuConfig::default()
    });
    cpu.reset(opts.load_addr);

    let dec = TimsDecoder::new();
    let exec = IntExecutor;
    let mut console = StreamConsole::stdio();
    cpu.run(&mut store, &dec, &exec, &mut console)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&cpu)?);
    }
    Ok(())
}
