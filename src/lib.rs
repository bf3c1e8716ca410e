pub mod console;
pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod image;
pub mod instructions;
pub mod loader;
pub mod memory;
pub mod mirror;
pub mod word;

pub use console::{Console, StreamConsole};
pub use cpu::{Cpu, CpuConfig, Flow, Trap};
pub use decoder::{Decoded, Decoder, Op, TimsDecoder};
pub use exec::{Executor, IntExecutor};
pub use loader::load_program;
pub use memory::{Bus, LinearMemory, MemoryStore, StoreError, StorePaths, NUM_MEM_WORDS};
pub use word::Word;
