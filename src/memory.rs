use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mirror;
use crate::word::{self, Word, WORD_BYTES};

/// Number of words in the store, addressed 0..=99.
pub const NUM_MEM_WORDS: usize = 100;
pub const NUM_MEM_BYTES: usize = NUM_MEM_WORDS * WORD_BYTES;

/// Word-addressed access to machine memory. Byte helpers back the string opcodes.
pub trait Bus {
    fn read_word(&mut self, addr: u32) -> Result<Word>;
    fn write_word(&mut self, addr: u32, val: Word) -> Result<()>;
    fn read_bytes(&mut self, byte_addr: u32, len: usize) -> Result<Vec<u8>>;
    fn write_bytes(&mut self, byte_addr: u32, bytes: &[u8]) -> Result<()>;

    /// Persist pending mutations and regenerate any derived views.
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("memory access failed on {}: {source}", .path.display())]
    MemoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("formatted memory access failed on {}: {source}", .path.display())]
    MirrorAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("address {addr:#x} outside the 200-byte store")]
    OutOfRange { addr: u32 },
    #[error("memory file holds {len} bytes, expected 200")]
    Truncated { len: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<u8>,
}

impl Default for LinearMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearMemory {
    pub fn new() -> Self {
        Self {
            mem: vec![0; NUM_MEM_BYTES],
        }
    }

    pub fn from_words(words: &[Word]) -> Result<Self, StoreError> {
        if words.len() != NUM_MEM_WORDS {
            return Err(StoreError::Truncated {
                len: words.len() * WORD_BYTES,
            });
        }
        Ok(Self {
            mem: word::words_to_bytes(words),
        })
    }

    pub fn words(&self) -> Vec<Word> {
        self.mem
            .chunks_exact(WORD_BYTES)
            .map(|c| word::from_bytes([c[0], c[1]]))
            .collect()
    }

    pub fn clear(&mut self) {
        self.mem.fill(0);
    }

    fn check(&self, byte_addr: u32, len: usize) -> Result<usize, StoreError> {
        let off = byte_addr as usize;
        match off.checked_add(len) {
            Some(end) if end <= self.mem.len() => Ok(off),
            _ => Err(StoreError::OutOfRange { addr: byte_addr }),
        }
    }

    /// Saturates so word addresses past the byte range stay out of range.
    fn byte_addr(addr: u32) -> u32 {
        addr.saturating_mul(WORD_BYTES as u32)
    }
}

impl Bus for LinearMemory {
    fn read_word(&mut self, addr: u32) -> Result<Word> {
        let off = self.check(Self::byte_addr(addr), WORD_BYTES)?;
        Ok(word::from_bytes([self.mem[off], self.mem[off + 1]]))
    }
    fn write_word(&mut self, addr: u32, val: Word) -> Result<()> {
        let off = self.check(Self::byte_addr(addr), WORD_BYTES)?;
        self.mem[off..off + WORD_BYTES].copy_from_slice(&word::to_bytes(val));
        Ok(())
    }
    fn read_bytes(&mut self, byte_addr: u32, len: usize) -> Result<Vec<u8>> {
        let off = self.check(byte_addr, len)?;
        Ok(self.mem[off..off + len].to_vec())
    }
    fn write_bytes(&mut self, byte_addr: u32, bytes: &[u8]) -> Result<()> {
        let off = self.check(byte_addr, bytes.len())?;
        self.mem[off..off + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

/// Where the store and its formatted mirror live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePaths {
    pub memory: PathBuf,
    pub mirror: PathBuf,
}

impl Default for StorePaths {
    fn default() -> Self {
        Self {
            memory: PathBuf::from("memory.dat"),
            mirror: PathBuf::from("memory_f.dat"),
        }
    }
}

/// The persistent machine memory: a raw word file plus a formatted mirror.
///
/// Writes land in the in-process copy; `sync` writes the raw file and then
/// regenerates the mirror from it, so the mirror never lags a completed
/// mutation. The mirror is never read back.
#[derive(Debug)]
pub struct MemoryStore {
    paths: StorePaths,
    mem: LinearMemory,
}

impl MemoryStore {
    /// Open an existing raw store file.
    pub fn open(paths: StorePaths) -> Result<Self, StoreError> {
        let bytes = fs::read(&paths.memory).map_err(|source| StoreError::MemoryAccess {
            path: paths.memory.clone(),
            source,
        })?;
        if bytes.len() != NUM_MEM_BYTES {
            return Err(StoreError::Truncated { len: bytes.len() });
        }
        Ok(Self {
            paths,
            mem: LinearMemory { mem: bytes },
        })
    }

    /// Open the store, creating a zeroed one (and its mirror) when the raw file is missing.
    pub fn open_or_create(paths: StorePaths) -> Result<Self, StoreError> {
        if paths.memory.exists() {
            return Self::open(paths);
        }
        let mut store = Self {
            paths,
            mem: LinearMemory::new(),
        };
        store.persist()?;
        Ok(store)
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn words(&self) -> Vec<Word> {
        self.mem.words()
    }

    /// Zero every word, persist and resync.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.mem.clear();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        write_raw(&self.paths.memory, &self.mem.mem)?;
        self.sync_mirror()
    }

    /// Re-render the mirror from the raw file on disk, the authoritative copy.
    pub fn sync_mirror(&self) -> Result<(), StoreError> {
        let raw = fs::read(&self.paths.memory).map_err(|source| StoreError::MemoryAccess {
            path: self.paths.memory.clone(),
            source,
        })?;
        let words = word::bytes_to_words(&raw)
            .filter(|w| w.len() == NUM_MEM_WORDS)
            .ok_or(StoreError::Truncated { len: raw.len() })?;
        fs::write(&self.paths.mirror, mirror::render(&words)).map_err(|source| {
            StoreError::MirrorAccess {
                path: self.paths.mirror.clone(),
                source,
            }
        })?;
        debug!(mirror = %self.paths.mirror.display(), "mirror synced");
        Ok(())
    }
}

fn write_raw(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    fs::write(path, bytes).map_err(|source| StoreError::MemoryAccess {
        path: path.to_path_buf(),
        source,
    })
}

impl Bus for MemoryStore {
    fn read_word(&mut self, addr: u32) -> Result<Word> {
        self.mem.read_word(addr)
    }
    fn write_word(&mut self, addr: u32, val: Word) -> Result<()> {
        self.mem.write_word(addr, val)
    }
    fn read_bytes(&mut self, byte_addr: u32, len: usize) -> Result<Vec<u8>> {
        self.mem.read_bytes(byte_addr, len)
    }
    fn write_bytes(&mut self, byte_addr: u32, bytes: &[u8]) -> Result<()> {
        self.mem.write_bytes(byte_addr, bytes)
    }
    fn sync(&mut self) -> Result<()> {
        Ok(self.persist()?)
    }
}
