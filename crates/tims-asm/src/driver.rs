use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tims_rs::word::{self, Word};
use tracing::info;

use crate::encoder::{encode, EncodeError};
use crate::labels::{compile_labels, DanglingLabel, LabelTable};
use crate::lexer::classify;

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("cannot access program file {}: {source}", .path.display())]
    ProgramAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to assemble \"{}\": {errors} errors contained", .path.display())]
    BadProgram { path: PathBuf, errors: usize },
}

/// A rejected source line (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub kind: EncodeError,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} - {}", self.line, self.kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub words: Vec<Word>,
    pub errors: Vec<LineError>,
    pub warnings: Vec<DanglingLabel>,
    pub labels: LabelTable,
}

impl Assembly {
    pub fn is_bad(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `BadProgram` when any line failed; the words must not be used then.
    pub fn check(&self, source: &Path) -> Result<(), AsmError> {
        if self.is_bad() {
            return Err(AsmError::BadProgram {
                path: source.to_path_buf(),
                errors: self.errors.len(),
            });
        }
        Ok(())
    }
}

/// Assemble a whole source text: collect labels, then encode line by line.
/// Line errors are recorded and the pass carries on.
pub fn assemble(source: &str) -> Assembly {
    let pass = compile_labels(source.lines());
    let mut out = Assembly {
        warnings: pass.dangling,
        ..Assembly::default()
    };

    for (idx, line) in source.lines().enumerate() {
        let classified = classify(line);
        match encode(&classified.kind, &pass.table) {
            Ok(words) => out.words.extend(words),
            Err(kind) => out.errors.push(LineError {
                line: idx + 1,
                kind,
            }),
        }
    }
    out.labels = pass.table;
    out
}

/// Assemble `input` into `output`. The output is written even for a bad
/// program; call [`Assembly::check`] before using it.
pub fn assemble_file(input: &Path, output: &Path) -> Result<Assembly, AsmError> {
    let source = fs::read_to_string(input).map_err(|source| AsmError::ProgramAccess {
        path: input.to_path_buf(),
        source,
    })?;
    let assembly = assemble(&source);
    fs::write(output, word::words_to_bytes(&assembly.words)).map_err(|source| {
        AsmError::ProgramAccess {
            path: output.to_path_buf(),
            source,
        }
    })?;
    info!(
        input = %input.display(),
        output = %output.display(),
        words = assembly.words.len(),
        errors = assembly.errors.len(),
        "assembled"
    );
    Ok(assembly)
}

/// `prog.tims` -> `progAsm.tims`, next to the source.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}Asm.{}", ext.to_string_lossy()),
        None => format!("{stem}Asm"),
    };
    input.with_file_name(name)
}
