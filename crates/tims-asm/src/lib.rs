pub mod driver;
pub mod encoder;
pub mod labels;
pub mod lexer;

// Re-export commonly used types/functions for the CLI and tests
pub use driver::{assemble, assemble_file, default_output_path, AsmError, Assembly, LineError};
pub use encoder::{encode, parse_literal, EncodeError};
pub use labels::{compile_labels, DanglingLabel, LabelTable, NoLabel};
pub use lexer::{classify, Classified, LineKind};
