//! Shared vocabulary for the preen beautifier.
//!
//! This crate holds the types every pass speaks: the token kinds produced by
//! the upstream tokenizer and keyword classifier, the per-chunk flag bits,
//! the language toggles, the option set, and the diagnostic types. It has no
//! knowledge of any particular pass; the brace-cleanup pass lives in
//! `preen-braces` and the CLI in `preenc`.

pub mod context;
pub mod diag;
pub mod flags;
pub mod lang;
pub mod options;
pub mod token;

pub use context::Context;
pub use diag::{BraceError, Diagnostic, Diagnostics, Severity};
pub use flags::ChunkFlags;
pub use lang::Language;
pub use options::Options;
pub use token::{PatternClass, TokenKind};
