//! Brace-cleanup pass for the preen beautifier.
//!
//! The pass receives a flat, doubly-linked sequence of already-lexed chunks
//! and enriches it with the structural information every later formatting
//! stage depends on:
//!
//! - the nesting `level` (all open brackets) and `brace_level` (curly braces
//!   only) of each chunk;
//! - a `parent` annotation attaching every open/close bracket to the
//!   construct it belongs to;
//! - synthetic `VbraceOpen` / `VbraceClose` chunks wherever a control-flow
//!   construct omitted real braces, so later passes treat braced and
//!   unbraced bodies uniformly;
//! - statement- and expression-start flags;
//! - refinement of ambiguous kinds (`ParenOpen` into statement or function
//!   parens, `While` into `WhileOfDo`, `case`/`default`/`break` linked to
//!   their `switch`).
//!
//! # Architecture
//!
//! A bracket-matching stack machine ([`frame::ParseFrame`]) layered with a
//! per-construct state machine (`frame::Stage`), plus a stack of frame
//! snapshots ([`frame_list::FrameList`]) that keeps `#if`/`#else` branches
//! and `#define` bodies from corrupting the surrounding structure. The
//! driver ([`cleanup::brace_cleanup`]) walks the list exactly once;
//! synthesized chunks are picked up by the same sweep.
//!
//! The pass is single-threaded and in-memory. It either completes, records
//! warnings and completes, or aborts with a [`preen_common::BraceError`]
//! (the CLI maps that to exit code 70).

pub mod chunk;
pub mod cleanup;
pub mod frame;
pub mod frame_list;
pub mod hooks;

pub use chunk::{Chunk, ChunkId, ChunkList};
pub use cleanup::brace_cleanup;
pub use hooks::{DefaultHooks, PassHooks};
