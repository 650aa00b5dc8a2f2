//! Seams to the language-specific auxiliary passes.
//!
//! The brace-cleanup pass delegates a few duties to passes that live
//! elsewhere in the beautifier. They are modeled as a trait so the pass can
//! run standalone (with the defaults below) or wired into the full suite.

use preen_common::{ChunkFlags, TokenKind};

use crate::chunk::{ChunkId, ChunkList};

pub trait PassHooks {
    /// Stamp `flag` (and optionally `parent`) across a bracket region.
    ///
    /// The default walks from `open` to its matching closer and applies the
    /// flag to every chunk in between, which is the part of the delegated
    /// pass this pass depends on.
    fn flag_parens(
        &mut self,
        list: &mut ChunkList,
        open: ChunkId,
        flag: ChunkFlags,
        parent: Option<TokenKind>,
    ) {
        let Some(close) = list.matching_pair(open) else {
            return;
        };
        if let Some(p) = parent {
            list[open].parent = Some(p);
            list[close].parent = Some(p);
        }
        let mut cur = Some(open);
        while let Some(c) = cur {
            list[c].flags.insert(flag);
            if c == close {
                break;
            }
            cur = list.next(c);
        }
    }

    /// Pawn: a newline may terminate a virtual-braced statement. Returns
    /// the chunk the sweep should continue with (possibly a synthesized
    /// semicolon that replaced the newline's role).
    fn pawn_check_vsemicolon(&mut self, _list: &mut ChunkList, pc: ChunkId) -> ChunkId {
        pc
    }

    /// Pawn: insert a virtual semicolon after `pc` when a statement ended
    /// without one. Returns the new chunk, if one was made.
    fn pawn_add_vsemi_after(&mut self, _list: &mut ChunkList, _pc: ChunkId) -> Option<ChunkId> {
        None
    }
}

/// Hook set used when the pass runs outside the full beautifier.
#[derive(Debug, Default)]
pub struct DefaultHooks;

impl PassHooks for DefaultHooks {}
