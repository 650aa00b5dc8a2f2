//! Virtual-brace synthesis.
//!
//! Virtual braces carry no text; they anchor to a neighboring real chunk
//! and inherit its position (line, column past its end) and the flag subset
//! tagged for copying. The rewind rules keep trivia attached to the right
//! side of the block and never cross a preprocessor boundary.

use preen_common::{ChunkFlags, TokenKind};

use crate::chunk::{Chunk, ChunkId};

use super::BraceCleanup;

impl<'a> BraceCleanup<'a> {
    /// Insert a `VbraceOpen` in front of `pc`, rewinding past comments and
    /// newlines so they land inside the new block.
    pub(crate) fn insert_vbrace_open_before(&mut self, pc: ChunkId, parent: TokenKind) -> ChunkId {
        let in_pp = self.list[pc].flags.contains(ChunkFlags::IN_PREPROC);
        let mut anchor = self.list.prev(pc);
        while let Some(a) = anchor {
            let k = self.list[a].kind;
            if !(k.is_comment() || k.is_newline()) {
                break;
            }
            if self.list[a].flags.contains(ChunkFlags::IN_PREPROC) != in_pp {
                break;
            }
            // Pull the trivia into the block.
            self.list[a].level += 1;
            self.list[a].brace_level += 1;
            anchor = self.list.prev(a);
        }

        let vb = self.vbrace_chunk(TokenKind::VbraceOpen, Some(parent), pc, anchor);
        match anchor {
            Some(a) => self.list.insert_after(a, vb),
            None => {
                let head = self.list.head().expect("pc is in the list");
                self.list.insert_before(head, vb)
            }
        }
    }

    /// Insert a `VbraceClose` directly after `after`. Levels are stamped by
    /// the caller once the frame has been adjusted.
    pub(crate) fn insert_vbrace_close_after(
        &mut self,
        after: ChunkId,
        parent: Option<TokenKind>,
    ) -> ChunkId {
        let vb = self.vbrace_chunk(TokenKind::VbraceClose, parent, after, Some(after));
        self.list.insert_after(after, vb)
    }

    /// Insert a `VbraceClose` in front of `pc`, rewinding past comments and
    /// newlines so they land after (outside) the closed block.
    pub(crate) fn insert_vbrace_close_before(
        &mut self,
        pc: ChunkId,
        parent: Option<TokenKind>,
    ) -> ChunkId {
        let in_pp = self.list[pc].flags.contains(ChunkFlags::IN_PREPROC);
        let mut anchor = self.list.prev(pc);
        while let Some(a) = anchor {
            let k = self.list[a].kind;
            if !(k.is_comment() || k.is_newline()) {
                break;
            }
            if self.list[a].flags.contains(ChunkFlags::IN_PREPROC) != in_pp {
                break;
            }
            // The trivia moves back out of the block.
            self.list[a].level = self.list[a].level.saturating_sub(1);
            self.list[a].brace_level = self.list[a].brace_level.saturating_sub(1);
            anchor = self.list.prev(a);
        }

        let anchor = anchor.expect("a virtual open precedes the close");
        let vb = self.vbrace_chunk(TokenKind::VbraceClose, parent, pc, Some(anchor));
        self.list.insert_after(anchor, vb)
    }

    /// Build a virtual brace chunk anchored to `anchor` (position) and
    /// `flags_from` (inherited flags).
    fn vbrace_chunk(
        &self,
        kind: TokenKind,
        parent: Option<TokenKind>,
        flags_from: ChunkId,
        anchor: Option<ChunkId>,
    ) -> Chunk {
        let (line, col) = match anchor {
            Some(a) => {
                let c = &self.list[a];
                (c.line, c.col + c.text.len() as u32)
            }
            None => (self.list[flags_from].line, 1),
        };
        let mut vb = Chunk::new(kind, "", line, col);
        vb.parent = parent;
        vb.level = self.frm.level;
        vb.brace_level = self.frm.brace_level;
        vb.pp_level = self.pp_level;
        vb.flags = self.list[flags_from].flags & ChunkFlags::COPY_FLAGS;
        vb
    }
}
