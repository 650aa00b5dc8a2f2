//! The cleanup driver: one head-to-tail sweep over the chunk list.
//!
//! Per chunk, in order: preprocessor boundary handling, directive frame
//! snapshots, language hooks, namespace marking, level stamping, and (for
//! significant chunks) the per-token structural work in [`parse`].

mod complex;
mod parse;
mod vbrace;

use preen_common::{BraceError, ChunkFlags, Context, Diagnostics, Language, TokenKind};

use crate::chunk::{ChunkId, ChunkList};
use crate::frame::{ParseFrame, Stage, StackEntry};
use crate::frame_list::{FrameList, PpKind};
use crate::hooks::PassHooks;

/// Run the brace-cleanup pass over `list`.
///
/// On success the list has final `level`, `brace_level`, `pp_level`,
/// `parent` and flag values on every chunk, and virtual braces around every
/// unbraced body. Recoverable findings land in `diags`; structural errors
/// abort with a [`BraceError`].
pub fn brace_cleanup(
    list: &mut ChunkList,
    ctx: &Context,
    hooks: &mut dyn PassHooks,
    diags: &mut Diagnostics,
) -> Result<(), BraceError> {
    BraceCleanup {
        list,
        ctx,
        hooks,
        diags,
        frm: ParseFrame::new(),
        frames: FrameList::new(),
        in_preproc: PpKind::None,
        pp_level: 0,
        consumed: false,
    }
    .run()
}

pub(crate) struct BraceCleanup<'a> {
    pub(crate) list: &'a mut ChunkList,
    pub(crate) ctx: &'a Context,
    pub(crate) hooks: &'a mut dyn PassHooks,
    pub(crate) diags: &'a mut Diagnostics,
    pub(crate) frm: ParseFrame,
    pub(crate) frames: FrameList,
    pub(crate) in_preproc: PpKind,
    pub(crate) pp_level: u32,
    /// Whether the current chunk was already counted as closing something.
    pub(crate) consumed: bool,
}

impl<'a> BraceCleanup<'a> {
    fn run(mut self) -> Result<(), BraceError> {
        let mut cur = self.list.head();
        while let Some(mut pc) = cur {
            self.consumed = false;

            // Leaving a preprocessor region.
            if !self.list[pc].flags.contains(ChunkFlags::IN_PREPROC)
                && self.in_preproc != PpKind::None
            {
                match self.in_preproc {
                    PpKind::Define => {
                        if self.frm.brace_level != 1 && self.ctx.options.pp_warn_unbalanced_if {
                            let (line, col) = (self.list[pc].line, self.list[pc].col);
                            self.diags
                                .warn(line, col, "unbalanced braces in #define body");
                        }
                        if let Some(saved) = self.frames.pop() {
                            self.frm = saved;
                        }
                    }
                    // The #if body keeps the outer nesting depth.
                    PpKind::If => self.pp_level += 1,
                    _ => {}
                }
                self.in_preproc = PpKind::None;
            }

            // Entering a directive.
            if self.list[pc].kind == TokenKind::Preproc {
                self.preproc_start(pc);
            }

            // Pawn ends statements at newlines.
            if self.ctx.language == Language::Pawn
                && self.frm.top().kind == TokenKind::VbraceOpen
                && self.list[pc].kind == TokenKind::Newline
            {
                pc = self.hooks.pawn_check_vsemicolon(self.list, pc);
            }

            if self.list[pc].kind == TokenKind::Namespace {
                self.mark_namespace(pc);
            }

            {
                let c = &mut self.list[pc];
                c.level = self.frm.level;
                c.brace_level = self.frm.brace_level;
                c.pp_level = self.pp_level;
            }

            let kind = self.list[pc].kind;
            let in_pp = self.list[pc].flags.contains(ChunkFlags::IN_PREPROC);
            // Directive bodies are opaque, except #define which is fully
            // brace-parsed in its private frame.
            if !kind.is_formatting_only() && (!in_pp || self.in_preproc == PpKind::Define) {
                self.parse_cleanup(pc)?;
            }

            cur = self.list.next(pc);
        }

        if self.frm.depth() > 0 {
            let (line, col) = self
                .list
                .tail()
                .map(|t| (self.list[t].line, self.list[t].col))
                .unwrap_or((0, 0));
            self.diags.warn(
                line,
                col,
                format!("{} unclosed construct(s) at end of input", self.frm.depth()),
            );
        }
        Ok(())
    }

    /// Inspect the directive head after a `#` and apply the frame snapshot
    /// protocol.
    fn preproc_start(&mut self, pc: ChunkId) {
        let Some(head) = self.list.next_nc(pc) else {
            return;
        };
        self.in_preproc = PpKind::from_token(self.list[head].kind);
        match self.in_preproc {
            PpKind::Define => {
                // A #define body is parsed in isolation; its default depth
                // is one so top-level macro statements sit inside "a block".
                self.frames.push(self.frm.clone());
                self.frm = ParseFrame::new();
                self.frm.level = 1;
                self.frm.brace_level = 1;
                self.frm.push(StackEntry::new(
                    TokenKind::PpDefine,
                    None,
                    Stage::None,
                    Some(pc),
                ));
            }
            PpKind::If => {
                self.frames.push(self.frm.clone());
            }
            PpKind::Else => {
                // Stash this branch's result under the pre-#if snapshot and
                // restart the new branch from that same snapshot.
                if let Some(pre_if) = self.frames.top().cloned() {
                    let branch = std::mem::replace(&mut self.frm, pre_if);
                    self.frames.push_under_top(branch);
                }
            }
            PpKind::Endif => {
                self.frames.pop();
                self.pp_level = self.pp_level.saturating_sub(1);
            }
            PpKind::None | PpKind::Other => {}
        }
    }

    /// Stamp a `namespace` head: parent links up to the block brace or the
    /// terminating semicolon, plus the long-block marker.
    fn mark_namespace(&mut self, ns: ChunkId) {
        let mut cur = self.list.next_ncnl(ns);
        while let Some(pc) = cur {
            let kind = self.list[pc].kind;
            self.list[pc].parent = Some(TokenKind::Namespace);
            if kind == TokenKind::Semicolon {
                break;
            }
            if kind == TokenKind::BraceOpen {
                self.hooks.flag_parens(
                    self.list,
                    pc,
                    ChunkFlags::IN_NAMESPACE,
                    Some(TokenKind::Namespace),
                );
                let limit = self.ctx.options.indent_namespace_limit;
                if limit > 0 {
                    if let Some(close) = self.list.matching_pair(pc) {
                        if self.list[close].line - self.list[pc].line > limit {
                            self.list[pc].flags.insert(ChunkFlags::LONG_BLOCK);
                        }
                    }
                }
                break;
            }
            cur = self.list.next_ncnl(pc);
        }
    }

    /// Text to show for a chunk in diagnostics; synthesized chunks have no
    /// text of their own.
    pub(crate) fn display_text(&self, pc: ChunkId) -> String {
        let c = &self.list[pc];
        if c.text.is_empty() {
            format!("{:?}", c.kind)
        } else {
            c.text.clone()
        }
    }

    pub(crate) fn err_unexpected_closer(&self, pc: ChunkId) -> BraceError {
        let open_line = self
            .frm
            .top()
            .opener
            .map(|o| self.list[o].line)
            .unwrap_or(0);
        BraceError::UnexpectedCloser {
            file: self.ctx.filename.clone(),
            line: self.list[pc].line,
            col: self.list[pc].col,
            found: self.display_text(pc),
            open_line,
        }
    }
}
