//! The complex-statement state machine: stage transitions driven by the
//! next significant chunk, and the statement-close cascade.

use preen_common::{BraceError, ChunkFlags, Language, TokenKind};

use crate::chunk::ChunkId;
use crate::frame::{Stage, StackEntry};

use super::BraceCleanup;

impl<'a> BraceCleanup<'a> {
    /// React to `pc` while the top of the stack carries a stage. Returns
    /// `Ok(true)` when the chunk was consumed by a transition and needs no
    /// further processing.
    pub(crate) fn check_complex_statements(&mut self, pc: ChunkId) -> Result<bool, BraceError> {
        let kind = self.list[pc].kind;

        // An optional paren either starts now or never.
        if self.frm.top().stage == Stage::OpParen1 {
            self.frm.top_mut().stage = if kind == TokenKind::ParenOpen {
                Stage::Paren1
            } else {
                Stage::Brace2
            };
        }

        // An 'else' extends the finished if; anything else closes it.
        while self.frm.top().stage == Stage::Else {
            if kind == TokenKind::Else {
                let top = self.frm.top_mut();
                top.kind = TokenKind::Else;
                top.stage = Stage::ElseIf;
                return Ok(true);
            }
            self.frm.pop();
            if self.close_statement(pc)? {
                return Ok(true);
            }
        }

        // An 'if' directly after 'else' fuses into a single else-if.
        if self.frm.top().stage == Stage::ElseIf {
            let separated = self.ctx.options.indent_else_if
                && self
                    .list
                    .prev_nc(pc)
                    .map_or(false, |p| self.list[p].kind.is_newline());
            if matches!(kind, TokenKind::If | TokenKind::Elseif) && !separated {
                self.list[pc].kind = TokenKind::Elseif;
                let top = self.frm.top_mut();
                top.kind = TokenKind::Elseif;
                top.stage = Stage::Paren1;
                return Ok(true);
            }
            self.frm.top_mut().stage = Stage::Brace2;
        }

        // A 'catch' or 'finally' extends the finished try/catch.
        while self.frm.top().stage == Stage::Catch {
            if matches!(kind, TokenKind::Catch | TokenKind::Finally) {
                let stage = if kind == TokenKind::Finally {
                    Stage::Brace2
                } else if self.ctx.language == Language::CSharp {
                    Stage::CatchWhen
                } else {
                    Stage::Paren1
                };
                let top = self.frm.top_mut();
                top.kind = kind;
                top.stage = stage;
                return Ok(true);
            }
            self.frm.pop();
            if self.close_statement(pc)? {
                return Ok(true);
            }
        }

        // C# catch: parens and the 'when' filter are both optional.
        if self.frm.top().stage == Stage::CatchWhen {
            match kind {
                TokenKind::ParenOpen | TokenKind::SparenOpen => {
                    self.list[pc].kind = TokenKind::SparenOpen;
                    self.frm.top_mut().stage = Stage::Paren1;
                }
                TokenKind::When => {
                    let top = self.frm.top_mut();
                    top.kind = TokenKind::When;
                    top.stage = Stage::OpParen1;
                    return Ok(true);
                }
                TokenKind::BraceOpen => {
                    self.frm.top_mut().stage = Stage::Brace2;
                }
                _ => {}
            }
        }

        // Only a 'while' may follow a do-body.
        if self.frm.top().stage == Stage::While {
            if matches!(kind, TokenKind::While | TokenKind::WhileOfDo) {
                self.list[pc].kind = TokenKind::WhileOfDo;
                let top = self.frm.top_mut();
                top.kind = TokenKind::WhileOfDo;
                top.stage = Stage::WodParen;
                return Ok(true);
            }
            let (line, col) = (self.list[pc].line, self.list[pc].col);
            let found = self.display_text(pc);
            self.diags
                .warn(line, col, format!("expected 'while', found '{}'", found));
            return Err(BraceError::ExpectedWhile {
                file: self.ctx.filename.clone(),
                line,
                col,
                found,
            });
        }

        // A paren-form statement must open its paren next.
        if self.frm.top().stage == Stage::Paren1
            && !matches!(kind, TokenKind::ParenOpen | TokenKind::SparenOpen)
        {
            let (line, col) = (self.list[pc].line, self.list[pc].col);
            let found = self.display_text(pc);
            self.diags
                .warn(line, col, format!("expected '(', found '{}'", found));
            return Err(BraceError::ExpectedParen {
                file: self.ctx.filename.clone(),
                line,
                col,
                found,
            });
        }

        // No brace where one is required: open a virtual block around the
        // statement, unless we are inside a directive (or the construct is
        // a C# using with the option off).
        if matches!(self.frm.top().stage, Stage::Brace2 | Stage::BraceDo)
            && !matches!(kind, TokenKind::BraceOpen | TokenKind::VbraceOpen)
            && !self.list[pc].flags.contains(ChunkFlags::IN_PREPROC)
            && !(self.frm.top().kind == TokenKind::UsingStmt
                && !self.ctx.options.indent_using_block)
        {
            let parent = self.frm.top().kind;
            let vb = self.insert_vbrace_open_before(pc, parent);
            self.frm.level += 1;
            self.frm.brace_level += 1;
            let mut entry =
                StackEntry::new(TokenKind::VbraceOpen, Some(parent), Stage::None, Some(vb));
            entry.brace_bump = true;
            self.frm.push(entry);
            // The current chunk now sits inside the virtual block and opens
            // its statement.
            let c = &mut self.list[pc];
            c.level = self.frm.level;
            c.brace_level = self.frm.brace_level;
            c.flags
                .insert(ChunkFlags::STMT_START | ChunkFlags::EXPR_START);
            self.frm.stmt_count = 1;
            self.frm.expr_count = 1;
        }

        Ok(false)
    }

    /// A closer just popped and the new top carries a stage: advance it.
    pub(crate) fn handle_complex_close(&mut self, pc: ChunkId) -> Result<bool, BraceError> {
        match self.frm.top().stage {
            Stage::Paren1 => {
                // The statement parens are done; a C# 'when' filter may
                // follow, otherwise the body is next.
                let next_is_when = self
                    .list
                    .next_ncnl(pc)
                    .map_or(false, |n| self.list[n].kind == TokenKind::When);
                self.frm.top_mut().stage = if next_is_when {
                    Stage::CatchWhen
                } else {
                    Stage::Brace2
                };
            }
            Stage::Brace2 => match self.frm.top().kind {
                TokenKind::If | TokenKind::Elseif => {
                    self.frm.top_mut().stage = Stage::Else;
                    let next_is_else = self
                        .list
                        .next_ncnl(pc)
                        .map_or(false, |n| self.list[n].kind == TokenKind::Else);
                    if !next_is_else {
                        self.frm.pop();
                        return self.close_statement(pc);
                    }
                }
                TokenKind::Try | TokenKind::Catch | TokenKind::When => {
                    self.frm.top_mut().stage = Stage::Catch;
                    let next_continues = self.list.next_ncnl(pc).map_or(false, |n| {
                        matches!(self.list[n].kind, TokenKind::Catch | TokenKind::Finally)
                    });
                    if !next_continues {
                        self.frm.pop();
                        return self.close_statement(pc);
                    }
                }
                _ => {
                    self.frm.pop();
                    return self.close_statement(pc);
                }
            },
            Stage::BraceDo => {
                self.frm.top_mut().stage = Stage::While;
            }
            Stage::WodParen => {
                self.frm.top_mut().stage = Stage::WodSemi;
                if self.ctx.language == Language::Pawn {
                    // Pawn statements need no semicolon; synthesize one so
                    // the do-loop closes like everywhere else.
                    let next_is_semi = self
                        .list
                        .next_ncnl(pc)
                        .map_or(false, |n| self.list[n].kind.is_semicolon());
                    if !next_is_semi {
                        self.hooks.pawn_add_vsemi_after(self.list, pc);
                    }
                }
            }
            Stage::WodSemi => {
                if self.consumed {
                    self.list[pc].parent = Some(TokenKind::WhileOfDo);
                }
                self.frm.pop();
                return self.close_statement(pc);
            }
            _ => {}
        }
        Ok(false)
    }

    /// Close the statement ending at `pc`: close any virtual block and let
    /// the enclosing complex statement react.
    pub(crate) fn close_statement(&mut self, pc: ChunkId) -> Result<bool, BraceError> {
        if self.consumed {
            self.frm.stmt_count = 0;
            self.frm.expr_count = 0;
        }
        if self.frm.top().kind == TokenKind::VbraceOpen {
            if self.consumed {
                // The terminator belongs inside the block; the close goes
                // right after it and the sweep will match it next.
                let already_closed = self
                    .list
                    .next(pc)
                    .map_or(false, |n| self.list[n].kind == TokenKind::VbraceClose);
                if !already_closed {
                    let parent = self.frm.top().parent;
                    self.insert_vbrace_close_after(pc, parent);
                }
                return Ok(false);
            }
            // The block ended before this chunk: close it behind us.
            let entry = self.frm.pop();
            let vbc = self.insert_vbrace_close_before(pc, entry.parent);
            self.frm.level -= 1;
            self.frm.brace_level -= 1;
            {
                let c = &mut self.list[vbc];
                c.level = self.frm.level;
                c.brace_level = self.frm.brace_level;
            }
            if self.frm.top().stage != Stage::None {
                return self.handle_complex_close(vbc);
            }
            return Ok(false);
        }
        if self.frm.top().stage != Stage::None {
            return self.handle_complex_close(pc);
        }
        Ok(false)
    }
}
