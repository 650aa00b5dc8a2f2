//! Per-chunk structural work: statement/expression marking, flag
//! propagation, bracket matching, and open reclassification.

use preen_common::{BraceError, ChunkFlags, Language, PatternClass, TokenKind};

use crate::chunk::ChunkId;
use crate::frame::{Stage, StackEntry};

use super::BraceCleanup;

impl<'a> BraceCleanup<'a> {
    pub(crate) fn parse_cleanup(&mut self, pc: ChunkId) -> Result<(), BraceError> {
        self.mark_statement_start(pc);
        self.mark_sparen_contents(pc);
        self.link_to_switch(pc);

        // Advance the complex-statement machine; it may consume the chunk.
        if self.frm.top().stage != Stage::None && self.check_complex_statements(pc)? {
            return Ok(());
        }

        // In D, a closing brace also ends any open virtual braces.
        if self.ctx.language == Language::D {
            while self.list[pc].kind == TokenKind::BraceClose
                && self.frm.top().kind == TokenKind::VbraceOpen
            {
                if self.close_statement(pc)? {
                    return Ok(());
                }
            }
        }

        self.handle_closer(pc)?;
        self.handle_opener(pc);
        self.push_pattern_entry(pc);
        self.reset_counts(pc);

        // A statement terminator outside any paren closes pending virtual
        // blocks and complex statements.
        if self.list[pc].kind.is_semicolon()
            && !self.list[pc].flags.contains(ChunkFlags::IN_SPAREN)
        {
            self.consumed = true;
            self.close_statement(pc)?;
        }
        Ok(())
    }

    /// Flag the first chunk of each statement and expression.
    fn mark_statement_start(&mut self, pc: ChunkId) {
        let kind = self.list[pc].kind;
        let at_boundary = self.frm.stmt_count == 0 || self.frm.expr_count == 0;
        let closes_something = kind.is_semicolon()
            || matches!(
                kind,
                TokenKind::BraceClose
                    | TokenKind::VbraceClose
                    | TokenKind::ParenClose
                    | TokenKind::SparenClose
                    | TokenKind::FparenClose
                    | TokenKind::SquareClose
            );
        if at_boundary && !closes_something {
            let mut add = ChunkFlags::EXPR_START;
            if self.frm.stmt_count == 0 {
                add |= ChunkFlags::STMT_START;
            }
            self.list[pc].flags.insert(add);
        }
        self.frm.stmt_count += 1;
        self.frm.expr_count += 1;
    }

    /// Everything inside a statement paren carries `IN_SPAREN`; inside a
    /// `for` header also `IN_FOR`, and its semicolons get parent `For`.
    fn mark_sparen_contents(&mut self, pc: ChunkId) {
        if self.frm.sparen_count == 0 {
            return;
        }
        self.list[pc].flags.insert(ChunkFlags::IN_SPAREN);
        if self.frm.iter_open().any(|e| e.kind == TokenKind::For) {
            self.list[pc].flags.insert(ChunkFlags::IN_FOR);
        }
        if self.list[pc].kind.is_semicolon()
            && self.frm.top().kind == TokenKind::SparenOpen
            && self.frm.prev().map(|e| e.kind) == Some(TokenKind::For)
        {
            self.list[pc].parent = Some(TokenKind::For);
        }
    }

    /// `case`/`default`/`break` link to the nearest enclosing `switch`.
    fn link_to_switch(&mut self, pc: ChunkId) {
        let kind = self.list[pc].kind;
        if !matches!(
            kind,
            TokenKind::Case | TokenKind::Default | TokenKind::Break
        ) {
            return;
        }
        let Some(sw) = self
            .frm
            .iter_open()
            .find(|e| e.kind == TokenKind::Switch)
            .and_then(|e| e.opener)
        else {
            return;
        };
        self.list[pc].parent_chunk = Some(sw);
        if kind != TokenKind::Break {
            self.list[pc].parent = Some(TokenKind::Switch);
        }
    }

    /// Validate and pop a closing bracket.
    fn handle_closer(&mut self, pc: ChunkId) -> Result<(), BraceError> {
        let kind = self.list[pc].kind;
        // Virtual closes are accounted when synthesized; everything else
        // must match the innermost open bracket.
        if !matches!(
            kind,
            TokenKind::ParenClose
                | TokenKind::SparenClose
                | TokenKind::FparenClose
                | TokenKind::SquareClose
                | TokenKind::AngleClose
                | TokenKind::BraceClose
                | TokenKind::VbraceClose
                | TokenKind::MacroClose
        ) {
            return Ok(());
        }

        // A bare ')' takes the refined kind of whichever paren it closes.
        if kind == TokenKind::ParenClose
            && matches!(
                self.frm.top().kind,
                TokenKind::SparenOpen | TokenKind::FparenOpen
            )
        {
            let refined = self
                .frm
                .top()
                .kind
                .matching_closer()
                .expect("paren kinds pair");
            self.list[pc].kind = refined;
        }

        let kind = self.list[pc].kind;
        if self.frm.top().kind.matching_closer() != Some(kind) {
            let (line, col) = (self.list[pc].line, self.list[pc].col);
            let msg = format!(
                "unexpected '{}' for the bracket opened on line {}",
                self.display_text(pc),
                self.frm
                    .top()
                    .opener
                    .map(|o| self.list[o].line)
                    .unwrap_or(0)
            );
            self.diags.warn(line, col, msg);
            // Preprocessor regions frequently disagree on balance (an
            // #if/#else pair may close a brace the other branch opened);
            // outside one this is fatal.
            if !self.list[pc].flags.contains(ChunkFlags::IN_PREPROC) {
                return Err(self.err_unexpected_closer(pc));
            }
            return Ok(());
        }

        self.consumed = true;
        let entry = self.frm.pop();
        if entry.kind == TokenKind::SparenOpen {
            self.frm.sparen_count -= 1;
            self.list[pc].flags.remove(ChunkFlags::IN_SPAREN);
        }
        self.frm.level -= 1;
        if entry.brace_bump {
            self.frm.brace_level -= 1;
        }
        {
            let c = &mut self.list[pc];
            c.parent = entry.parent;
            c.level = self.frm.level;
            c.brace_level = self.frm.brace_level;
        }
        if self.frm.top().stage != Stage::None {
            self.handle_complex_close(pc)?;
        }
        Ok(())
    }

    /// Reclassify and push an opening bracket.
    fn handle_opener(&mut self, pc: ChunkId) {
        let kind = self.list[pc].kind;
        let mut parent = self.list[pc].parent;

        if matches!(
            kind,
            TokenKind::ParenOpen
                | TokenKind::SparenOpen
                | TokenKind::FparenOpen
                | TokenKind::BraceOpen
        ) {
            if let Some(prev) = self.list.prev_ncnl(pc) {
                let pk = self.list[prev].kind;
                if kind != TokenKind::BraceOpen {
                    if pk.triggers_statement_paren() {
                        self.list[pc].kind = TokenKind::SparenOpen;
                        parent = Some(self.frm.top().kind);
                        self.frm.sparen_count += 1;
                    } else if pk == TokenKind::Function {
                        self.list[pc].kind = TokenKind::FparenOpen;
                        parent = Some(TokenKind::Function);
                    } else if pk == TokenKind::Enum && self.ctx.language == Language::ObjC {
                        // NS_ENUM(...) and friends take a function-style
                        // paren that belongs to the enum.
                        self.list[pc].kind = TokenKind::FparenOpen;
                        parent = Some(TokenKind::Enum);
                    } else if pk == TokenKind::Declspec {
                        parent = Some(TokenKind::Declspec);
                    }
                } else {
                    if self.frm.top().stage != Stage::None {
                        parent = Some(self.frm.top().kind);
                    } else if pk == TokenKind::Assign && self.list[prev].text == "=" {
                        parent = Some(TokenKind::Assign);
                    } else if pk == TokenKind::Return && self.ctx.language == Language::Cpp {
                        parent = Some(TokenKind::Return);
                    } else if pk == TokenKind::FparenClose {
                        parent = if self.ctx.language == Language::ObjC
                            && self.list[prev].parent == Some(TokenKind::Enum)
                        {
                            Some(TokenKind::Enum)
                        } else {
                            Some(TokenKind::Function)
                        };
                    }
                }
            }
            self.list[pc].parent = parent;
        }

        let kind = self.list[pc].kind;
        if !kind.is_opener() {
            return;
        }
        self.frm.level += 1;
        let mut entry = StackEntry::new(kind, self.list[pc].parent, Stage::None, Some(pc));
        if kind.bumps_brace_level() {
            entry.brace_bump = !self.namespace_brace_shares_level(pc, kind);
            if entry.brace_bump {
                self.frm.brace_level += 1;
            }
        }
        self.frm.push(entry);
    }

    /// A namespace brace directly inside another namespace brace shares its
    /// level when the single-indent option pair is on.
    fn namespace_brace_shares_level(&self, pc: ChunkId, kind: TokenKind) -> bool {
        kind == TokenKind::BraceOpen
            && self.list[pc].parent == Some(TokenKind::Namespace)
            && self.ctx.options.indent_namespace
            && self.ctx.options.indent_namespace_single_indent
            && self.frm.top().kind == TokenKind::BraceOpen
            && self.frm.top().parent == Some(TokenKind::Namespace)
    }

    /// Push a complex-statement entry for statement keywords.
    fn push_pattern_entry(&mut self, pc: ChunkId) {
        let kind = self.list[pc].kind;
        let Some(class) = kind.pattern_class() else {
            return;
        };
        let (kind, stage) = match class {
            PatternClass::Braced => (
                kind,
                if kind == TokenKind::Do {
                    Stage::BraceDo
                } else {
                    Stage::Brace2
                },
            ),
            PatternClass::PBraced => {
                if kind == TokenKind::While && self.maybe_while_of_do(pc) {
                    self.list[pc].kind = TokenKind::WhileOfDo;
                    (TokenKind::WhileOfDo, Stage::WodParen)
                } else if kind == TokenKind::WhileOfDo {
                    (kind, Stage::WodParen)
                } else {
                    (kind, Stage::Paren1)
                }
            }
            PatternClass::OpBraced => (kind, Stage::OpParen1),
            PatternClass::Else => (kind, Stage::ElseIf),
        };
        self.frm
            .push(StackEntry::new(kind, self.list[pc].parent, stage, Some(pc)));
    }

    /// Reset the statement / expression counters at the boundaries later
    /// stages key off.
    fn reset_counts(&mut self, pc: ChunkId) {
        let kind = self.list[pc].kind;
        let stmt_boundary = kind.is_semicolon()
            || matches!(
                kind,
                TokenKind::BraceClose
                    | TokenKind::VbraceOpen
                    | TokenKind::VbraceClose
                    | TokenKind::SparenClose
                    | TokenKind::Case
                    | TokenKind::Default
                    | TokenKind::CaseColon
            )
            || (kind == TokenKind::BraceOpen && self.list[pc].parent != Some(TokenKind::Assign));
        if stmt_boundary {
            self.frm.stmt_count = 0;
            self.frm.expr_count = 0;
            return;
        }
        let expr_boundary = matches!(
            kind,
            TokenKind::Assign
                | TokenKind::Arith
                | TokenKind::Compare
                | TokenKind::Not
                | TokenKind::Comma
                | TokenKind::Question
                | TokenKind::Colon
                | TokenKind::Return
                | TokenKind::Goto
                | TokenKind::Continue
                | TokenKind::Throw
                | TokenKind::ParenOpen
                | TokenKind::SparenOpen
                | TokenKind::FparenOpen
                | TokenKind::SquareOpen
                | TokenKind::AngleOpen
                | TokenKind::AngleClose
                | TokenKind::BraceOpen
        );
        if expr_boundary {
            self.frm.expr_count = 0;
        }
    }

    /// A `while` closes a `do` when the code before it (skipping any
    /// preprocessor region) is the do-body's closing brace. Catches the
    /// cases where directive snapshots dropped the `do` stage.
    pub(crate) fn maybe_while_of_do(&self, pc: ChunkId) -> bool {
        let mut prev = self.list.prev_ncnl(pc);
        while let Some(p) = prev {
            if !self.list[p].flags.contains(ChunkFlags::IN_PREPROC) {
                break;
            }
            prev = self.list.prev_ncnl(p);
        }
        match prev {
            Some(p) => {
                matches!(
                    self.list[p].kind,
                    TokenKind::BraceClose | TokenKind::VbraceClose
                ) && self.list[p].parent == Some(TokenKind::Do)
            }
            None => false,
        }
    }
}
