//! Stack of parse frames used to snapshot and restore state across
//! conditional-compilation directives.
//!
//! `#if`/`#else` alter control flow in ways a linear scan cannot track;
//! parsing every branch against the same pre-`#if` snapshot yields stable
//! structure regardless of which branch the preprocessor takes. `#define`
//! bodies get a private frame so their nesting never leaks into the
//! surrounding code.

use preen_common::TokenKind;

use crate::frame::ParseFrame;

/// What kind of directive region the scan is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpKind {
    None,
    If,
    Else,
    Endif,
    Define,
    Other,
}

impl PpKind {
    /// Classify a directive-head token.
    pub fn from_token(kind: TokenKind) -> PpKind {
        match kind {
            TokenKind::PpIf => PpKind::If,
            TokenKind::PpElse => PpKind::Else,
            TokenKind::PpEndif => PpKind::Endif,
            TokenKind::PpDefine => PpKind::Define,
            TokenKind::PpInclude | TokenKind::PpOther => PpKind::Other,
            _ => PpKind::Other,
        }
    }
}

/// Stack of saved parse frames.
#[derive(Debug, Clone, Default)]
pub struct FrameList {
    frames: Vec<ParseFrame>,
}

impl FrameList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: ParseFrame) {
        self.frames.push(frame);
    }

    /// Stash `frame` directly under the top, keeping the top (the pre-`#if`
    /// snapshot) available for later branches.
    pub fn push_under_top(&mut self, frame: ParseFrame) {
        let n = self.frames.len();
        if n == 0 {
            self.frames.push(frame);
        } else {
            self.frames.insert(n - 1, frame);
        }
    }

    pub fn pop(&mut self) -> Option<ParseFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ParseFrame> {
        self.frames.last()
    }
}
