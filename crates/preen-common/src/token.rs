use serde::{Deserialize, Serialize};

/// Every kind of chunk the brace-cleanup pass cares about.
///
/// The upstream tokenizer and keyword classifier produce a much larger
/// vocabulary; this enum covers the subset that participates in bracket
/// matching, statement staging, or flag propagation, plus the generic
/// carriers (`Word`, `Number`, `Str`) everything else arrives as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // ── Stream control ─────────────────────────────────────────────────
    Eof,
    Ignored,
    Attribute,
    Comment,
    Newline,

    // ── Preprocessor ───────────────────────────────────────────────────
    /// The `#` that starts a directive.
    Preproc,
    /// `if`, `ifdef`, `ifndef` directive head.
    PpIf,
    /// `else`, `elif` directive head.
    PpElse,
    PpEndif,
    PpDefine,
    PpInclude,
    /// Any other directive head (`pragma`, `error`, ...).
    PpOther,

    // ── Generic carriers ───────────────────────────────────────────────
    Word,
    Number,
    Str,
    /// A word the classifier recognized as a function name (call or decl).
    Function,
    /// A macro name inside a `#define` body.
    Macro,
    /// Open of a macro-function invocation that brackets statements.
    MacroOpen,
    MacroClose,

    // ── Brackets ───────────────────────────────────────────────────────
    ParenOpen,
    ParenClose,
    /// Statement paren: the `(` after `if`, `while`, `for`, `switch`, ...
    SparenOpen,
    SparenClose,
    /// Function paren: call or declaration argument list.
    FparenOpen,
    FparenClose,
    SquareOpen,
    SquareClose,
    AngleOpen,
    AngleClose,
    BraceOpen,
    BraceClose,
    /// Synthesized open brace marking an implicit block.
    VbraceOpen,
    VbraceClose,

    // ── Punctuation and operators ──────────────────────────────────────
    Semicolon,
    /// Synthesized statement terminator (Pawn).
    VSemicolon,
    Comma,
    Colon,
    /// The `:` that ends a `case`/`default` label.
    CaseColon,
    Question,
    Assign,
    Arith,
    Compare,
    Not,

    // ── Keywords ───────────────────────────────────────────────────────
    If,
    /// An `if` fused onto a preceding `else`.
    Elseif,
    Else,
    For,
    While,
    /// The `while` that closes a `do`-loop.
    WhileOfDo,
    Do,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Goto,
    Throw,
    Try,
    Catch,
    Finally,
    /// C# exception filter keyword.
    When,
    Namespace,
    /// `using` as a directive or alias.
    Using,
    /// C# `using (...)` statement.
    UsingStmt,
    Enum,
    Constexpr,
    Declspec,
    Synchronized,
    Lock,
    Volatile,
    Unsafe,
    /// C# property accessor block head (`get`/`set`).
    GetSet,
    /// D `body` block head.
    Body,
    /// D `unittest` block head.
    Unittest,
    /// D `version` head (paren optional).
    Version,
    /// D `version (...)` recognized as a conditional.
    VersionIf,
    /// D `scope` head (paren optional).
    Scope,
    /// D `scope (...)` recognized as a conditional.
    ScopeIf,
}

/// How a keyword opens a complex statement (spec: pattern classes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternClass {
    /// Keyword is followed directly by a brace (`do`, `try`, ...).
    Braced,
    /// Keyword is followed by parens, then a brace (`if`, `for`, ...).
    PBraced,
    /// Keyword may or may not take parens (`when`, `version`, `scope`).
    OpBraced,
    /// `else` extends a finished `if`.
    Else,
}

impl TokenKind {
    /// The closer paired with this opener, if this is an opener.
    ///
    /// Closers are identified by kind through this table, never by enum
    /// arithmetic.
    pub fn matching_closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::ParenOpen => Some(TokenKind::ParenClose),
            TokenKind::SparenOpen => Some(TokenKind::SparenClose),
            TokenKind::FparenOpen => Some(TokenKind::FparenClose),
            TokenKind::SquareOpen => Some(TokenKind::SquareClose),
            TokenKind::AngleOpen => Some(TokenKind::AngleClose),
            TokenKind::BraceOpen => Some(TokenKind::BraceClose),
            TokenKind::VbraceOpen => Some(TokenKind::VbraceClose),
            TokenKind::MacroOpen => Some(TokenKind::MacroClose),
            _ => None,
        }
    }

    /// The opener paired with this closer, if this is a closer.
    pub fn matching_opener(self) -> Option<TokenKind> {
        match self {
            TokenKind::ParenClose => Some(TokenKind::ParenOpen),
            TokenKind::SparenClose => Some(TokenKind::SparenOpen),
            TokenKind::FparenClose => Some(TokenKind::FparenOpen),
            TokenKind::SquareClose => Some(TokenKind::SquareOpen),
            TokenKind::AngleClose => Some(TokenKind::AngleOpen),
            TokenKind::BraceClose => Some(TokenKind::BraceOpen),
            TokenKind::VbraceClose => Some(TokenKind::VbraceOpen),
            TokenKind::MacroClose => Some(TokenKind::MacroOpen),
            _ => None,
        }
    }

    pub fn is_opener(self) -> bool {
        self.matching_closer().is_some()
    }

    pub fn is_closer(self) -> bool {
        self.matching_opener().is_some()
    }

    /// Whether this bracket pair contributes to `brace_level` in addition
    /// to `level`.
    pub fn bumps_brace_level(self) -> bool {
        matches!(
            self,
            TokenKind::BraceOpen
                | TokenKind::BraceClose
                | TokenKind::VbraceOpen
                | TokenKind::VbraceClose
                | TokenKind::MacroOpen
                | TokenKind::MacroClose
        )
    }

    pub fn is_comment(self) -> bool {
        self == TokenKind::Comment
    }

    pub fn is_newline(self) -> bool {
        self == TokenKind::Newline
    }

    /// Real or synthesized statement terminator.
    pub fn is_semicolon(self) -> bool {
        matches!(self, TokenKind::Semicolon | TokenKind::VSemicolon)
    }

    /// Chunks the cleanup driver never parses, only stamps.
    pub fn is_formatting_only(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Newline | TokenKind::Attribute | TokenKind::Ignored
        )
    }

    /// Whether a `(` directly after this kind is a statement paren.
    pub fn triggers_statement_paren(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Constexpr
                | TokenKind::Elseif
                | TokenKind::While
                | TokenKind::WhileOfDo
                | TokenKind::Do
                | TokenKind::For
                | TokenKind::Switch
                | TokenKind::Catch
                | TokenKind::Synchronized
                | TokenKind::Version
                | TokenKind::VersionIf
                | TokenKind::Scope
                | TokenKind::ScopeIf
        )
    }

    /// Pattern class of a keyword that opens a complex statement.
    pub fn pattern_class(self) -> Option<PatternClass> {
        match self {
            TokenKind::Do
            | TokenKind::Try
            | TokenKind::Finally
            | TokenKind::Body
            | TokenKind::Unittest
            | TokenKind::Unsafe
            | TokenKind::Volatile
            | TokenKind::GetSet => Some(PatternClass::Braced),
            TokenKind::If
            | TokenKind::Elseif
            | TokenKind::For
            | TokenKind::While
            | TokenKind::WhileOfDo
            | TokenKind::Switch
            | TokenKind::UsingStmt
            | TokenKind::Synchronized
            | TokenKind::Lock
            | TokenKind::Catch
            | TokenKind::VersionIf
            | TokenKind::ScopeIf => Some(PatternClass::PBraced),
            TokenKind::When | TokenKind::Version | TokenKind::Scope => {
                Some(PatternClass::OpBraced)
            }
            TokenKind::Else => Some(PatternClass::Else),
            _ => None,
        }
    }
}
