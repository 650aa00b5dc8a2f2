//! Test fixture tokenizer.
//!
//! The real beautifier feeds this pass from its own tokenizer and keyword
//! classifier; tests synthesize the same kind of chunk stream from small
//! C-family snippets. Coverage is intentionally minimal: just enough
//! classification (keywords, function-call parens, `#` directives, case
//! labels) to express the integration scenarios.
#![allow(dead_code)] // each test binary uses a different helper subset

use preen_braces::{brace_cleanup, Chunk, ChunkId, ChunkList, DefaultHooks};
use preen_common::{ChunkFlags, Context, Diagnostics, Language, Options, TokenKind};

/// Tokenize a snippet into a chunk list ready for the cleanup pass.
pub fn lex(src: &str) -> ChunkList {
    let mut list = ChunkList::new();
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0usize;
    let mut line = 1u32;
    let mut col = 1u32;
    let mut line_has_code = false;
    let mut in_directive = false;
    let mut pending_case = false;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            // The newline ending a directive is not part of it.
            emit(&mut list, TokenKind::Newline, "\n", line, col, false);
            i += 1;
            line += 1;
            col = 1;
            line_has_code = false;
            in_directive = false;
            pending_case = false;
            continue;
        }
        if c == ' ' || c == '\t' || c == '\r' {
            i += 1;
            col += 1;
            continue;
        }

        let (sl, sc) = (line, col);

        // Comments
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            let start = i;
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
                col += 1;
            }
            let text: String = chars[start..i].iter().collect();
            emit(&mut list, TokenKind::Comment, &text, sl, sc, in_directive);
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start = i;
            i += 2;
            col += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                if chars[i] == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
                i += 1;
            }
            if i < chars.len() {
                i += 2;
                col += 2;
            }
            let text: String = chars[start..i].iter().collect();
            emit(&mut list, TokenKind::Comment, &text, sl, sc, in_directive);
            continue;
        }

        // Preprocessor directive head
        if c == '#' && !line_has_code {
            emit(&mut list, TokenKind::Preproc, "#", sl, sc, true);
            in_directive = true;
            line_has_code = true;
            i += 1;
            col += 1;
            while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
                i += 1;
                col += 1;
            }
            let (dl, dc) = (line, col);
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
                col += 1;
            }
            if i > start {
                let word: String = chars[start..i].iter().collect();
                let kind = match word.as_str() {
                    "if" | "ifdef" | "ifndef" => TokenKind::PpIf,
                    "else" | "elif" => TokenKind::PpElse,
                    "endif" => TokenKind::PpEndif,
                    "define" => TokenKind::PpDefine,
                    "include" => TokenKind::PpInclude,
                    _ => TokenKind::PpOther,
                };
                emit(&mut list, kind, &word, dl, dc, true);
            }
            continue;
        }
        line_has_code = true;

        // Identifiers and keywords
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
                col += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let kind = classify_word(&word, next_nonblank(&chars, i));
            if matches!(kind, TokenKind::Case | TokenKind::Default) {
                pending_case = true;
            }
            emit(&mut list, kind, &word, sl, sc, in_directive);
            continue;
        }

        // Numbers
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                i += 1;
                col += 1;
            }
            let text: String = chars[start..i].iter().collect();
            emit(&mut list, TokenKind::Number, &text, sl, sc, in_directive);
            continue;
        }

        // Strings and chars
        if c == '"' || c == '\'' {
            let quote = c;
            let start = i;
            i += 1;
            col += 1;
            while i < chars.len() && chars[i] != quote {
                if chars[i] == '\\' {
                    i += 1;
                    col += 1;
                }
                i += 1;
                col += 1;
            }
            if i < chars.len() {
                i += 1;
                col += 1;
            }
            let text: String = chars[start..i].iter().collect();
            emit(&mut list, TokenKind::Str, &text, sl, sc, in_directive);
            continue;
        }

        // Punctuation and operators
        let two: Option<char> = chars.get(i + 1).copied();
        let (kind, len): (TokenKind, usize) = match c {
            '{' => (TokenKind::BraceOpen, 1),
            '}' => (TokenKind::BraceClose, 1),
            '(' => (TokenKind::ParenOpen, 1),
            ')' => (TokenKind::ParenClose, 1),
            '[' => (TokenKind::SquareOpen, 1),
            ']' => (TokenKind::SquareClose, 1),
            ';' => (TokenKind::Semicolon, 1),
            ',' => (TokenKind::Comma, 1),
            '?' => (TokenKind::Question, 1),
            ':' => {
                if pending_case {
                    (TokenKind::CaseColon, 1)
                } else {
                    (TokenKind::Colon, 1)
                }
            }
            '=' if two == Some('=') => (TokenKind::Compare, 2),
            '=' => (TokenKind::Assign, 1),
            '!' if two == Some('=') => (TokenKind::Compare, 2),
            '!' => (TokenKind::Not, 1),
            '<' | '>' if two == Some('=') => (TokenKind::Compare, 2),
            '<' | '>' => (TokenKind::Compare, 1),
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~' if two == Some('=') => {
                (TokenKind::Assign, 2)
            }
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~' => (TokenKind::Arith, 1),
            _ => (TokenKind::Word, 1),
        };
        match kind {
            TokenKind::Semicolon | TokenKind::BraceOpen | TokenKind::BraceClose => {
                pending_case = false;
            }
            TokenKind::CaseColon => pending_case = false,
            _ => {}
        }
        let text: String = chars[i..i + len].iter().collect();
        emit(&mut list, kind, &text, sl, sc, in_directive);
        i += len;
        col += len as u32;
    }
    list
}

fn emit(list: &mut ChunkList, kind: TokenKind, text: &str, line: u32, col: u32, in_pp: bool) {
    let mut chunk = Chunk::new(kind, text, line, col);
    if in_pp {
        chunk.flags.insert(ChunkFlags::IN_PREPROC);
    }
    list.push_back(chunk);
}

fn next_nonblank(chars: &[char], mut i: usize) -> Option<char> {
    while let Some(&c) = chars.get(i) {
        if c != ' ' && c != '\t' {
            return Some(c);
        }
        i += 1;
    }
    None
}

fn classify_word(word: &str, next: Option<char>) -> TokenKind {
    match word {
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "goto" => TokenKind::Goto,
        "throw" => TokenKind::Throw,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "when" => TokenKind::When,
        "namespace" => TokenKind::Namespace,
        "enum" => TokenKind::Enum,
        "constexpr" => TokenKind::Constexpr,
        "synchronized" => TokenKind::Synchronized,
        "lock" => TokenKind::Lock,
        "volatile" => TokenKind::Volatile,
        "unsafe" => TokenKind::Unsafe,
        "using" => {
            if next == Some('(') {
                TokenKind::UsingStmt
            } else {
                TokenKind::Using
            }
        }
        _ => {
            if next == Some('(') {
                TokenKind::Function
            } else {
                TokenKind::Word
            }
        }
    }
}

/// Lex, clean up, and return the list plus collected diagnostics. Panics on
/// structural errors; use [`try_run_lang`] to test those.
pub fn run(src: &str) -> (ChunkList, Diagnostics) {
    run_lang(src, Language::C, Options::default())
}

pub fn run_lang(src: &str, lang: Language, options: Options) -> (ChunkList, Diagnostics) {
    let (list, diags, result) = try_run_lang(src, lang, options);
    result.expect("cleanup must succeed");
    (list, diags)
}

pub fn try_run_lang(
    src: &str,
    lang: Language,
    options: Options,
) -> (
    ChunkList,
    Diagnostics,
    Result<(), preen_common::BraceError>,
) {
    let mut list = lex(src);
    let ctx = Context::new("test.c", lang, options);
    let mut hooks = DefaultHooks;
    let mut diags = Diagnostics::new();
    let result = brace_cleanup(&mut list, &ctx, &mut hooks, &mut diags);
    (list, diags, result)
}

/// Kinds of all chunks except newlines, in order.
pub fn kinds(list: &ChunkList) -> Vec<TokenKind> {
    list.ids()
        .map(|id| list[id].kind)
        .filter(|k| !k.is_newline())
        .collect()
}

/// First chunk whose text equals `text`.
pub fn find(list: &ChunkList, text: &str) -> ChunkId {
    list.ids()
        .find(|&id| list[id].text == text)
        .unwrap_or_else(|| panic!("no chunk with text {:?}", text))
}

/// Nth chunk (0-based) whose text equals `text`.
pub fn find_nth(list: &ChunkList, text: &str, n: usize) -> ChunkId {
    list.ids()
        .filter(|&id| list[id].text == text)
        .nth(n)
        .unwrap_or_else(|| panic!("no chunk #{} with text {:?}", n, text))
}

/// All chunks of a given kind.
pub fn all_of_kind(list: &ChunkList, kind: TokenKind) -> Vec<ChunkId> {
    list.ids().filter(|&id| list[id].kind == kind).collect()
}

/// Compact rendering of the annotated stream for snapshots.
pub fn dump(list: &ChunkList) -> String {
    let lines: Vec<String> = list
        .ids()
        .filter(|&id| !list[id].kind.is_newline())
        .map(|id| {
            let c = &list[id];
            format!(
                "{:?}[{}] lvl={} brc={} par={}",
                c.kind,
                c.text,
                c.level,
                c.brace_level,
                c.parent
                    .map(|p| format!("{:?}", p))
                    .unwrap_or_else(|| "-".into()),
            )
        })
        .collect();
    lines.join("\n")
}
