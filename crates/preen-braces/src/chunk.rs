//! The doubly-linked chunk list the pass walks and mutates.
//!
//! Chunks live in a `Vec` arena and are addressed by copyable [`ChunkId`]
//! handles, so insertions never invalidate ids held elsewhere (the parse
//! frame keeps back-pointers to opener chunks). Links are stored per node;
//! the arena itself never frees.

use serde::Serialize;

use preen_common::{ChunkFlags, TokenKind};

/// Stable handle to a chunk in a [`ChunkList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(u32);

impl ChunkId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A lexed token enriched with position, structure and flag fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source position of the first character.
    pub line: u32,
    pub col: u32,
    /// Kind of the construct this chunk belongs to, if any.
    pub parent: Option<TokenKind>,
    /// Chunk of the construct this one is linked to (e.g. the `switch` of a
    /// `case`). Diagnostic/linkage only, never ownership.
    #[serde(skip)]
    pub parent_chunk: Option<ChunkId>,
    /// Open brackets of every kind enclosing this chunk.
    pub level: u32,
    /// Open curly braces (real or virtual) enclosing this chunk.
    pub brace_level: u32,
    /// Nesting depth of `#if` regions.
    pub pp_level: u32,
    pub flags: ChunkFlags,
}

impl Chunk {
    /// A chunk fresh from the tokenizer: no structure assigned yet.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
            parent: None,
            parent_chunk: None,
            level: 0,
            brace_level: 0,
            pp_level: 0,
            flags: ChunkFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: ChunkFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    chunk: Chunk,
    prev: Option<ChunkId>,
    next: Option<ChunkId>,
}

/// Arena-backed doubly-linked list of chunks.
#[derive(Debug, Clone, Default)]
pub struct ChunkList {
    nodes: Vec<Node>,
    head: Option<ChunkId>,
    tail: Option<ChunkId>,
}

impl ChunkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<ChunkId> {
        self.head
    }

    pub fn tail(&self) -> Option<ChunkId> {
        self.tail
    }

    fn alloc(&mut self, chunk: Chunk) -> ChunkId {
        let id = ChunkId(self.nodes.len() as u32);
        self.nodes.push(Node {
            chunk,
            prev: None,
            next: None,
        });
        id
    }

    /// Append a chunk at the end of the list.
    pub fn push_back(&mut self, chunk: Chunk) -> ChunkId {
        let id = self.alloc(chunk);
        match self.tail {
            Some(tail) => {
                self.nodes[tail.index()].next = Some(id);
                self.nodes[id.index()].prev = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Link a new chunk directly after `at`.
    pub fn insert_after(&mut self, at: ChunkId, chunk: Chunk) -> ChunkId {
        let id = self.alloc(chunk);
        let next = self.nodes[at.index()].next;
        self.nodes[id.index()].prev = Some(at);
        self.nodes[id.index()].next = next;
        self.nodes[at.index()].next = Some(id);
        match next {
            Some(n) => self.nodes[n.index()].prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    /// Link a new chunk directly before `at`.
    pub fn insert_before(&mut self, at: ChunkId, chunk: Chunk) -> ChunkId {
        match self.nodes[at.index()].prev {
            Some(prev) => self.insert_after(prev, chunk),
            None => {
                let id = self.alloc(chunk);
                self.nodes[id.index()].next = Some(at);
                self.nodes[at.index()].prev = Some(id);
                self.head = Some(id);
                id
            }
        }
    }

    pub fn next(&self, id: ChunkId) -> Option<ChunkId> {
        self.nodes[id.index()].next
    }

    pub fn prev(&self, id: ChunkId) -> Option<ChunkId> {
        self.nodes[id.index()].prev
    }

    /// Next chunk that is not a comment.
    pub fn next_nc(&self, id: ChunkId) -> Option<ChunkId> {
        self.scan(id, Self::next, |k| k.is_comment())
    }

    /// Next chunk that is neither a comment nor a newline.
    pub fn next_ncnl(&self, id: ChunkId) -> Option<ChunkId> {
        self.scan(id, Self::next, |k| k.is_comment() || k.is_newline())
    }

    /// Previous chunk that is not a comment.
    pub fn prev_nc(&self, id: ChunkId) -> Option<ChunkId> {
        self.scan(id, Self::prev, |k| k.is_comment())
    }

    /// Previous chunk that is neither a comment nor a newline.
    pub fn prev_ncnl(&self, id: ChunkId) -> Option<ChunkId> {
        self.scan(id, Self::prev, |k| k.is_comment() || k.is_newline())
    }

    fn scan(
        &self,
        id: ChunkId,
        step: fn(&Self, ChunkId) -> Option<ChunkId>,
        skip: fn(TokenKind) -> bool,
    ) -> Option<ChunkId> {
        let mut cur = step(self, id);
        while let Some(c) = cur {
            if !skip(self[c].kind) {
                return Some(c);
            }
            cur = step(self, c);
        }
        None
    }

    /// Closer chunk matching `open`, found by depth-counting chunks of the
    /// same bracket kind. Returns `None` for non-openers or unbalanced input.
    pub fn matching_pair(&self, open: ChunkId) -> Option<ChunkId> {
        let open_kind = self[open].kind;
        let close_kind = open_kind.matching_closer()?;
        let mut depth = 0u32;
        let mut cur = Some(open);
        while let Some(c) = cur {
            let k = self[c].kind;
            if k == open_kind {
                depth += 1;
            } else if k == close_kind {
                depth -= 1;
                if depth == 0 {
                    return Some(c);
                }
            }
            cur = self.next(c);
        }
        None
    }

    /// Walk the list in order. Snapshot-free; do not insert while iterating.
    pub fn ids(&self) -> impl Iterator<Item = ChunkId> + '_ {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.next(id);
            Some(id)
        })
    }
}

impl std::ops::Index<ChunkId> for ChunkList {
    type Output = Chunk;

    fn index(&self, id: ChunkId) -> &Chunk {
        &self.nodes[id.index()].chunk
    }
}

impl std::ops::IndexMut<ChunkId> for ChunkList {
    fn index_mut(&mut self, id: ChunkId) -> &mut Chunk {
        &mut self.nodes[id.index()].chunk
    }
}
