use bitflags::bitflags;

bitflags! {
    /// Per-chunk flag bits set by the brace-cleanup pass (and, for
    /// `IN_PREPROC`, by the upstream tokenizer).
    ///
    /// Serialization comes from the bitflags `serde` feature (flags render
    /// as a `A | B` string in human-readable formats).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ChunkFlags: u16 {
        /// First chunk of a statement.
        const STMT_START   = 1 << 0;
        /// First chunk of an expression.
        const EXPR_START   = 1 << 1;
        /// Chunk is part of a preprocessor directive.
        const IN_PREPROC   = 1 << 2;
        /// Chunk sits inside a statement paren (`if (...)`, `for (...)`, ...).
        const IN_SPAREN    = 1 << 3;
        /// Chunk sits inside the parens of a `for` header.
        const IN_FOR       = 1 << 4;
        /// Chunk sits inside a namespace block.
        const IN_NAMESPACE = 1 << 5;
        /// Open brace of a block whose line span exceeds the configured limit.
        const LONG_BLOCK   = 1 << 6;
    }
}

impl ChunkFlags {
    /// The subset synthesized chunks inherit from their real neighbor.
    pub const COPY_FLAGS: ChunkFlags = ChunkFlags::IN_PREPROC
        .union(ChunkFlags::IN_SPAREN)
        .union(ChunkFlags::IN_FOR)
        .union(ChunkFlags::IN_NAMESPACE);
}
