//! The preen brace-cleanup CLI.
//!
//! Provides the `preenc` command with the following subcommand:
//!
//! - `preenc annotate <tokens.json>` - Run the brace-cleanup pass over a
//!   pre-tokenized chunk stream and print the annotated stream
//!
//! Options:
//! - `--lang` - Source language (c, cpp, cs, d, java, objc, pawn, vala)
//! - `--config` - TOML file with the option subset this pass consults
//! - `--json` - Emit the annotated stream as JSON instead of a table
//!
//! Exit codes follow sysexits: 64 for usage errors, 70 when the input has
//! an unrecoverable structural problem.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use preen_braces::{brace_cleanup, Chunk, ChunkList, DefaultHooks};
use preen_common::{ChunkFlags, Context, Diagnostics, Language, Options, TokenKind};

const EX_USAGE: i32 = 64;
const EX_SOFTWARE: i32 = 70;

#[derive(Parser)]
#[command(name = "preenc", version, about = "Brace-structure annotator for C-family token streams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a pre-tokenized chunk stream with brace-structure info
    Annotate {
        /// Path to the token stream (JSON array produced by the tokenizer)
        input: PathBuf,

        /// Source language
        #[arg(long, default_value = "c")]
        lang: String,

        /// TOML file with formatter options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the annotated stream as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// A token as the upstream tokenizer serializes it.
#[derive(Debug, Deserialize)]
struct RawToken {
    kind: TokenKind,
    #[serde(default)]
    text: String,
    line: u32,
    col: u32,
    #[serde(default)]
    in_preproc: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Annotate {
            input,
            lang,
            config,
            json,
        } => {
            if let Err((code, msg)) = annotate(&input, &lang, config.as_deref(), json) {
                eprintln!("error: {}", msg);
                process::exit(code);
            }
        }
    }
}

/// Load the stream, run the pass, and print the result.
fn annotate(
    input: &Path,
    lang: &str,
    config: Option<&Path>,
    json: bool,
) -> Result<(), (i32, String)> {
    let language = Language::from_name(lang)
        .ok_or_else(|| (EX_USAGE, format!("unknown language '{}'", lang)))?;
    let options = match config {
        Some(path) => Options::from_file(path).map_err(|e| (EX_USAGE, e))?,
        None => Options::default(),
    };

    let content = std::fs::read_to_string(input)
        .map_err(|e| (EX_USAGE, format!("failed to read {}: {}", input.display(), e)))?;
    let raw: Vec<RawToken> = serde_json::from_str(&content)
        .map_err(|e| (EX_USAGE, format!("failed to parse {}: {}", input.display(), e)))?;

    let mut list = ChunkList::new();
    for tok in raw {
        let mut chunk = Chunk::new(tok.kind, tok.text, tok.line, tok.col);
        if tok.in_preproc {
            chunk.flags.insert(ChunkFlags::IN_PREPROC);
        }
        list.push_back(chunk);
    }

    let ctx = Context::new(input.display().to_string(), language, options);
    let mut hooks = DefaultHooks;
    let mut diags = Diagnostics::new();
    let result = brace_cleanup(&mut list, &ctx, &mut hooks, &mut diags);

    for d in diags.iter() {
        eprintln!("{}: {}", ctx.filename, d);
    }
    if let Err(e) = result {
        return Err((EX_SOFTWARE, e.to_string()));
    }

    if json {
        print_json(&list)?;
    } else {
        print_table(&list);
    }
    Ok(())
}

fn print_json(list: &ChunkList) -> Result<(), (i32, String)> {
    let chunks: Vec<&Chunk> = list.ids().map(|id| &list[id]).collect();
    let out = serde_json::to_string_pretty(&chunks)
        .map_err(|e| (EX_SOFTWARE, format!("failed to serialize output: {}", e)))?;
    println!("{}", out);
    Ok(())
}

fn print_table(list: &ChunkList) {
    println!(
        "{:<5} {:<4} {:<14} {:<16} {:>3} {:>3} {:>3}  {}",
        "line", "col", "kind", "parent", "lvl", "brc", "pp", "flags"
    );
    for id in list.ids() {
        let c = &list[id];
        if c.kind.is_newline() {
            continue;
        }
        println!(
            "{:<5} {:<4} {:<14} {:<16} {:>3} {:>3} {:>3}  {}",
            c.line,
            c.col,
            format!("{:?}", c.kind),
            c.parent.map(|p| format!("{:?}", p)).unwrap_or_default(),
            c.level,
            c.brace_level,
            c.pp_level,
            flag_names(c.flags),
        );
    }
}

fn flag_names(flags: ChunkFlags) -> String {
    let mut names = Vec::new();
    for (name, bit) in [
        ("stmt", ChunkFlags::STMT_START),
        ("expr", ChunkFlags::EXPR_START),
        ("pp", ChunkFlags::IN_PREPROC),
        ("sparen", ChunkFlags::IN_SPAREN),
        ("for", ChunkFlags::IN_FOR),
        ("ns", ChunkFlags::IN_NAMESPACE),
        ("long", ChunkFlags::LONG_BLOCK),
    ] {
        if flags.contains(bit) {
            names.push(name);
        }
    }
    names.join(",")
}
