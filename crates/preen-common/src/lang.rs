use std::fmt;

use serde::{Deserialize, Serialize};

/// The source language of the file being cleaned up.
///
/// Language is consulted only at a handful of designated decision points:
/// Pawn virtual semicolons, the D rule that `}` closes virtual braces, the
/// Objective-C `NS_ENUM` paren parent, the C# `catch`/`when` staging and
/// `using` block handling, and the C++-only `return {...}` parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    C,
    Cpp,
    CSharp,
    D,
    Java,
    ObjC,
    Pawn,
    Vala,
}

impl Language {
    /// Look up a language from its CLI/config name.
    pub fn from_name(name: &str) -> Option<Language> {
        match name {
            "c" => Some(Language::C),
            "cpp" | "c++" => Some(Language::Cpp),
            "cs" | "csharp" | "c#" => Some(Language::CSharp),
            "d" => Some(Language::D),
            "java" => Some(Language::Java),
            "objc" | "objective-c" => Some(Language::ObjC),
            "pawn" => Some(Language::Pawn),
            "vala" => Some(Language::Vala),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "cs",
            Language::D => "d",
            Language::Java => "java",
            Language::ObjC => "objc",
            Language::Pawn => "pawn",
            Language::Vala => "vala",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips() {
        for lang in [
            Language::C,
            Language::Cpp,
            Language::CSharp,
            Language::D,
            Language::Java,
            Language::ObjC,
            Language::Pawn,
            Language::Vala,
        ] {
            assert_eq!(Language::from_name(lang.name()), Some(lang));
        }
    }

    #[test]
    fn from_name_accepts_aliases() {
        assert_eq!(Language::from_name("c++"), Some(Language::Cpp));
        assert_eq!(Language::from_name("c#"), Some(Language::CSharp));
        assert_eq!(Language::from_name("objective-c"), Some(Language::ObjC));
        assert_eq!(Language::from_name("fortran"), None);
    }
}
