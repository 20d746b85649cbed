// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token kinds produced by the scanner.

/// The kind of a scanned lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Trivia, never handed to the parser
    Skip,
    Comment,

    // Directives
    Include,

    // Punctuation
    Equals,
    Comma,
    Semicolon,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,

    // Declaration keywords
    Filetype,
    Struct,
    Stage,
    Pipeline,
    Call,
    Map,
    Split,
    Using,
    SelfKw,
    Return,
    Retain,
    In,
    Out,
    Src,
    As,

    // Stage languages
    Py,
    Exec,
    Comp,

    // Resource and modifier keys
    MemGb,
    VmemGb,
    Threads,
    Special,
    Volatile,
    Strict,
    Local,
    Preflight,
    Disabled,

    // Built-in types
    IntType,
    FloatType,
    StringType,
    BoolType,
    PathType,
    FileType,

    // Literals
    True,
    False,
    Null,
    Int,
    Float,
    String,

    Id,

    /// Input the scanner could not classify.
    Invalid,
}

impl TokenKind {
    /// Whitespace and comments, which the lexer driver consumes itself.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Skip | TokenKind::Comment)
    }

    /// Keywords and identifiers: anything that can serve as a name.
    pub fn is_word(self) -> bool {
        self == TokenKind::Id || self.keyword().is_some()
    }

    /// The spelling of a keyword token.
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Filetype => "filetype",
            TokenKind::Struct => "struct",
            TokenKind::Stage => "stage",
            TokenKind::Pipeline => "pipeline",
            TokenKind::Call => "call",
            TokenKind::Map => "map",
            TokenKind::Split => "split",
            TokenKind::Using => "using",
            TokenKind::SelfKw => "self",
            TokenKind::Return => "return",
            TokenKind::Retain => "retain",
            TokenKind::In => "in",
            TokenKind::Out => "out",
            TokenKind::Src => "src",
            TokenKind::As => "as",
            TokenKind::Py => "py",
            TokenKind::Exec => "exec",
            TokenKind::Comp => "comp",
            TokenKind::MemGb => "mem_gb",
            TokenKind::VmemGb => "vmem_gb",
            TokenKind::Threads => "threads",
            TokenKind::Special => "special",
            TokenKind::Volatile => "volatile",
            TokenKind::Strict => "strict",
            TokenKind::Local => "local",
            TokenKind::Preflight => "preflight",
            TokenKind::Disabled => "disabled",
            TokenKind::IntType => "int",
            TokenKind::FloatType => "float",
            TokenKind::StringType => "string",
            TokenKind::BoolType => "bool",
            TokenKind::PathType => "path",
            TokenKind::FileType => "file",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            _ => return None,
        })
    }

    /// Returns a human-readable name for this token kind.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Skip => "whitespace",
            TokenKind::Comment => "a comment",
            TokenKind::Include => "'@include'",
            TokenKind::Equals => "'='",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Int => "an integer",
            TokenKind::Float => "a number",
            TokenKind::String => "a string",
            TokenKind::Id => "a name",
            TokenKind::Invalid => "an invalid token",
            // Quoted keyword spellings
            TokenKind::Filetype => "'filetype'",
            TokenKind::Struct => "'struct'",
            TokenKind::Stage => "'stage'",
            TokenKind::Pipeline => "'pipeline'",
            TokenKind::Call => "'call'",
            TokenKind::Map => "'map'",
            TokenKind::Split => "'split'",
            TokenKind::Using => "'using'",
            TokenKind::SelfKw => "'self'",
            TokenKind::Return => "'return'",
            TokenKind::Retain => "'retain'",
            TokenKind::In => "'in'",
            TokenKind::Out => "'out'",
            TokenKind::Src => "'src'",
            TokenKind::As => "'as'",
            TokenKind::Py => "'py'",
            TokenKind::Exec => "'exec'",
            TokenKind::Comp => "'comp'",
            TokenKind::MemGb => "'mem_gb'",
            TokenKind::VmemGb => "'vmem_gb'",
            TokenKind::Threads => "'threads'",
            TokenKind::Special => "'special'",
            TokenKind::Volatile => "'volatile'",
            TokenKind::Strict => "'strict'",
            TokenKind::Local => "'local'",
            TokenKind::Preflight => "'preflight'",
            TokenKind::Disabled => "'disabled'",
            TokenKind::IntType => "'int'",
            TokenKind::FloatType => "'float'",
            TokenKind::StringType => "'string'",
            TokenKind::BoolType => "'bool'",
            TokenKind::PathType => "'path'",
            TokenKind::FileType => "'file'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_words() {
        assert!(TokenKind::Id.is_word());
        assert!(TokenKind::Threads.is_word());
        assert!(TokenKind::FileType.is_word());
        assert!(!TokenKind::String.is_word());
        assert!(!TokenKind::Comma.is_word());
    }

    #[test]
    fn trivia() {
        assert!(TokenKind::Skip.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Invalid.is_trivia());
    }
}
