/// Options for [`crate::Parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Ignore tokens left over after a complete expression, so `a b` parses
    /// as `a`. When `false`, leftovers fail with
    /// [`crate::ParseError::TrailingTokens`].
    pub allow_trailing_tokens: bool,
    /// Maximum AST nesting depth. Compilation and evaluation recurse once per
    /// level, so this also bounds their stack use.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Options that reject trailing tokens.
    pub fn strict() -> Self {
        ParseOptions {
            allow_trailing_tokens: false,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_trailing_tokens: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
