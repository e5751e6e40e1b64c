//! Input eligibility.
//!
//! An input is left out of the context when it is missing, blank after
//! trimming, or its raw text starts with an ignore token. Prefix matching is
//! exact and case-sensitive, and runs on the untrimmed text.

/// Built-in ignore tokens: explicit opt-outs, the assist cell magic itself,
/// runtime plumbing and extension loading.
pub const DEFAULT_IGNORE_TOKENS: &[&str] = &[
    "# genai:ignore",
    "#ignore",
    "# ignore",
    "%%assist",
    "get_ipython",
    "%load_ext",
    "import genai",
    "%pip install",
    "#%%assist",
];

/// An ordered set of input prefixes that exclude an input from context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreTokens {
    tokens: Vec<String>,
}

impl Default for IgnoreTokens {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_IGNORE_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl IgnoreTokens {
    /// The built-in set extended with `extra`. Empty and duplicate tokens are
    /// skipped.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for token in extra {
            let token = token.into();
            if !token.is_empty() && !set.tokens.contains(&token) {
                set.tokens.push(token);
            }
        }
        set
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether `input` starts with any ignore token.
    pub fn is_ignored(&self, input: &str) -> bool {
        self.tokens.iter().any(|token| input.starts_with(token.as_str()))
    }

    /// Whether `input` may appear in the context.
    pub fn is_eligible(&self, input: Option<&str>) -> bool {
        match input {
            None => false,
            Some(text) if text.trim().is_empty() => false,
            Some(text) => !self.is_ignored(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_in_order() {
        let set = IgnoreTokens::default();
        assert_eq!(set.tokens().len(), 9);
        assert_eq!(set.tokens()[0], "# genai:ignore");
        assert_eq!(set.tokens()[8], "#%%assist");
    }

    #[test]
    fn every_default_token_is_ignored() {
        let set = IgnoreTokens::default();
        for token in DEFAULT_IGNORE_TOKENS {
            let input = format!("{token}\nx = 1");
            assert!(!set.is_eligible(Some(&input)), "{token} should be ignored");
        }
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let set = IgnoreTokens::default();
        assert!(set.is_eligible(Some("# IGNORE\nx = 1")));
        assert!(set.is_eligible(Some("%LOAD_EXT foo")));
    }

    #[test]
    fn prefix_checked_on_untrimmed_text() {
        let set = IgnoreTokens::default();
        // Leading whitespace means the input does not start with the token.
        assert!(set.is_eligible(Some("  # ignore\nx = 1")));
    }

    #[test]
    fn token_must_be_a_prefix() {
        let set = IgnoreTokens::default();
        assert!(set.is_eligible(Some("x = 1  # ignore")));
    }

    #[test]
    fn blank_and_missing_inputs_rejected() {
        let set = IgnoreTokens::default();
        assert!(!set.is_eligible(None));
        assert!(!set.is_eligible(Some("")));
        assert!(!set.is_eligible(Some(" \n\t ")));
    }

    #[test]
    fn extra_tokens_extend_the_set() {
        let set = IgnoreTokens::with_extra(["%%sql", "", "#ignore"]);
        assert_eq!(set.tokens().len(), 10);
        assert!(!set.is_eligible(Some("%%sql\nselect 1")));
        assert!(set.is_eligible(Some("select 1")));
    }
}
