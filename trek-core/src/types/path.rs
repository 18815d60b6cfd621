//! The navigation step model.
//!
//! Raw Wikispeedia paths are `;`-separated token sequences where the token
//! `<` means "clicked the back button". Modeling the step as an enum keeps
//! the backtrack-replay invariants in the type system instead of in string
//! comparisons scattered across the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The raw token players produce when they click back.
pub const BACK_TOKEN: &str = "<";

/// One step of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStep {
    /// A forward click onto the named article.
    Forward(String),
    /// A back click, undoing the previous forward step.
    Back,
}

impl PathStep {
    /// Parse a single (already percent-decoded) path token.
    pub fn from_token(token: &str) -> PathStep {
        if token == BACK_TOKEN {
            PathStep::Back
        } else {
            PathStep::Forward(token.to_string())
        }
    }

    /// The article name for forward steps, `None` for back clicks.
    pub fn article(&self) -> Option<&str> {
        match self {
            PathStep::Forward(name) => Some(name),
            PathStep::Back => None,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, PathStep::Back)
    }

    /// The display token: the article name, or `<` for back clicks.
    pub fn token(&self) -> &str {
        match self {
            PathStep::Forward(name) => name,
            PathStep::Back => BACK_TOKEN,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_token_parses_to_back() {
        assert_eq!(PathStep::from_token("<"), PathStep::Back);
        assert!(PathStep::from_token("<").is_back());
    }

    #[test]
    fn test_forward_token_keeps_name() {
        let step = PathStep::from_token("Apple");
        assert_eq!(step.article(), Some("Apple"));
        assert_eq!(step.token(), "Apple");
    }

    #[test]
    fn test_display_matches_raw_token() {
        assert_eq!(PathStep::Back.to_string(), "<");
        assert_eq!(PathStep::Forward("Zebra".into()).to_string(), "Zebra");
    }
}
