//! Allow-listed label names
//!
//! Cypher has no parameter slot for labels, so a label has to be spliced into the
//! statement text. Only names made of letters, digits and underscores (in any
//! script) are accepted; anything else is rejected rather than escaped.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::GatewayError;

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}_]+$").expect("label pattern is a valid regex")
});

/// A label that is safe to interpolate into a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelName(String);

impl LabelName {
    pub fn parse(label: &str) -> Result<Self, GatewayError> {
        if LABEL_PATTERN.is_match(label) {
            Ok(LabelName(label.to_string()))
        } else {
            Err(GatewayError::InvalidParameter {
                name: "label",
                reason: "only letters, digits and underscores are allowed".to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
