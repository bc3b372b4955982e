//! Best-effort recovery of a JSON object from free-form model output.
//!
//! Models are asked for bare JSON but routinely wrap it in markdown fences or
//! surround it with prose. Recovery is an ordered chain of pure strategies;
//! the first one that yields a value wins, and if all fail the error of the
//! last strategy tried is reported.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::RecoveryError;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("fence pattern"));

static BRACE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("brace pattern"));

/// A named `text -> JSON` recovery step.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&str) -> Result<Value, RecoveryError>,
}

/// Strategies used for idea responses, in the order they are tried.
pub const IDEA_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "fence_stripped",
        run: fence_stripped,
    },
    Strategy {
        name: "brace_block",
        run: brace_block,
    },
];

/// Successful recovery along with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub value: Value,
    pub strategy: &'static str,
}

pub fn recover_ideas(text: &str) -> Result<Recovered, RecoveryError> {
    recover_with(text, IDEA_STRATEGIES)
}

/// Run `strategies` against the same original `text` until one succeeds.
pub fn recover_with(text: &str, strategies: &[Strategy]) -> Result<Recovered, RecoveryError> {
    let mut last = RecoveryError::NoJson;
    for strategy in strategies {
        match (strategy.run)(text) {
            Ok(value) => {
                return Ok(Recovered {
                    value,
                    strategy: strategy.name,
                })
            }
            Err(e) => last = e,
        }
    }
    Err(last)
}

/// Drop code-fence markers and parse what remains. The result must carry an
/// `ideas` array to count as a success.
pub fn fence_stripped(text: &str) -> Result<Value, RecoveryError> {
    let cleaned = FENCE.replace_all(text, "");
    let value: Value = serde_json::from_str(cleaned.trim())
        .map_err(|e| RecoveryError::Unparseable(e.to_string()))?;

    if value.get("ideas").is_some_and(Value::is_array) {
        Ok(value)
    } else {
        Err(RecoveryError::Unparseable("missing ideas array".into()))
    }
}

/// Parse the span from the first `{` to the last `}`. No shape check: the
/// parsed object is returned as-is.
pub fn brace_block(text: &str) -> Result<Value, RecoveryError> {
    let block = BRACE_BLOCK.find(text).ok_or(RecoveryError::NoJson)?;
    serde_json::from_str(block.as_str()).map_err(|e| RecoveryError::Unparseable(e.to_string()))
}
