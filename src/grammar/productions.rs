//! Production rule table and parser
//!
//! Rules are written one per line as `SYMBOL -> REPLACEMENT`. Whitespace
//! is insignificant, symbols are case-sensitive single characters, and
//! each character of a replacement names one child node.

use std::collections::HashMap;

use crate::error::{CityError, Result};

/// The production rule table of a shape grammar
///
/// Maps a left-hand symbol to the ordered list of replacement strings it
/// may rewrite into. The table is set once at configuration time and only
/// consulted afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProductionSet {
    rules: HashMap<char, Vec<String>>,
}

impl ProductionSet {
    /// Create an empty production table
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic city rule set
    ///
    /// Towers (`A`) rewrite into three- or five-segment bodies with an
    /// optional roof cap; low-rises (`E`) into a five-slab stack.
    pub fn standard() -> Self {
        let mut set = Self::new();
        for line in [
            "A -> BBB",
            "A -> BBBC",
            "A -> BBBBB",
            "A -> BBBBBC",
            "E -> GGGGG",
        ] {
            // the built-in lines are well-formed
            set.add(line).expect("standard rule set must parse");
        }
        set
    }

    /// Add one production rule line
    ///
    /// Strips all whitespace, splits on the literal `->`, and appends the
    /// replacement to the left-hand symbol's list (creating the list if
    /// absent). Blank lines are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProduction` if the arrow is missing or the left
    /// side is not exactly one symbol. Rejected lines add nothing to the
    /// table.
    pub fn add(&mut self, line: &str) -> Result<()> {
        let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return Ok(());
        }

        let arrow = stripped.find("->").ok_or_else(|| CityError::InvalidProduction {
            line: stripped.clone(),
            reason: "missing '->'".to_string(),
        })?;

        let lhs = &stripped[..arrow];
        let rhs = &stripped[arrow + 2..];

        let mut lhs_chars = lhs.chars();
        let symbol = match (lhs_chars.next(), lhs_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(CityError::InvalidProduction {
                    line: stripped.clone(),
                    reason: "left side must be exactly one symbol".to_string(),
                })
            }
        };

        self.rules.entry(symbol).or_default().push(rhs.to_string());
        Ok(())
    }

    /// Parse a newline-delimited rule listing
    ///
    /// Malformed lines are non-fatal: they are logged, collected into the
    /// returned diagnostics, and skipped, while every well-formed line
    /// still lands in the table.
    pub fn parse(text: &str) -> (Self, Vec<CityError>) {
        let mut set = Self::new();
        let mut diagnostics = Vec::new();

        for line in text.lines() {
            if let Err(err) = set.add(line) {
                log::warn!("skipping production line: {}", err);
                diagnostics.push(err);
            }
        }

        (set, diagnostics)
    }

    /// Look up the replacement strings for a symbol
    pub fn rules_for(&self, symbol: char) -> Option<&[String]> {
        self.rules.get(&symbol).map(Vec::as_slice)
    }

    /// Number of left-hand symbols with at least one rule
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules at all
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
