//! Tokenizer for additive formulas.
//!
//! A formula body (the text after `=`) is a `+`-separated operand list.
//! Each operand is either a cell reference or a numeric literal:
//!
//! ```text
//! A1+B2+4.5
//! ```
//!
//! Parsing happens once, when the formula is entered. Evaluation walks
//! the typed operand list and never looks at the source text again.

use regex::Regex;
use std::sync::OnceLock;

use super::{CellRef, FormulaError};

/// One term of an operand list.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Reference(CellRef),
    Literal(f64),
}

/// A parsed operand list together with the text it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    source: String,
    operands: Vec<Operand>,
}

impl Formula {
    /// Parse the body of a formula (without the leading `=`).
    ///
    /// Tokens are trimmed. A token starting with a letter must be a valid
    /// reference; anything else must be a numeric literal. An empty token
    /// (e.g. `A1++B1` or a bare `=`) is malformed.
    pub fn parse(source: &str) -> Result<Formula, FormulaError> {
        let operands = source
            .split('+')
            .map(|token| parse_operand(token.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Formula {
            source: source.to_string(),
            operands,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Cells this formula reads, in operand order, without duplicates.
    pub fn references(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = Vec::new();
        for op in &self.operands {
            if let Operand::Reference(r) = op
                && !refs.contains(r)
            {
                refs.push(*r);
            }
        }
        refs
    }
}

fn parse_operand(token: &str) -> Result<Operand, FormulaError> {
    let starts_alpha = token.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_alpha {
        return CellRef::from_str(token)
            .map(Operand::Reference)
            .ok_or_else(|| FormulaError::invalid_reference(token));
    }
    parse_number(token)
        .map(Operand::Literal)
        .ok_or_else(|| FormulaError::invalid_reference(token))
}

/// Parse text that fully matches decimal number syntax.
///
/// Rejects the spellings `f64::from_str` accepts beyond plain numbers
/// (`inf`, `NaN`) and anything that overflows to infinity.
pub fn parse_number(text: &str) -> Option<f64> {
    if !number_re().is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("number regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_references_and_literals() {
        let formula = Formula::parse("A1+B2+4.5").unwrap();
        assert_eq!(
            formula.operands(),
            &[
                Operand::Reference(CellRef::new(0, 0)),
                Operand::Reference(CellRef::new(1, 1)),
                Operand::Literal(4.5),
            ]
        );
        assert_eq!(formula.source(), "A1+B2+4.5");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let formula = Formula::parse(" A1 + 2 ").unwrap();
        assert_eq!(
            formula.operands(),
            &[Operand::Reference(CellRef::new(0, 0)), Operand::Literal(2.0)]
        );
    }

    #[test]
    fn test_parse_rejects_empty_tokens() {
        assert!(matches!(
            Formula::parse(""),
            Err(FormulaError::InvalidReference { .. })
        ));
        assert!(matches!(
            Formula::parse("A1++B1"),
            Err(FormulaError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert_eq!(
            Formula::parse("A1+B1x"),
            Err(FormulaError::invalid_reference("B1x"))
        );
        assert_eq!(
            Formula::parse("5x"),
            Err(FormulaError::invalid_reference("5x"))
        );
        assert!(Formula::parse("A1-B1").is_err());
    }

    #[test]
    fn test_references_are_deduplicated() {
        let formula = Formula::parse("A1+A1+B1+3").unwrap();
        assert_eq!(
            formula.references(),
            vec![CellRef::new(0, 0), CellRef::new(0, 1)]
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("5"), Some(5.0));
        assert_eq!(parse_number("-3.25"), Some(-3.25));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("7."), Some(7.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number(" 5"), None);
    }
}
