//! Relational algebra parser.
//!
//! This is a recursive descent parser with one function per nonterminal. Each
//! function takes the shared [`Cursor`], advances it past the input it
//! recognizes, and returns the corresponding [`Expr`]:
//!
//! ```text
//! expression := term (("∪" | "-" | "⨝" | "×") term)*
//! term       := "π" projection | "σ" selection | "(" expression ")" | name
//! projection := attributes expression
//! selection  := condition expression
//! ```
//!
//! The attribute list and condition are free-form text running up to the next
//! `(`, which opens the operand. The operand is a whole expression, so binary
//! operators following its closing parenthesis are absorbed into it:
//! `π a(R) ∪ S` parses as `π a(R ∪ S)`.
//!
//! [`Cursor`]: ../cursor/struct.Cursor.html
//! [`Expr`]: ../ra/enum.Expr.html

use thiserror::Error;

use crate::cursor::{self, Cursor};
use crate::ops::{self, Prefix};
use crate::ra::Expr;

/// Maximum nesting depth of an expression.
///
/// Each parenthesized group, prefix operation and binary operation in a chain
/// counts one level. Bounding the depth bounds the recursion of the parser,
/// the SQL generator and the `Expr` tree itself.
pub const MAX_DEPTH: usize = 256;

/// A syntax error. The first one encountered aborts the parse.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A relation name was required but not found.
    #[error("Expected an identifier (e.g., table name).")]
    ExpectedIdentifier,
    /// A projection or selection had no opening parenthesis after it.
    #[error("Syntax error in {} ({}): missing '('.", .0.name(), .0.glyph())]
    MissingParen(Prefix),
    /// A parenthesized expression was not closed.
    #[error("Syntax error: mismatched parentheses.")]
    MismatchedParens,
    /// The input ended where a term was expected.
    #[error("Unexpected end of expression.")]
    UnexpectedEnd,
    /// The expression is nested more than `MAX_DEPTH` levels deep.
    #[error("Expression nested too deeply (limit is {} levels).", MAX_DEPTH)]
    TooDeep,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, Error>;

/// Enters one more level of nesting.
fn descend(cursor: &mut Cursor) -> ParseResult<()> {
    if cursor.depth() >= MAX_DEPTH {
        return Err(Error::TooDeep);
    }
    cursor.set_depth(cursor.depth() + 1);
    Ok(())
}

/// Parses a chain of terms joined by binary operators.
///
/// All binary operators share one precedence level, so the chain is folded
/// strictly left to right.
pub fn parse_expression<'a>(cursor: &mut Cursor<'a>) -> ParseResult<Expr<'a>> {
    let depth = cursor.depth();
    let mut lhs = parse_term(cursor)?;
    loop {
        cursor.skip_whitespace();
        let op = match ops::BINARY_LIST
            .iter()
            .cloned()
            .find(|op| cursor.eat(op.glyph()))
        {
            Some(op) => op,
            None => break,
        };
        // Each fold deepens the left spine of the tree.
        descend(cursor)?;
        let rhs = parse_term(cursor)?;
        trace!("Parsed {} operation ending at {}", op, cursor.pos());
        lhs = Expr::binary(op, lhs, rhs);
    }
    cursor.set_depth(depth);
    Ok(lhs)
}

/// Parses a single term: a prefix operation, a parenthesized expression, or
/// a relation name.
pub fn parse_term<'a>(cursor: &mut Cursor<'a>) -> ParseResult<Expr<'a>> {
    cursor.skip_whitespace();
    if cursor.is_at_end() {
        return Err(Error::UnexpectedEnd);
    }
    let depth = cursor.depth();
    let prefix = ops::PREFIX_LIST
        .iter()
        .cloned()
        .find(|op| cursor.eat(op.glyph()));
    let expr = if let Some(op) = prefix {
        descend(cursor)?;
        match op {
            Prefix::Project => parse_projection(cursor)?,
            Prefix::Select => parse_selection(cursor)?,
        }
    } else if cursor.consume('(') {
        descend(cursor)?;
        let inner = parse_expression(cursor)?;
        if !cursor.consume(')') {
            return Err(Error::MismatchedParens);
        }
        inner
    } else {
        Expr::Relation(cursor.parse_identifier()?)
    };
    cursor.set_depth(depth);
    Ok(expr)
}

/// Parses a projection, with the cursor just after the "π" glyph.
pub fn parse_projection<'a>(cursor: &mut Cursor<'a>) -> ParseResult<Expr<'a>> {
    parse_prefix_operand(cursor, Prefix::Project)
}

/// Parses a selection, with the cursor just after the "σ" glyph.
pub fn parse_selection<'a>(cursor: &mut Cursor<'a>) -> ParseResult<Expr<'a>> {
    parse_prefix_operand(cursor, Prefix::Select)
}

/// Helper function for `parse_projection` and `parse_selection`.
fn parse_prefix_operand<'a>(
    cursor: &mut Cursor<'a>,
    op: Prefix,
) -> ParseResult<Expr<'a>> {
    cursor.skip_whitespace();
    let open = cursor.find('(').ok_or(Error::MissingParen(op))?;
    let arg = cursor.take_until(open).trim_end_matches(cursor::is_space);
    let input = parse_expression(cursor)?;
    Ok(Expr::prefix(op, arg, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Binary;

    /// Parses an expression, returning it with the unconsumed input.
    fn parse(text: &str) -> ParseResult<(Expr, &str)> {
        let mut cursor = Cursor::new(text);
        let expr = parse_expression(&mut cursor)?;
        Ok((expr, cursor.rest()))
    }

    fn rel(name: &str) -> Expr {
        Expr::Relation(name)
    }

    #[test]
    fn relation() {
        assert_eq!(parse("  Emp  "), Ok((rel("Emp"), "")));
    }

    #[test]
    fn projection() {
        assert_eq!(
            parse("π a,b(R)"),
            Ok((Expr::prefix(Prefix::Project, "a,b", rel("R")), ""))
        );
    }

    #[test]
    fn projection_trims_attributes() {
        assert_eq!(
            parse("π   a , b \t (R)"),
            Ok((Expr::prefix(Prefix::Project, "a , b", rel("R")), ""))
        );
    }

    #[test]
    fn selection() {
        assert_eq!(
            parse("σ a>1 AND b<2(R)"),
            Ok((Expr::prefix(Prefix::Select, "a>1 AND b<2", rel("R")), ""))
        );
    }

    #[test]
    fn left_associative() {
        assert_eq!(
            parse("A ∪ B - C"),
            Ok((
                Expr::binary(
                    Binary::Difference,
                    Expr::binary(Binary::Union, rel("A"), rel("B")),
                    rel("C"),
                ),
                ""
            ))
        );
    }

    #[test]
    fn same_precedence() {
        assert_eq!(
            parse("A×B⨝C"),
            Ok((
                Expr::binary(
                    Binary::Join,
                    Expr::binary(Binary::Product, rel("A"), rel("B")),
                    rel("C"),
                ),
                ""
            ))
        );
    }

    #[test]
    fn grouping() {
        assert_eq!(
            parse("A ∪ ((B - C))"),
            Ok((
                Expr::binary(
                    Binary::Union,
                    rel("A"),
                    Expr::binary(Binary::Difference, rel("B"), rel("C")),
                ),
                ""
            ))
        );
    }

    #[test]
    fn prefix_operand_absorbs_chain() {
        assert_eq!(
            parse("π a(R) ∪ S"),
            Ok((
                Expr::prefix(
                    Prefix::Project,
                    "a",
                    Expr::binary(Binary::Union, rel("R"), rel("S")),
                ),
                ""
            ))
        );
    }

    #[test]
    fn parenthesized_prefix_operand() {
        assert_eq!(
            parse("(π a(R)) ∪ S"),
            Ok((
                Expr::binary(
                    Binary::Union,
                    Expr::prefix(Prefix::Project, "a", rel("R")),
                    rel("S"),
                ),
                ""
            ))
        );
    }

    #[test]
    fn nested_prefix() {
        assert_eq!(
            parse("π a(σ b=1(R))"),
            Ok((
                Expr::prefix(
                    Prefix::Project,
                    "a",
                    Expr::prefix(Prefix::Select, "b=1", rel("R")),
                ),
                ""
            ))
        );
    }

    #[test]
    fn stops_at_unknown_character() {
        assert_eq!(parse("A ) B"), Ok((rel("A"), ") B")));
    }

    #[test]
    fn empty() {
        assert_eq!(parse(""), Err(Error::UnexpectedEnd));
        assert_eq!(parse("   "), Err(Error::UnexpectedEnd));
    }

    #[test]
    fn missing_right_operand() {
        assert_eq!(parse("A ∪ "), Err(Error::UnexpectedEnd));
        assert_eq!(parse("A ∪ ×"), Err(Error::ExpectedIdentifier));
    }

    #[test]
    fn missing_paren() {
        assert_eq!(parse("π a,b"), Err(Error::MissingParen(Prefix::Project)));
        assert_eq!(parse("σ a>1"), Err(Error::MissingParen(Prefix::Select)));
    }

    #[test]
    fn mismatched_parens() {
        assert_eq!(parse("(A"), Err(Error::MismatchedParens));
        assert_eq!(parse("π a((R)"), Err(Error::MismatchedParens));
    }

    #[test]
    fn unexpected_glyph() {
        assert_eq!(parse("∪ A"), Err(Error::ExpectedIdentifier));
        assert_eq!(parse("π a()"), Err(Error::ExpectedIdentifier));
    }

    fn nested_parens(n: usize) -> String {
        format!("{}A{}", "(".repeat(n), ")".repeat(n))
    }

    fn union_chain(n: usize) -> String {
        format!("A{}", " ∪ A".repeat(n))
    }

    #[test]
    fn parens_at_depth_limit() {
        assert_eq!(parse(&nested_parens(MAX_DEPTH)), Ok((rel("A"), "")));
    }

    #[test]
    fn parens_past_depth_limit() {
        assert_eq!(parse(&nested_parens(MAX_DEPTH + 1)), Err(Error::TooDeep));
    }

    #[test]
    fn deep_parens_fail_fast() {
        assert_eq!(parse(&nested_parens(10_000)), Err(Error::TooDeep));
    }

    #[test]
    fn chain_at_depth_limit() {
        let expected = (0..MAX_DEPTH).fold(rel("A"), |lhs, _| {
            Expr::binary(Binary::Union, lhs, rel("A"))
        });
        assert_eq!(parse(&union_chain(MAX_DEPTH)), Ok((expected, "")));
    }

    #[test]
    fn chain_past_depth_limit() {
        assert_eq!(parse(&union_chain(MAX_DEPTH + 1)), Err(Error::TooDeep));
    }

    #[test]
    fn prefix_nesting_counts() {
        let n = MAX_DEPTH;
        let text = format!("{}R{}", "π a(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&text), Err(Error::TooDeep));
    }

    #[test]
    fn depth_is_released_between_siblings() {
        let group = nested_parens(MAX_DEPTH - 1);
        let text = format!("{} ∪ {}", group, group);
        assert_eq!(
            parse(&text),
            Ok((Expr::binary(Binary::Union, rel("A"), rel("A")), ""))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::ExpectedIdentifier.to_string(),
            "Expected an identifier (e.g., table name)."
        );
        assert_eq!(
            Error::MissingParen(Prefix::Project).to_string(),
            "Syntax error in Project (π): missing '('."
        );
        assert_eq!(
            Error::MissingParen(Prefix::Select).to_string(),
            "Syntax error in Select (σ): missing '('."
        );
        assert_eq!(
            Error::MismatchedParens.to_string(),
            "Syntax error: mismatched parentheses."
        );
        assert_eq!(
            Error::UnexpectedEnd.to_string(),
            "Unexpected end of expression."
        );
        assert_eq!(
            Error::TooDeep.to_string(),
            "Expression nested too deeply (limit is 256 levels)."
        );
    }
}
