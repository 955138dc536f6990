//! Syntactic operators.
//!
//! This module defines the operators recognized in relational algebra
//! expressions. It gives their glyphs, defines their precedences, and
//! implements a function for displaying them with minimal parenthesization.
//!
//! Glyphs are matched against the input by their exact UTF-8 bytes, so the
//! parser never needs to decode characters: "π", "σ" and "×" are two bytes
//! long, "∪" and "⨝" are three, and "-" is one.

use std::fmt;

/// Operator precedence (zero is lowest).
pub type Precedence = u32;

/// The lowest precedence, used for prefix operators.
///
/// The operand of a prefix operator extends as far to the right as possible
/// (like the body of a quantifier), so it must be parenthesized whenever it
/// appears as the operand of a binary operator.
pub const LOWEST_PRECEDENCE: Precedence = 0;

/// The precedence shared by all binary operators.
pub const BINARY_PRECEDENCE: Precedence = 1;

/// The highest precedence, used for relation names.
pub const HIGHEST_PRECEDENCE: Precedence = 2;

pub const PROJECT: &str = "π";
pub const SELECT: &str = "σ";
pub const UNION: &str = "∪";
pub const DIFFERENCE: &str = "-";
pub const JOIN: &str = "⨝";
pub const PRODUCT: &str = "×";

/// Operators written before their operand, with free-form text (an attribute
/// list or a condition) between the glyph and the opening parenthesis.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Prefix {
    /// Projection onto a list of attributes.
    Project,
    /// Selection of the rows satisfying a condition.
    Select,
}

/// Operators written between two operands.
///
/// All binary operators share one precedence level and are left-associative.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Binary {
    /// Set union.
    Union,
    /// Set difference.
    Difference,
    /// Natural join.
    Join,
    /// Cross product.
    Product,
}

/// List of prefix operators, in the order the parser tries them.
pub const PREFIX_LIST: [Prefix; 2] = [Prefix::Project, Prefix::Select];

/// List of binary operators, in the order the parser tries them.
pub const BINARY_LIST: [Binary; 4] =
    [Binary::Union, Binary::Difference, Binary::Join, Binary::Product];

impl Prefix {
    /// Returns the glyph that introduces the operator.
    pub fn glyph(self) -> &'static str {
        match self {
            Prefix::Project => PROJECT,
            Prefix::Select => SELECT,
        }
    }

    /// Returns the name of the operator, for error messages.
    pub fn name(self) -> &'static str {
        match self {
            Prefix::Project => "Project",
            Prefix::Select => "Select",
        }
    }
}

impl Binary {
    /// Returns the glyph of the operator.
    pub fn glyph(self) -> &'static str {
        match self {
            Binary::Union => UNION,
            Binary::Difference => DIFFERENCE,
            Binary::Join => JOIN,
            Binary::Product => PRODUCT,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// An expression that may need to be parenthesized.
pub trait Parenthesize {
    /// Returns the precedence of the expression.
    fn precedence(&self) -> Precedence;
}

/// Formats a binary operation.
///
/// Writes `lhs op rhs` to `f` with spaces around the operator. Since binary
/// operators are left-associative and the right operand of a binary operator
/// is a single term, the left operand is parenthesized only when its
/// precedence is lower, and the right operand whenever it is not higher.
pub fn write_operation<T>(
    f: &mut fmt::Formatter,
    op: Binary,
    lhs: &T,
    rhs: &T,
) -> fmt::Result
where
    T: fmt::Display + Parenthesize,
{
    let prec = BINARY_PRECEDENCE;
    match (prec > lhs.precedence(), prec >= rhs.precedence()) {
        (false, false) => write!(f, "{} {} {}", lhs, op, rhs),
        (false, true) => write!(f, "{} {} ({})", lhs, op, rhs),
        (true, false) => write!(f, "({}) {} {}", lhs, op, rhs),
        (true, true) => write!(f, "({}) {} ({})", lhs, op, rhs),
    }
}
