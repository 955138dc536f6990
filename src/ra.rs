//! Relational algebra.
//!
//! This module defines the relational algebra expression tree produced by the
//! [`parser`] and consumed by the [`sql`] generator. It also implements
//! `Display` for unparsing an expression back to its textual notation, which
//! is used for logging.
//!
//! [`parser`]: ../parser/index.html
//! [`sql`]: ../sql/index.html

use std::fmt;

use crate::ops::{self, Binary, Parenthesize, Precedence, Prefix};

/// An expression in the relational algebra.
///
/// The lifetime 'a is the lifetime of the input text. Relation names,
/// attribute lists and conditions refer directly into it without making any
/// copies. Grouping parentheses are not represented: `(R)` parses to the same
/// tree as `R`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expr<'a> {
    /// A named relation (table).
    Relation(&'a str),
    /// Projection onto an attribute list, kept verbatim.
    Project(&'a str, Box<Expr<'a>>),
    /// Selection by a condition, kept verbatim.
    Select(&'a str, Box<Expr<'a>>),
    /// Set union of two expressions.
    Union(Box<Expr<'a>>, Box<Expr<'a>>),
    /// Set difference of two expressions.
    Difference(Box<Expr<'a>>, Box<Expr<'a>>),
    /// Natural join of two expressions.
    Join(Box<Expr<'a>>, Box<Expr<'a>>),
    /// Cross product of two expressions.
    Product(Box<Expr<'a>>, Box<Expr<'a>>),
}

impl<'a> Expr<'a> {
    /// Applies a prefix operator to an operand.
    pub fn prefix(op: Prefix, arg: &'a str, input: Expr<'a>) -> Expr<'a> {
        match op {
            Prefix::Project => Expr::Project(arg, Box::new(input)),
            Prefix::Select => Expr::Select(arg, Box::new(input)),
        }
    }

    /// Applies a binary operator to two operands.
    pub fn binary(op: Binary, lhs: Expr<'a>, rhs: Expr<'a>) -> Expr<'a> {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Binary::Union => Expr::Union(lhs, rhs),
            Binary::Difference => Expr::Difference(lhs, rhs),
            Binary::Join => Expr::Join(lhs, rhs),
            Binary::Product => Expr::Product(lhs, rhs),
        }
    }
}

impl<'a> fmt::Display for Expr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Relation(name) => f.write_str(name),
            Expr::Project(arg, input) => {
                write!(f, "{} {}({})", Prefix::Project, arg, input)
            }
            Expr::Select(arg, input) => {
                write!(f, "{} {}({})", Prefix::Select, arg, input)
            }
            Expr::Union(lhs, rhs) => {
                ops::write_operation(f, Binary::Union, &**lhs, &**rhs)
            }
            Expr::Difference(lhs, rhs) => {
                ops::write_operation(f, Binary::Difference, &**lhs, &**rhs)
            }
            Expr::Join(lhs, rhs) => {
                ops::write_operation(f, Binary::Join, &**lhs, &**rhs)
            }
            Expr::Product(lhs, rhs) => {
                ops::write_operation(f, Binary::Product, &**lhs, &**rhs)
            }
        }
    }
}

impl<'a> Parenthesize for Expr<'a> {
    fn precedence(&self) -> Precedence {
        match self {
            Expr::Relation(..) => ops::HIGHEST_PRECEDENCE,
            Expr::Project(..) | Expr::Select(..) => ops::LOWEST_PRECEDENCE,
            _ => ops::BINARY_PRECEDENCE,
        }
    }
}
