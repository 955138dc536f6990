//! Structured Query Language (SQL).
//!
//! This module implements conversion from the relational algebra (see the
//! [`ra`] module) to a single SQL `SELECT` statement. Each subexpression is
//! converted bottom-up to a [`Fragment`]: its SQL text, tagged with the shape
//! of statement it is. The tag decides whether the fragment must become a
//! derived table, parenthesized and aliased, before it can appear where SQL
//! expects a table name.
//!
//! [`ra`]: ../ra/index.html
//! [`Fragment`]: struct.Fragment.html

use crate::ops::Binary;
use crate::ra::Expr;

/// Style options for conversion to SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Prefix of derived table aliases, followed by a number.
    pub alias_prefix: String,
    /// Text appended to a complete statement.
    pub terminator: String,
}

impl Default for Style {
    fn default() -> Style {
        Style {
            alias_prefix: "T_".to_string(),
            terminator: ";".to_string(),
        }
    }
}

/// The kind of SQL a fragment is.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Shape {
    /// A bare table name.
    Table,
    /// A `SELECT` statement from a projection or selection.
    Select,
    /// Two statements combined with `UNION`.
    Union,
    /// Two statements combined with `EXCEPT`.
    Except,
    /// A `SELECT` statement over a natural join or cross join.
    Join,
}

/// A self-contained piece of generated SQL.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Fragment {
    text: String,
    shape: Shape,
    /// Whether the text contains a `SELECT` or `UNION` statement.
    has_query: bool,
}

impl Fragment {
    /// Creates a fragment naming a table.
    fn table(name: &str) -> Fragment {
        Fragment {
            text: name.to_string(),
            shape: Shape::Table,
            has_query: false,
        }
    }

    /// Creates a fragment for a statement of the given shape.
    fn statement(shape: Shape, text: String) -> Fragment {
        Fragment {
            text,
            shape,
            has_query: true,
        }
    }

    /// Returns the SQL text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the shape of the SQL.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns true if the text contains a `SELECT` or `UNION` statement.
    ///
    /// This is true of every shape except tables and differences of tables.
    pub fn has_query(&self) -> bool {
        self.has_query
    }

    /// Converts the fragment into its SQL text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Converts relational algebra expressions to SQL.
///
/// Derived tables are numbered from 1 in the order they are generated. A
/// generator should be used for one statement, so that its aliases are
/// unique and the output is reproducible.
#[derive(Debug)]
pub struct Generator {
    style: Style,
    /// Number of the next derived table alias.
    next_alias: usize,
}

impl Default for Generator {
    fn default() -> Generator {
        Generator::new(Style::default())
    }
}

impl Generator {
    /// Creates a generator with the given style.
    pub fn new(style: Style) -> Generator {
        Generator {
            style,
            next_alias: 1,
        }
    }

    /// Converts an expression to a complete, terminated SQL statement.
    pub fn statement(&mut self, expr: &Expr) -> String {
        let mut sql = self.generate(expr).into_string();
        sql.push_str(&self.style.terminator);
        sql
    }

    /// Converts an expression to a SQL fragment.
    pub fn generate(&mut self, expr: &Expr) -> Fragment {
        let fragment = match expr {
            Expr::Relation(name) => Fragment::table(name),
            Expr::Project(attrs, input) => {
                let input = self.generate(input);
                let from = self.from_clause(input);
                let text = format!("SELECT {} FROM {}", attrs, from);
                Fragment::statement(Shape::Select, text)
            }
            Expr::Select(cond, input) => {
                let input = self.generate(input);
                let from = self.from_clause(input);
                let text = format!("SELECT * FROM {} WHERE {}", from, cond);
                Fragment::statement(Shape::Select, text)
            }
            Expr::Union(lhs, rhs) => self.combine(Binary::Union, lhs, rhs),
            Expr::Difference(lhs, rhs) => {
                self.combine(Binary::Difference, lhs, rhs)
            }
            Expr::Join(lhs, rhs) => self.combine(Binary::Join, lhs, rhs),
            Expr::Product(lhs, rhs) => {
                self.combine(Binary::Product, lhs, rhs)
            }
        };
        trace!("Generated {:?} fragment: {}", fragment.shape, fragment.text);
        fragment
    }

    /// Converts both operands of a binary operator and combines them.
    fn combine(&mut self, op: Binary, lhs: &Expr, rhs: &Expr) -> Fragment {
        let lhs = self.generate(lhs);
        let rhs = self.generate(rhs);
        match op {
            Binary::Union => {
                let text = format!("({}) UNION ({})", lhs.text, rhs.text);
                Fragment::statement(Shape::Union, text)
            }
            Binary::Difference => Fragment {
                text: format!("({}) EXCEPT ({})", lhs.text, rhs.text),
                shape: Shape::Except,
                has_query: lhs.has_query || rhs.has_query,
            },
            Binary::Join => self.join("NATURAL JOIN", lhs, rhs),
            Binary::Product => self.join("CROSS JOIN", lhs, rhs),
        }
    }

    /// Helper function for `combine`, joining two table references.
    fn join(
        &mut self,
        keyword: &str,
        lhs: Fragment,
        rhs: Fragment,
    ) -> Fragment {
        let lhs = self.table_ref(lhs);
        let rhs = self.table_ref(rhs);
        let text = format!("SELECT * FROM {} {} {}", lhs, keyword, rhs);
        Fragment::statement(Shape::Join, text)
    }

    /// Returns SQL for using a fragment as a join operand.
    ///
    /// Anything other than a bare table name becomes a derived table.
    fn table_ref(&mut self, fragment: Fragment) -> String {
        match fragment.shape {
            Shape::Table => fragment.text,
            _ => self.derived(fragment),
        }
    }

    /// Returns SQL for using a fragment in the `FROM` clause of a projection
    /// or selection.
    ///
    /// Only fragments containing a `SELECT` or `UNION` statement become
    /// derived tables. A difference of bare tables, such as
    /// `(A) EXCEPT (B)`, is used as is.
    fn from_clause(&mut self, fragment: Fragment) -> String {
        if fragment.has_query {
            self.derived(fragment)
        } else {
            fragment.text
        }
    }

    /// Wraps a fragment as a derived table with a fresh alias.
    fn derived(&mut self, fragment: Fragment) -> String {
        let alias = self.next_alias;
        self.next_alias += 1;
        format!("({}) {}{}", fragment.text, self.style.alias_prefix, alias)
    }
}
