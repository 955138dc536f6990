//! Translation driver.
//!
//! This module ties the [`parser`] and the [`sql`] generator together. It
//! translates one line of relational algebra to one line of output: the SQL
//! statement, a prompt for empty input, or an error message. Translation
//! never panics and never aborts the process; every failure is reported as
//! text.
//!
//! [`parser`]: ../parser/index.html
//! [`sql`]: ../sql/index.html

use std::fmt;

use thiserror::Error;

use crate::cursor::Cursor;
use crate::parser;
use crate::sql::{Generator, Style};

/// Output for empty input.
pub const PROMPT: &str = "Please enter a relational algebra expression.";

/// Error type for translations.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The input is not a valid expression.
    #[error("Parsing Error: {0}")]
    Syntax(#[from] parser::Error),
    /// A valid expression was followed by input that could not be parsed.
    #[error(
        "Error: Could not parse entire expression. Remainder starts at: \
         {remainder}"
    )]
    Incomplete { remainder: String },
}

/// The outcome of translating one line of input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Translation {
    /// The input was empty.
    Prompt,
    /// The translated SQL statement, including its terminator.
    Sql(String),
    /// The translation failed.
    Failed(Error),
}

impl Translation {
    /// Returns true if the translation failed.
    pub fn is_error(&self) -> bool {
        match self {
            Translation::Failed(..) => true,
            _ => false,
        }
    }

    /// Returns the SQL statement, if the translation succeeded.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Translation::Sql(sql) => Some(sql.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Translation::Prompt => f.write_str(PROMPT),
            Translation::Sql(sql) => f.write_str(sql),
            Translation::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Translates relational algebra to a line of output text.
pub fn parse_and_translate(input: &str) -> String {
    translate(input).to_string()
}

/// Translates relational algebra to SQL in the default style.
pub fn translate(input: &str) -> Translation {
    translate_with(input, Style::default())
}

/// Translates relational algebra to SQL in the given style.
pub fn translate_with(input: &str, style: Style) -> Translation {
    if input.is_empty() {
        return Translation::Prompt;
    }
    match to_sql(input, style) {
        Ok(sql) => Translation::Sql(sql),
        Err(err) => {
            debug!("Translation of {:?} failed: {:?}", input, err);
            Translation::Failed(err)
        }
    }
}

/// Helper function for `translate_with`.
fn to_sql(input: &str, style: Style) -> Result<String, Error> {
    let mut cursor = Cursor::new(input);
    let expr = parser::parse_expression(&mut cursor)?;
    cursor.skip_whitespace();
    if !cursor.is_at_end() {
        return Err(Error::Incomplete {
            remainder: cursor.rest().to_string(),
        });
    }
    debug!("Parsed {}", expr);
    let sql = Generator::new(style).statement(&expr);
    debug!("Generated {}", sql);
    Ok(sql)
}
