//! Library for converting from the relational algebra to SQL.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod cursor;
pub mod ops;
pub mod parser;
pub mod ra;
pub mod sql;
pub mod translate;
