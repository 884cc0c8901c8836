//! # hcl-core
//!
//! Parser and in-memory value model for **HCL v1** (HashiCorp
//! Configuration Language). Consumes UTF-8 text and produces a
//! dynamically-typed [`Value`] tree suitable for application consumption,
//! introspection, and writing back out.
//!
//! `${…}` interpolation sequences are preserved as opaque string content —
//! this crate does not evaluate HIL, validate schemas, or understand HCL2.
//!
//! ## Quick start
//!
//! ```rust
//! use hcl_core::parse;
//!
//! let config = parse(r#"
//! region = "us-east-1"
//! instance "web" {
//!     count = 2
//! }
//! "#)
//! .unwrap();
//!
//! assert_eq!(config.get::<String>("region").unwrap(), "us-east-1");
//! assert_eq!(config.get::<i64>("instance.web.count").unwrap(), 2);
//! ```
//!
//! Repeated statements at the same key fold into lists, which is what makes
//! HCL blocks associative:
//!
//! ```rust
//! use hcl_core::parse;
//!
//! let config = parse(r#"
//! chara "putit" { hp = 10 }
//! chara "snail" { hp = 5 }
//! "#)
//! .unwrap();
//!
//! let charas = config.find("chara").unwrap();
//! assert_eq!(charas.len(), 2);
//! assert_eq!(charas[0].get::<i64>("putit.hp").unwrap(), 10);
//! ```
//!
//! ## Modules
//!
//! - [`lexer`] — text → token stream (strings, heredocs, numbers)
//! - [`parser`] — token stream → [`Value`] tree, with the block-fold rule
//! - [`value`] — the value tree: typed access, dotted paths, merging
//! - [`index`] — `&str`/`usize` lookup plumbing and square-bracket access
//! - [`error`] — error types shared by parsing and value access

pub mod error;
pub mod index;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;
mod writer;

pub use error::{Error, Result};
pub use index::ValueIndex;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;
pub use value::{FromValue, List, Object, Value};

use std::fs;
use std::path::Path;

/// Parse HCL text. On success the value is always an object.
pub fn parse(input: &str) -> Result<Value> {
    Parser::new(input).parse()
}

/// Parse the HCL file at `path`.
///
/// File contents must be UTF-8; an optional byte-order mark is tolerated.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}
