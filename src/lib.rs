#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate digs structured objects out of noisy text. The typical input is a language-model answer that buries a json-ish object inside prose, markdown fences, mixed quote styles or trailing garbage, and the typical output is the mapping that was meant.
//!
//! ## Why use it ?
//!
//! `serde_json` only accepts well-formed input. Model output rarely is: keys come single-quoted, booleans come capitalized, the object sits between two paragraphs of explanation. This crate finds every balanced `{...}` candidate in the text, ranks them longest-first and evaluates each one against a restricted literal grammar (never code) until one turns out to be a mapping.
//!
//! ## How to use it ?
//!
//! ### Extracting a mapping
//!
//! ```rust
//! use object_sieve::extract_mapping;
//! use object_sieve::value::{Number, Value};
//!
//! let answer = r#"Sure, here is your result: {'valid': 1} hope it helps!"#;
//!
//! let mapping = extract_mapping(answer).unwrap();
//!
//! assert_eq!(mapping["valid"], Value::Number(Number::PosInt(1)));
//! ```
//!
//! ### Extracting whatever is there
//!
//! ```rust
//! use object_sieve::{extract_object, Extracted};
//! use object_sieve::value::Value;
//!
//! let extracted = extract_object("True", "auto").unwrap();
//!
//! assert_eq!(extracted, Extracted::Value(Value::Bool(true)));
//! ```
//!
//! Image and tabular representations are handled by collaborators the host
//! plugs into a [`Dispatcher`]; the crate itself ships none and stays free
//! of I/O.

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;

mod extract;
mod parser;
mod ser;

pub mod dispatch;
pub mod error;
pub mod scanner;
pub mod value;

pub use dispatch::{
    extract_object, Dispatcher, Extracted, ImageDecoder, NoExternal, TableLoader, TargetKind,
};
pub use extract::extract_mapping;
pub use parser::parse;
