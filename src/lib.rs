#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::module_name_repetitions
)]

//! calcore, the evaluation core of a scientific calculator.
//!
//! This crate turns the text typed on a calculator into the string to
//! display. The easiest way to use this crate is with the
//! [`evaluate`](fn.evaluate.html) function:
//!
//! ```
//! use calcore::{evaluate, AngleMode};
//!
//! assert_eq!(evaluate("3 + 5 * 2", AngleMode::Degrees), "13");
//! assert_eq!(evaluate("sin(30)", AngleMode::Degrees), "0.5");
//! assert_eq!(evaluate("1/3", AngleMode::Radians), "0.3333333333");
//! ```
//!
//! Failures are displayed as one of two sentinels, [`INPUT_ERROR`] when the
//! text is not a valid expression and [`EVALUATION_ERROR`] when its value
//! cannot be computed. [`try_evaluate`](fn.try_evaluate.html) keeps the
//! details instead:
//!
//! ```
//! use calcore::{try_evaluate, AngleMode, Error, ErrorKind};
//!
//! let err = try_evaluate("sqrt(-4)", AngleMode::Degrees).unwrap_err();
//! assert_eq!(err, Error::DomainError("sqrt is undefined for -4".into()));
//! assert_eq!(err.kind(), ErrorKind::Evaluation);
//! ```
//!
//! Every call is independent: the angle mode is a parameter, and the crate
//! keeps no state between calls. Front ends that need a last answer, a
//! history or constants keep them in a [`Session`](struct.Session.html).
//!
//! # Language definition
//!
//! The language implemented by calcore can contain the following elements:
//!
//! - decimal literals: `12`, `0.5`, `.5`, `3.`, and scientific notation
//!   `1.5e-3`, which is expanded to a plain decimal before parsing;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction and
//!   negation, `*` for multiplication, `/` for division and `^` for
//!   exponentiation. `^` is right associative and binds tighter than
//!   negation, so `2^3^2` is `512` and `-2^2` is `-4`;
//! - function calls: `sin`, `cos`, `tan` (in the requested angle mode),
//!   `log` (base 10), `ln`, `sqrt` and the two arguments `pow(x, y)`.
//!
//! Any other symbol, including names, is forbidden in the input.
//!
//! # Technical details
//!
//! calcore uses a Shunting-Yard pass to order the input in reverse polish
//! notation, builds an AST from it and interprets the AST with `f64`.
//! Results that are not finite are reported as evaluation errors, and values
//! closer to zero than `1e-10` are displayed as `0`.

#[macro_use]
extern crate lazy_static;

mod ast;
mod error;
mod expr;
mod format;
mod functions;
mod lexer;
mod preprocess;
mod session;
mod token;

pub use error::{Error, ErrorKind};
pub use expr::{evaluate, try_evaluate, EVALUATION_ERROR, INPUT_ERROR};
pub use format::{format_number, SIGNIFICANT_DIGITS, ZERO_THRESHOLD};
pub use functions::AngleMode;
pub use session::{HistoryEntry, Session};
