use crate::ast::{Ast, ChainOp};
use crate::error::{Error, ErrorKind};
use crate::format::format_number;
use crate::functions::AngleMode;
use crate::lexer::Lexer;
use crate::preprocess::preprocess;

/// Displayed instead of a result when the expression cannot be parsed.
pub const INPUT_ERROR: &str = "Input error";

/// Displayed instead of a result when the expression parses but cannot be
/// computed.
pub const EVALUATION_ERROR: &str = "Evaluation error";

/// Evaluate `input` and format the result for display.
///
/// Returns the canonical display string of the result (see
/// [`format_number`](fn.format_number.html)), or [`INPUT_ERROR`] if the
/// expression is malformed, or [`EVALUATION_ERROR`] if computing it failed.
///
/// # Example
///
/// ```
/// use calcore::{evaluate, AngleMode, EVALUATION_ERROR, INPUT_ERROR};
///
/// assert_eq!(evaluate("2^10", AngleMode::Degrees), "1024");
/// assert_eq!(evaluate("cos(180)", AngleMode::Degrees), "-1");
/// assert_eq!(evaluate("sqrt(-4)", AngleMode::Degrees), EVALUATION_ERROR);
/// assert_eq!(evaluate("(", AngleMode::Degrees), INPUT_ERROR);
/// ```
#[must_use]
pub fn evaluate(input: &str, mode: AngleMode) -> String {
    match try_evaluate(input, mode) {
        Ok(value) => format_number(value),
        Err(err) => {
            tracing::debug!(%err, input, %mode, "Failed to evaluate expression");
            match err.kind() {
                ErrorKind::Parse => INPUT_ERROR.into(),
                ErrorKind::Evaluation => EVALUATION_ERROR.into(),
            }
        }
    }
}

/// Evaluate `input`, keeping the error details.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed. A successful result is
/// always finite.
///
/// # Example
///
/// ```
/// # use calcore::{try_evaluate, AngleMode, Error};
/// assert_eq!(try_evaluate("45 - 2^3", AngleMode::Radians), Ok(37.0));
/// assert_eq!(
///     try_evaluate("1 / 0", AngleMode::Radians),
///     Err(Error::DomainError("division by zero".into()))
/// );
/// ```
pub fn try_evaluate(input: &str, mode: AngleMode) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval(mode))
}

/// A parsed mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expr {
    ast: Ast,
}

impl Expr {
    /// Preprocess and parse the given mathematical `expression`.
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let expression = preprocess(expression);
        tracing::trace!(expression = %expression, "Preprocessed expression");

        let mut lexer = Lexer::new(&expression);
        let ast = Ast::from_tokens(&mut lexer.parse()?)?;
        Ok(Self { ast })
    }

    /// Evaluate the expression with the given angle `mode`.
    pub fn eval(&self, mode: AngleMode) -> Result<f64, Error> {
        Self::inner_eval(&self.ast, mode)
    }

    fn inner_eval(ast: &Ast, mode: AngleMode) -> Result<f64, Error> {
        let value = match *ast {
            Ast::Value(number) => number,
            Ast::Neg(ref operand) => -Self::inner_eval(operand, mode)?,
            Ast::Chain(ref first, ref rest) => {
                let mut value = Self::inner_eval(first, mode)?;
                for (op, operand) in rest {
                    let operand = Self::inner_eval(operand, mode)?;
                    value = match *op {
                        ChainOp::Add => value + operand,
                        ChainOp::Sub => value - operand,
                        ChainOp::Mul => value * operand,
                        ChainOp::Div => {
                            if operand == 0.0 {
                                return Err(Error::DomainError("division by zero".into()));
                            }
                            value / operand
                        }
                    };
                    if !value.is_finite() {
                        return Err(Error::NumericError("result is out of range".into()));
                    }
                }
                value
            }
            Ast::Call(function, ref args) => {
                let args = args
                    .iter()
                    .map(|arg| Self::inner_eval(arg, mode))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = function.call(&args, mode)?;
                if !value.is_finite() {
                    return Err(Error::NumericError(format!(
                        "{} returned {} for {:?}",
                        function.name(),
                        value,
                        args
                    )));
                }
                value
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NumericError("result is out of range".into()))
        }
    }
}
