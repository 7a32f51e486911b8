use crate::error::Error;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Unit used to interpret the argument of trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleMode {
    /// Arguments are degrees, and are converted to radians before use
    #[default]
    Degrees,
    /// Arguments are used as-is
    Radians,
}

impl AngleMode {
    /// Convert an angle expressed in this unit to radians.
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// The other angle mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }
}

impl Display for AngleMode {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Degrees => write!(fmt, "degrees"),
            Self::Radians => write!(fmt, "radians"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "degrees" | "degree" | "deg" => Ok(Self::Degrees),
            "radians" | "radian" | "rad" => Ok(Self::Radians),
            other => Err(format!("unknown angle mode '{}'", other)),
        }
    }
}

/// A named function callable from expressions.
pub struct FunctionDefinition {
    name: &'static str,
    arity: usize,
    trigonometric: bool,
    /// Returns the offending argument when the domain does not hold
    domain: fn(&[f64]) -> Option<f64>,
    apply: fn(&[f64]) -> f64,
}

impl FunctionDefinition {
    /// Name used to call the function
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call the function with already evaluated `args`.
    ///
    /// Trigonometric functions convert their argument with `mode` first.
    pub fn call(&self, args: &[f64], mode: AngleMode) -> Result<f64, Error> {
        if args.len() != self.arity {
            return Err(arity_error(self.name, self.arity, args.len()));
        }
        if let Some(value) = (self.domain)(args) {
            return Err(Error::DomainError(format!(
                "{} is undefined for {}",
                self.name, value
            )));
        }
        if self.trigonometric {
            return Ok((self.apply)(&[mode.to_radians(args[0])]));
        }
        Ok((self.apply)(args))
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl PartialEq for FunctionDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

pub(crate) fn arity_error(name: &str, expected: usize, found: usize) -> Error {
    Error::ParseError(format!(
        "function '{}' takes {} argument{}, got {}",
        name,
        expected,
        if expected == 1 { "" } else { "s" },
        found
    ))
}

fn unrestricted(_: &[f64]) -> Option<f64> {
    None
}

fn positive(args: &[f64]) -> Option<f64> {
    if args[0] > 0.0 {
        None
    } else {
        Some(args[0])
    }
}

fn non_negative(args: &[f64]) -> Option<f64> {
    if args[0] >= 0.0 {
        None
    } else {
        Some(args[0])
    }
}

lazy_static! {
    /// All the functions accessible from expressions, by name
    pub static ref FUNCTIONS: HashMap<&'static str, FunctionDefinition> = {
        let definitions = [
            FunctionDefinition {
                name: "sin",
                arity: 1,
                trigonometric: true,
                domain: unrestricted,
                apply: |args| libm::sin(args[0]),
            },
            FunctionDefinition {
                name: "cos",
                arity: 1,
                trigonometric: true,
                domain: unrestricted,
                apply: |args| libm::cos(args[0]),
            },
            FunctionDefinition {
                name: "tan",
                arity: 1,
                trigonometric: true,
                domain: unrestricted,
                apply: |args| libm::tan(args[0]),
            },
            FunctionDefinition {
                name: "log",
                arity: 1,
                trigonometric: false,
                domain: positive,
                apply: |args| libm::log10(args[0]),
            },
            FunctionDefinition {
                name: "ln",
                arity: 1,
                trigonometric: false,
                domain: positive,
                apply: |args| libm::log(args[0]),
            },
            FunctionDefinition {
                name: "sqrt",
                arity: 1,
                trigonometric: false,
                domain: non_negative,
                apply: |args| libm::sqrt(args[0]),
            },
            FunctionDefinition {
                name: "pow",
                arity: 2,
                trigonometric: false,
                domain: unrestricted,
                apply: |args| libm::pow(args[0], args[1]),
            },
        ];
        definitions.into_iter().map(|def| (def.name, def)).collect()
    };
}

/// Name of the function `^` is lowered to
pub const POW: &str = "pow";
