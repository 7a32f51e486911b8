use crate::error::Error;
use crate::functions::{arity_error, FunctionDefinition, FUNCTIONS, POW};
use crate::token::{Op, Token};

/// Operators that can be chained in a single [`Ast::Chain`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
}

impl ChainOp {
    fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

/// Ast nodes for the expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A constant value
    Value(f64),
    /// -<operand>
    Neg(Box<Ast>),
    /// <first> <op> <operand> <op> <operand>..., evaluated from left to
    /// right. All operators are either additive or multiplicative:
    /// `1 - 2 + 3` or `4 * 5 / 6`. Long sums and products stay one level deep.
    Chain(Box<Ast>, Vec<(ChainOp, Ast)>),
    /// fn(<args>...). `<left> ^ <right>` is stored as `pow(<left>, <right>)`
    Call(&'static FunctionDefinition, Vec<Ast>),
}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    /// This function eats the tokens as it uses them, and fails unless they
    /// form exactly one expression.
    pub fn from_tokens(tokens: &mut Vec<Token>) -> Result<Self, Error> {
        let mut operands: Vec<Self> = Vec::new();

        for token in tokens.drain(..) {
            let node = match token {
                Token::Value(value) => Self::Value(value),
                Token::Call(name, count) => {
                    let function = Self::function(name)?;
                    if count != function.arity() {
                        return Err(arity_error(name, function.arity(), count));
                    }
                    if operands.len() < count {
                        return Err(missing(" in function call"));
                    }
                    let args = operands.split_off(operands.len() - count);
                    Self::Call(function, args)
                }
                Token::Op(op) => {
                    let right = operands.pop().ok_or_else(|| missing(" after operator"))?;
                    let chain_op = match op {
                        Op::Neg => {
                            operands.push(Self::Neg(Box::new(right)));
                            continue;
                        }
                        Op::Plus => ChainOp::Add,
                        Op::Minus => ChainOp::Sub,
                        Op::Mul => ChainOp::Mul,
                        Op::Div => ChainOp::Div,
                        Op::Exp => {
                            let left = operands.pop().ok_or_else(|| missing(" before operator"))?;
                            operands.push(Self::Call(Self::function(POW)?, vec![left, right]));
                            continue;
                        }
                    };
                    let left = operands.pop().ok_or_else(|| missing(" before operator"))?;
                    Self::chain(left, chain_op, right)
                }
                other => {
                    return Err(Error::ParseError(format!(
                        "internal error: got {:?} token after shunting yard",
                        other
                    )))
                }
            };
            operands.push(node);
        }

        let ast = operands.pop().ok_or_else(|| missing(""))?;
        if operands.is_empty() {
            Ok(ast)
        } else {
            Err(Error::ParseError("unused values in expression".into()))
        }
    }

    fn chain(left: Self, op: ChainOp, right: Self) -> Self {
        match left {
            // `(a - b) - c` and `a - b - c` are the same computation
            Self::Chain(first, mut rest)
                if rest
                    .first()
                    .is_some_and(|&(other, _)| other.is_additive() == op.is_additive()) =>
            {
                rest.push((op, right));
                Self::Chain(first, rest)
            }
            left => Self::Chain(Box::new(left), vec![(op, right)]),
        }
    }

    fn function(name: &str) -> Result<&'static FunctionDefinition, Error> {
        FUNCTIONS
            .get(name)
            .ok_or_else(|| Error::ParseError(format!("unknown function '{}'", name)))
    }
}

fn missing(context: &str) -> Error {
    Error::ParseError(format!("empty expression{}", context))
}

#[cfg(test)]
mod tests {
    use super::{Ast, ChainOp};
    use crate::error::Error;
    use crate::functions::FUNCTIONS;
    use crate::lexer::{Lexer, MAX_DEPTH};
    use crate::token::{Op, Token};

    fn ast(input: &str) -> Result<Ast, Error> {
        Ast::from_tokens(&mut Lexer::new(input).parse()?)
    }

    fn value(v: f64) -> Ast {
        Ast::Value(v)
    }

    #[test]
    fn power_is_lowered_to_pow() {
        let pow = &FUNCTIONS["pow"];
        assert_eq!(
            ast("2^3").unwrap(),
            Ast::Call(pow, vec![value(2.0), value(3.0)])
        );
        assert_eq!(
            ast("2^3^2").unwrap(),
            Ast::Call(
                pow,
                vec![value(2.0), Ast::Call(pow, vec![value(3.0), value(2.0)])]
            )
        );
    }

    #[test]
    fn arguments_keep_their_order() {
        let pow = &FUNCTIONS["pow"];
        assert_eq!(
            ast("pow(2, 10)").unwrap(),
            Ast::Call(pow, vec![value(2.0), value(10.0)])
        );
        assert_eq!(ast("-(4)").unwrap(), Ast::Neg(Box::new(value(4.0))));
        assert_eq!(ast("(7)").unwrap(), value(7.0));
    }

    #[test]
    fn chains() {
        assert_eq!(
            ast("1 - 2 + 3").unwrap(),
            Ast::Chain(
                Box::new(value(1.0)),
                vec![(ChainOp::Sub, value(2.0)), (ChainOp::Add, value(3.0))]
            )
        );
        // a right operand is never merged into the chain
        assert_eq!(
            ast("1 - (2 + 3)").unwrap(),
            Ast::Chain(
                Box::new(value(1.0)),
                vec![(
                    ChainOp::Sub,
                    Ast::Chain(Box::new(value(2.0)), vec![(ChainOp::Add, value(3.0))])
                )]
            )
        );
        // neither is an operand of another precedence
        assert_eq!(
            ast("2 * 3 + 4").unwrap(),
            Ast::Chain(
                Box::new(Ast::Chain(
                    Box::new(value(2.0)),
                    vec![(ChainOp::Mul, value(3.0))]
                )),
                vec![(ChainOp::Add, value(4.0))]
            )
        );

        let terms = vec!["1"; 1000].join("+");
        match ast(&terms).unwrap() {
            Ast::Chain(_, rest) => assert_eq!(rest.len(), 999),
            other => panic!("expected a chain, got {:?}", other),
        }
    }

    #[test]
    fn arity() {
        assert_eq!(
            ast("pow(2)"),
            Err(Error::ParseError(
                "function 'pow' takes 2 arguments, got 1".into()
            ))
        );
        assert_eq!(
            ast("sqrt(1, 2)"),
            Err(Error::ParseError(
                "function 'sqrt' takes 1 argument, got 2".into()
            ))
        );
        assert!(ast("sin()").is_err());
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(
            Ast::from_tokens(&mut vec![Token::Value(1.0), Token::Value(2.0)]),
            Err(Error::ParseError("unused values in expression".into()))
        );
        assert_eq!(
            Ast::from_tokens(&mut vec![Token::Value(1.0), Token::Op(Op::Plus)]),
            Err(Error::ParseError("empty expression before operator".into()))
        );
        assert!(Ast::from_tokens(&mut Vec::new()).is_err());
    }

    #[test]
    fn depth_is_bounded() {
        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(ast(&shallow).is_ok());

        let deep = format!("{}1", "-".repeat(MAX_DEPTH + 10));
        assert_eq!(
            ast(&deep),
            Err(Error::ParseError("expression is nested too deeply".into()))
        );

        let deep_calls = format!("{}1{}", "sqrt(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(ast(&deep_calls).is_err());
    }
}
