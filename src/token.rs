/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Value(f64),
    /// A function name, only found on the operators stack
    Function(&'static str),
    /// A resolved function call with its argument count, only found in the
    /// reverse polish output
    Call(&'static str, usize),
    /// An operator
    Op(Op),
    /// Left parenthesis, only found on the operators stack
    LParen,
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Mul,
    Div,
    Exp,
    /// Unary minus
    Neg,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Neg => 3,
            Self::Exp => 4,
        }
    }

    /// Check if the operator is left associative
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div => true,
            Self::Exp | Self::Neg => false,
        }
    }

    /// The symbol used in error messages
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus | Self::Neg => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Exp => '^',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Op;

    #[test]
    fn exponent_binds_tighter_than_negation() {
        assert!(Op::Exp.precedence() > Op::Neg.precedence());
        assert!(Op::Neg.precedence() > Op::Mul.precedence());
        assert!(!Op::Exp.is_left_associative());
        assert!(Op::Div.is_left_associative());
    }
}
