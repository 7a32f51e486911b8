use crate::error::Error;
use crate::functions::FUNCTIONS;
use crate::token::{Op, Token};
use std::iter::Peekable;
use std::str::Chars;

/// Maximum number of pending operators and parentheses. Flat chains such as
/// `1 + 2 + 3` never pile up, only nested calls, groups, unary signs and
/// powers do.
pub const MAX_DEPTH: usize = 256;

/// Raw lexical items, before the shunting-yard pass decides what they mean
#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl Lexeme {
    fn binary_op(&self) -> Option<Op> {
        match *self {
            Self::Plus => Some(Op::Plus),
            Self::Minus => Some(Op::Minus),
            Self::Star => Some(Op::Mul),
            Self::Slash => Some(Op::Div),
            Self::Caret => Some(Op::Exp),
            _ => None,
        }
    }
}

/// An helper struct for lexing the input and ordering it in reverse polish
/// notation
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &'a str) -> Lexer<'a> {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    /// Run the shunting-yard algorithm over the input. The output is in
    /// reverse polish notation, with every function call annotated by its
    /// argument count.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators = Vec::new();
        // argument count of every function call currently open
        let mut arguments: Vec<usize> = Vec::new();
        // an operand (value, call, unary operator or left parenthesis) is
        // expected next, as opposed to a binary operator or closing token
        let mut expect_operand = true;
        let mut after_call_paren = false;

        'tokens: while let Some(lexeme) = self.next_token()? {
            if operators.len() > MAX_DEPTH {
                return Err(Error::ParseError("expression is nested too deeply".into()));
            }
            let just_opened_call = after_call_paren;
            after_call_paren = false;

            match lexeme {
                Lexeme::Number(value) => {
                    if !expect_operand {
                        return Err(unexpected(&format!("number {}", value)));
                    }
                    output.push(Token::Value(value));
                    expect_operand = false;
                }
                Lexeme::Ident(name) => {
                    if !expect_operand {
                        return Err(unexpected(&format!("name '{}'", name)));
                    }
                    let opens_call = self.next_is_lparen();
                    let function = match FUNCTIONS.get(name.as_str()) {
                        Some(function) if opens_call => function,
                        Some(_) => {
                            return Err(Error::ParseError(format!(
                                "missing '(' after function '{}'",
                                name
                            )))
                        }
                        None if opens_call => {
                            return Err(Error::ParseError(format!(
                                "unknown function '{}'",
                                name
                            )))
                        }
                        None => {
                            return Err(Error::ParseError(format!(
                                "unknown identifier '{}'",
                                name
                            )))
                        }
                    };
                    // consume the '(' found by `next_is_lparen`
                    self.next_token()?;
                    operators.push(Token::Function(function.name()));
                    operators.push(Token::LParen);
                    arguments.push(1);
                    after_call_paren = true;
                }
                Lexeme::LParen => {
                    if !expect_operand {
                        return Err(unexpected("'('"));
                    }
                    operators.push(Token::LParen);
                }
                Lexeme::Comma => {
                    if expect_operand {
                        return Err(unexpected("','"));
                    }
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => {
                                if !matches!(operators.last(), Some(Token::Function(_))) {
                                    return Err(unexpected("','"));
                                }
                                operators.push(Token::LParen);
                                if let Some(count) = arguments.last_mut() {
                                    *count += 1;
                                }
                                expect_operand = true;
                                continue 'tokens;
                            }
                            Token::Op(_) => output.push(token),
                            other => return Err(internal(&other)),
                        }
                    }
                    return Err(unexpected("','"));
                }
                Lexeme::RParen => {
                    let empty_call = expect_operand && just_opened_call;
                    if expect_operand && !empty_call {
                        return Err(unexpected("')'"));
                    }
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => {
                                if let Some(&Token::Function(name)) = operators.last() {
                                    operators.pop();
                                    let count = arguments.pop().unwrap_or_default();
                                    let count = if empty_call { 0 } else { count };
                                    output.push(Token::Call(name, count));
                                }
                                expect_operand = false;
                                continue 'tokens;
                            }
                            Token::Op(_) => output.push(token),
                            other => return Err(internal(&other)),
                        }
                    }
                    return Err(Error::ParseError("mismatched parenthesis".into()));
                }
                other => {
                    let o1 = match other.binary_op() {
                        Some(op) => op,
                        None => return Err(internal_lexeme(&other)),
                    };
                    if expect_operand {
                        match o1 {
                            Op::Minus => operators.push(Token::Op(Op::Neg)),
                            // unary plus is a no-op
                            Op::Plus => {}
                            _ => {
                                return Err(Error::ParseError(format!(
                                    "missing operand before '{}'",
                                    o1.symbol()
                                )))
                            }
                        }
                        continue 'tokens;
                    }
                    'operators: while let Some(&Token::Op(o2)) = operators.last() {
                        let pop_me = o2.precedence() > o1.precedence()
                            || (o2.precedence() == o1.precedence() && o1.is_left_associative());
                        if pop_me {
                            operators.pop();
                            output.push(Token::Op(o2));
                        } else {
                            break 'operators;
                        }
                    }
                    operators.push(Token::Op(o1));
                    expect_operand = true;
                }
            }
        }

        if expect_operand {
            return Err(Error::ParseError(if output.is_empty() && operators.is_empty() {
                "empty expression".into()
            } else {
                "unexpected end of expression".into()
            }));
        }

        while let Some(token) = operators.pop() {
            match token {
                Token::LParen => return Err(Error::ParseError("mismatched parenthesis".into())),
                Token::Op(_) => output.push(token),
                other => return Err(internal(&other)),
            }
        }
        Ok(output)
    }

    /// Check whether the next non blank character is `(`
    fn next_is_lparen(&mut self) -> bool {
        while let Some(&c) = self.input.peek() {
            if c.is_whitespace() {
                self.input.next();
            } else {
                return c == '(';
            }
        }
        false
    }

    fn next_token(&mut self) -> Result<Option<Lexeme>, Error> {
        while let Some(&c) = self.input.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.input.next();
        }

        let c = match self.input.next() {
            Some(c) => c,
            None => return Ok(None),
        };
        let lexeme = match c {
            c if is_number_part(c) => {
                let mut literal = String::new();
                literal.push(c);
                while let Some(&c) = self.input.peek() {
                    if is_number_part(c) {
                        self.input.next();
                        literal.push(c);
                    } else {
                        break;
                    }
                }
                Lexeme::Number(parse_number(&literal)?)
            }
            c if is_ident_start(c) => {
                let mut ident = String::new();
                ident.push(c);
                while let Some(&c) = self.input.peek() {
                    if is_ident_part(c) {
                        self.input.next();
                        ident.push(c);
                    } else {
                        break;
                    }
                }
                Lexeme::Ident(ident)
            }
            '+' => Lexeme::Plus,
            '-' => Lexeme::Minus,
            '*' => Lexeme::Star,
            '/' => Lexeme::Slash,
            '^' => Lexeme::Caret,
            '(' => Lexeme::LParen,
            ')' => Lexeme::RParen,
            ',' => Lexeme::Comma,
            other => {
                return Err(Error::ParseError(format!(
                    "unexpected character in input: {}",
                    other
                )));
            }
        };
        Ok(Some(lexeme))
    }
}

fn parse_number(literal: &str) -> Result<f64, Error> {
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(Error::ParseError(format!(
            "number out of range: {}",
            literal
        ))),
        Err(_) => Err(Error::ParseError(format!("invalid number {}", literal))),
    }
}

fn unexpected(what: &str) -> Error {
    Error::ParseError(format!("unexpected {}", what))
}

fn internal(token: &Token) -> Error {
    Error::ParseError(format!("internal error: found {:?} in operators stack", token))
}

fn internal_lexeme(lexeme: &Lexeme) -> Error {
    Error::ParseError(format!("internal error: unexpected {:?}", lexeme))
}

/// Check if `c` can appear in a numeric literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check if `c` can appear at the first character of a name
fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside a name
fn is_ident_part(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
