//! Caller-side state for interactive front ends.
//!
//! The evaluation core is stateless: a front end that offers an `Ans` key,
//! constants, a history or an angle mode toggle keeps that state in a
//! [`Session`] and only ever hands plain expression text to
//! [`evaluate`](crate::evaluate).

use crate::expr::{evaluate, EVALUATION_ERROR, INPUT_ERROR};
use crate::functions::AngleMode;
use regex::{Captures, Regex};
use std::f64::consts::{E, PI};

lazy_static! {
    /// Words replaced by a value in `Session::evaluate_line`
    static ref CONSTANTS: Regex = Regex::new(r"\b(ans|pi|e)\b|π")
        .expect("constants pattern is valid");
}

/// One evaluated expression and what was displayed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The expression text, as submitted
    pub expression: String,
    /// The display string returned by the evaluation
    pub result: String,
}

/// Interactive calculator state owned by the caller.
///
/// # Examples
///
/// ```
/// use calcore::{AngleMode, Session};
///
/// let mut session = Session::new(AngleMode::Degrees);
/// session.insert_function("sqrt");
/// session.push_str("16)");
/// assert_eq!(session.submit(), "4");
///
/// session.push_str("*2");
/// assert_eq!(session.submit(), "8");
/// assert_eq!(session.evaluate_line("ans + 1"), "9");
/// assert_eq!(session.history().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    mode: AngleMode,
    expression: String,
    last_answer: String,
    history: Vec<HistoryEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}

impl Session {
    /// Create an empty session using `mode` for trigonometric functions.
    #[must_use]
    pub fn new(mode: AngleMode) -> Self {
        Self {
            mode,
            expression: String::new(),
            last_answer: "0".into(),
            history: Vec::new(),
        }
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.mode
    }

    /// Use `mode` for the next evaluations
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.mode = mode;
    }

    /// Switch between degrees and radians, and return the new mode.
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// The expression being typed
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The last successful result, `0` before any
    #[must_use]
    pub fn last_answer(&self) -> &str {
        &self.last_answer
    }

    /// Every evaluation of the session, oldest first
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Append raw text (digits, operators, parenthesis) to the expression.
    pub fn push_str(&mut self, text: &str) {
        self.expression.push_str(text);
    }

    /// Append a call to `name`, up to its opening parenthesis.
    pub fn insert_function(&mut self, name: &str) {
        self.expression.push_str(name);
        self.expression.push('(');
    }

    /// Append π.
    pub fn insert_pi(&mut self) {
        self.expression.push_str(&PI.to_string());
    }

    /// Append Euler's number.
    pub fn insert_euler(&mut self) {
        self.expression.push_str(&E.to_string());
    }

    /// Append the last answer, in parenthesis if it is negative.
    pub fn insert_answer(&mut self) {
        let answer = self.answer_operand();
        self.expression.push_str(&answer);
    }

    /// Remove the last character of the expression.
    pub fn delete(&mut self) {
        self.expression.pop();
    }

    /// Empty the expression.
    pub fn clear(&mut self) {
        self.expression.clear();
    }

    /// Forget the history and the last answer.
    pub fn reset(&mut self) {
        self.expression.clear();
        self.history.clear();
        self.last_answer = "0".into();
    }

    /// Evaluate the expression being typed.
    ///
    /// On success the result replaces the expression, so the next key
    /// continues from it. On failure the expression is cleared and the last
    /// answer is kept. Returns the displayed string.
    pub fn submit(&mut self) -> String {
        let expression = std::mem::take(&mut self.expression);
        let result = self.record(expression, None);
        if !is_error(&result) {
            self.expression.clone_from(&result);
        }
        result
    }

    /// Evaluate a full line of text, where the words `ans`, `pi` and `e`
    /// (and `π`) stand for the last answer and the usual constants.
    ///
    /// Returns the displayed string.
    pub fn evaluate_line(&mut self, line: &str) -> String {
        let answer = self.answer_operand();
        let substituted = CONSTANTS.replace_all(line, |caps: &Captures| match &caps[0] {
            "ans" => answer.clone(),
            "e" => E.to_string(),
            _ => PI.to_string(),
        });
        let substituted = substituted.into_owned();
        self.record(line.trim().to_string(), Some(substituted))
    }

    fn record(&mut self, expression: String, substituted: Option<String>) -> String {
        let result = evaluate(substituted.as_deref().unwrap_or(&expression), self.mode);
        if is_error(&result) {
            tracing::debug!(expression = %expression, %result, "Expression was rejected");
        } else {
            self.last_answer.clone_from(&result);
        }
        self.history.push(HistoryEntry {
            expression,
            result: result.clone(),
        });
        result
    }

    fn answer_operand(&self) -> String {
        if self.last_answer.starts_with('-') {
            format!("({})", self.last_answer)
        } else {
            self.last_answer.clone()
        }
    }
}

fn is_error(result: &str) -> bool {
    result == INPUT_ERROR || result == EVALUATION_ERROR
}

#[cfg(test)]
mod tests {
    use super::{HistoryEntry, Session};
    use crate::expr::{EVALUATION_ERROR, INPUT_ERROR};
    use crate::functions::AngleMode;
    use test_case::test_case;

    #[test]
    fn keys_build_the_expression() {
        let mut session = Session::default();
        session.push_str("12");
        session.push_str("+");
        session.push_str("3");
        session.delete();
        session.push_str("4");
        assert_eq!(session.expression(), "12+4");
        assert_eq!(session.submit(), "16");
        assert_eq!(session.expression(), "16");
        assert_eq!(session.last_answer(), "16");

        session.clear();
        assert_eq!(session.expression(), "");
    }

    #[test]
    fn failed_submission_keeps_the_answer() {
        let mut session = Session::default();
        session.push_str("2*3");
        assert_eq!(session.submit(), "6");
        session.push_str("/0");
        assert_eq!(session.submit(), EVALUATION_ERROR);
        assert_eq!(session.expression(), "");
        assert_eq!(session.last_answer(), "6");
        assert_eq!(
            session.history().last(),
            Some(&HistoryEntry {
                expression: "6/0".into(),
                result: EVALUATION_ERROR.into(),
            })
        );
    }

    #[test]
    fn constants_use_full_precision() {
        let mut session = Session::new(AngleMode::Radians);
        session.insert_function("sin");
        session.insert_pi();
        session.push_str(")");
        assert_eq!(session.submit(), "0");

        session.clear();
        session.insert_function("ln");
        session.insert_euler();
        session.push_str(")");
        assert_eq!(session.submit(), "1");
    }

    #[test]
    fn negative_answers_are_parenthesized() {
        let mut session = Session::default();
        session.push_str("0-5");
        assert_eq!(session.submit(), "-5");
        session.clear();
        session.insert_answer();
        session.push_str("^2");
        assert_eq!(session.expression(), "(-5)^2");
        assert_eq!(session.submit(), "25");
    }

    #[test]
    fn angle_mode_toggles() {
        let mut session = Session::default();
        assert_eq!(session.evaluate_line("cos(180)"), "-1");
        assert_eq!(session.toggle_angle_mode(), AngleMode::Radians);
        assert_eq!(session.evaluate_line("cos(pi)"), "-1");
        session.set_angle_mode(AngleMode::Degrees);
        assert_eq!(session.angle_mode(), AngleMode::Degrees);
    }

    #[test_case("ans*2" => "20" ; "last answer")]
    #[test_case("2*pi" => "6.283185307" ; "pi")]
    #[test_case("π" => "3.141592654" ; "pi symbol")]
    #[test_case("ln(e)" => "1" ; "euler number")]
    #[test_case("1e1+ans" => "20" ; "exponent literals are not euler number")]
    #[test_case("sine(1)" => INPUT_ERROR ; "words are not split")]
    fn lines(line: &str) -> String {
        let mut session = Session::default();
        assert_eq!(session.evaluate_line("5+5"), "10");
        session.evaluate_line(line)
    }

    #[test]
    fn reset() {
        let mut session = Session::default();
        session.evaluate_line("3*3");
        session.reset();
        assert_eq!(session.last_answer(), "0");
        assert!(session.history().is_empty());
        assert_eq!(session.evaluate_line("ans"), "0");
    }
}
