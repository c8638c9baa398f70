//! The seam between the evaluator and whatever grammar a host uses.

use quill_ir::{ParsedScript, ScriptError, Span};

/// Turns source text into a [`ParsedScript`].
///
/// No grammar ships with Quill. A parser must produce a `Script` root,
/// assign every parameter and `var` local a register (parameters first), and
/// should attach spans that index into `source` as given.
pub trait ScriptParser {
    fn parse(&self, source: &str) -> Result<ParsedScript, ParseError>;
}

/// Failure to produce a script from source text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    Syntax {
        message: String,
        span: Option<Span>,
    },
    #[error("invalid script: {0}")]
    Script(#[from] ScriptError),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Option<Span>) -> Self {
        ParseError::Syntax {
            message: message.into(),
            span,
        }
    }

    /// Location of the offending input, when the parser reported one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Syntax { span, .. } => *span,
            ParseError::Script(_) => None,
        }
    }
}
