//! The parsed script: a root node plus its register layout.

use crate::{Node, NodeKind};

/// Error building a [`ParsedScript`] whose register layout is inconsistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// The root node is not a `Script` node.
    RootNotScript { found: &'static str },
    /// More parameters declared than registers exist.
    TooManyParameters { parameters: usize, registers: usize },
    /// The same register name appears twice.
    DuplicateRegister(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::RootNotScript { found } => {
                write!(f, "script root must be a script node, found {found}")
            }
            ScriptError::TooManyParameters {
                parameters,
                registers,
            } => write!(
                f,
                "{parameters} parameters declared but only {registers} registers"
            ),
            ScriptError::DuplicateRegister(name) => write!(f, "duplicate register `{name}`"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// An immutable parsed script.
///
/// Registers are the script's positional local slots: parameters first, in
/// declaration order, followed by the locals declared in the body. Parameter
/// `i` is always register `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedScript {
    root: Node,
    registers: Vec<String>,
    parameter_count: usize,
    source: Option<String>,
}

impl ParsedScript {
    /// Build a script from its root node and register layout.
    ///
    /// `parameters` become registers `0..parameters.len()`, `locals` follow.
    pub fn new(
        root: Node,
        parameters: Vec<String>,
        locals: Vec<String>,
    ) -> Result<Self, ScriptError> {
        let parameter_count = parameters.len();
        let mut registers = parameters;
        registers.extend(locals);
        Self::from_registers(root, registers, parameter_count)
    }

    /// Build a script from a combined register list whose first
    /// `parameter_count` entries are the parameters.
    pub fn from_registers(
        root: Node,
        registers: Vec<String>,
        parameter_count: usize,
    ) -> Result<Self, ScriptError> {
        if !matches!(root.kind(), NodeKind::Script) {
            return Err(ScriptError::RootNotScript {
                found: root.kind().name(),
            });
        }
        if parameter_count > registers.len() {
            return Err(ScriptError::TooManyParameters {
                parameters: parameter_count,
                registers: registers.len(),
            });
        }
        for (i, name) in registers.iter().enumerate() {
            if registers[..i].contains(name) {
                return Err(ScriptError::DuplicateRegister(name.clone()));
            }
        }
        Ok(ParsedScript {
            root,
            registers,
            parameter_count,
            source: None,
        })
    }

    /// A script with no registers.
    pub fn from_root(root: Node) -> Result<Self, ScriptError> {
        Self::new(root, Vec::new(), Vec::new())
    }

    /// Record the source text the tree was parsed from. Node spans are
    /// offsets into this text exactly as given (untrimmed).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Whether the root has no statements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.num_children() == 0
    }

    /// All register names: parameters then locals.
    #[inline]
    pub fn registers(&self) -> &[String] {
        &self.registers
    }

    #[inline]
    pub fn parameters(&self) -> &[String] {
        &self.registers[..self.parameter_count]
    }

    #[inline]
    pub fn local_variables(&self) -> &[String] {
        &self.registers[self.parameter_count..]
    }

    /// Source text as parsed, untrimmed.
    #[inline]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
