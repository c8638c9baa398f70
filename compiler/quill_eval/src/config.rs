//! Evaluation policy carried by the engine into every interpreter.

/// Interpreter configuration.
///
/// Plain value type: the engine owns one and lends it to each interpreter it
/// builds. There is no process-wide default instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    strict: bool,
    debug: bool,
    max_depth: Option<usize>,
    max_loop_iterations: Option<u64>,
}

impl EvalConfig {
    pub fn new() -> Self {
        EvalConfig {
            strict: true,
            debug: true,
            max_depth: None,
            max_loop_iterations: None,
        }
    }

    /// When strict, an unresolvable variable is an error; otherwise it
    /// evaluates to `null`.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// When on, errors carry the span of the node that raised them.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Cap node nesting at `depth` levels (`None` = unlimited).
    ///
    /// Native evaluation grows the stack on demand, so the limit is off by
    /// default. Hosts on targets without stack growth should set one.
    #[must_use]
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Cap `while` loops at `limit` iterations (`None` = unbounded).
    #[must_use]
    pub fn max_loop_iterations(mut self, limit: Option<u64>) -> Self {
        self.max_loop_iterations = limit;
        self
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    #[inline]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    #[inline]
    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn loop_limit(&self) -> Option<u64> {
        self.max_loop_iterations
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}
