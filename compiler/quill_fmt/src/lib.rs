//! Quill Fmt - source reconstruction for diagnostics.
//!
//! [`Debugger`] turns a syntax tree back into parse-equivalent text and
//! reports the source range the tree covers. Script facades use it to render
//! `dump()` output; it never fails, whatever the shape of the tree.
//!
//! ```text
//! let mut debugger = Debugger::with_source(source);
//! if debugger.debug(root) {
//!     // debugger.start(), debugger.end() are known
//! }
//! ```

mod debugger;
mod emitter;

pub use debugger::Debugger;
pub use emitter::StringEmitter;
