//! Centralized constants that bound pathological input.
//!
//! None of these appear in the normative grammar; they exist so that adversarial
//! or accidental deeply-nested input fails with a diagnosable `ParsingError`
//! instead of overflowing the stack of the recursive-descent type parser.

/// Maximum nesting depth for a single `Type` tree (pointers, optionals, arrays,
/// slices, and applied-name arguments all count as one level each).
///
/// Generous relative to any realistic schema: a `?*[]?*String` is four levels deep.
pub const MAX_TYPE_NESTING_DEPTH: usize = 256;

/// Maximum number of open names (generic parameters) a single generic
/// definition may declare.
pub const MAX_OPEN_NAMES: usize = 64;

/// Maximum number of modules a single resolver run will accept, guarding the
/// topological sort against quadratic blowup on pathological import graphs.
pub const MAX_MODULES: usize = 4096;
