/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for Tern. Every offset handed to a
/// classifier, locator, or transaction is a `CharIdx`.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;
