//! Configuration: string-keyed call parameters and the enumeration bound.

use rustc_hash::FxHashMap;

/// Direction of simulation-based reduction applied to the product
/// automaton before noodlification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Reduce the product as-is.
    Forward,
    /// Reduce the reversed product, then reverse back.
    Backward,
    /// Forward reduction followed by backward reduction.
    Bidirectional,
}

/// String-keyed options for the word-equation entry points.
///
/// The recognized key is `"reduce"` with the values `"forward"`,
/// `"backward"` and `"bidirectional"`. Unknown keys and unrecognized
/// values are ignored.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: FxHashMap<String, String>,
}

impl Params {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a raw option value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The reduction requested by the `"reduce"` option, if any.
    #[must_use]
    pub fn reduction(&self) -> Option<Reduction> {
        match self.get("reduce") {
            Some("forward") => Some(Reduction::Forward),
            Some("backward") => Some(Reduction::Backward),
            Some("bidirectional") => Some(Reduction::Bidirectional),
            _ => None,
        }
    }
}

/// Configuration for one noodlification call.
#[derive(Debug, Clone, Default)]
pub struct NoodlerConfig {
    /// Upper bound on the number of candidate noodles visited by the
    /// mixed-radix enumeration. `None` leaves the enumeration unbounded.
    pub max_candidates: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_parsing() {
        assert_eq!(Params::new().reduction(), None);
        assert_eq!(
            Params::new().with("reduce", "forward").reduction(),
            Some(Reduction::Forward)
        );
        assert_eq!(
            Params::new().with("reduce", "backward").reduction(),
            Some(Reduction::Backward)
        );
        assert_eq!(
            Params::new().with("reduce", "bidirectional").reduction(),
            Some(Reduction::Bidirectional)
        );
    }

    #[test]
    fn test_unrecognized_values_are_ignored() {
        assert_eq!(Params::new().with("reduce", "sideways").reduction(), None);
        assert_eq!(Params::new().with("minimize", "true").reduction(), None);
    }
}
