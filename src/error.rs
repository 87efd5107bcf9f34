use thiserror::Error;

/// Errors reported by the pattern map and the persistence layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Map-style lookup or removal of a pattern that has no stored value.
    #[error("pattern not found")]
    NotFound,

    /// The serialized byte stream cannot be decoded into an automaton.
    ///
    /// Decoding is all-or-nothing: when this is returned, no partially
    /// built automaton is ever produced.
    #[error("corrupt data at byte {offset}: {message}")]
    CorruptData { offset: usize, message: String },

    /// I/O failure in the file-path persistence wrappers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(offset: usize, message: impl Into<String>) -> Self {
        Error::CorruptData {
            offset,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_display_includes_offset() {
        let err = Error::corrupt(17, "edge count mismatch");
        let display = format!("{}", err);
        assert!(display.contains("17"), "got: {}", display);
        assert!(display.contains("edge count mismatch"), "got: {}", display);
    }

    #[test]
    fn test_not_found_is_matchable() {
        let err = Error::NotFound;
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
