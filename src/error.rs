use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the dump reader and the relation dispatcher.
///
/// Missing sections, placeholder lines and empty phrase lists are not errors;
/// they resolve to `None` inside the data model.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read dump {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bzip2 header in {path:?}: expected \"BZ\", found {found:?}")]
    MalformedHeader { path: PathBuf, found: Vec<u8> },

    #[error("XML syntax error at byte {position}")]
    XmlSyntax {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("no relation parser registered for language code {0:?}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
