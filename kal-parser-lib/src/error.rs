// Error taxonomy for the analyser.
//
// A token without any parse is not an error: it is an empty result. The
// variants here are contract violations that terminate the enclosing call.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A digit-initial token that is not `<digits>~<letters>`.
    #[error("malformed numeral token {token:?}: {reason}")]
    MalformedNumeral { token: String, reason: &'static str },

    /// A derived stem form was requested whose precondition on the final
    /// phonemes does not hold.
    #[error("cannot build the {operation} form of stem {form:?}")]
    DerivedForm {
        form: String,
        operation: &'static str,
    },

    /// Two morphemes that cannot be adjacent were joined.
    #[error("cannot join {left} with {right}")]
    InvalidJoin {
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot read lexicon {path}: {source}")]
    Lexicon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
