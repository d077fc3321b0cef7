//! Narration: the in-character lines players speak.
//!
//! - `library`: canned lines, keywords and prompt briefs per role
//! - `source`: the `TextSource` trait plus offline sources
//! - `narrator`: bounded retry, validation, canned fallback
//! - `live` (feature `live`): chat-completions backend

pub mod library;
#[cfg(feature = "live")]
pub mod live;
pub mod narrator;
pub mod source;

#[cfg(feature = "live")]
pub use live::ChatCompletionSource;
pub use narrator::{validate_defense, validate_report, NarrationService, Narrator};
pub use source::{
    canned_line, CannedSource, LineKind, NarrationError, NarrationRequest, TextSource,
    UnavailableSource,
};
