/// Fatal rendering errors.
///
/// Everything else in the engine degrades gracefully: unresolved
/// reference keys fall back to the matched source text, denied tags
/// render empty, malformed bracket syntax becomes literal text. Only a
/// configuration problem aborts a render.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("thumb markup requires an image resolver, but none is configured")]
    MissingImageResolver,
    #[error("unknown video hosting: {name}")]
    UnknownHosting { name: String },
}
