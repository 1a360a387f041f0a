use thiserror::Error;

/// Reasons a search request is rejected before matching runs.
///
/// The `Display` text is returned to HTTP clients as the `detail` message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("request body must be a JSON object")]
    BodyNotObject,

    #[error("ingredients is required")]
    MissingIngredients,

    #[error("ingredients must be a list of strings")]
    IngredientsNotStrings,

    #[error("healthy_only must be a boolean")]
    InvalidHealthyOnly,

    #[error("difficulty must be easy|medium|hard (got '{0}')")]
    InvalidDifficulty(String),
}
