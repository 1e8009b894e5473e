use std::error::Error as StdError;

/// Errors that can occur while marching a recurrence.
///
/// The model's own error is boxed; callers that know its type can recover it
/// with [`Box::downcast`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }
}
