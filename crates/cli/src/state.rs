//! Per-fetch load state.

use std::fmt::Display;
use std::future::Future;

/// Where a fetch is in its lifecycle.
///
/// Each fetch restarts at `Loading`; whatever arrives last is what is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Runs one fetch through `Loading` and settles with its outcome.
    pub async fn load<E, F>(&mut self, fetch: F)
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        *self = LoadState::Loading;
        *self = match fetch.await {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            LoadState::Ready(value) => Ok(value),
            LoadState::Failed(message) => Err(message),
            LoadState::Idle | LoadState::Loading => Err("request has not completed".to_string()),
        }
    }
}
