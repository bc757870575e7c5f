//! Application state.

use std::sync::Arc;

use pcba_core::Orchestrator;
use pcba_rag::ProcessRag;
use tokio::sync::RwLock;

use crate::config::Config;

/// Shared application state.
///
/// All sequence mutation funnels through the `line` lock, so no caller
/// observes a partially-updated sequence and every read sees the result of
/// a completed re-validation.
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// The one sequence owner
    pub line: RwLock<Orchestrator>,
    /// Documentation retrieval service, when a docs directory is configured
    pub rag: Option<Arc<ProcessRag>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, rag: Option<ProcessRag>) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            line: RwLock::new(Orchestrator::new()),
            rag: rag.map(Arc::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcba_core::Validation;

    #[tokio::test]
    async fn test_state_starts_from_the_default_sequence() {
        let state = AppState::new(Config::default(), None);
        let line = state.line.read().await;
        assert_eq!(line.validation(), Validation::Valid { number: 1 });
    }

    #[tokio::test]
    async fn test_mutation_through_the_lock() {
        let state = AppState::new(Config::default(), None);

        {
            let mut line = state.line.write().await;
            line.apply_recipe(3).unwrap();
        }

        let line = state.line.read().await;
        assert_eq!(line.validation(), Validation::Valid { number: 3 });
    }
}
