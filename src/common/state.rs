// Application state shared across all modules

use std::sync::Arc;

use crate::sessions::SessionManager;
use crate::snippets::SnippetRepository;
use crate::users::UserRepository;

/// Injected collaborators; repositories are trait objects so tests can swap
/// in mocks
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: SessionManager,
}
