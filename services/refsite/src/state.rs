use std::sync::Arc;

use standards::Library;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub library: Library,
}

impl AppState {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}
