use tracing::error;

use crate::{database::VisitStore, models::VisitRecord};

pub const ENTRY_LIMIT: i64 = 20;

/// Everything the page needs, built fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_connected: bool,
    /// Newest first. `None` when disconnected or when the collection is empty.
    pub entries: Option<Vec<VisitRecord>>,
}

impl ViewState {
    pub fn disconnected() -> Self {
        Self {
            is_connected: false,
            entries: None,
        }
    }

    pub fn with_entries(entries: Vec<VisitRecord>) -> Self {
        Self {
            is_connected: true,
            entries: (!entries.is_empty()).then_some(entries),
        }
    }
}

pub async fn fetch_view_state(store: &dyn VisitStore) -> ViewState {
    match store.recent_visits(ENTRY_LIMIT).await {
        Ok(entries) => ViewState::with_entries(entries),
        Err(e) => {
            error!("Failed to fetch visits: {e}");
            ViewState::disconnected()
        }
    }
}
