use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use kereta_core::repository::SessionRepository;
use kereta_core::{BookingSession, CoreResult};

/// Booking sessions, never evicted.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, BookingSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, session_id: &str) -> CoreResult<Option<BookingSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn save(&self, session: BookingSession) -> CoreResult<()> {
        self.sessions.write().await.insert(session.session_id.clone(), session);
        Ok(())
    }
}
