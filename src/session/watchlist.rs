//! Watchlist
//!
//! User-curated topics, newest first. Pure list mutations: nothing here
//! triggers network traffic or background work.

use crate::signal::{WatchStatus, WatchTopic};
use uuid::Uuid;

/// Ordered list of watched topics
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    topics: Vec<WatchTopic>,
}

impl Watchlist {
    /// Create an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a watchlist from existing topics, keeping their order
    pub fn seeded(topics: Vec<WatchTopic>) -> Self {
        Self { topics }
    }

    /// Add a topic at the front with status `monitoring`
    ///
    /// Blank topics are ignored and `None` is returned.
    pub fn add(&mut self, topic: &str) -> Option<&WatchTopic> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        self.topics
            .insert(0, WatchTopic::new(topic, WatchStatus::Monitoring));
        self.topics.first()
    }

    /// Remove a topic by id; no-op when absent
    pub fn remove(&mut self, id: Uuid) -> Option<WatchTopic> {
        let index = self.topics.iter().position(|t| t.id == id)?;
        Some(self.topics.remove(index))
    }

    /// Look up a topic by id
    pub fn get(&self, id: Uuid) -> Option<&WatchTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// All topics, newest first
    pub fn topics(&self) -> &[WatchTopic] {
        &self.topics
    }

    /// Number of topics with the given status
    pub fn count_with_status(&self, status: WatchStatus) -> usize {
        self.topics.iter().filter(|t| t.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
