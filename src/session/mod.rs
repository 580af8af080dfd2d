//! Session State
//!
//! The application's only state: verification history, watchlist, cached
//! trending topics and the selected view. Owned by whoever drives the
//! dashboard and mutated only through the methods below.

mod watchlist;

pub use watchlist::Watchlist;

use crate::signal::{VerificationResult, View, WatchTopic};
use uuid::Uuid;

/// Number of results shown in the dashboard feed
pub const FEED_SIZE: usize = 3;

/// In-memory dashboard state
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: View,
    results: Vec<VerificationResult>,
    watchlist: Watchlist,
    trends: Vec<String>,
}

impl Session {
    /// Create an empty session on the dashboard view
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a pre-populated watchlist
    pub fn with_watchlist(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    /// Prepend a completed verification and switch to the verify view
    pub fn record_result(&mut self, result: VerificationResult) {
        self.results.insert(0, result);
        self.view = View::Verify;
    }

    /// All results, most recently completed first
    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    /// The first `n` results
    pub fn recent(&self, n: usize) -> &[VerificationResult] {
        &self.results[..n.min(self.results.len())]
    }

    /// Drop the whole history, returning how many results were removed
    pub fn clear_history(&mut self) -> usize {
        let cleared = self.results.len();
        self.results.clear();
        cleared
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Add a watched topic; blank topics are ignored
    pub fn add_topic(&mut self, topic: &str) -> Option<WatchTopic> {
        self.watchlist.add(topic).cloned()
    }

    /// Remove a watched topic; unknown ids are ignored
    pub fn remove_topic(&mut self, id: Uuid) -> Option<WatchTopic> {
        self.watchlist.remove(id)
    }

    pub fn topic(&self, id: Uuid) -> Option<&WatchTopic> {
        self.watchlist.get(id)
    }

    pub fn trends(&self) -> &[String] {
        &self.trends
    }

    pub fn set_trends(&mut self, trends: Vec<String>) {
        self.trends = trends;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Confidence, Verdict, DEFAULT_CATEGORY};

    fn result(query: &str) -> VerificationResult {
        VerificationResult::new(
            query,
            DEFAULT_CATEGORY,
            Verdict::Developing,
            Confidence::NEUTRAL,
            "",
            Vec::new(),
        )
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.view(), View::Dashboard);
        assert!(session.results().is_empty());
        assert!(session.watchlist().is_empty());
        assert!(session.trends().is_empty());
    }

    #[test]
    fn test_record_result_prepends_and_selects_verify() {
        let mut session = Session::new();
        session.record_result(result("first"));
        session.record_result(result("second"));

        assert_eq!(session.view(), View::Verify);
        let queries: Vec<&str> = session.results().iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["second", "first"]);
    }

    #[test]
    fn test_recent_and_clear() {
        let mut session = Session::new();
        assert!(session.recent(FEED_SIZE).is_empty());

        for q in ["a", "b", "c", "d"] {
            session.record_result(result(q));
        }
        let recent: Vec<&str> = session
            .recent(FEED_SIZE)
            .iter()
            .map(|r| r.query.as_str())
            .collect();
        assert_eq!(recent, vec!["d", "c", "b"]);

        assert_eq!(session.clear_history(), 4);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_topic_operations() {
        let mut session = Session::new();
        assert!(session.add_topic(" ").is_none());

        let topic = session.add_topic("Foo").unwrap();
        assert_eq!(session.topic(topic.id).map(|t| t.topic.as_str()), Some("Foo"));

        assert!(session.remove_topic(Uuid::new_v4()).is_none());
        assert_eq!(session.watchlist().len(), 1);
        assert!(session.remove_topic(topic.id).is_some());
        assert!(session.watchlist().is_empty());
    }

    #[test]
    fn test_trends_and_view() {
        let mut session = Session::new();
        session.set_trends(vec!["Topic A".to_string()]);
        session.select_view(View::History);
        assert_eq!(session.trends(), ["Topic A".to_string()]);
        assert_eq!(session.view(), View::History);
    }
}
