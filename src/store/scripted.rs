//! In-process store client with canned responses
//!
//! Responses are matched by substring against the statement text, first match
//! wins. Unmatched statements return no records, which is what an empty store
//! answers. Every executed statement is recorded and open sessions are counted
//! so callers can check that sessions are always released.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{GraphStoreClient, Record, Statement, StoreError, StoreResult, StoreSession};

#[derive(Debug, Clone)]
enum Reply {
    Records(Vec<Record>),
    Failure(StoreError),
}

#[derive(Default)]
struct ScriptState {
    replies: Mutex<Vec<(String, Reply)>>,
    executed: Mutex<Vec<Statement>>,
    open_sessions: AtomicUsize,
    sessions_opened: AtomicUsize,
    refuse_sessions: AtomicBool,
}

/// Scripted store client; clones share the same script and counters
#[derive(Clone, Default)]
pub struct ScriptedStore {
    state: Arc<ScriptState>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements containing `fragment` with `records`
    pub fn respond(self, fragment: impl Into<String>, records: Vec<Record>) -> Self {
        self.push(fragment.into(), Reply::Records(records));
        self
    }

    /// Fail statements containing `fragment` with `error`
    pub fn fail(self, fragment: impl Into<String>, error: StoreError) -> Self {
        self.push(fragment.into(), Reply::Failure(error));
        self
    }

    /// Make every session acquisition fail with a connection error
    pub fn refuse_sessions(self) -> Self {
        self.state.refuse_sessions.store(true, Ordering::SeqCst);
        self
    }

    /// Statements executed so far, in order
    pub fn executed(&self) -> Vec<Statement> {
        lock(&self.state.executed).clone()
    }

    /// Sessions currently held
    pub fn open_sessions(&self) -> usize {
        self.state.open_sessions.load(Ordering::SeqCst)
    }

    /// Sessions acquired over the lifetime of the store
    pub fn sessions_opened(&self) -> usize {
        self.state.sessions_opened.load(Ordering::SeqCst)
    }

    fn push(&self, fragment: String, reply: Reply) {
        lock(&self.state.replies).push((fragment, reply));
    }
}

#[async_trait]
impl GraphStoreClient for ScriptedStore {
    async fn session(&self) -> StoreResult<Box<dyn StoreSession>> {
        if self.state.refuse_sessions.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionFailure(
                "scripted store refuses sessions".to_string(),
            ));
        }

        self.state.open_sessions.fetch_add(1, Ordering::SeqCst);
        self.state.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedSession {
    state: Arc<ScriptState>,
}

#[async_trait]
impl StoreSession for ScriptedSession {
    async fn run(&mut self, statement: &Statement) -> StoreResult<Vec<Record>> {
        lock(&self.state.executed).push(statement.clone());

        let replies = lock(&self.state.replies);
        let reply = replies
            .iter()
            .find(|(fragment, _)| statement.cypher.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Records(records)) => Ok(records),
            Some(Reply::Failure(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.state.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

// A poisoned script only means another test thread panicked mid-push.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreNode, StoreValue};

    #[tokio::test]
    async fn test_first_matching_reply_wins() {
        let record = Record::new().with("n", StoreValue::Node(StoreNode::new(1, &["A"])));
        let store = ScriptedStore::new()
            .respond("MATCH (n:`A`)", vec![record.clone()])
            .fail("MATCH", StoreError::QueryFailure("boom".to_string()));

        let mut session = store.session().await.unwrap();
        let rows = session.run(&Statement::new("MATCH (n:`A`) RETURN n")).await.unwrap();
        assert_eq!(rows, vec![record]);

        let err = session.run(&Statement::new("MATCH (n) RETURN n")).await.unwrap_err();
        assert_eq!(err, StoreError::QueryFailure("boom".to_string()));

        let rows = session.run(&Statement::new("CALL db.labels()")).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.executed().len(), 3);
    }

    #[tokio::test]
    async fn test_session_counting() {
        let store = ScriptedStore::new();
        {
            let _a = store.session().await.unwrap();
            let _b = store.session().await.unwrap();
            assert_eq!(store.open_sessions(), 2);
        }
        assert_eq!(store.open_sessions(), 0);
        assert_eq!(store.sessions_opened(), 2);
    }

    #[tokio::test]
    async fn test_refused_sessions() {
        let store = ScriptedStore::new().refuse_sessions();
        assert!(matches!(
            store.session().await,
            Err(StoreError::ConnectionFailure(_))
        ));
        assert_eq!(store.open_sessions(), 0);
    }
}
