//! In-memory session store.
//!
//! The map lock is held only to look up or insert a session handle. Each
//! session sits behind its own mutex, which is the critical section for a
//! single phase transition: two transitions on the same session never
//! interleave, and transitions on different sessions never contend.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Utc;
use tracing::{debug, info};

use delve_core::entities::{ResearchSession, SessionSummary};
use delve_core::errors::WorkflowError;
use delve_core::ids::{PREFIX_SESSION, generate_id};

type SessionHandle = Arc<Mutex<ResearchSession>>;

#[derive(Default)]
struct Registry {
    sessions: HashMap<String, SessionHandle>,
    /// Every ID handed out, including removed sessions, so IDs stay unique
    /// for the life of the process.
    issued: HashSet<String>,
}

/// Owner of all research sessions for the life of the process.
#[derive(Default)]
pub struct SessionStore {
    registry: RwLock<Registry>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session in the `Elaboration` phase and return its ID.
    pub fn create(&self, question: &str) -> String {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let id = loop {
            let candidate = generate_id(PREFIX_SESSION);
            if registry.issued.insert(candidate.clone()) {
                break candidate;
            }
            debug!(id = %candidate, "session id collision, retrying");
        };

        let session = ResearchSession::new(id.clone(), question.to_string(), Utc::now());
        registry
            .sessions
            .insert(id.clone(), Arc::new(Mutex::new(session)));

        info!(session_id = %id, question, "research session created");
        id
    }

    /// Snapshot of a session.
    pub fn get(&self, session_id: &str) -> Result<ResearchSession, WorkflowError> {
        let handle = self.handle(session_id)?;
        let session = lock(&handle);
        Ok(session.clone())
    }

    /// Run `f` with exclusive access to one session.
    ///
    /// The session lock is held for the whole call; the store-wide lock is not.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut ResearchSession) -> Result<T, WorkflowError>,
    ) -> Result<T, WorkflowError> {
        let handle = self.handle(session_id)?;
        let mut session = lock(&handle);
        f(&mut session)
    }

    /// Remove a session, returning its final state.
    pub fn remove(&self, session_id: &str) -> Result<ResearchSession, WorkflowError> {
        let handle = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .remove(session_id)
            .ok_or_else(|| not_found(session_id))?;

        info!(session_id, "research session removed");
        let session = lock(&handle);
        Ok(session.clone())
    }

    /// Summaries of all live sessions, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .values()
            .cloned()
            .collect();

        let mut summaries: Vec<SessionSummary> =
            handles.iter().map(|handle| lock(handle).summary()).collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        summaries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handle(&self, session_id: &str) -> Result<SessionHandle, WorkflowError> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| not_found(session_id))
    }
}

fn lock(handle: &SessionHandle) -> MutexGuard<'_, ResearchSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

fn not_found(session_id: &str) -> WorkflowError {
    WorkflowError::SessionNotFound {
        session_id: session_id.to_string(),
    }
}
