//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TutorsCommand, TutorsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tutors_query: Arc<dyn TutorsQuery>,
    pub tutors_command: Arc<dyn TutorsCommand>,
}

impl HttpState {
    /// Construct state from the tutor driving ports.
    ///
    /// A single service usually implements both ports:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use eduista::domain::TutorService;
    /// use eduista::inbound::http::state::HttpState;
    /// use eduista::outbound::memory::InMemoryTutorRepository;
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let repository = Arc::new(InMemoryTutorRepository::new("tutors", clock.clone()));
    /// let service = Arc::new(TutorService::new(repository, clock));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.tutors_query.clone();
    /// ```
    pub fn new(tutors_query: Arc<dyn TutorsQuery>, tutors_command: Arc<dyn TutorsCommand>) -> Self {
        Self {
            tutors_query,
            tutors_command,
        }
    }
}
