//! Builders for the HTTP state from the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use eduista::domain::TutorService;
use eduista::domain::ports::{TutorRepository, TutorsCommand, TutorsQuery};
use eduista::inbound::http::state::HttpState;
use eduista::outbound::memory::InMemoryTutorRepository;
use eduista::outbound::postgrest::PostgrestTutorRepository;

use super::ServerConfig;

fn service_ports<R>(repository: R, clock: Arc<dyn Clock>) -> HttpState
where
    R: TutorRepository + 'static,
{
    let service = Arc::new(TutorService::new(Arc::new(repository), clock));
    let query: Arc<dyn TutorsQuery> = service.clone();
    let command: Arc<dyn TutorsCommand> = service;
    HttpState::new(query, command)
}

/// Build the HTTP state, choosing the hosted repository when storage settings
/// are present and the in-memory repository otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the hosted storage client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.storage {
        Some(settings) => {
            let repository = PostgrestTutorRepository::new(settings.clone()).map_err(|err| {
                std::io::Error::other(format!("failed to configure tutor storage: {err}"))
            })?;
            info!(
                base_url = %settings.base_url,
                table = %settings.table,
                "using hosted tutor storage"
            );
            service_ports(repository, clock)
        }
        None => {
            warn!(
                table = %config.storage_table,
                "no storage URL configured; tutors are kept in memory and lost on restart"
            );
            service_ports(
                InMemoryTutorRepository::new(config.storage_table.clone(), clock.clone()),
                clock,
            )
        }
    };
    Ok(web::Data::new(state))
}
