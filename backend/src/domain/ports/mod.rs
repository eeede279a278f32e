//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod tutor_repository;
mod tutors_command;
mod tutors_query;

#[cfg(test)]
pub use tutor_repository::MockTutorRepository;
pub use tutor_repository::{TutorRepository, TutorRepositoryError};
#[cfg(test)]
pub use tutors_command::MockTutorsCommand;
pub use tutors_command::TutorsCommand;
#[cfg(test)]
pub use tutors_query::MockTutorsQuery;
pub use tutors_query::TutorsQuery;
