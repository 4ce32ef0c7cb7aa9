//! Service layer
//!
//! Services supply what steps need but do not decide pipeline flow:
//! credentials, bearer tokens, synthetic entity attributes and the run
//! journal.
//!
//! Credential and token services are trait-based so tests can substitute them.

mod auth;
mod credentials;
mod factory;
mod journal;

// Re-export traits
pub use auth::Authenticator;
pub use credentials::CredentialProvider;

// Re-export implementations
pub use auth::{DEFAULT_MIN_TOKEN_LENGTH, SessionAuthenticator};
pub use credentials::{Credentials, StaticCredentials};
pub use factory::{EntityFactory, PersonName};
pub use journal::{RunJournal, StepJournal};
