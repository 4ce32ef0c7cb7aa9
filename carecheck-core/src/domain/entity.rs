//! Remote entity types

use serde::{Deserialize, Serialize};

use crate::domain::context::ContextKey;

/// Kind of entity the pipeline creates and resolves on the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Provider,
    Patient,
}

impl EntityKind {
    /// Path segment of the entity collection under `/api/master`
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Provider => "provider",
            EntityKind::Patient => "patient",
        }
    }

    /// Context key holding the display name used as the search key
    pub fn display_name_key(self) -> ContextKey {
        match self {
            EntityKind::Provider => ContextKey::ProviderDisplayName,
            EntityKind::Patient => ContextKey::PatientDisplayName,
        }
    }

    /// Context key holding the resolved durable reference
    pub fn ref_key(self) -> ContextKey {
        match self {
            EntityKind::Provider => ContextKey::ProviderRef,
            EntityKind::Patient => ContextKey::PatientRef,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Provider => write!(f, "provider"),
            EntityKind::Patient => write!(f, "patient"),
        }
    }
}

/// Durable identifier of a remote entity
///
/// Only search responses carry this value; creation responses never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(String);

impl EntityRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityRef {
    fn from(s: &str) -> Self {
        EntityRef::new(s)
    }
}
