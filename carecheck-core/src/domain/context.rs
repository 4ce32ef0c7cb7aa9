//! Pipeline context
//!
//! The single mutable store carried through a pipeline run. Each field is
//! written by exactly one step and read by later steps; the pipeline builder
//! checks that ordering when the pipeline is constructed.

use serde::{Deserialize, Serialize};

use crate::domain::entity::{EntityKind, EntityRef};
use crate::domain::slot::TimeRange;

/// Named slot of the pipeline context
///
/// Steps declare the keys they read and write so that ordering can be
/// validated before anything is sent to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextKey {
    ProviderDisplayName,
    ProviderRef,
    PatientDisplayName,
    PatientRef,
    DiscoveredSlots,
}

impl std::fmt::Display for ContextKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextKey::ProviderDisplayName => write!(f, "provider_display_name"),
            ContextKey::ProviderRef => write!(f, "provider_ref"),
            ContextKey::PatientDisplayName => write!(f, "patient_display_name"),
            ContextKey::PatientRef => write!(f, "patient_ref"),
            ContextKey::DiscoveredSlots => write!(f, "discovered_slots"),
        }
    }
}

/// State shared by reference across all steps of one run
///
/// The bearer token is deliberately absent: every step obtains its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineContext {
    pub provider_display_name: Option<String>,
    pub provider_ref: Option<EntityRef>,
    pub patient_display_name: Option<String>,
    pub patient_ref: Option<EntityRef>,
    /// Ordered as returned by the remote service; empty until discovery runs
    pub discovered_slots: Vec<TimeRange>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Provider => self.provider_display_name.as_deref(),
            EntityKind::Patient => self.patient_display_name.as_deref(),
        }
    }

    pub fn set_display_name(&mut self, kind: EntityKind, name: impl Into<String>) {
        let name = Some(name.into());
        match kind {
            EntityKind::Provider => self.provider_display_name = name,
            EntityKind::Patient => self.patient_display_name = name,
        }
    }

    pub fn entity_ref(&self, kind: EntityKind) -> Option<&EntityRef> {
        match kind {
            EntityKind::Provider => self.provider_ref.as_ref(),
            EntityKind::Patient => self.patient_ref.as_ref(),
        }
    }

    /// Stores a resolved reference; `None` records an empty resolution
    pub fn set_entity_ref(&mut self, kind: EntityKind, reference: Option<EntityRef>) {
        let reference = reference.filter(|r| !r.is_empty());
        match kind {
            EntityKind::Provider => self.provider_ref = reference,
            EntityKind::Patient => self.patient_ref = reference,
        }
    }

    pub fn first_slot(&self) -> Option<&TimeRange> {
        self.discovered_slots.first()
    }

    /// Whether the field behind `key` currently holds a usable value
    pub fn is_populated(&self, key: ContextKey) -> bool {
        match key {
            ContextKey::ProviderDisplayName => self.provider_display_name.is_some(),
            ContextKey::ProviderRef => self.provider_ref.is_some(),
            ContextKey::PatientDisplayName => self.patient_display_name.is_some(),
            ContextKey::PatientRef => self.patient_ref.is_some(),
            ContextKey::DiscoveredSlots => !self.discovered_slots.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = PipelineContext::new();
        assert!(!ctx.is_populated(ContextKey::ProviderRef));
        assert!(!ctx.is_populated(ContextKey::DiscoveredSlots));
        assert!(ctx.first_slot().is_none());
    }

    #[test]
    fn test_set_and_read_by_kind() {
        let mut ctx = PipelineContext::new();
        ctx.set_display_name(EntityKind::Patient, "Ada Brooks");
        ctx.set_entity_ref(EntityKind::Patient, Some(EntityRef::new("abc-123")));

        assert_eq!(ctx.display_name(EntityKind::Patient), Some("Ada Brooks"));
        assert_eq!(ctx.display_name(EntityKind::Provider), None);
        assert_eq!(
            ctx.entity_ref(EntityKind::Patient).map(EntityRef::as_str),
            Some("abc-123")
        );
        assert!(ctx.is_populated(ContextKey::PatientRef));
    }

    #[test]
    fn test_blank_reference_is_stored_as_absent() {
        let mut ctx = PipelineContext::new();
        ctx.set_entity_ref(EntityKind::Provider, Some(EntityRef::new("")));
        assert!(ctx.provider_ref.is_none());
    }
}
