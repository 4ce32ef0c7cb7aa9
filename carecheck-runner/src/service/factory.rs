//! Entity factory
//!
//! Generates synthetic provider and patient attribute sets that satisfy the
//! remote service's mandatory fields. Emails are derived from the generated
//! first name plus a random tag, which keeps them readable while making
//! collisions between two creations vanishingly unlikely.

use carecheck_core::dto::patient::{Address, CreatePatient};
use carecheck_core::dto::provider::CreateProvider;
use rand::Rng;
use rand::distr::Alphanumeric;
use rand::seq::IndexedRandom;

/// Domain of every synthetic email address
pub const EMAIL_DOMAIN: &str = "mailinator.com";

/// Length of the random tag appended to email local parts
const EMAIL_TAG_LEN: usize = 8;

const FIRST_NAMES: &[&str] = &[
    "Aiden", "Amara", "Beatrice", "Caleb", "Camila", "Darius", "Delia", "Elias", "Esme",
    "Felix", "Freya", "Gideon", "Hana", "Isaac", "Iris", "Jonah", "Juno", "Kiran", "Lena",
    "Marcus", "Mila", "Nolan", "Nora", "Oscar", "Priya", "Quinn", "Rafael", "Rosa", "Silas",
    "Talia", "Uma", "Victor", "Willa", "Xavier", "Yara", "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Barrett", "Castillo", "Dalton", "Ellison", "Fischer", "Garrison", "Hayes",
    "Ibarra", "Jennings", "Kowalski", "Lindqvist", "Mercer", "Nakamura", "Okafor", "Pruitt",
    "Quintero", "Rasmussen", "Sandoval", "Thornton", "Underwood", "Valdez", "Whitaker",
    "Yamamoto", "Zimmerman",
];

/// First and last name of a synthetic person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Parses "First Last"; everything after the first word is the last name
    pub fn parse(full: &str) -> Option<Self> {
        let (first, last) = full.trim().split_once(char::is_whitespace)?;
        let last = last.trim();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some(Self::new(first, last))
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Morgan");
        Self::new(first, last)
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// Produces attribute sets for creation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityFactory;

impl EntityFactory {
    /// A provider with a random name unless `name` is given
    pub fn provider(name: Option<&PersonName>) -> CreateProvider {
        Self::provider_with(&mut rand::rng(), name)
    }

    /// A patient with a random name unless `name` is given
    pub fn patient(name: Option<&PersonName>, timezone: &str) -> CreatePatient {
        Self::patient_with(&mut rand::rng(), name, timezone)
    }

    pub fn provider_with<R: Rng>(rng: &mut R, name: Option<&PersonName>) -> CreateProvider {
        let name = name.cloned().unwrap_or_else(|| PersonName::random(rng));
        let email = Self::synthetic_email(rng, &name.first);
        CreateProvider::new(name.first, name.last, email, "MALE")
    }

    pub fn patient_with<R: Rng>(
        rng: &mut R,
        name: Option<&PersonName>,
        timezone: &str,
    ) -> CreatePatient {
        let name = name.cloned().unwrap_or_else(|| PersonName::random(rng));
        let email = Self::synthetic_email(rng, &name.first);
        CreatePatient {
            first_name: name.first,
            last_name: name.last,
            timezone: timezone.to_string(),
            birth_date: "1990-06-30T18:30:00.000Z".to_string(),
            gender: "FEMALE".to_string(),
            mobile_number: "(555) 123-4567".to_string(),
            email,
            address: Address::default(),
        }
    }

    /// `<first>.<tag>@mailinator.com`, lowercased, with the first name
    /// reduced to ASCII alphanumerics
    pub fn synthetic_email<R: Rng>(rng: &mut R, first_name: &str) -> String {
        let mut local: String = first_name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        if local.is_empty() {
            local.push_str("user");
        }
        let tag: String = (0..EMAIL_TAG_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        format!("{}.{}@{}", local, tag, EMAIL_DOMAIN).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_email_derived_from_first_name() {
        let mut rng = StdRng::seed_from_u64(7);
        let email = EntityFactory::synthetic_email(&mut rng, "D'Angelo");
        assert!(email.starts_with("dangelo."));
        assert!(email.ends_with("@mailinator.com"));
        assert_eq!(email, email.to_lowercase());
    }

    #[test]
    fn test_same_name_different_emails() {
        let name = PersonName::new("Jordan", "Ellis");
        let a = EntityFactory::provider(Some(&name));
        let b = EntityFactory::provider(Some(&name));
        assert_eq!(a.display_name(), "Jordan Ellis");
        assert_ne!(a.email, b.email);
    }

    #[test]
    fn test_emails_do_not_collide_across_many_creations() {
        let emails: HashSet<String> = (0..2_000)
            .map(|_| EntityFactory::patient(None, "IST").email)
            .collect();
        assert_eq!(emails.len(), 2_000);
    }

    #[test]
    fn test_mandatory_fields_present() {
        let mut rng = StdRng::seed_from_u64(42);
        let provider = EntityFactory::provider_with(&mut rng, None);
        assert!(!provider.first_name.is_empty());
        assert!(!provider.last_name.is_empty());
        assert_eq!(provider.role, "PROVIDER");
        assert_eq!(provider.gender, "MALE");

        let patient = EntityFactory::patient_with(&mut rng, None, "IST");
        assert_eq!(patient.gender, "FEMALE");
        assert_eq!(patient.timezone, "IST");
        assert_eq!(patient.address.zipcode, "10001");
    }

    #[test]
    fn test_person_name_parse() {
        assert_eq!(
            PersonName::parse("Jordan Ellis"),
            Some(PersonName::new("Jordan", "Ellis"))
        );
        assert_eq!(
            PersonName::parse("  Mary Ann  Lee "),
            Some(PersonName::new("Mary", "Ann  Lee"))
        );
        assert_eq!(PersonName::parse("Cher"), None);
        assert_eq!(PersonName::parse(""), None);
    }
}
