//! Validation & lookup service
//!
//! Answers "does X exist / is X well-formed" for the three entity kinds.
//! Every mutating handler calls in here before it writes; there is no
//! transaction around the check and the write, so the answer is only as
//! fresh as the moment it was read.

use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{CatalogEntry, CatalogKind},
        equipment::{Equipment, SerialNumber},
    },
    repository::Repository,
};

use super::input::parse_id;

/// A catalog reference: numeric id or name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Id(i32),
    Name(String),
}

impl Identifier {
    /// Digits (with an optional sign) are an id and must be a positive
    /// `i32`; anything else is a name.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::MissingField("missing identifier".to_string()));
        }
        let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return parse_id("id", raw).map(Identifier::Id);
        }
        Ok(Identifier::Name(raw.to_string()))
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Identifier::Id(id)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{}", id),
            Identifier::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Outcome of an existence check. Malformed input is reported through the
/// `Err` arm of the surrounding `AppResult` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Turn `NotFound` into an `AppError::NotFound` carrying `message`
    pub fn require(self, message: impl FnOnce() -> String) -> AppResult<T> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::NotFound => Err(AppError::NotFound(message())),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uniqueness {
    Unique,
    /// The existing record whose name collides
    Duplicate(CatalogEntry),
}

#[derive(Clone)]
pub struct LookupService {
    repository: Repository,
}

impl LookupService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve a device type or manufacturer by id or name
    pub async fn resolve(
        &self,
        kind: CatalogKind,
        identifier: &Identifier,
    ) -> AppResult<Lookup<CatalogEntry>> {
        let store = self.repository.catalog(kind);
        let entry = match identifier {
            Identifier::Id(id) => store.get_by_id(*id).await?,
            Identifier::Name(name) => store.get_by_name(name).await?,
        };
        if entry.is_none() {
            tracing::debug!("{} {} not found", kind, identifier);
        }
        Ok(entry.into())
    }

    pub async fn resolve_device_type(
        &self,
        identifier: &Identifier,
    ) -> AppResult<Lookup<CatalogEntry>> {
        self.resolve(CatalogKind::DeviceType, identifier).await
    }

    pub async fn resolve_manufacturer(
        &self,
        identifier: &Identifier,
    ) -> AppResult<Lookup<CatalogEntry>> {
        self.resolve(CatalogKind::Manufacturer, identifier).await
    }

    /// Resolve a catalog reference that must exist; the error names it
    pub async fn require(&self, kind: CatalogKind, identifier: &Identifier) -> AppResult<CatalogEntry> {
        self.resolve(kind, identifier)
            .await?
            .require(|| format!("{} {} does not exist in database", kind, identifier))
    }

    /// Check the format of `candidate`, then look it up
    pub async fn validate_serial_number(
        &self,
        candidate: &str,
    ) -> AppResult<(SerialNumber, Lookup<Equipment>)> {
        let serial_number = SerialNumber::parse(candidate)?;
        let existing = self
            .repository
            .equipment
            .get_by_serial_number(serial_number.as_str())
            .await?;
        Ok((serial_number, existing.into()))
    }

    /// Equipment by primary key
    pub async fn resolve_equipment(&self, auto_id: i32) -> AppResult<Lookup<Equipment>> {
        Ok(self.repository.equipment.get_by_id(auto_id).await?.into())
    }

    /// Case-insensitive name check against every row of `kind`, active or
    /// not. `except` skips the row being renamed.
    pub async fn check_name_uniqueness(
        &self,
        kind: CatalogKind,
        name: &str,
        except: Option<i32>,
    ) -> AppResult<Uniqueness> {
        match self.repository.catalog(kind).get_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Ok(Uniqueness::Duplicate(existing)),
            _ => Ok(Uniqueness::Unique),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::equipment::NewEquipment, repository::CatalogStore};

    async fn seeded() -> (LookupService, Repository) {
        let repository = Repository::in_memory();
        repository.device_types.insert("computer").await.unwrap();
        repository.manufacturers.insert("Apple").await.unwrap();
        repository
            .equipment
            .insert(&NewEquipment {
                serial_number: SerialNumber::parse("SN-0001").unwrap(),
                device_type_id: 1,
                manufacturer_id: 1,
            })
            .await
            .unwrap();
        (LookupService::new(repository.clone()), repository)
    }

    #[test]
    fn test_identifier_parse() {
        assert_eq!(Identifier::parse("12").unwrap(), Identifier::Id(12));
        assert_eq!(
            Identifier::parse("computer").unwrap(),
            Identifier::Name("computer".into())
        );
        assert_eq!(
            Identifier::parse("3com").unwrap(),
            Identifier::Name("3com".into())
        );
        assert!(matches!(
            Identifier::parse("-4"),
            Err(AppError::InvalidNumber(_))
        ));
        assert!(matches!(
            Identifier::parse("99999999999"),
            Err(AppError::InvalidNumber(_))
        ));
        assert!(matches!(
            Identifier::parse("  "),
            Err(AppError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_by_id_and_name() {
        let (lookup, _) = seeded().await;

        let by_id = lookup.resolve_device_type(&Identifier::Id(1)).await.unwrap();
        let by_name = lookup
            .resolve_device_type(&Identifier::Name("COMPUTER".into()))
            .await
            .unwrap();
        assert!(by_id.is_found());
        assert_eq!(by_id, by_name);

        let missing = lookup.resolve_manufacturer(&Identifier::Id(9)).await.unwrap();
        assert_eq!(missing, Lookup::NotFound);

        let err = lookup
            .require(CatalogKind::Manufacturer, &Identifier::Id(9))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains("manufacturer 9")));
    }

    #[tokio::test]
    async fn test_validate_serial_number() {
        let (lookup, _) = seeded().await;

        let (_, existing) = lookup.validate_serial_number("SN-0001").await.unwrap();
        assert!(existing.is_found());

        let (sn, existing) = lookup.validate_serial_number("SN-0002").await.unwrap();
        assert_eq!(sn.as_str(), "SN-0002");
        assert_eq!(existing, Lookup::NotFound);

        assert!(matches!(
            lookup.validate_serial_number("0002").await,
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_check_name_uniqueness() {
        let (lookup, repository) = seeded().await;
        repository
            .manufacturers
            .update_status(1, crate::models::status::Status::Inactive)
            .await
            .unwrap();

        // inactive rows still hold their name
        assert!(matches!(
            lookup
                .check_name_uniqueness(CatalogKind::Manufacturer, "apple", None)
                .await
                .unwrap(),
            Uniqueness::Duplicate(_)
        ));
        assert_eq!(
            lookup
                .check_name_uniqueness(CatalogKind::Manufacturer, "apple", Some(1))
                .await
                .unwrap(),
            Uniqueness::Unique
        );
        assert_eq!(
            lookup
                .check_name_uniqueness(CatalogKind::DeviceType, "tablet", None)
                .await
                .unwrap(),
            Uniqueness::Unique
        );
    }
}
