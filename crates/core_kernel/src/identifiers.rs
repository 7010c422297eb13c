//! Identifiers for domain entities
//!
//! Embedded documents are keyed by typed UUIDs. Exchange-facing
//! identifiers (the HBX id carried by people, policies and organizations)
//! are opaque strings minted by an [`IdentifierGenerator`], which is backed
//! either by a remote sequence service or by random UUIDs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::ports::{DomainPort, PortError};

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Party domain identifiers
define_id!(PersonId, "PER");
define_id!(CensusMemberId, "CEN");
define_id!(OrganizationId, "ORG");
define_id!(OfficeLocationId, "OFL");
define_id!(AddressId, "ADDR");
define_id!(PhoneId, "PHN");

// Benefits domain identifiers
define_id!(HbxProfileId, "HBX");
define_id!(BenefitSponsorshipId, "BSP");
define_id!(CoveragePeriodId, "BCP");
define_id!(BenefitPackageId, "BPK");
define_id!(PlanId, "PLN");

// Messaging identifiers
define_id!(InboxId, "INB");
define_id!(MessageId, "MSG");

/// Sequence names understood by the remote sequence service
pub const MEMBER_ID_SEQUENCE: &str = "member_id";
pub const POLICY_ID_SEQUENCE: &str = "policy_id";
pub const ORGANIZATION_ID_SEQUENCE: &str = "organization_id";

/// Port for minting exchange identifiers
#[async_trait]
pub trait IdentifierGenerator: DomainPort {
    async fn generate_member_id(&self) -> Result<String, PortError>;

    async fn generate_policy_id(&self) -> Result<String, PortError>;

    async fn generate_organization_id(&self) -> Result<String, PortError>;
}

/// Remote service handing out the next value of a named sequence
#[async_trait]
pub trait SequenceService: DomainPort {
    async fn next_value(&self, sequence_name: &str) -> Result<u64, PortError>;
}

/// Random identifiers: a v4 UUID rendered as 32 hex characters
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifierGenerator;

impl RandomIdentifierGenerator {
    pub fn random_id() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl DomainPort for RandomIdentifierGenerator {}

#[async_trait]
impl IdentifierGenerator for RandomIdentifierGenerator {
    async fn generate_member_id(&self) -> Result<String, PortError> {
        Ok(Self::random_id())
    }

    async fn generate_policy_id(&self) -> Result<String, PortError> {
        Ok(Self::random_id())
    }

    async fn generate_organization_id(&self) -> Result<String, PortError> {
        Ok(Self::random_id())
    }
}

/// Identifiers drawn from a remote sequence service
pub struct SequenceIdentifierGenerator {
    service: Arc<dyn SequenceService>,
    max_attempts: u32,
}

impl SequenceIdentifierGenerator {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    pub fn new(service: Arc<dyn SequenceService>) -> Self {
        Self {
            service,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the number of attempts per identifier (minimum 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Requests the next value, retrying transient failures
    pub async fn generate_id_from_sequence(&self, sequence_name: &str) -> Result<String, PortError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.service.next_value(sequence_name).await {
                Ok(value) => {
                    debug!(sequence = sequence_name, attempt, "Sequence value issued");
                    return Ok(value.to_string());
                }
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(sequence = sequence_name, attempt, error = %err, "Sequence request failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl fmt::Debug for SequenceIdentifierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceIdentifierGenerator")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl DomainPort for SequenceIdentifierGenerator {}

#[async_trait]
impl IdentifierGenerator for SequenceIdentifierGenerator {
    async fn generate_member_id(&self) -> Result<String, PortError> {
        self.generate_id_from_sequence(MEMBER_ID_SEQUENCE).await
    }

    async fn generate_policy_id(&self) -> Result<String, PortError> {
        self.generate_id_from_sequence(POLICY_ID_SEQUENCE).await
    }

    async fn generate_organization_id(&self) -> Result<String, PortError> {
        self.generate_id_from_sequence(ORGANIZATION_ID_SEQUENCE).await
    }
}

/// Which identifier backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierSource {
    /// Remote sequence service (production)
    Sequence,
    /// Random UUIDs (development and tests)
    #[default]
    Random,
}

/// Builds the generator selected by configuration
///
/// The sequence source needs a service; asking for it without one is a
/// configuration error.
pub fn identifier_generator(
    source: IdentifierSource,
    sequence_service: Option<Arc<dyn SequenceService>>,
) -> Result<Arc<dyn IdentifierGenerator>, CoreError> {
    match source {
        IdentifierSource::Random => Ok(Arc::new(RandomIdentifierGenerator)),
        IdentifierSource::Sequence => sequence_service
            .map(|service| Arc::new(SequenceIdentifierGenerator::new(service)) as Arc<dyn IdentifierGenerator>)
            .ok_or_else(|| CoreError::validation("sequence identifier source requires a sequence service")),
    }
}
