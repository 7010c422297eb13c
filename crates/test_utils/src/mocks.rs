//! In-memory stand-ins for the exchange ports

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use core_kernel::{DomainPort, IdentifierGenerator, PortError};

pub use domain_party::ssn::mock::{ReversingSsnCipher, UnavailableSsnCipher};

/// Hands out `<prefix><n>` identifiers from a shared counter
#[derive(Debug)]
pub struct CountingIdentifierGenerator {
    next: AtomicU64,
}

impl CountingIdentifierGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }

    /// The number the next identifier will carry
    pub fn next_value(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    fn mint(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for CountingIdentifierGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl DomainPort for CountingIdentifierGenerator {}

#[async_trait]
impl IdentifierGenerator for CountingIdentifierGenerator {
    async fn generate_member_id(&self) -> Result<String, PortError> {
        Ok(self.mint("M"))
    }

    async fn generate_policy_id(&self) -> Result<String, PortError> {
        Ok(self.mint("P"))
    }

    async fn generate_organization_id(&self) -> Result<String, PortError> {
        Ok(self.mint("O"))
    }
}
