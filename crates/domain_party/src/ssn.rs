//! Social security numbers
//!
//! SSNs are stored only in encrypted form. Before encryption every
//! non-digit is stripped, so `123-45-6789` and `123456789` are the same
//! number. Encryption itself is an external concern behind [`SsnCipher`].
//!
//! A well-formed SSN never has area 000, 666 or 900-999, group 00 or
//! serial 0000.

use core_kernel::{DomainPort, PortError};

/// Port for the symmetric cipher that protects SSNs at rest
pub trait SsnCipher: DomainPort {
    fn encrypt(&self, plain: &str) -> Result<String, PortError>;

    fn decrypt(&self, encrypted: &str) -> Result<String, PortError>;
}

/// Strips every non-digit character
pub fn normalize_ssn(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Encrypts `value` after normalizing it; blank input yields `None`
pub fn encrypt_ssn(cipher: &dyn SsnCipher, value: &str) -> Result<Option<String>, PortError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    cipher.encrypt(&normalize_ssn(value)).map(Some)
}

/// True for a nine digit string
pub fn is_nine_digits(ssn: &str) -> bool {
    ssn.len() == 9 && ssn.chars().all(|c| c.is_ascii_digit())
}

/// Checks the area, group and serial parts of a nine digit SSN
///
/// Anything that is not nine digits is left to the length check and passes
/// here.
pub fn is_ssn_composition_correct(ssn: &str) -> bool {
    if !is_nine_digits(ssn) {
        return true;
    }

    let (area, rest) = ssn.split_at(3);
    let (group, serial) = rest.split_at(2);

    let area_number: u32 = area.parse().unwrap_or_default();
    if area == "000" || area == "666" || (900..=999).contains(&area_number) {
        return false;
    }
    group != "00" && serial != "0000"
}

/// Ciphers for tests and local development
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Reversible stand-in cipher: prefixes and reverses the digits
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ReversingSsnCipher;

    const PREFIX: &str = "enc:";

    impl DomainPort for ReversingSsnCipher {}

    impl SsnCipher for ReversingSsnCipher {
        fn encrypt(&self, plain: &str) -> Result<String, PortError> {
            Ok(format!("{PREFIX}{}", plain.chars().rev().collect::<String>()))
        }

        fn decrypt(&self, encrypted: &str) -> Result<String, PortError> {
            encrypted
                .strip_prefix(PREFIX)
                .map(|body| body.chars().rev().collect())
                .ok_or_else(|| PortError::transformation("value was not produced by this cipher"))
        }
    }

    /// Cipher whose key service is down
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UnavailableSsnCipher;

    impl DomainPort for UnavailableSsnCipher {}

    impl SsnCipher for UnavailableSsnCipher {
        fn encrypt(&self, _plain: &str) -> Result<String, PortError> {
            Err(PortError::ServiceUnavailable {
                service: "ssn cipher".to_string(),
            })
        }

        fn decrypt(&self, _encrypted: &str) -> Result<String, PortError> {
            Err(PortError::ServiceUnavailable {
                service: "ssn cipher".to_string(),
            })
        }
    }
}
