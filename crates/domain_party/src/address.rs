//! Contact details: addresses, phones, emails and office locations

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{AddressId, OfficeLocationId, PhoneId};

/// Address kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Home,
    Work,
    Mailing,
    /// Organization head office
    Primary,
    Branch,
}

/// A postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    pub id: AddressId,
    pub kind: AddressKind,
    #[validate(length(min = 1, message = "address_1 can't be blank"))]
    pub address_1: String,
    pub address_2: Option<String>,
    #[validate(length(min = 1, message = "city can't be blank"))]
    pub city: String,
    #[validate(length(equal = 2, message = "state must be a 2-letter abbreviation"))]
    pub state: String,
    #[validate(length(min = 5, max = 10, message = "zip must be 5 digits or ZIP+4"))]
    pub zip: String,
}

impl Address {
    pub fn new(
        kind: AddressKind,
        address_1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            id: AddressId::new(),
            kind,
            address_1: address_1.into(),
            address_2: None,
            city: city.into(),
            state: state.into().to_uppercase(),
            zip: zip.into(),
        }
    }

    pub fn with_address_2(mut self, line: impl Into<String>) -> Self {
        self.address_2 = Some(line.into());
        self
    }

    pub fn is_in_state(&self, state_abbreviation: &str) -> bool {
        self.state.eq_ignore_ascii_case(state_abbreviation)
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        let mut lines = vec![self.address_1.clone()];
        if let Some(line) = self.address_2.as_deref().filter(|l| !l.trim().is_empty()) {
            lines.push(line.to_string());
        }
        lines.push(format!("{}, {} {}", self.city, self.state, self.zip));
        lines.join("\n")
    }
}

/// Phone kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneKind {
    Home,
    Work,
    Mobile,
    Main,
    Fax,
}

/// A North American phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Phone {
    pub id: PhoneId,
    pub kind: PhoneKind,
    #[validate(length(equal = 3, message = "area code must be 3 digits"))]
    pub area_code: String,
    #[validate(length(equal = 7, message = "number must be 7 digits"))]
    pub number: String,
    pub extension: Option<String>,
}

impl Phone {
    /// Builds a phone from any punctuation of a ten digit number
    pub fn new(kind: PhoneKind, full_number: &str) -> Self {
        let digits: String = full_number.chars().filter(char::is_ascii_digit).collect();
        let split = digits.len().min(3);
        let (area_code, number) = digits.split_at(split);
        Self {
            id: PhoneId::new(),
            kind,
            area_code: area_code.to_string(),
            number: number.to_string(),
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Area code and number as digits, plus the extension when present
    pub fn full_phone_number(&self) -> String {
        let mut full = format!("{}{}", self.area_code, self.number);
        if let Some(extension) = self.extension.as_deref().filter(|e| !e.is_empty()) {
            full.push_str(" x");
            full.push_str(extension);
        }
        full
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number.len() == 7 {
            write!(f, "({}) {}-{}", self.area_code, &self.number[..3], &self.number[3..])
        } else {
            write!(f, "{}{}", self.area_code, self.number)
        }
    }
}

/// Email kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Home,
    Work,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Email {
    pub kind: EmailKind,
    #[validate(email(message = "is not a valid email address"))]
    pub address: String,
}

impl Email {
    pub fn new(kind: EmailKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }
}

/// An organization's office: its address and phone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeLocation {
    pub id: OfficeLocationId,
    pub is_primary: bool,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
}

impl OfficeLocation {
    pub fn new(address: Address) -> Self {
        Self {
            id: OfficeLocationId::new(),
            is_primary: address.kind == AddressKind::Primary,
            address: Some(address),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn kind(&self) -> Option<AddressKind> {
        self.address.as_ref().map(|a| a.kind)
    }
}
