//! Family relationships between people

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use core_kernel::PersonId;

use crate::error::PartyError;

/// How one person is related to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    #[serde(rename = "self")]
    SelfRelationship,
    Spouse,
    LifePartner,
    DomesticPartner,
    Child,
    AdoptedChild,
    FosterChild,
    Stepchild,
    StepsonOrStepdaughter,
    Ward,
    Parent,
    Guardian,
    Sibling,
    Grandchild,
    Grandparent,
    AuntOrUncle,
    NephewOrNiece,
    OtherTaxDependent,
    Unrelated,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 19] = [
        RelationshipKind::SelfRelationship,
        RelationshipKind::Spouse,
        RelationshipKind::LifePartner,
        RelationshipKind::DomesticPartner,
        RelationshipKind::Child,
        RelationshipKind::AdoptedChild,
        RelationshipKind::FosterChild,
        RelationshipKind::Stepchild,
        RelationshipKind::StepsonOrStepdaughter,
        RelationshipKind::Ward,
        RelationshipKind::Parent,
        RelationshipKind::Guardian,
        RelationshipKind::Sibling,
        RelationshipKind::Grandchild,
        RelationshipKind::Grandparent,
        RelationshipKind::AuntOrUncle,
        RelationshipKind::NephewOrNiece,
        RelationshipKind::OtherTaxDependent,
        RelationshipKind::Unrelated,
    ];

    /// Kinds counted as immediate family
    pub const IMMEDIATE_FAMILY: [RelationshipKind; 10] = [
        RelationshipKind::SelfRelationship,
        RelationshipKind::Spouse,
        RelationshipKind::LifePartner,
        RelationshipKind::Child,
        RelationshipKind::Ward,
        RelationshipKind::FosterChild,
        RelationshipKind::AdoptedChild,
        RelationshipKind::StepsonOrStepdaughter,
        RelationshipKind::Stepchild,
        RelationshipKind::DomesticPartner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::SelfRelationship => "self",
            RelationshipKind::Spouse => "spouse",
            RelationshipKind::LifePartner => "life_partner",
            RelationshipKind::DomesticPartner => "domestic_partner",
            RelationshipKind::Child => "child",
            RelationshipKind::AdoptedChild => "adopted_child",
            RelationshipKind::FosterChild => "foster_child",
            RelationshipKind::Stepchild => "stepchild",
            RelationshipKind::StepsonOrStepdaughter => "stepson_or_stepdaughter",
            RelationshipKind::Ward => "ward",
            RelationshipKind::Parent => "parent",
            RelationshipKind::Guardian => "guardian",
            RelationshipKind::Sibling => "sibling",
            RelationshipKind::Grandchild => "grandchild",
            RelationshipKind::Grandparent => "grandparent",
            RelationshipKind::AuntOrUncle => "aunt_or_uncle",
            RelationshipKind::NephewOrNiece => "nephew_or_niece",
            RelationshipKind::OtherTaxDependent => "other_tax_dependent",
            RelationshipKind::Unrelated => "unrelated",
        }
    }

    pub fn is_immediate_family(&self) -> bool {
        Self::IMMEDIATE_FAMILY.contains(self)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationshipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PartyError::invalid(format!("{s} is not a valid relationship kind")))
    }
}

/// A directed relationship from a person to a relative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRelationship {
    pub relative_id: PersonId,
    pub kind: RelationshipKind,
}

impl PersonRelationship {
    pub fn new(relative_id: PersonId, kind: RelationshipKind) -> Self {
        Self { relative_id, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_family() {
        assert!(RelationshipKind::Spouse.is_immediate_family());
        assert!(RelationshipKind::Stepchild.is_immediate_family());
        assert!(!RelationshipKind::Grandparent.is_immediate_family());
        assert!(!RelationshipKind::Unrelated.is_immediate_family());
    }

    #[test]
    fn test_parse_and_display_agree() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationshipKind>().unwrap(), kind);
        }
        assert!("cousin".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn test_self_serializes_as_self() {
        let json = serde_json::to_string(&RelationshipKind::SelfRelationship).unwrap();
        assert_eq!(json, "\"self\"");
    }
}
