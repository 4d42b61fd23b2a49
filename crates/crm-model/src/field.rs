//! Target fields of a lead record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// A field of the lead record type.
///
/// The set is closed: every payload carries exactly these fields, so column
/// mappings can only point at a known target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Salutation,
    FirstName,
    LastName,
    Email,
    MobileNo,
    Gender,
    Status,
    Organization,
    Website,
    Industry,
    AnnualRevenue,
    NoOfEmployees,
}

impl LeadField {
    /// All fields in declaration order.
    pub const ALL: [LeadField; 12] = [
        LeadField::Salutation,
        LeadField::FirstName,
        LeadField::LastName,
        LeadField::Email,
        LeadField::MobileNo,
        LeadField::Gender,
        LeadField::Status,
        LeadField::Organization,
        LeadField::Website,
        LeadField::Industry,
        LeadField::AnnualRevenue,
        LeadField::NoOfEmployees,
    ];

    /// Field name as stored by the record store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Salutation => "salutation",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::MobileNo => "mobile_no",
            Self::Gender => "gender",
            Self::Status => "status",
            Self::Organization => "organization",
            Self::Website => "website",
            Self::Industry => "industry",
            Self::AnnualRevenue => "annual_revenue",
            Self::NoOfEmployees => "no_of_employees",
        }
    }

    /// Parse a field from its stored name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadField {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ProfileError::UnknownField {
            name: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for field in LeadField::ALL {
            assert_eq!(LeadField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn parse_rejects_source_column_names() {
        assert_eq!(LeadField::parse("First Name"), None);
        assert!("first name".parse::<LeadField>().is_err());
        assert_eq!(
            " no_of_employees ".parse::<LeadField>().ok(),
            Some(LeadField::NoOfEmployees)
        );
    }

    #[test]
    fn serde_uses_stored_names() {
        let json = serde_json::to_string(&LeadField::AnnualRevenue).unwrap();
        assert_eq!(json, "\"annual_revenue\"");
    }
}
