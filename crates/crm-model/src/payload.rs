//! Lead payloads and enriched records.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::field::LeadField;

/// Field values mapped from one data row.
///
/// Every field is always present; a field with no source value is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub gender: String,
    pub status: String,
    pub organization: String,
    pub website: String,
    pub industry: String,
    pub annual_revenue: String,
    pub no_of_employees: String,
}

impl LeadPayload {
    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Salutation => &self.salutation,
            LeadField::FirstName => &self.first_name,
            LeadField::LastName => &self.last_name,
            LeadField::Email => &self.email,
            LeadField::MobileNo => &self.mobile_no,
            LeadField::Gender => &self.gender,
            LeadField::Status => &self.status,
            LeadField::Organization => &self.organization,
            LeadField::Website => &self.website,
            LeadField::Industry => &self.industry,
            LeadField::AnnualRevenue => &self.annual_revenue,
            LeadField::NoOfEmployees => &self.no_of_employees,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::Salutation => &mut self.salutation,
            LeadField::FirstName => &mut self.first_name,
            LeadField::LastName => &mut self.last_name,
            LeadField::Email => &mut self.email,
            LeadField::MobileNo => &mut self.mobile_no,
            LeadField::Gender => &mut self.gender,
            LeadField::Status => &mut self.status,
            LeadField::Organization => &mut self.organization,
            LeadField::Website => &mut self.website,
            LeadField::Industry => &mut self.industry,
            LeadField::AnnualRevenue => &mut self.annual_revenue,
            LeadField::NoOfEmployees => &mut self.no_of_employees,
        };
        *slot = value.into();
    }

    /// Iterate over `(field, value)` pairs in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        LeadField::ALL.into_iter().map(|field| (field, self.get(field)))
    }
}

/// A payload enriched with derived fields, ready for validation or storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(flatten)]
    payload: LeadPayload,
    lead_name: String,
}

impl LeadRecord {
    pub fn new(payload: LeadPayload, lead_name: String) -> Self {
        Self { payload, lead_name }
    }

    pub fn payload(&self) -> &LeadPayload {
        &self.payload
    }

    /// Composite display name.
    pub fn lead_name(&self) -> &str {
        &self.lead_name
    }

    /// Record-level rules, run before a record is stored and in dry runs.
    pub fn validate(&self) -> Result<(), RecordError> {
        let email = self.payload.email.as_str();
        if !email.is_empty() && !is_valid_email(email) {
            return Err(RecordError::InvalidEmail {
                value: email.to_string(),
            });
        }

        let revenue = self.payload.annual_revenue.as_str();
        if !revenue.is_empty() && !is_non_negative_amount(revenue) {
            return Err(RecordError::InvalidAnnualRevenue {
                value: revenue.to_string(),
            });
        }

        let website = self.payload.website.as_str();
        if website.chars().any(char::is_whitespace) {
            return Err(RecordError::InvalidWebsite {
                value: website.to_string(),
            });
        }

        Ok(())
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn is_non_negative_amount(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .map(|amount| amount.is_finite() && amount >= 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(field: LeadField, value: &str) -> LeadRecord {
        let mut payload = LeadPayload::default();
        payload.set(LeadField::FirstName, "Ada");
        payload.set(field, value);
        LeadRecord::new(payload, "Ada".to_string())
    }

    #[test]
    fn get_and_set_cover_every_field() {
        let mut payload = LeadPayload::default();
        for field in LeadField::ALL {
            payload.set(field, field.as_str());
        }
        for (field, value) in payload.iter() {
            assert_eq!(value, field.as_str());
        }
    }

    #[test]
    fn record_serializes_flat() {
        let mut payload = LeadPayload::default();
        payload.set(LeadField::FirstName, "Ada");
        let record = LeadRecord::new(payload, "Ada".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["lead_name"], "Ada");
        assert_eq!(json["status"], "");
    }

    #[test]
    fn validate_accepts_empty_optional_fields() {
        assert!(record_with(LeadField::Email, "").validate().is_ok());
    }

    #[test]
    fn validate_checks_email_shape() {
        assert!(record_with(LeadField::Email, "ada@example.com").validate().is_ok());
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com", "a@b@c.com"] {
            assert_eq!(
                record_with(LeadField::Email, bad).validate(),
                Err(RecordError::InvalidEmail {
                    value: bad.to_string()
                }),
                "{bad}"
            );
        }
    }

    #[test]
    fn validate_checks_annual_revenue() {
        assert!(record_with(LeadField::AnnualRevenue, "1,250,000.50").validate().is_ok());
        assert!(matches!(
            record_with(LeadField::AnnualRevenue, "-5").validate(),
            Err(RecordError::InvalidAnnualRevenue { .. })
        ));
        assert!(matches!(
            record_with(LeadField::AnnualRevenue, "lots").validate(),
            Err(RecordError::InvalidAnnualRevenue { .. })
        ));
    }

    #[test]
    fn validate_checks_website() {
        assert!(record_with(LeadField::Website, "example.com").validate().is_ok());
        assert!(matches!(
            record_with(LeadField::Website, "example .com").validate(),
            Err(RecordError::InvalidWebsite { .. })
        ));
    }
}
