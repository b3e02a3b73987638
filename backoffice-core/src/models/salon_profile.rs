//! Salon profiles with services and weekly opening hours

use serde::{Deserialize, Serialize};

use super::validation::require;
use super::{Entity, ValidationError};
use crate::kind::Kind;
use crate::seeds;

/// Marker used for both `open` and `close` on days the salon is shut.
pub const CLOSED: &str = "Closed";

/// A bookable service offered by a salon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_name: String,
    pub price: f64,
    pub duration: String,
}

/// Opening and closing time for one day ("09:00", or "Closed")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    pub fn closed() -> Self {
        Self::new(CLOSED, CLOSED)
    }

    pub fn is_open(&self) -> bool {
        self.open != CLOSED
    }
}

/// Weekly opening hours; any day may be left out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

impl WorkingHours {
    /// Same hours Monday to Friday, separate Saturday and Sunday.
    pub fn weekly(weekday: DayHours, saturday: DayHours, sunday: DayHours) -> Self {
        Self {
            monday: Some(weekday.clone()),
            tuesday: Some(weekday.clone()),
            wednesday: Some(weekday.clone()),
            thursday: Some(weekday.clone()),
            friday: Some(weekday),
            saturday: Some(saturday),
            sunday: Some(sunday),
        }
    }

    fn days(&self) -> [(&'static str, Option<&DayHours>); 7] {
        [
            ("monday", self.monday.as_ref()),
            ("tuesday", self.tuesday.as_ref()),
            ("wednesday", self.wednesday.as_ref()),
            ("thursday", self.thursday.as_ref()),
            ("friday", self.friday.as_ref()),
            ("saturday", self.saturday.as_ref()),
            ("sunday", self.sunday.as_ref()),
        ]
    }
}

/// Salon profile record body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonProfile {
    pub salon_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

impl Entity for SalonProfile {
    const KIND: Kind = Kind::SalonProfile;

    fn validate(&self) -> Result<(), ValidationError> {
        require("salonName", &self.salon_name)?;
        require("ownerName", &self.owner_name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("address", &self.address)?;
        require("description", &self.description)?;

        for (i, service) in self.services.iter().enumerate() {
            require(&format!("services[{}].serviceName", i), &service.service_name)?;
            require(&format!("services[{}].duration", i), &service.duration)?;
        }

        for (day, hours) in self.working_hours.days() {
            if let Some(hours) = hours {
                require(&format!("workingHours.{}.open", day), &hours.open)?;
                require(&format!("workingHours.{}.close", day), &hours.close)?;
            }
        }
        Ok(())
    }

    fn seed_set() -> Vec<Self> {
        seeds::salon_profiles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_nested_schema() {
        let fields = json!({
            "salonName": "Glamour Studio",
            "ownerName": "Jane Smith",
            "email": "salon2@example.com",
            "phone": "987-654-3210",
            "address": "456 Oak St, Town",
            "description": "Modern salon",
            "services": [{"serviceName": "Facial", "price": 60, "duration": "60 min"}],
            "workingHours": {"sunday": {"open": "Closed", "close": "Closed"}}
        });
        let salon = SalonProfile::from_fields(fields.as_object().cloned().unwrap()).unwrap();
        assert_eq!(salon.services[0].price, 60.0);
        assert!(!salon.working_hours.sunday.unwrap().is_open());
        assert!(salon.working_hours.monday.is_none());
    }

    #[test]
    fn empty_service_name_is_rejected() {
        let mut salon = seeds::salon_profiles().remove(0);
        salon.services[1].service_name = String::new();
        assert_eq!(
            salon.validate().unwrap_err(),
            ValidationError::empty("services[1].serviceName")
        );
    }

    #[test]
    fn empty_day_hours_are_rejected() {
        let mut salon = seeds::salon_profiles().remove(0);
        salon.working_hours.friday = Some(DayHours::new("09:00", ""));
        assert_eq!(
            salon.validate().unwrap_err(),
            ValidationError::empty("workingHours.friday.close")
        );
    }
}
