use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::Pagination;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(flatten)]
    pub profile: User,
    pub specialization: String,
    pub license_number: String,
    pub experience: i32,
    /// Back-references to the doctor's patients, by id.
    #[serde(default)]
    pub patients: Vec<Uuid>,
    #[serde(default)]
    pub schedule: Option<DoctorSchedule>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub consultation_fee: Option<f64>,
}

impl Doctor {
    pub fn id(&self) -> Uuid {
        self.profile.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DoctorSchedule {
    #[serde(default)]
    pub monday: Vec<TimeSlot>,
    #[serde(default)]
    pub tuesday: Vec<TimeSlot>,
    #[serde(default)]
    pub wednesday: Vec<TimeSlot>,
    #[serde(default)]
    pub thursday: Vec<TimeSlot>,
    #[serde(default)]
    pub friday: Vec<TimeSlot>,
    #[serde(default)]
    pub saturday: Vec<TimeSlot>,
    #[serde(default)]
    pub sunday: Vec<TimeSlot>,
}

/// Wire format keeps slot bounds as "HH:MM" strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
    pub available: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPage {
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub specialization: Option<String>,
    pub search: Option<String>,
}

impl DoctorQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(specialization) = &self.specialization {
            query.push(("specialization", specialization.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}
