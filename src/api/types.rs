/// Wire types exchanged with the OCR backend
///
/// Field names follow the backend exactly, misspellings included.

use serde::{Deserialize, Serialize};

use crate::state::data::IdentityRecord;

/// Fields extracted from the front of the card
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FrontResponse {
    /// Cropped card, base64 JPEG
    pub image: String,
    /// Cropped face, base64 JPEG
    pub face: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "DOB", default)]
    pub dob: String,
}

/// Fields extracted from the back of the card
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BackResponse {
    /// Cropped card, base64 JPEG
    pub image: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub religion: String,
    #[serde(default)]
    pub enddate: String,
    #[serde(default)]
    pub husband_name: Option<String>,
}

/// A typed recognition result, one variant per card side
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Front(FrontResponse),
    Back(BackResponse),
}

/// Body of `POST /save`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SaveRecordRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "NationalID")]
    pub national_id: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    #[serde(rename = "Profision")]
    pub profession: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "MartialStat")]
    pub marital_status: String,
    #[serde(rename = "Religion")]
    pub religion: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
    #[serde(rename = "Husband_name")]
    pub husband_name: String,
}

impl From<&IdentityRecord> for SaveRecordRequest {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
            national_id: record.id_number.clone(),
            dob: record.dob.clone(),
            profession: record.profession.clone(),
            gender: record.gender.clone(),
            marital_status: record.marital_status.clone(),
            religion: record.religion.clone(),
            end_date: record.expiry_date.clone(),
            husband_name: record.husband_name.clone().unwrap_or_default(),
        }
    }
}
