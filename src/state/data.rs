/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the OCR backend, the controller and the UI layer.

use base64::Engine;
use iced::widget::image::Handle;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::types::{BackResponse, FrontResponse};

/// Which face of the physical card an image represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    /// Path segment the backend expects for this side
    pub fn api_code(self) -> char {
        match self {
            Side::Front => 'F',
            Side::Back => 'B',
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Side::Front => "Front ID",
            Side::Back => "Back ID",
        }
    }

    /// Form fields shown under this side's card
    pub fn fields(self) -> &'static [Field] {
        match self {
            Side::Front => &FRONT_FIELDS,
            Side::Back => &BACK_FIELDS,
        }
    }
}

const FRONT_FIELDS: [Field; 4] = [Field::Name, Field::Address, Field::IdNumber, Field::Dob];

const BACK_FIELDS: [Field; 6] = [
    Field::Profession,
    Field::Gender,
    Field::MaritalStatus,
    Field::Religion,
    Field::ExpiryDate,
    Field::HusbandName,
];

/// One editable field of the identity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Address,
    IdNumber,
    Dob,
    Profession,
    Gender,
    MaritalStatus,
    Religion,
    ExpiryDate,
    HusbandName,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Address => "Address",
            Field::IdNumber => "National ID",
            Field::Dob => "Date of Birth",
            Field::Profession => "Profession",
            Field::Gender => "Gender",
            Field::MaritalStatus => "Marital Status",
            Field::Religion => "Religion",
            Field::ExpiryDate => "Expiry Date",
            Field::HusbandName => "Husband's Name",
        }
    }

    pub fn label_arabic(self) -> &'static str {
        match self {
            Field::Name => "الاسم",
            Field::Address => "العنوان",
            Field::IdNumber => "الرقم القومي",
            Field::Dob => "تاريخ الميلاد",
            Field::Profession => "المهنة",
            Field::Gender => "النوع",
            Field::MaritalStatus => "الحالة الاجتماعية",
            Field::Religion => "الديانة",
            Field::ExpiryDate => "صالحة حتى",
            Field::HusbandName => "اسم الزوج",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::IdNumber => "ID Number",
            Field::Dob | Field::ExpiryDate => "YYYY-MM-DD",
            other => other.label(),
        }
    }
}

/// The identity record being extracted and edited
///
/// `husband_name` is `None` until a back-side response supplies one;
/// the UI omits the field entirely while it is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRecord {
    pub name: String,
    pub address: String,
    pub id_number: String,
    pub dob: String,
    pub profession: String,
    pub gender: String,
    pub marital_status: String,
    pub religion: String,
    pub expiry_date: String,
    pub husband_name: Option<String>,
}

impl IdentityRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::IdNumber => &self.id_number,
            Field::Dob => &self.dob,
            Field::Profession => &self.profession,
            Field::Gender => &self.gender,
            Field::MaritalStatus => &self.marital_status,
            Field::Religion => &self.religion,
            Field::ExpiryDate => &self.expiry_date,
            Field::HusbandName => self.husband_name.as_deref().unwrap_or(""),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::IdNumber => &mut self.id_number,
            Field::Dob => &mut self.dob,
            Field::Profession => &mut self.profession,
            Field::Gender => &mut self.gender,
            Field::MaritalStatus => &mut self.marital_status,
            Field::Religion => &mut self.religion,
            Field::ExpiryDate => &mut self.expiry_date,
            Field::HusbandName => {
                self.husband_name = Some(value);
                return;
            }
        };
        *slot = value;
    }

    /// Whether `field` should be rendered at all
    pub fn is_present(&self, field: Field) -> bool {
        field != Field::HusbandName || self.husband_name.is_some()
    }

    /// Write the four front-side fields. Back-side fields are untouched.
    pub fn apply_front(&mut self, response: &FrontResponse) {
        self.name = response.name.clone();
        self.address = response.address.clone();
        self.id_number = response.id.clone();
        self.dob = response.dob.clone();
    }

    /// Merge the back-side fields into the current record.
    pub fn apply_back(&mut self, response: &BackResponse) {
        self.profession = response.profession.clone();
        self.gender = response.gender.clone();
        self.marital_status = response.marital_status.clone();
        self.religion = response.religion.clone();
        self.expiry_date = response.enddate.clone();
        self.husband_name = response
            .husband_name
            .clone()
            .filter(|name| !name.is_empty());
    }

    /// A record can only be saved once the national ID is filled in
    pub fn has_national_id(&self) -> bool {
        !self.id_number.trim().is_empty()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Paths the backend uses for saving and for polling the scanners
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigData {
    pub save_path: String,
    pub back_path: String,
    pub front_path: String,
}

/// One input of the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    SavePath,
    BackPath,
    FrontPath,
}

impl ConfigField {
    pub const ALL: [ConfigField; 3] = [
        ConfigField::SavePath,
        ConfigField::BackPath,
        ConfigField::FrontPath,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::SavePath => "Save Path",
            ConfigField::BackPath => "Scanner Back ID Path",
            ConfigField::FrontPath => "Scanner Front ID Path",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ConfigField::SavePath => "e.g., C:\\SavedData",
            ConfigField::BackPath => "e.g., C:\\Scanner\\Back",
            ConfigField::FrontPath => "e.g., C:\\Scanner\\Front",
        }
    }
}

impl ConfigData {
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::SavePath => &self.save_path,
            ConfigField::BackPath => &self.back_path,
            ConfigField::FrontPath => &self.front_path,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::SavePath => self.save_path = value,
            ConfigField::BackPath => self.back_path = value,
            ConfigField::FrontPath => self.front_path = value,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A display-only image returned by the backend
#[derive(Debug, Clone)]
pub struct Preview {
    data_uri: String,
    handle: Handle,
}

impl Preview {
    /// Build a preview from a base64 JPEG. Returns `None` when the payload
    /// is not valid base64.
    pub fn from_base64_jpeg(encoded: &str) -> Option<Self> {
        let bytes = match base64::engine::general_purpose::STANDARD.decode(encoded.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("⚠️  Preview is not valid base64: {}", e);
                return None;
            }
        };

        Some(Self {
            data_uri: format!("data:image/jpeg;base64,{}", encoded.trim()),
            handle: Handle::from_bytes(bytes),
        })
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// The three in-memory previews
#[derive(Debug, Clone, Default)]
pub struct Previews {
    pub front: Option<Preview>,
    pub back: Option<Preview>,
    pub face: Option<Preview>,
}

impl Previews {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none() && self.face.is_none()
    }
}
