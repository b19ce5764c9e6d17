use serde::{Deserialize, Serialize};

/// Flattened contact block. Names, affixes and address lines are always
/// strings; the rest are null when the resume does not carry them.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInformation {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub aristocratic_title: String,
    pub form_of_address: String,
    pub generation: String,
    pub qualification: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    pub employer: Option<String>,
    pub division: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current_employer: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub state: String,
    pub country: Option<String>,
    pub degree_type: Option<String>,
    pub degree_name: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub gpa_out_of: Option<String>,
    pub graduated: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub contact: ContactInformation,
    pub employment: Vec<Employment>,
    pub education: Vec<Education>,
}

/// Response body of every `/parser` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub json: ResumeData,
    pub code: u16,
}

impl ParsedResume {
    pub fn new(data: ResumeData) -> Self {
        Self {
            json: data,
            code: 200,
        }
    }
}
