//! Serde model of the parsing service's response.
//!
//! The parsed document is the JSON rendering of an HR-XML resume. Attributes
//! carry an `@` prefix, element text a `#text` key, and single-element lists
//! are frequently collapsed into a bare value, so list fields accept both.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Outer envelope returned by `POST /v9/parser/resume`.
#[derive(Debug, Default, Deserialize)]
pub struct ParseEnvelope {
    #[serde(rename = "Info", default)]
    pub info: Option<ResponseInfo>,
    #[serde(rename = "Value", default)]
    pub value: Option<ParseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseInfo {
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParseValue {
    /// A JSON document serialized into a string.
    #[serde(rename = "ParsedDocument", default)]
    pub parsed_document: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParsedDocument {
    #[serde(rename = "Resume", default)]
    pub resume: Resume,
}

#[derive(Debug, Default, Deserialize)]
pub struct Resume {
    #[serde(rename = "StructuredXMLResume", default)]
    pub structured: StructuredResume,
}

#[derive(Debug, Default, Deserialize)]
pub struct StructuredResume {
    #[serde(rename = "ContactInfo", default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(rename = "EmploymentHistory", default)]
    pub employment_history: Option<EmploymentHistory>,
    #[serde(rename = "EducationHistory", default)]
    pub education_history: Option<EducationHistory>,
}

// Contact

#[derive(Debug, Default, Deserialize)]
pub struct ContactInfo {
    #[serde(rename = "PersonName", default)]
    pub person_name: Option<PersonName>,
    #[serde(rename = "ContactMethod", default, deserialize_with = "one_or_many")]
    pub contact_methods: Vec<ContactMethod>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonName {
    #[serde(rename = "GivenName", default, deserialize_with = "first_string")]
    pub given_name: Option<String>,
    #[serde(rename = "MiddleName", default, deserialize_with = "first_string")]
    pub middle_name: Option<String>,
    #[serde(rename = "FamilyName", default, deserialize_with = "first_string")]
    pub family_name: Option<String>,
    #[serde(rename = "Affix", default, deserialize_with = "one_or_many")]
    pub affixes: Vec<Affix>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Affix {
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
    #[serde(rename = "#text", default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactMethod {
    #[serde(rename = "PostalAddress", default)]
    pub postal_address: Option<PostalAddress>,
    #[serde(rename = "Mobile", default)]
    pub mobile: Option<Telephone>,
    #[serde(rename = "Telephone", default)]
    pub telephone: Option<Telephone>,
    #[serde(rename = "InternetEmailAddress", default)]
    pub email: Option<String>,
    #[serde(rename = "InternetWebAddress", default)]
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "CountryCode", default)]
    pub country_code: Option<String>,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "Municipality", default)]
    pub municipality: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "one_or_many")]
    pub regions: Vec<String>,
    #[serde(rename = "DeliveryAddress", default)]
    pub delivery_address: Option<DeliveryAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeliveryAddress {
    #[serde(rename = "AddressLine", default, deserialize_with = "one_or_many")]
    pub lines: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Telephone {
    #[serde(rename = "FormattedNumber", default)]
    pub formatted_number: Option<String>,
}

// Employment

#[derive(Debug, Default, Deserialize)]
pub struct EmploymentHistory {
    #[serde(rename = "EmployerOrg", default, deserialize_with = "one_or_many")]
    pub employers: Vec<EmployerOrg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmployerOrg {
    #[serde(rename = "EmployerOrgName", default)]
    pub name: Option<String>,
    #[serde(rename = "OrgInfo", default)]
    pub org_info: Option<OrgInfo>,
    #[serde(rename = "PositionHistory", default, deserialize_with = "one_or_many")]
    pub positions: Vec<PositionHistory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrgInfo {
    #[serde(rename = "PositionLocation", default, deserialize_with = "one_or_many")]
    pub locations: Vec<PositionLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PositionLocation {
    #[serde(rename = "Municipality", default)]
    pub municipality: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "one_or_many")]
    pub regions: Vec<String>,
    #[serde(rename = "CountryCode", default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PositionHistory {
    #[serde(rename = "OrgName", default)]
    pub org_name: Option<OrgName>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "StartDate", default)]
    pub start_date: Option<DateValue>,
    #[serde(rename = "EndDate", default)]
    pub end_date: Option<DateValue>,
    #[serde(rename = "@currentEmployer", default, deserialize_with = "lenient_string")]
    pub current_employer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrgName {
    #[serde(rename = "OrganizationName", default)]
    pub organization_name: Option<String>,
}

/// HR-XML `FlexibleDate`: exactly one member is normally populated.
#[derive(Debug, Default, Deserialize)]
pub struct DateValue {
    #[serde(rename = "Year", default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(rename = "YearMonth", default)]
    pub year_month: Option<String>,
    #[serde(rename = "AnyDate", default)]
    pub any_date: Option<String>,
    #[serde(rename = "StringDate", default)]
    pub string_date: Option<String>,
}

// Education

#[derive(Debug, Default, Deserialize)]
pub struct EducationHistory {
    #[serde(rename = "SchoolOrInstitution", default, deserialize_with = "one_or_many")]
    pub schools: Vec<SchoolOrInstitution>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SchoolOrInstitution {
    #[serde(rename = "School", default, deserialize_with = "one_or_many")]
    pub school: Vec<School>,
    #[serde(rename = "PostalAddress", default)]
    pub postal_address: Option<PostalAddress>,
    #[serde(rename = "Degree", default, deserialize_with = "one_or_many")]
    pub degrees: Vec<Degree>,
}

#[derive(Debug, Default, Deserialize)]
pub struct School {
    #[serde(rename = "SchoolName", default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Degree {
    #[serde(rename = "@degreeType", default)]
    pub degree_type: Option<String>,
    #[serde(rename = "DegreeName", default)]
    pub name: Option<String>,
    #[serde(rename = "DegreeMajor", default, deserialize_with = "one_or_many")]
    pub majors: Vec<DegreeField>,
    #[serde(rename = "DegreeMinor", default, deserialize_with = "one_or_many")]
    pub minors: Vec<DegreeField>,
    #[serde(rename = "DatesOfAttendance", default, deserialize_with = "one_or_many")]
    pub attendance: Vec<DatesOfAttendance>,
    #[serde(rename = "DegreeDate", default)]
    pub degree_date: Option<DateValue>,
    #[serde(rename = "DegreeMeasure", default)]
    pub measure: Option<DegreeMeasure>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DegreeField {
    #[serde(rename = "Name", default, deserialize_with = "one_or_many")]
    pub names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatesOfAttendance {
    #[serde(rename = "StartDate", default)]
    pub start_date: Option<DateValue>,
    #[serde(rename = "EndDate", default)]
    pub end_date: Option<DateValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DegreeMeasure {
    #[serde(rename = "EducationalMeasure", default)]
    pub educational_measure: Option<EducationalMeasure>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EducationalMeasure {
    #[serde(rename = "MeasureValue", default)]
    pub value: Option<MeasureValue>,
    #[serde(rename = "HighestPossibleValue", default)]
    pub highest_possible: Option<MeasureValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MeasureValue {
    #[serde(rename = "StringValue", default, deserialize_with = "lenient_string")]
    pub string_value: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

/// Reads strings, numbers and booleans as a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Name parts are occasionally emitted as lists; keep the first.
fn first_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(one_or_many::<D, String>(deserializer)?.into_iter().next())
}
