//! Flattens the HR-XML resume returned by the parsing service into the
//! application's contact / employment / education records.
//!
//! None of these functions fail: absent sections produce empty records and
//! lists, and only the first entry of repeated elements is consulted where a
//! single value is wanted.

use crate::models::sovren::{
    ContactInfo, DateValue, Degree, DegreeField, EmployerOrg, ParsedDocument, PostalAddress,
    SchoolOrInstitution, StructuredResume,
};
use crate::models::{ContactInformation, Education, Employment, ParsedResume, ResumeData};

pub fn convert(document: &ParsedDocument) -> ParsedResume {
    let resume = &document.resume.structured;
    ParsedResume::new(ResumeData {
        contact: contact_information(resume),
        employment: employment_history(resume),
        education: education_history(resume),
    })
}

pub fn contact_information(resume: &StructuredResume) -> ContactInformation {
    let mut contact = ContactInformation::default();
    let Some(info) = resume.contact_info.as_ref() else {
        return contact;
    };

    apply_person_name(&mut contact, info);

    // Later contact methods overwrite earlier ones.
    for method in &info.contact_methods {
        if let Some(address) = &method.postal_address {
            contact.city = address.municipality.clone();
            contact.state = first_region(address);
            contact.postal_code = address.postal_code.clone();
            contact.country = address.country_code.clone();

            if let Some(delivery) = &address.delivery_address {
                for (index, line) in delivery.lines.iter().enumerate() {
                    if index == 0 {
                        contact.address_line_1 = line.clone();
                    } else {
                        contact.address_line_2 = line.clone();
                    }
                }
            }
        }
        if let Some(mobile) = &method.mobile {
            contact.mobile_phone = mobile.formatted_number.clone();
        }
        if let Some(telephone) = &method.telephone {
            contact.home_phone = telephone.formatted_number.clone();
        }
        if method.website.is_some() {
            contact.website = method.website.clone();
        }
        if method.email.is_some() {
            contact.email = method.email.clone();
        }
    }

    contact
}

fn apply_person_name(contact: &mut ContactInformation, info: &ContactInfo) {
    let Some(name) = info.person_name.as_ref() else {
        return;
    };

    contact.first_name = name.given_name.clone().unwrap_or_default();
    contact.middle_name = name.middle_name.clone().unwrap_or_default();
    contact.last_name = name.family_name.clone().unwrap_or_default();

    for affix in &name.affixes {
        let text = affix.text.clone().unwrap_or_default();
        match affix.kind.as_deref() {
            Some("aristocraticTitle") => contact.aristocratic_title = text,
            Some("formOfAddress") => contact.form_of_address = text,
            Some("generation") => contact.generation = text,
            Some("qualification") => contact.qualification = text,
            _ => {}
        }
    }
}

pub fn employment_history(resume: &StructuredResume) -> Vec<Employment> {
    resume
        .employment_history
        .as_ref()
        .map(|history| history.employers.iter().map(employment).collect())
        .unwrap_or_default()
}

fn employment(employer: &EmployerOrg) -> Employment {
    let mut record = Employment {
        employer: employer.name.clone(),
        ..Employment::default()
    };

    if let Some(location) = employer
        .org_info
        .as_ref()
        .and_then(|info| info.locations.first())
    {
        record.city = location.municipality.clone();
        record.state = location.regions.first().cloned();
        record.country = location.country_code.clone();
    }

    let Some(position) = employer.positions.first() else {
        return record;
    };

    record.division = position
        .org_name
        .as_ref()
        .and_then(|org| org.organization_name.clone())
        .filter(|division| employer.name.as_deref() != Some(division.as_str()));
    record.title = position.title.clone();
    record.description = position.description.clone();
    record.start_date = position.start_date.as_ref().and_then(position_date);
    record.end_date = position.end_date.as_ref().and_then(position_date);
    record.current_employer = position
        .current_employer
        .as_deref()
        .filter(|flag| flag.trim().eq_ignore_ascii_case("true"))
        .map(|_| "true".to_string());

    record
}

/// Position dates prefer month precision.
fn position_date(date: &DateValue) -> Option<String> {
    date.year_month
        .clone()
        .or_else(|| date.year.clone())
        .or_else(|| date.any_date.clone())
        .or_else(|| date.string_date.clone())
}

pub fn education_history(resume: &StructuredResume) -> Vec<Education> {
    resume
        .education_history
        .as_ref()
        .map(|history| history.schools.iter().map(education).collect())
        .unwrap_or_default()
}

fn education(school: &SchoolOrInstitution) -> Education {
    let mut record = Education {
        school_name: school.school.first().and_then(|s| s.name.clone()),
        ..Education::default()
    };

    if let Some(address) = &school.postal_address {
        record.city = address.municipality.clone();
        record.state = first_region(address).unwrap_or_default();
        record.country = address.country_code.clone();
    }

    if let Some(degree) = school.degrees.first() {
        apply_degree(&mut record, degree);
    }

    record
}

fn apply_degree(record: &mut Education, degree: &Degree) {
    record.degree_type = degree.degree_type.clone();
    record.degree_name = degree.name.clone();
    record.major = first_field_name(&degree.majors);
    record.minor = first_field_name(&degree.minors);

    if let Some(measure) = degree
        .measure
        .as_ref()
        .and_then(|m| m.educational_measure.as_ref())
    {
        record.gpa = measure.value.as_ref().and_then(|v| v.string_value.clone());
        record.gpa_out_of = measure
            .highest_possible
            .as_ref()
            .and_then(|v| v.string_value.clone());
    }

    if let Some(attendance) = degree.attendance.first() {
        record.start_date = attendance.start_date.as_ref().and_then(education_date);
        record.end_date = attendance.end_date.as_ref().and_then(education_date);
    }

    record.graduated = degree.degree_date.as_ref().and_then(education_date);
}

/// Education dates prefer the bare year.
fn education_date(date: &DateValue) -> Option<String> {
    date.year.clone().or_else(|| date.year_month.clone())
}

fn first_field_name(fields: &[DegreeField]) -> Option<String> {
    fields.first().and_then(|field| field.names.first().cloned())
}

fn first_region(address: &PostalAddress) -> Option<String> {
    address.regions.first().cloned()
}
