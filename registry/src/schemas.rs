//! Registration form schemas, one per person category.

#[cfg(test)]
#[path = "schemas_test.rs"]
mod schemas_test;

use crate::record::Category;
use crate::wizard::{FieldKind, FieldSpec, SectionSpec, WizardSchema};

pub const PHONE_COMPANIES: &[&str] = &["Vodafone", "Orange", "Etisalat", "WE", "Other"];
pub const GENDERS: &[&str] = &["male", "female"];
pub const RELATIONSHIPS: &[&str] = &["father", "mother", "sibling", "relative", "other"];
pub const DISABILITY_TYPES: &[&str] = &["physical", "visual", "hearing", "intellectual", "mental", "multiple", "other"];

#[must_use]
pub fn schema_for(category: Category) -> WizardSchema {
    match category {
        Category::Man => man(),
        Category::Woman => woman(),
        Category::Child => child(),
        Category::Disabled => disabled(),
    }
}

#[must_use]
pub fn man() -> WizardSchema {
    adult(Category::Man, "Register a missing man")
}

#[must_use]
pub fn woman() -> WizardSchema {
    adult(Category::Woman, "Register a missing woman")
}

fn adult(category: Category, title: &'static str) -> WizardSchema {
    WizardSchema {
        category,
        title,
        sections: vec![
            SectionSpec {
                title: "Personal information",
                fields: vec![
                    FieldSpec::required("name", "Full name", FieldKind::Text),
                    FieldSpec::optional("nickname", "Nickname", FieldKind::Text),
                    FieldSpec::required("date_of_birth", "Date of birth", FieldKind::Date),
                    FieldSpec::required("national_id", "National ID", FieldKind::Number),
                    FieldSpec::required("address", "Address", FieldKind::LongText),
                ],
            },
            SectionSpec {
                title: "Contact",
                fields: vec![
                    FieldSpec::required("phone_number", "Phone number", FieldKind::Phone),
                    FieldSpec::optional("phone_company", "Phone company", FieldKind::Choice(PHONE_COMPANIES)),
                    FieldSpec::optional("second_phone_number", "Second phone number", FieldKind::Phone),
                ],
            },
            SectionSpec {
                title: "Travel & history",
                fields: vec![
                    FieldSpec::required("last_seen_location", "Last seen location", FieldKind::Text),
                    FieldSpec::optional("has_vehicle", "Has a vehicle", FieldKind::Boolean),
                    FieldSpec::required_when("vehicle_model", "Vehicle model", FieldKind::Text, "has_vehicle"),
                    FieldSpec::required_when("license_plate", "License plate", FieldKind::Text, "has_vehicle"),
                    FieldSpec::optional("travel_date", "Travel date", FieldKind::Date),
                    FieldSpec::optional("travel_destination", "Travel destination", FieldKind::Text),
                    FieldSpec::optional("has_criminal_record", "Has a criminal record", FieldKind::Boolean),
                    FieldSpec::required_when(
                        "case_details",
                        "Case details",
                        FieldKind::LongText,
                        "has_criminal_record",
                    ),
                    FieldSpec::optional("arrest_date", "Arrest date", FieldKind::Date),
                ],
            },
            SectionSpec {
                title: "Photo",
                fields: vec![
                    FieldSpec::required("photo", "Photo", FieldKind::Photo),
                    FieldSpec::optional("additional_notes", "Additional notes", FieldKind::LongText),
                ],
            },
        ],
    }
}

#[must_use]
pub fn child() -> WizardSchema {
    WizardSchema {
        category: Category::Child,
        title: "Register a missing child",
        sections: vec![
            SectionSpec {
                title: "Child information",
                fields: vec![
                    FieldSpec::required("full_name", "Full name", FieldKind::Text),
                    FieldSpec::optional("nickname", "Nickname", FieldKind::Text),
                    FieldSpec::required("date_of_birth", "Date of birth", FieldKind::Date),
                    FieldSpec::required("gender", "Gender", FieldKind::Choice(GENDERS)),
                    FieldSpec::optional("physical_description", "Physical description", FieldKind::LongText),
                ],
            },
            SectionSpec {
                title: "Guardian",
                fields: vec![
                    FieldSpec::required("guardian_name", "Guardian name", FieldKind::Text),
                    FieldSpec::required("guardian_phone", "Guardian phone", FieldKind::Phone),
                    FieldSpec::optional("guardian_id", "Guardian national ID", FieldKind::Number),
                    FieldSpec::required("relationship", "Relationship", FieldKind::Choice(RELATIONSHIPS)),
                    FieldSpec::required("address", "Address", FieldKind::LongText),
                ],
            },
            SectionSpec {
                title: "Last seen",
                fields: vec![
                    FieldSpec::required("last_seen_location", "Last seen location", FieldKind::Text),
                    FieldSpec::required("last_seen_time", "Last seen date", FieldKind::Date),
                    FieldSpec::optional("medical_condition", "Medical condition", FieldKind::LongText),
                ],
            },
            SectionSpec {
                title: "Photo",
                fields: vec![
                    FieldSpec::required("photo", "Photo", FieldKind::Photo),
                    FieldSpec::optional("additional_notes", "Additional notes", FieldKind::LongText),
                ],
            },
        ],
    }
}

#[must_use]
pub fn disabled() -> WizardSchema {
    WizardSchema {
        category: Category::Disabled,
        title: "Register a missing disabled person",
        sections: vec![
            SectionSpec {
                title: "Personal information",
                fields: vec![
                    FieldSpec::required("full_name", "Full name", FieldKind::Text),
                    FieldSpec::required("date_of_birth", "Date of birth", FieldKind::Date),
                    FieldSpec::required("gender", "Gender", FieldKind::Choice(GENDERS)),
                    FieldSpec::optional("national_id", "National ID", FieldKind::Number),
                    FieldSpec::required("address", "Address", FieldKind::LongText),
                ],
            },
            SectionSpec {
                title: "Disability",
                fields: vec![
                    FieldSpec::required("disability_type", "Disability type", FieldKind::Choice(DISABILITY_TYPES)),
                    FieldSpec::required("disability_description", "Description", FieldKind::LongText),
                    FieldSpec::optional("medical_condition", "Medical condition", FieldKind::LongText),
                    FieldSpec::optional("needs_assistance", "Needs constant assistance", FieldKind::Boolean),
                ],
            },
            SectionSpec {
                title: "Guardian & contact",
                fields: vec![
                    FieldSpec::required("guardian_name", "Guardian name", FieldKind::Text),
                    FieldSpec::required("guardian_phone", "Guardian phone", FieldKind::Phone),
                    FieldSpec::optional("phone_number", "Phone number", FieldKind::Phone),
                ],
            },
            SectionSpec {
                title: "Photo",
                fields: vec![FieldSpec::required("photo", "Photo", FieldKind::Photo)],
            },
        ],
    }
}
