//! Rule-driven engine behind the multi-section registration forms.
//!
//! DESIGN
//! ======
//! A `WizardSchema` describes sections and fields declaratively; `Wizard`
//! holds the mutable draft, the current section, and the collected validation
//! errors. Each registration form is one schema, so section gating and
//! required-field rules live in one place.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use std::collections::BTreeMap;

use crate::payload::PhotoUpload;
use crate::record::Category;

/// Input kind of a form field; drives both rendering and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// `YYYY-MM-DD`, passed through untransformed.
    Date,
    Phone,
    Number,
    Boolean,
    Choice(&'static [&'static str]),
    /// The attached photo; its value lives outside the draft.
    Photo,
}

/// Declarative description of a single form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Boolean field that must be on for this field to be required.
    pub required_when: Option<&'static str>,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: true, required_when: None }
    }

    #[must_use]
    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false, required_when: None }
    }

    /// Required only while the boolean field `flag` is checked.
    #[must_use]
    pub const fn required_when(key: &'static str, label: &'static str, kind: FieldKind, flag: &'static str) -> Self {
        Self { key, label, kind, required: true, required_when: Some(flag) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSpec {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WizardSchema {
    pub category: Category,
    pub title: &'static str,
    pub sections: Vec<SectionSpec>,
}

impl WizardSchema {
    /// All fields in section order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.key == key)
    }

    /// Fresh draft with every non-photo field present: empty text, unchecked flags.
    #[must_use]
    pub fn initial_draft(&self) -> FormDraft {
        let mut draft = FormDraft::default();
        for field in self.fields() {
            match field.kind {
                FieldKind::Photo => {}
                FieldKind::Boolean => draft.set_flag(field.key, false),
                _ => draft.set_text(field.key, ""),
            }
        }
        draft
    }
}

/// Value held by one draft field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Mutable form state, keyed by wire field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    values: BTreeMap<String, FieldValue>,
}

impl FormDraft {
    pub fn set_text(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), FieldValue::Text(value.to_owned()));
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), FieldValue::Flag(value));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Text value for `key`; flags and absent keys read as empty.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FieldValue::Flag(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Lifecycle of one wizard run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
    Failed(String),
}

/// Section-gated form state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wizard {
    schema: WizardSchema,
    current: usize,
    draft: FormDraft,
    photo: Option<PhotoUpload>,
    errors: Vec<String>,
    status: WizardStatus,
}

impl Wizard {
    #[must_use]
    pub fn new(schema: WizardSchema) -> Self {
        let draft = schema.initial_draft();
        Self { schema, current: 1, draft, photo: None, errors: Vec::new(), status: WizardStatus::Editing }
    }

    #[must_use]
    pub fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    /// Current section, 1-based.
    #[must_use]
    pub fn current_section(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.schema.sections.len()
    }

    #[must_use]
    pub fn current_spec(&self) -> Option<&SectionSpec> {
        self.schema.sections.get(self.current - 1)
    }

    #[must_use]
    pub fn is_last_section(&self) -> bool {
        self.current >= self.section_count()
    }

    #[must_use]
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    #[must_use]
    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn status(&self) -> &WizardStatus {
        &self.status
    }

    pub fn set_text(&mut self, key: &str, value: &str) {
        self.draft.set_text(key, value);
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.draft.set_flag(key, value);
    }

    pub fn set_photo(&mut self, photo: Option<PhotoUpload>) {
        self.photo = photo;
    }

    /// Validate the current section and advance on success.
    ///
    /// Returns `false` and records one message per failing field otherwise.
    pub fn next_section(&mut self) -> bool {
        let errors = self.validate_section(self.current);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        if self.current < self.section_count() {
            self.current += 1;
        }
        true
    }

    /// Go back one section. Never blocked by validation.
    pub fn prev_section(&mut self) {
        self.errors.clear();
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Validate every section, moving to the first failing one.
    pub fn validate_all(&mut self) -> bool {
        for index in 1..=self.section_count() {
            let errors = self.validate_section(index);
            if !errors.is_empty() {
                self.current = index;
                self.errors = errors;
                return false;
            }
        }
        self.errors.clear();
        true
    }

    /// Enter the submitting state if the whole form validates and no
    /// submission is already running.
    pub fn begin_submit(&mut self) -> bool {
        if matches!(self.status, WizardStatus::Submitting | WizardStatus::Submitted) {
            return false;
        }
        if !self.validate_all() {
            return false;
        }
        self.status = WizardStatus::Submitting;
        true
    }

    pub fn finish_submit(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.status = WizardStatus::Submitted,
            Err(message) => {
                self.errors = vec![message.clone()];
                self.status = WizardStatus::Failed(message);
            }
        }
    }

    /// Discard the draft and return to the first section.
    pub fn reset(&mut self) {
        self.draft = self.schema.initial_draft();
        self.photo = None;
        self.current = 1;
        self.errors.clear();
        self.status = WizardStatus::Editing;
    }

    /// Validation messages for a 1-based section, in field order.
    #[must_use]
    pub fn validate_section(&self, index: usize) -> Vec<String> {
        let Some(section) = self.schema.sections.get(index.wrapping_sub(1)) else {
            return Vec::new();
        };
        section
            .fields
            .iter()
            .filter_map(|field| self.validate_field(field))
            .collect()
    }

    fn validate_field(&self, field: &FieldSpec) -> Option<String> {
        let required = field.required && field.required_when.is_none_or(|flag| self.draft.flag(flag));
        if field.kind == FieldKind::Photo {
            return (required && self.photo.is_none()).then(|| format!("{} is required", field.label));
        }
        if field.kind == FieldKind::Boolean {
            return None;
        }
        let value = self.draft.text(field.key).trim();
        if value.is_empty() {
            return required.then(|| format!("{} is required", field.label));
        }
        check_format(field, value)
    }
}

fn check_format(field: &FieldSpec, value: &str) -> Option<String> {
    match field.kind {
        FieldKind::Phone if !is_valid_phone(value) => {
            Some(format!("{} must be a valid phone number", field.label))
        }
        FieldKind::Date if !is_valid_date(value) => Some(format!("{} must be a date (YYYY-MM-DD)", field.label)),
        FieldKind::Number if value.parse::<f64>().is_err() => Some(format!("{} must be a number", field.label)),
        FieldKind::Choice(options) if !options.iter().any(|option| option.eq_ignore_ascii_case(value)) => {
            Some(format!("{} must be one of: {}", field.label, options.join(", ")))
        }
        _ => None,
    }
}

/// 7 to 15 digits once spaces, dashes, and a leading `+` are removed.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = body.chars().filter(|c| *c != ' ' && *c != '-').collect();
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Calendar-checked `YYYY-MM-DD`.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    let parts: Vec<&str> = value.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (year.parse::<u32>(), month.parse::<u32>(), day.parse::<u32>()) else {
        return false;
    };
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}
