//! Payload validation for tutor create and update requests.
//!
//! Both schemas project an untyped JSON object onto an explicit allow-list of
//! known fields: unknown keys are discarded, known keys are type- and
//! constraint-checked, and every violation is collected before failing so the
//! caller sees the whole picture in one response.
//!
//! ```text
//! create: name, email, subject, subjects, hourlyRate, experience, location,
//!         languages, bio required; avatar optional; flags, counters,
//!         responseTime, joinDate, lastActive defaulted
//! update: every create field optional except joinDate (fixed at creation)
//! ```

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::tutor::{DEFAULT_RESPONSE_TIME, NewTutor, TutorChanges};

const NAME: &str = "name";
const EMAIL: &str = "email";
const SUBJECT: &str = "subject";
const SUBJECTS: &str = "subjects";
const HOURLY_RATE: &str = "hourlyRate";
const EXPERIENCE: &str = "experience";
const LOCATION: &str = "location";
const LANGUAGES: &str = "languages";
const BIO: &str = "bio";
const AVATAR: &str = "avatar";
const IS_VERIFIED: &str = "isVerified";
const IS_ACTIVE: &str = "isActive";
const IS_APPROVED: &str = "isApproved";
const TOTAL_STUDENTS: &str = "totalStudents";
const TOTAL_LESSONS: &str = "totalLessons";
const TOTAL_EARNINGS: &str = "totalEarnings";
const RESPONSE_TIME: &str = "responseTime";
const JOIN_DATE: &str = "joinDate";
const LAST_ACTIVE: &str = "lastActive";

/// Field path used when the payload itself is not a JSON object.
pub const ROOT_FIELD: &str = "$";

/// Minimum number of characters in a tutor bio.
pub const BIO_MIN_CHARS: usize = 10;

/// Machine-readable reason attached to a [`FieldViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// A mandatory field was absent.
    Required,
    /// The JSON type did not match the schema.
    InvalidType,
    /// A string or list was shorter than allowed.
    TooShort,
    /// A number was below its minimum.
    TooSmall,
    /// A counter was not a whole number.
    NotAnInteger,
    /// The value is not a syntactically valid email address.
    InvalidEmail,
    /// The value is not a valid absolute URL.
    InvalidUrl,
    /// The value is not a calendar date.
    InvalidDate,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// JSON path of the field, e.g. `email` or `subjects[1]`.
    pub field: String,
    /// Machine-readable reason.
    pub code: ViolationCode,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Validation failure carrying every violation found in the payload.
///
/// ## Invariants
/// - `violations` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorValidationError {
    violations: Vec<FieldViolation>,
}

impl TutorValidationError {
    /// All violations, in schema order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl fmt::Display for TutorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .violations
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid tutor payload: {summary}")
    }
}

impl std::error::Error for TutorValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

struct TextRule {
    field: &'static str,
    min_chars: usize,
    message: &'static str,
}

const NAME_RULE: TextRule = TextRule {
    field: NAME,
    min_chars: 1,
    message: "Name is required",
};
const SUBJECT_RULE: TextRule = TextRule {
    field: SUBJECT,
    min_chars: 1,
    message: "Subject is required",
};
const LOCATION_RULE: TextRule = TextRule {
    field: LOCATION,
    min_chars: 1,
    message: "Location is required",
};
const BIO_RULE: TextRule = TextRule {
    field: BIO,
    min_chars: BIO_MIN_CHARS,
    message: "Bio must be at least 10 characters",
};

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Dot placement in the local part is checked separately.
        let pattern = r"^[A-Za-z0-9_'+\-.]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_valid_email(candidate: &str) -> bool {
    let Some((local, _)) = candidate.split_once('@') else {
        return false;
    };
    !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && email_regex().is_match(candidate)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
}

/// Collects typed values and violations from one JSON object.
struct PayloadReader<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> PayloadReader<'a> {
    fn new(payload: &'a Value) -> Result<Self, TutorValidationError> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                violations: Vec::new(),
            }),
            other => Err(TutorValidationError {
                violations: vec![FieldViolation::new(
                    ROOT_FIELD,
                    ViolationCode::InvalidType,
                    format!("Expected object, received {}", json_type(other)),
                )],
            }),
        }
    }

    fn reject(&mut self, field: impl Into<String>, code: ViolationCode, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, code, message));
    }

    fn lookup(&mut self, field: &'static str, presence: Presence) -> Option<&'a Value> {
        let value = self.object.get(field);
        if value.is_none() && presence == Presence::Required {
            self.reject(field, ViolationCode::Required, "Required");
        }
        value
    }

    fn wrong_type(&mut self, field: &str, expected: &str, value: &Value) {
        self.reject(
            field,
            ViolationCode::InvalidType,
            format!("Expected {expected}, received {}", json_type(value)),
        );
    }

    fn raw_string(&mut self, field: &'static str, presence: Presence) -> Option<&'a str> {
        let value = self.lookup(field, presence)?;
        match value.as_str() {
            Some(text) => Some(text),
            None => {
                self.wrong_type(field, "string", value);
                None
            }
        }
    }

    fn text(&mut self, rule: &TextRule, presence: Presence) -> Option<String> {
        let text = self.raw_string(rule.field, presence)?;
        if text.trim().is_empty() || text.chars().count() < rule.min_chars {
            self.reject(rule.field, ViolationCode::TooShort, rule.message);
            return None;
        }
        Some(text.to_owned())
    }

    fn any_text(&mut self, field: &'static str, presence: Presence) -> Option<String> {
        self.raw_string(field, presence).map(str::to_owned)
    }

    fn email(&mut self, presence: Presence) -> Option<String> {
        let text = self.raw_string(EMAIL, presence)?;
        if !is_valid_email(text) {
            self.reject(EMAIL, ViolationCode::InvalidEmail, "Invalid email");
            return None;
        }
        Some(text.to_owned())
    }

    fn url(&mut self, field: &'static str) -> Option<String> {
        let text = self.raw_string(field, Presence::Optional)?;
        if Url::parse(text).is_err() {
            self.reject(field, ViolationCode::InvalidUrl, "Invalid url");
            return None;
        }
        Some(text.to_owned())
    }

    fn string_list(
        &mut self,
        field: &'static str,
        empty_message: &'static str,
        presence: Presence,
    ) -> Option<Vec<String>> {
        let value = self.lookup(field, presence)?;
        let Some(items) = value.as_array() else {
            self.wrong_type(field, "array", value);
            return None;
        };

        let mut strings = Vec::with_capacity(items.len());
        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => strings.push(text.to_owned()),
                None => {
                    self.wrong_type(&format!("{field}[{index}]"), "string", item);
                    valid = false;
                }
            }
        }
        if items.is_empty() {
            self.reject(field, ViolationCode::TooShort, empty_message);
            return None;
        }
        valid.then_some(strings)
    }

    fn amount(
        &mut self,
        field: &'static str,
        negative_message: &'static str,
        presence: Presence,
    ) -> Option<f64> {
        let value = self.lookup(field, presence)?;
        let Some(number) = value.as_f64().filter(|number| number.is_finite()) else {
            self.wrong_type(field, "number", value);
            return None;
        };
        if number < 0.0 {
            self.reject(field, ViolationCode::TooSmall, negative_message);
            return None;
        }
        Some(number)
    }

    fn count(&mut self, field: &'static str) -> Option<u64> {
        let value = self.lookup(field, Presence::Optional)?;
        if let Some(count) = value.as_u64() {
            return Some(count);
        }
        match value.as_f64() {
            Some(number) if number < 0.0 => {
                self.reject(field, ViolationCode::TooSmall, "Must be zero or greater");
            }
            Some(_) => {
                self.reject(field, ViolationCode::NotAnInteger, "Expected integer, received float");
            }
            None => self.wrong_type(field, "number", value),
        }
        None
    }

    fn flag(&mut self, field: &'static str) -> Option<bool> {
        let value = self.lookup(field, Presence::Optional)?;
        match value.as_bool() {
            Some(flag) => Some(flag),
            None => {
                self.wrong_type(field, "boolean", value);
                None
            }
        }
    }

    fn date(&mut self, field: &'static str) -> Option<NaiveDate> {
        let text = self.raw_string(field, Presence::Optional)?;
        match parse_date(text) {
            Some(date) => Some(date),
            None => {
                self.reject(field, ViolationCode::InvalidDate, "Expected a YYYY-MM-DD date");
                None
            }
        }
    }

    fn into_error(self) -> TutorValidationError {
        TutorValidationError {
            violations: self.violations,
        }
    }

    fn finish(self) -> Result<(), TutorValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Validate a create payload and apply defaults.
///
/// `today` seeds `joinDate` and `lastActive` when the payload omits them.
///
/// # Errors
/// Returns [`TutorValidationError`] listing every violation when the payload
/// is not an object, misses a required field, or breaks a constraint.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use eduista::domain::tutor_validation::validate_new_tutor;
/// use serde_json::json;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date");
/// let tutor = validate_new_tutor(
///     &json!({
///         "name": "A", "email": "a@b.com", "subject": "Math", "subjects": ["Math"],
///         "hourlyRate": 100, "experience": 1, "location": "X",
///         "languages": ["English"], "bio": "1234567890"
///     }),
///     today,
/// )
/// .expect("payload is valid");
/// assert!(tutor.is_active);
/// assert_eq!(tutor.join_date, today);
/// ```
pub fn validate_new_tutor(
    payload: &Value,
    today: NaiveDate,
) -> Result<NewTutor, TutorValidationError> {
    use Presence::{Optional, Required};

    let mut reader = PayloadReader::new(payload)?;
    let name = reader.text(&NAME_RULE, Required);
    let email = reader.email(Required);
    let subject = reader.text(&SUBJECT_RULE, Required);
    let subjects = reader.string_list(SUBJECTS, "At least one subject is required", Required);
    let hourly_rate = reader.amount(HOURLY_RATE, "Hourly rate must be positive", Required);
    let experience = reader.amount(EXPERIENCE, "Experience must be positive", Required);
    let location = reader.text(&LOCATION_RULE, Required);
    let languages = reader.string_list(LANGUAGES, "At least one language is required", Required);
    let bio = reader.text(&BIO_RULE, Required);
    let avatar = reader.url(AVATAR);
    let is_verified = reader.flag(IS_VERIFIED);
    let is_active = reader.flag(IS_ACTIVE);
    let is_approved = reader.flag(IS_APPROVED);
    let total_students = reader.count(TOTAL_STUDENTS);
    let total_lessons = reader.count(TOTAL_LESSONS);
    let total_earnings = reader.count(TOTAL_EARNINGS);
    let response_time = reader.any_text(RESPONSE_TIME, Optional);
    let join_date = reader.date(JOIN_DATE);
    let last_active = reader.date(LAST_ACTIVE);

    let (
        Some(name),
        Some(email),
        Some(subject),
        Some(subjects),
        Some(hourly_rate),
        Some(experience),
        Some(location),
        Some(languages),
        Some(bio),
    ) = (
        name,
        email,
        subject,
        subjects,
        hourly_rate,
        experience,
        location,
        languages,
        bio,
    )
    else {
        return Err(reader.into_error());
    };
    reader.finish()?;

    Ok(NewTutor {
        name,
        email,
        subject,
        subjects,
        hourly_rate,
        experience,
        location,
        languages,
        bio,
        avatar,
        is_verified: is_verified.unwrap_or(false),
        is_active: is_active.unwrap_or(true),
        is_approved: is_approved.unwrap_or(false),
        total_students: total_students.unwrap_or(0),
        total_lessons: total_lessons.unwrap_or(0),
        total_earnings: total_earnings.unwrap_or(0),
        response_time: response_time.unwrap_or_else(|| DEFAULT_RESPONSE_TIME.to_owned()),
        join_date: join_date.unwrap_or(today),
        last_active: last_active.unwrap_or(today),
    })
}

/// Validate an update payload. Every field is optional; an empty object is a
/// valid no-op.
///
/// # Errors
/// Returns [`TutorValidationError`] when the payload is not an object or a
/// present field breaks its constraint.
///
/// # Examples
/// ```
/// use eduista::domain::tutor_validation::validate_tutor_changes;
/// use serde_json::json;
///
/// let changes = validate_tutor_changes(&json!({ "isActive": false, "id": "ignored" }))
///     .expect("payload is valid");
/// assert_eq!(changes.is_active, Some(false));
/// assert!(validate_tutor_changes(&json!({})).expect("empty is valid").is_empty());
/// ```
pub fn validate_tutor_changes(payload: &Value) -> Result<TutorChanges, TutorValidationError> {
    use Presence::Optional;

    let mut reader = PayloadReader::new(payload)?;
    let changes = TutorChanges {
        name: reader.text(&NAME_RULE, Optional),
        email: reader.email(Optional),
        subject: reader.text(&SUBJECT_RULE, Optional),
        subjects: reader.string_list(SUBJECTS, "At least one subject is required", Optional),
        hourly_rate: reader.amount(HOURLY_RATE, "Hourly rate must be positive", Optional),
        experience: reader.amount(EXPERIENCE, "Experience must be positive", Optional),
        location: reader.text(&LOCATION_RULE, Optional),
        languages: reader.string_list(LANGUAGES, "At least one language is required", Optional),
        bio: reader.text(&BIO_RULE, Optional),
        avatar: reader.url(AVATAR),
        is_verified: reader.flag(IS_VERIFIED),
        is_active: reader.flag(IS_ACTIVE),
        is_approved: reader.flag(IS_APPROVED),
        total_students: reader.count(TOTAL_STUDENTS),
        total_lessons: reader.count(TOTAL_LESSONS),
        total_earnings: reader.count(TOTAL_EARNINGS),
        response_time: reader.any_text(RESPONSE_TIME, Optional),
        last_active: reader.date(LAST_ACTIVE),
    };
    reader.finish()?;
    Ok(changes)
}
