//! Row and error DTOs for the PostgREST wire format.
//!
//! Columns are snake_case; the API shape is camelCase. These types own that
//! mapping so the domain model never sees a column name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_RESPONSE_TIME, NewTutor, Tutor, TutorChanges, TutorId};

/// A row as returned by `select=*` or `Prefer: return=representation`.
///
/// Columns that only carry a column default (flags, counters, dates and
/// timestamps) may still hold `NULL` in rows written outside this service, so
/// they decode as options and pick up the insert defaults in
/// [`TutorRowDto::into_domain`].
#[derive(Debug, Deserialize)]
pub(super) struct TutorRowDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) subject: String,
    pub(super) subjects: Vec<String>,
    pub(super) hourly_rate: f64,
    pub(super) experience: f64,
    pub(super) location: String,
    pub(super) languages: Vec<String>,
    pub(super) bio: String,
    #[serde(default)]
    pub(super) avatar: Option<String>,
    #[serde(default)]
    pub(super) is_verified: Option<bool>,
    #[serde(default)]
    pub(super) is_active: Option<bool>,
    #[serde(default)]
    pub(super) is_approved: Option<bool>,
    #[serde(default)]
    pub(super) total_students: Option<u64>,
    #[serde(default)]
    pub(super) total_lessons: Option<u64>,
    #[serde(default)]
    pub(super) total_earnings: Option<u64>,
    #[serde(default)]
    pub(super) response_time: Option<String>,
    #[serde(default)]
    pub(super) join_date: Option<NaiveDate>,
    #[serde(default)]
    pub(super) last_active: Option<NaiveDate>,
    #[serde(default)]
    pub(super) rating: Option<f64>,
    #[serde(default)]
    pub(super) created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(super) updated_at: Option<DateTime<Utc>>,
}

impl TutorRowDto {
    pub(super) fn into_domain(self) -> Result<Tutor, String> {
        let id = TutorId::new(self.id.clone())
            .map_err(|err| format!("row {:?} has an unusable id: {err}", self.id))?;
        // With no timestamp at all the row sorts last in newest-first listings.
        let created_at = self.created_at.or(self.updated_at).unwrap_or_default();
        let updated_at = self.updated_at.unwrap_or(created_at);
        let created_on = created_at.date_naive();
        Ok(Tutor {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            subjects: self.subjects,
            hourly_rate: self.hourly_rate,
            experience: self.experience,
            location: self.location,
            languages: self.languages,
            bio: self.bio,
            avatar: self.avatar,
            is_verified: self.is_verified.unwrap_or(false),
            is_active: self.is_active.unwrap_or(true),
            is_approved: self.is_approved.unwrap_or(false),
            total_students: self.total_students.unwrap_or(0),
            total_lessons: self.total_lessons.unwrap_or(0),
            total_earnings: self.total_earnings.unwrap_or(0),
            response_time: self
                .response_time
                .unwrap_or_else(|| DEFAULT_RESPONSE_TIME.to_owned()),
            join_date: self.join_date.unwrap_or(created_on),
            last_active: self.last_active.unwrap_or(created_on),
            rating: self.rating,
            created_at,
            updated_at,
        })
    }
}

/// Insert body. Storage assigns `id`, `rating` and the timestamps.
#[derive(Debug, Serialize)]
pub(super) struct NewTutorRowDto<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    subjects: &'a [String],
    hourly_rate: f64,
    experience: f64,
    location: &'a str,
    languages: &'a [String],
    bio: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
    is_verified: bool,
    is_active: bool,
    is_approved: bool,
    total_students: u64,
    total_lessons: u64,
    total_earnings: u64,
    response_time: &'a str,
    join_date: NaiveDate,
    last_active: NaiveDate,
}

impl<'a> From<&'a NewTutor> for NewTutorRowDto<'a> {
    fn from(tutor: &'a NewTutor) -> Self {
        Self {
            name: &tutor.name,
            email: &tutor.email,
            subject: &tutor.subject,
            subjects: &tutor.subjects,
            hourly_rate: tutor.hourly_rate,
            experience: tutor.experience,
            location: &tutor.location,
            languages: &tutor.languages,
            bio: &tutor.bio,
            avatar: tutor.avatar.as_deref(),
            is_verified: tutor.is_verified,
            is_active: tutor.is_active,
            is_approved: tutor.is_approved,
            total_students: tutor.total_students,
            total_lessons: tutor.total_lessons,
            total_earnings: tutor.total_earnings,
            response_time: &tutor.response_time,
            join_date: tutor.join_date,
            last_active: tutor.last_active,
        }
    }
}

/// Patch body carrying only the columns being changed.
#[derive(Debug, Serialize)]
pub(super) struct TutorChangesRowDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subjects: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    languages: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_students: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_lessons: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_earnings: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_active: Option<NaiveDate>,
}

impl<'a> From<&'a TutorChanges> for TutorChangesRowDto<'a> {
    fn from(changes: &'a TutorChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            email: changes.email.as_deref(),
            subject: changes.subject.as_deref(),
            subjects: changes.subjects.as_deref(),
            hourly_rate: changes.hourly_rate,
            experience: changes.experience,
            location: changes.location.as_deref(),
            languages: changes.languages.as_deref(),
            bio: changes.bio.as_deref(),
            avatar: changes.avatar.as_deref(),
            is_verified: changes.is_verified,
            is_active: changes.is_active,
            is_approved: changes.is_approved,
            total_students: changes.total_students,
            total_lessons: changes.total_lessons,
            total_earnings: changes.total_earnings,
            response_time: changes.response_time.as_deref(),
            last_active: changes.last_active,
        }
    }
}

/// Error body emitted by PostgREST for failed requests.
#[derive(Debug, Default, Deserialize)]
pub(super) struct PostgrestErrorDto {
    #[serde(default)]
    pub(super) code: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}
