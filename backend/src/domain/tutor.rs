//! Tutor data model.
//!
//! [`Tutor`] is the stored record, [`NewTutor`] the validated create payload
//! with defaults applied, and [`TutorChanges`] the validated update subset.
//! Payload validation lives in [`crate::domain::tutor_validation`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default for [`NewTutor::response_time`] when the payload omits it.
pub const DEFAULT_RESPONSE_TIME: &str = "2 hours";

/// Validation errors returned by [`TutorId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TutorIdValidationError {
    /// The identifier was empty.
    #[error("tutor id must not be empty")]
    Empty,
    /// The identifier carried leading or trailing whitespace.
    #[error("tutor id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Opaque tutor identifier assigned by the storage layer.
///
/// The application never interprets the value; it only checks that it is a
/// usable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TutorId(String);

impl TutorId {
    /// Validate and construct a [`TutorId`].
    ///
    /// # Examples
    /// ```
    /// use eduista::domain::TutorId;
    ///
    /// let id = TutorId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(TutorId::new(" ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, TutorIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TutorIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(TutorIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for TutorId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TutorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TutorId> for String {
    fn from(value: TutorId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TutorId {
    type Error = TutorIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored tutor record.
///
/// ## Invariants
/// - `subjects` and `languages` are non-empty.
/// - `id`, `rating`, `created_at` and `updated_at` are owned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: TutorId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub subjects: Vec<String>,
    pub hourly_rate: f64,
    pub experience: f64,
    pub location: String,
    pub languages: Vec<String>,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_approved: bool,
    pub total_students: u64,
    pub total_lessons: u64,
    pub total_earnings: u64,
    pub response_time: String,
    pub join_date: NaiveDate,
    pub last_active: NaiveDate,
    #[serde(default)]
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tutor {
    /// Build a stored record from a validated payload and storage-owned fields.
    pub fn from_new(
        id: TutorId,
        new_tutor: NewTutor,
        created_at: DateTime<Utc>,
        rating: Option<f64>,
    ) -> Self {
        let NewTutor {
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
            is_verified,
            is_active,
            is_approved,
            total_students,
            total_lessons,
            total_earnings,
            response_time,
            join_date,
            last_active,
        } = new_tutor;
        Self {
            id,
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
            is_verified,
            is_active,
            is_approved,
            total_students,
            total_lessons,
            total_earnings,
            response_time,
            join_date,
            last_active,
            rating,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Validated create payload with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTutor {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub subjects: Vec<String>,
    pub hourly_rate: f64,
    pub experience: f64,
    pub location: String,
    pub languages: Vec<String>,
    pub bio: String,
    pub avatar: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_approved: bool,
    pub total_students: u64,
    pub total_lessons: u64,
    pub total_earnings: u64,
    pub response_time: String,
    pub join_date: NaiveDate,
    pub last_active: NaiveDate,
}

/// Validated update subset. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub experience: Option<f64>,
    pub location: Option<String>,
    pub languages: Option<Vec<String>>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
    pub is_approved: Option<bool>,
    pub total_students: Option<u64>,
    pub total_lessons: Option<u64>,
    pub total_earnings: Option<u64>,
    pub response_time: Option<String>,
    pub last_active: Option<NaiveDate>,
}

impl TutorChanges {
    /// Whether the update carries no field at all.
    ///
    /// # Examples
    /// ```
    /// use eduista::domain::TutorChanges;
    ///
    /// assert!(TutorChanges::default().is_empty());
    /// let changes = TutorChanges { is_active: Some(false), ..TutorChanges::default() };
    /// assert!(!changes.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `tutor`, leaving the rest untouched.
    ///
    /// Storage-owned fields (`id`, `rating`, timestamps) are never touched.
    pub fn apply_to(self, tutor: &mut Tutor) {
        let Self {
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
            is_verified,
            is_active,
            is_approved,
            total_students,
            total_lessons,
            total_earnings,
            response_time,
            last_active,
        } = self;

        merge(&mut tutor.name, name);
        merge(&mut tutor.email, email);
        merge(&mut tutor.subject, subject);
        merge(&mut tutor.subjects, subjects);
        merge(&mut tutor.hourly_rate, hourly_rate);
        merge(&mut tutor.experience, experience);
        merge(&mut tutor.location, location);
        merge(&mut tutor.languages, languages);
        merge(&mut tutor.bio, bio);
        if avatar.is_some() {
            tutor.avatar = avatar;
        }
        merge(&mut tutor.is_verified, is_verified);
        merge(&mut tutor.is_active, is_active);
        merge(&mut tutor.is_approved, is_approved);
        merge(&mut tutor.total_students, total_students);
        merge(&mut tutor.total_lessons, total_lessons);
        merge(&mut tutor.total_earnings, total_earnings);
        merge(&mut tutor.response_time, response_time);
        merge(&mut tutor.last_active, last_active);
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
