use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_CREDIT_HOURS: u32 = 3;

/// Range offered by the credit-hours input. Values outside it are still
/// accepted.
pub const CREDIT_HOURS_HINT: (u32, u32) = (1, 6);

const DEFAULT_COURSES: usize = 2;

// ------ CourseId ------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub fn new() -> Self {
        CourseId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        CourseId(id.to_owned())
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ------ Course ------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    /// Empty until the user picks a grade.
    pub grade: String,
    pub credit_hours: u32,
}

impl Course {
    fn numbered(n: usize) -> Self {
        Course {
            name: format!("Course {}", n),
            grade: String::new(),
            credit_hours: DEFAULT_CREDIT_HOURS,
        }
    }

    /// Whether the course takes part in the average.
    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty() && self.credit_hours > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseUpdate {
    Name(String),
    Grade(String),
    CreditHours(u32),
}

// ------ GradeTable ------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("a grade table needs at least one course")]
    Empty,
}

/// Stored shape of a single course.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: CourseId,
    pub name: String,
    pub grade: String,
    #[serde(deserialize_with = "saved_credit_hours")]
    pub credit_hours: u32,
}

// Older saves may hold negative hours; those count as 0.
fn saved_credit_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let hours = i64::deserialize(deserializer)?;
    Ok(u32::try_from(hours.max(0)).unwrap_or(u32::MAX))
}

/// Courses in display order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CourseRecord>", into = "Vec<CourseRecord>")]
pub struct GradeTable {
    courses: IndexMap<CourseId, Course>,
}

impl GradeTable {
    pub fn defaults() -> Self {
        let courses = (1..=DEFAULT_COURSES)
            .map(|n| (CourseId::new(), Course::numbered(n)))
            .collect();
        GradeTable { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, &Course)> {
        self.courses.iter()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn can_remove(&self) -> bool {
        self.courses.len() > 1
    }

    /// Appends an ungraded course named after its position.
    pub fn add(&mut self) -> CourseId {
        let id = CourseId::new();
        let course = Course::numbered(self.courses.len() + 1);
        self.courses.insert(id.clone(), course);
        id
    }

    /// Refused when `id` is the only course left.
    pub fn remove(&mut self, id: &CourseId) -> bool {
        if !self.can_remove() {
            return false;
        }
        self.courses.shift_remove(id).is_some()
    }

    pub fn update(&mut self, id: &CourseId, update: CourseUpdate) -> bool {
        let course = match self.courses.get_mut(id) {
            Some(course) => course,
            None => return false,
        };
        match update {
            CourseUpdate::Name(name) => course.name = name,
            CourseUpdate::Grade(grade) => course.grade = grade,
            CourseUpdate::CreditHours(hours) => course.credit_hours = hours,
        }
        true
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl TryFrom<Vec<CourseRecord>> for GradeTable {
    type Error = TableError;

    fn try_from(records: Vec<CourseRecord>) -> Result<Self, Self::Error> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }
        let mut courses = IndexMap::with_capacity(records.len());
        for record in records {
            let course = Course {
                name: record.name,
                grade: record.grade,
                credit_hours: record.credit_hours,
            };
            // Older saves numbered courses by position and can repeat an id.
            let id = if courses.contains_key(&record.id) {
                CourseId::new()
            } else {
                record.id
            };
            courses.insert(id, course);
        }
        Ok(GradeTable { courses })
    }
}

impl From<GradeTable> for Vec<CourseRecord> {
    fn from(table: GradeTable) -> Self {
        table
            .courses
            .into_iter()
            .map(|(id, course)| CourseRecord {
                id,
                name: course.name,
                grade: course.grade,
                credit_hours: course.credit_hours,
            })
            .collect()
    }
}
