use database::student::model::{Student, StudentResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

pub const MISSING_STUDENT_FIELDS: &str = "Missing student name or age";
pub const MISSING_RESULT_FIELDS: &str = "Missing subject or grade";

#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct CreateStudentDto {
    #[validate(required(message = "Missing student name or age"), length(min = 1, max = 80))]
    pub name: Option<String>,
    #[validate(required(message = "Missing student name or age"), range(min = 1, max = 150))]
    pub age: Option<u32>,
}

impl CreateStudentDto {
    /// Blank names pass `length` but are still missing.
    pub fn into_parts(self) -> Result<(String, u32), &'static str> {
        match (self.name, self.age) {
            (Some(name), Some(age)) if !name.trim().is_empty() => Ok((name, age)),
            _ => Err(MISSING_STUDENT_FIELDS),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct AddResultDto {
    #[validate(required(message = "Missing subject or grade"), length(min = 1, max = 50))]
    pub subject: Option<String>,
    #[validate(required(message = "Missing subject or grade"), length(min = 1, max = 16))]
    pub grade: Option<String>,
}

impl AddResultDto {
    pub fn into_parts(self) -> Result<(String, String), &'static str> {
        match (self.subject, self.grade) {
            (Some(subject), Some(grade)) if !subject.trim().is_empty() && !grade.trim().is_empty() => {
                Ok((subject, grade))
            }
            _ => Err(MISSING_RESULT_FIELDS),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct StudentDto {
    pub id: i64,
    pub name: String,
    pub age: u32,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            age: student.age,
        }
    }
}

/// subject → grade
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct StudentResultsDto {
    pub student_id: i64,
    pub results: BTreeMap<String, String>,
}

impl StudentResultsDto {
    pub fn new(student_id: i64, results: Vec<StudentResult>) -> Self {
        Self {
            student_id,
            results: results.into_iter().map(|r| (r.subject, r.grade)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_age_fails_validation_with_message() {
        let dto = CreateStudentDto {
            name: Some("Ada".into()),
            age: None,
        };

        let errors = dto.validate().unwrap_err();
        let message = errors.field_errors()["age"][0].message.clone().unwrap();
        assert_eq!(message, MISSING_STUDENT_FIELDS);
    }

    #[test]
    fn blank_name_is_rejected_after_validation() {
        let dto = CreateStudentDto {
            name: Some("   ".into()),
            age: Some(20),
        };

        assert!(dto.validate().is_ok());
        assert_eq!(dto.into_parts(), Err(MISSING_STUDENT_FIELDS));
    }

    #[test]
    fn results_collapse_into_a_subject_map() {
        let dto = StudentResultsDto::new(
            3,
            vec![
                StudentResult {
                    student_id: 3,
                    subject: "math".into(),
                    grade: "A".into(),
                },
                StudentResult {
                    student_id: 3,
                    subject: "art".into(),
                    grade: "B".into(),
                },
            ],
        );

        assert_eq!(dto.results.get("math").map(String::as_str), Some("A"));
        assert_eq!(serde_json::to_value(&dto).unwrap()["results"]["art"], "B");
    }
}
