use crate::{
    counter::{next_sequence, STUDENT_SEQUENCE},
    student::model::{Student, StudentResult},
    Database,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};
use std::sync::Arc;
use utils::{AppError, AppResult};

pub type DynStudentRepository = Arc<dyn StudentRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait StudentRepositoryTrait {
    /// The id comes from the storage sequence, never from the caller.
    async fn create_student(&self, name: &str, age: u32) -> AppResult<Student>;

    async fn list_students(&self) -> AppResult<Vec<Student>>;

    async fn get_student(&self, id: i64) -> AppResult<Option<Student>>;

    /// Inserts or overwrites the grade of one subject.
    async fn set_result(&self, student_id: i64, subject: &str, grade: &str) -> AppResult<StudentResult>;

    async fn list_results(&self, student_id: i64) -> AppResult<Vec<StudentResult>>;
}

#[async_trait]
impl StudentRepositoryTrait for Database {
    async fn create_student(&self, name: &str, age: u32) -> AppResult<Student> {
        let id = next_sequence(&self.counters, STUDENT_SEQUENCE).await?;
        let student = Student {
            id,
            name: name.to_string(),
            age,
        };

        self.students.insert_one(&student, None).await?;

        Ok(student)
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let students = self.students.find(None, options).await?.try_collect().await?;

        Ok(students)
    }

    async fn get_student(&self, id: i64) -> AppResult<Option<Student>> {
        let student = self.students.find_one(doc! { "_id": id }, None).await?;

        Ok(student)
    }

    async fn set_result(&self, student_id: i64, subject: &str, grade: &str) -> AppResult<StudentResult> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        self.student_results
            .find_one_and_update(
                doc! { "student_id": student_id, "subject": subject },
                doc! { "$set": { "grade": grade } },
                options,
            )
            .await?
            .ok_or_else(|| {
                AppError::InternalServerErrorWithContext(format!(
                    "result {} of student {} was not upserted",
                    subject, student_id
                ))
            })
    }

    async fn list_results(&self, student_id: i64) -> AppResult<Vec<StudentResult>> {
        let options = FindOptions::builder().sort(doc! { "subject": 1 }).build();
        let results = self
            .student_results
            .find(doc! { "student_id": student_id }, options)
            .await?
            .try_collect()
            .await?;

        Ok(results)
    }
}
