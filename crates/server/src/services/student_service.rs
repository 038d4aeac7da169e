use async_trait::async_trait;
use database::student::{
    model::{Student, StudentResult},
    repository::DynStudentRepository,
};
use std::sync::Arc;
use tracing::info;
use utils::{AppError, AppResult};

pub type DynStudentService = Arc<dyn StudentServiceTrait + Send + Sync>;

#[async_trait]
pub trait StudentServiceTrait {
    async fn create_student(&self, name: String, age: u32) -> AppResult<Student>;
    async fn list_students(&self) -> AppResult<Vec<Student>>;
    async fn get_student(&self, id: i64) -> AppResult<Option<Student>>;
    async fn set_result(&self, student_id: i64, subject: String, grade: String) -> AppResult<Vec<StudentResult>>;
    async fn list_results(&self, student_id: i64) -> AppResult<Vec<StudentResult>>;
}

#[derive(Clone)]
pub struct StudentService {
    repository: DynStudentRepository,
}

impl StudentService {
    pub fn new(repository: DynStudentRepository) -> Self {
        Self { repository }
    }

    async fn require_student(&self, id: i64) -> AppResult<Student> {
        self.repository
            .get_student(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found.", id)))
    }
}

#[async_trait]
impl StudentServiceTrait for StudentService {
    async fn create_student(&self, name: String, age: u32) -> AppResult<Student> {
        let student = self.repository.create_student(name.trim(), age).await?;
        info!("📝 student {} created with id {}", student.name, student.id);

        Ok(student)
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        let students = self.repository.list_students().await?;

        Ok(students)
    }

    async fn get_student(&self, id: i64) -> AppResult<Option<Student>> {
        let student = self.repository.get_student(id).await?;

        Ok(student)
    }

    /// Returns every grade of the student after the write.
    async fn set_result(&self, student_id: i64, subject: String, grade: String) -> AppResult<Vec<StudentResult>> {
        self.require_student(student_id).await?;
        self.repository.set_result(student_id, subject.trim(), grade.trim()).await?;

        self.repository.list_results(student_id).await
    }

    async fn list_results(&self, student_id: i64) -> AppResult<Vec<StudentResult>> {
        self.require_student(student_id).await?;

        self.repository.list_results(student_id).await
    }
}
