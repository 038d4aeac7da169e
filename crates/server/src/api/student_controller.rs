use crate::{
    dtos::{
        static_dto::ErrorResponse,
        student_dto::{AddResultDto, CreateStudentDto, StudentDto, StudentResultsDto},
    },
    extractors::{path_extractor::PathExtractor, validation_extractor::ValidationExtractor},
    services::Services,
};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use utils::{AppError, AppResult};

#[utoipa::path(
    post,
    path = "/students",
    tag = "student",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentDto),
        (status = 400, description = "Missing student name or age", body = ErrorResponse)
    )
)]
pub async fn create_student(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<CreateStudentDto>,
) -> AppResult<(StatusCode, Json<StudentDto>)> {
    let (name, age) = req.into_parts().map_err(|m| AppError::BadRequest(m.to_string()))?;
    let student = services.student.create_student(name, age).await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "student",
    responses(
        (status = 200, description = "All students", body = Vec<StudentDto>)
    )
)]
pub async fn list_students(Extension(services): Extension<Services>) -> AppResult<Json<Vec<StudentDto>>> {
    let students = services.student.list_students().await?;

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "student",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "One student", body = StudentDto),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn get_student(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<StudentDto>> {
    match services.student.get_student(id).await? {
        Some(student) => Ok(Json(student.into())),
        None => Err(AppError::NotFound(format!("Student with id {} not found.", id))),
    }
}

#[utoipa::path(
    post,
    path = "/results/{id}",
    tag = "student",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    request_body = AddResultDto,
    responses(
        (status = 201, description = "Grade stored, all grades returned", body = StudentResultsDto),
        (status = 400, description = "Missing subject or grade", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn add_result(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
    ValidationExtractor(req): ValidationExtractor<AddResultDto>,
) -> AppResult<(StatusCode, Json<StudentResultsDto>)> {
    let (subject, grade) = req.into_parts().map_err(|m| AppError::BadRequest(m.to_string()))?;
    let results = services.student.set_result(id, subject, grade).await?;

    Ok((StatusCode::CREATED, Json(StudentResultsDto::new(id, results))))
}

#[utoipa::path(
    get,
    path = "/results/{id}",
    tag = "student",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "All grades of the student", body = StudentResultsDto),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn get_results(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<StudentResultsDto>> {
    let results = services.student.list_results(id).await?;

    Ok(Json(StudentResultsDto::new(id, results)))
}

pub struct StudentController;
impl StudentController {
    pub fn app() -> Router {
        Router::new()
            .route("/students", post(create_student).get(list_students))
            .route("/students/:id", get(get_student))
            .route("/results/:id", post(add_result).get(get_results))
    }
}
