use async_trait::async_trait;
use reqwest::Method;

use super::{
    client::ApiClient,
    types::{
        counts_by_teacher, ApiError, EnrollmentCountRow, EnrollmentCounts, Teacher,
        TeacherPayload,
    },
};

const TEACHER_COLUMNS: &str = "id,name,email,phone";

/// Remote operations the roster depends on.
#[async_trait(?Send)]
pub trait TeacherService {
    async fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError>;

    /// Enrollment counts for every teacher in one round trip. Teachers with no
    /// enrollments may be missing from the map.
    async fn get_enrollment_counts(&self) -> Result<EnrollmentCounts, ApiError>;

    async fn create_teacher(&self, payload: TeacherPayload) -> Result<Teacher, ApiError>;

    async fn update_teacher(&self, id: &str, payload: TeacherPayload)
        -> Result<Teacher, ApiError>;

    async fn delete_teacher(&self, id: &str) -> Result<(), ApiError>;
}

fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

fn single_row(mut rows: Vec<Teacher>, missing: &str) -> Result<Teacher, ApiError> {
    if rows.len() > 1 {
        log::warn!("Expected one teacher row, got {}", rows.len());
    }
    if rows.is_empty() {
        Err(ApiError {
            error: missing.to_string(),
            code: "NOT_FOUND".to_string(),
            details: None,
        })
    } else {
        Ok(rows.swap_remove(0))
    }
}

#[async_trait(?Send)]
impl TeacherService for ApiClient {
    async fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        let builder = self
            .request(Method::GET, "/rest/v1/teachers")
            .await
            .query(&[("select", TEACHER_COLUMNS), ("order", "name.asc")]);
        self.send_json(builder).await
    }

    async fn get_enrollment_counts(&self) -> Result<EnrollmentCounts, ApiError> {
        let builder = self
            .request(Method::POST, "/rest/v1/rpc/teacher_enrollment_counts")
            .await
            .json(&serde_json::json!({}));
        let rows: Vec<EnrollmentCountRow> = self.send_json(builder).await?;
        Ok(counts_by_teacher(rows))
    }

    async fn create_teacher(&self, payload: TeacherPayload) -> Result<Teacher, ApiError> {
        let builder = self
            .request(Method::POST, "/rest/v1/teachers")
            .await
            .query(&[("select", TEACHER_COLUMNS)])
            .header("Prefer", "return=representation")
            .json(&payload);
        let rows: Vec<Teacher> = self.send_json(builder).await?;
        single_row(rows, "The new teacher was not returned by the server")
    }

    async fn update_teacher(
        &self,
        id: &str,
        payload: TeacherPayload,
    ) -> Result<Teacher, ApiError> {
        let builder = self
            .request(Method::PATCH, "/rest/v1/teachers")
            .await
            .query(&[("id", id_filter(id).as_str()), ("select", TEACHER_COLUMNS)])
            .header("Prefer", "return=representation")
            .json(&payload);
        let rows: Vec<Teacher> = self.send_json(builder).await?;
        single_row(rows, "Teacher not found")
    }

    async fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, "/rest/v1/teachers")
            .await
            .query(&[("id", id_filter(id))]);
        self.send_empty(builder).await
    }
}
