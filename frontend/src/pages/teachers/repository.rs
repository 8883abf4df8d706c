use super::roster::merge_roster;
use crate::{
    api::{ApiClient, ApiError, Teacher, TeacherPayload, TeacherService, TeacherWithCount},
    utils::timer::{with_timeout, REQUEST_TIMEOUT},
};
use std::rc::Rc;

#[derive(Clone)]
pub struct TeachersRepository {
    service: Rc<dyn TeacherService>,
}

impl Default for TeachersRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TeachersRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { service: client }
    }

    pub fn new_with_service(service: Rc<dyn TeacherService>) -> Self {
        Self { service }
    }

    /// Teachers plus one batched enrollment-count lookup, merged into rows.
    pub async fn load_roster(&self) -> Result<Vec<TeacherWithCount>, ApiError> {
        with_timeout(REQUEST_TIMEOUT, async {
            let teachers = self.service.list_teachers().await?;
            let counts = self.service.get_enrollment_counts().await?;
            log::debug!(
                "Loaded {} teachers with {} enrollment counts",
                teachers.len(),
                counts.len()
            );
            Ok(merge_roster(teachers, &counts))
        })
        .await
    }

    pub async fn create_teacher(&self, payload: TeacherPayload) -> Result<Teacher, ApiError> {
        with_timeout(REQUEST_TIMEOUT, self.service.create_teacher(payload)).await
    }

    pub async fn update_teacher(
        &self,
        id: &str,
        payload: TeacherPayload,
    ) -> Result<Teacher, ApiError> {
        with_timeout(REQUEST_TIMEOUT, self.service.update_teacher(id, payload)).await
    }

    pub async fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
        with_timeout(REQUEST_TIMEOUT, self.service.delete_teacher(id)).await
    }
}
