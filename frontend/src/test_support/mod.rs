#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{
        ApiError, EnrollmentCounts, SessionUser, Teacher, TeacherPayload, TeacherService,
    };
    use crate::state::auth::AuthState;
    use async_trait::async_trait;
    use leptos::*;
    use std::cell::RefCell;

    pub fn signed_in_user() -> SessionUser {
        SessionUser {
            id: "u-admin".into(),
            email: Some("admin@example.com".into()),
        }
    }

    pub fn provide_auth(
        user: Option<SessionUser>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn teacher(id: &str, name: &str, email: &str, phone: Option<&str>) -> Teacher {
        Teacher {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.map(str::to_string),
        }
    }

    /// In-memory `TeacherService` that records the calls it receives.
    #[derive(Default)]
    pub struct FakeTeacherService {
        pub teachers: RefCell<Vec<Teacher>>,
        pub counts: RefCell<EnrollmentCounts>,
        pub fail_list: RefCell<Option<ApiError>>,
        pub fail_mutations: RefCell<Option<ApiError>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeTeacherService {
        pub fn with_teachers(teachers: Vec<Teacher>) -> Self {
            let service = Self::default();
            *service.teachers.borrow_mut() = teachers;
            service
        }

        pub fn call_count(&self, name: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.as_str() == name).count()
        }

        fn record(&self, name: &str) {
            self.calls.borrow_mut().push(name.to_string());
        }

        fn mutation_error(&self) -> Option<ApiError> {
            self.fail_mutations.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl TeacherService for FakeTeacherService {
        async fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
            self.record("list_teachers");
            if let Some(err) = self.fail_list.borrow().clone() {
                return Err(err);
            }
            Ok(self.teachers.borrow().clone())
        }

        async fn get_enrollment_counts(&self) -> Result<EnrollmentCounts, ApiError> {
            self.record("get_enrollment_counts");
            Ok(self.counts.borrow().clone())
        }

        async fn create_teacher(&self, payload: TeacherPayload) -> Result<Teacher, ApiError> {
            self.record("create_teacher");
            if let Some(err) = self.mutation_error() {
                return Err(err);
            }
            let id = format!("t{}", self.teachers.borrow().len() + 1);
            let created = Teacher {
                id,
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
            };
            self.teachers.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_teacher(
            &self,
            id: &str,
            payload: TeacherPayload,
        ) -> Result<Teacher, ApiError> {
            self.record("update_teacher");
            if let Some(err) = self.mutation_error() {
                return Err(err);
            }
            let mut teachers = self.teachers.borrow_mut();
            let row = teachers
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| ApiError::unknown("Teacher not found"))?;
            row.name = payload.name;
            row.email = payload.email;
            row.phone = payload.phone;
            Ok(row.clone())
        }

        async fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
            self.record("delete_teacher");
            if let Some(err) = self.mutation_error() {
                return Err(err);
            }
            self.teachers.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }
    }
}
