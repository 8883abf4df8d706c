use super::{
    repository::TeachersRepository,
    roster::{visible_roster, RosterStore, SortField, SortState},
    utils::{FormField, MessageState, TeacherFormState},
};
use crate::{
    api::{ApiClient, ApiError, Teacher, TeacherPayload, TeacherWithCount},
    utils::debounce::{use_debounced, SEARCH_DEBOUNCE},
};
use leptos::*;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub id: Option<String>,
    pub payload: TeacherPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub teacher: Teacher,
    pub created: bool,
}

#[derive(Clone, Copy)]
pub struct TeachersViewModel {
    pub store: RwSignal<RosterStore>,
    pub search: RwSignal<String>,
    pub debounced_search: ReadSignal<String>,
    pub sort: RwSignal<SortState>,
    pub rows: Memo<Vec<TeacherWithCount>>,
    pub form: RwSignal<TeacherFormState>,
    pub form_open: RwSignal<bool>,
    pub pending_delete: RwSignal<Option<TeacherWithCount>>,
    pub messages: RwSignal<MessageState>,
    pub save_action: Action<SaveRequest, Result<SaveOutcome, ApiError>>,
    pub delete_action: Action<TeacherWithCount, Result<TeacherWithCount, ApiError>>,
    repository: StoredValue<TeachersRepository>,
}

pub fn use_teachers_view_model() -> TeachersViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = TeachersViewModel::new(TeachersRepository::new_with_client(Rc::new(api)));

    // Initial load and refresh-on-focus run in the browser only.
    create_effect(move |_| {
        vm.reload();
        let focus = window_event_listener(ev::focus, move |_| vm.refresh_on_focus());
        on_cleanup(move || focus.remove());
    });

    create_effect(move |_| {
        if let Some(result) = vm.save_action.value().get() {
            vm.apply_save_result(result);
        }
    });

    create_effect(move |_| {
        if let Some(result) = vm.delete_action.value().get() {
            vm.apply_delete_result(result);
        }
    });

    vm
}

impl TeachersViewModel {
    pub fn new(repository: TeachersRepository) -> Self {
        let store = create_rw_signal(RosterStore::default());
        let search = create_rw_signal(String::new());
        let debounced_search = use_debounced(search.into(), SEARCH_DEBOUNCE);
        let sort = create_rw_signal(SortState::default());
        let rows = create_memo(move |_| {
            let query = debounced_search.get();
            let sort = sort.get();
            store.with(|s| visible_roster(&s.snapshot, &query, sort))
        });

        let repo_for_save = repository.clone();
        let save_action = create_action(move |request: &SaveRequest| {
            let repo = repo_for_save.clone();
            let request = request.clone();
            async move {
                let created = request.id.is_none();
                let teacher = match request.id {
                    Some(id) => repo.update_teacher(&id, request.payload).await?,
                    None => repo.create_teacher(request.payload).await?,
                };
                Ok::<_, ApiError>(SaveOutcome { teacher, created })
            }
        });

        let repo_for_delete = repository.clone();
        let delete_action = create_action(move |target: &TeacherWithCount| {
            let repo = repo_for_delete.clone();
            let target = target.clone();
            async move {
                repo.delete_teacher(target.id()).await?;
                Ok::<_, ApiError>(target)
            }
        });

        Self {
            store,
            search,
            debounced_search,
            sort,
            rows,
            form: create_rw_signal(TeacherFormState::default()),
            form_open: create_rw_signal(false),
            pending_delete: create_rw_signal(None),
            messages: create_rw_signal(MessageState::default()),
            save_action,
            delete_action,
            repository: store_value(repository),
        }
    }

    /// Starts a roster fetch. A fetch started later supersedes this one.
    pub fn reload(&self) {
        let Some(ticket) = self.store.try_update(RosterStore::begin_load) else {
            return;
        };
        let repo = self.repository.get_value();
        let store = self.store;
        spawn_local(async move {
            let result = repo.load_roster().await;
            if let Err(err) = &result {
                log::error!("Failed to load teachers: {} ({})", err, err.code);
            }
            store.update(|s| {
                s.commit(ticket, result);
            });
        });
    }

    pub fn refresh_on_focus(&self) {
        if !self.store.with_untracked(RosterStore::is_loading) {
            log::debug!("Window focused, refreshing teachers");
            self.reload();
        }
    }

    pub fn dismiss_load_error(&self) {
        self.store.update(RosterStore::dismiss_error);
    }

    pub fn toggle_sort(&self, field: SortField) {
        self.sort.update(|sort| *sort = sort.toggle(field));
    }

    pub fn open_create(&self) {
        self.form.set(TeacherFormState::default());
        self.messages.update(MessageState::clear);
        self.form_open.set(true);
    }

    pub fn open_edit(&self, row: &TeacherWithCount) {
        self.form.set(TeacherFormState::for_edit(&row.teacher));
        self.messages.update(MessageState::clear);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.form.update(TeacherFormState::reset);
    }

    pub fn set_field(&self, field: FormField, value: String) {
        self.form.update(|form| form.set_field(field, value));
    }

    /// Validates locally and dispatches the save. Returns `false` when nothing
    /// was sent.
    pub fn submit_form(&self) -> bool {
        if self.save_action.pending().get_untracked() {
            return false;
        }
        let form = self.form.get_untracked();
        match form.validate() {
            Ok(payload) => {
                self.save_action.dispatch(SaveRequest {
                    id: form.editing_id,
                    payload,
                });
                true
            }
            Err(errors) => {
                self.form.update(|form| form.errors = errors);
                false
            }
        }
    }

    pub fn request_delete(&self, row: TeacherWithCount) {
        self.messages.update(MessageState::clear);
        self.pending_delete.set(Some(row));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if self.delete_action.pending().get_untracked() {
            return;
        }
        if let Some(target) = self.pending_delete.get_untracked() {
            self.delete_action.dispatch(target);
        }
    }

    /// Success closes the form and reloads; failure keeps the form as typed.
    pub fn apply_save_result(&self, result: Result<SaveOutcome, ApiError>) {
        match result {
            Ok(outcome) => {
                let verb = if outcome.created { "added" } else { "updated" };
                self.messages.update(|m| {
                    m.set_success(format!("Teacher '{}' {}.", outcome.teacher.name, verb))
                });
                self.close_form();
                self.reload();
            }
            Err(err) => {
                log::warn!("Saving teacher failed: {}", err);
                self.messages.update(|m| m.set_error(err.error));
            }
        }
    }

    pub fn apply_delete_result(&self, result: Result<TeacherWithCount, ApiError>) {
        self.pending_delete.set(None);
        match result {
            Ok(removed) => {
                self.messages.update(|m| {
                    m.set_success(format!("Teacher '{}' deleted.", removed.teacher.name))
                });
                self.reload();
            }
            Err(err) => {
                log::warn!("Deleting teacher failed: {}", err);
                self.messages.update(|m| m.set_error(err.error));
            }
        }
    }
}
