use crate::{
    api::TeacherWithCount,
    components::{
        error::ErrorBanner,
        layout::{ErrorMessage, Layout, SuccessMessage},
    },
};
use leptos::*;

use super::{
    components::{
        delete_dialog::DeleteTeacherDialog, form::TeacherFormModal, list::TeacherList,
        toolbar::RosterToolbar,
    },
    layout::TeachersFrame,
    roster::{RosterStore, SortField},
    utils::FormField,
    view_model::use_teachers_view_model,
};

#[component]
pub fn TeachersPage() -> impl IntoView {
    let vm = use_teachers_view_model();

    let loading = Signal::derive(move || vm.store.with(RosterStore::is_loading));
    let has_loaded = Signal::derive(move || vm.store.with(RosterStore::has_loaded));
    let load_error = Signal::derive(move || vm.store.with(RosterStore::error));
    let filtering = Signal::derive(move || !vm.debounced_search.get().trim().is_empty());
    let save_pending = vm.save_action.pending();
    let delete_pending = vm.delete_action.pending();

    let page_messages = move || !vm.form_open.get();

    view! {
        <Layout>
            <TeachersFrame>
                <ErrorBanner
                    error=load_error
                    on_retry=Callback::new(move |_| vm.reload())
                    on_dismiss=Callback::new(move |_| vm.dismiss_load_error())
                    retry_disabled=loading
                />
                <Show when=move || page_messages() && vm.messages.with(|m| m.success.is_some())>
                    <SuccessMessage message=vm.messages.get().success.unwrap_or_default() />
                </Show>
                <Show when=move || page_messages() && vm.messages.with(|m| m.error.is_some())>
                    <ErrorMessage message=vm.messages.get().error.unwrap_or_default() />
                </Show>
                <RosterToolbar
                    search=vm.search
                    loading=loading
                    on_add=Callback::new(move |_| vm.open_create())
                    on_refresh=Callback::new(move |_| vm.reload())
                />
                <TeacherList
                    rows=vm.rows
                    sort=vm.sort
                    loading=loading
                    has_loaded=has_loaded
                    filtering=filtering
                    on_sort=Callback::new(move |field: SortField| vm.toggle_sort(field))
                    on_edit=Callback::new(move |row: TeacherWithCount| vm.open_edit(&row))
                    on_delete=Callback::new(move |row: TeacherWithCount| vm.request_delete(row))
                />
            </TeachersFrame>
            <TeacherFormModal
                is_open=vm.form_open
                form=vm.form
                messages=vm.messages
                pending=save_pending
                on_input=Callback::new(move |(field, value): (FormField, String)| vm.set_field(field, value))
                on_submit=Callback::new(move |_| {
                    vm.submit_form();
                })
                on_cancel=Callback::new(move |_| vm.close_form())
            />
            <DeleteTeacherDialog
                target=vm.pending_delete
                pending=delete_pending
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </Layout>
    }
}
