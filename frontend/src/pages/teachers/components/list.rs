use crate::{
    api::TeacherWithCount,
    components::{
        common::{Button, ButtonVariant},
        layout::LoadingSpinner,
    },
    pages::teachers::roster::{SortField, SortState},
};
use leptos::*;

#[component]
fn SortHeader(
    field: SortField,
    sort: RwSignal<SortState>,
    on_sort: Callback<SortField>,
) -> impl IntoView {
    view! {
        <th
            scope="col"
            class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider"
            aria-sort=move || sort.get().aria_sort(field)
        >
            <button
                type="button"
                class="inline-flex items-center gap-1 uppercase hover:text-fg"
                on:click=move |_| on_sort.call(field)
            >
                {field.label()}
                <span aria-hidden="true">{move || sort.get().indicator(field)}</span>
            </button>
        </th>
    }
}

#[component]
pub fn TeacherList(
    rows: Memo<Vec<TeacherWithCount>>,
    sort: RwSignal<SortState>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] has_loaded: Signal<bool>,
    #[prop(into)] filtering: Signal<bool>,
    on_sort: Callback<SortField>,
    on_edit: Callback<TeacherWithCount>,
    on_delete: Callback<TeacherWithCount>,
) -> impl IntoView {
    let is_empty = move || rows.with(Vec::is_empty);

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <Show when=move || loading.get() && !has_loaded.get()>
                <LoadingSpinner />
            </Show>
            <Show when=move || has_loaded.get() && is_empty()>
                <p class="text-sm text-fg-muted text-center py-8">
                    {move || if filtering.get() {
                        "No teachers match your search."
                    } else {
                        "No teachers yet. Add the first one to get started."
                    }}
                </p>
            </Show>
            <Show when=move || !is_empty()>
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-border">
                        <thead>
                            <tr>
                                {SortField::ALL
                                    .into_iter()
                                    .map(|field| view! { <SortHeader field=field sort=sort on_sort=on_sort /> })
                                    .collect_view()}
                                <th scope="col" class="px-6 py-3"><span class="sr-only">{"Actions"}</span></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            <For
                                each=move || rows.get()
                                key=|row| row.clone()
                                children=move |row: TeacherWithCount| {
                                    let for_edit = row.clone();
                                    let for_delete = row.clone();
                                    view! {
                                        <tr class="hover:bg-action-ghost-bg-hover">
                                            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg">{row.teacher.name.clone()}</td>
                                            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg">{row.teacher.email.clone()}</td>
                                            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg">
                                                {row.teacher.phone.clone().unwrap_or_else(|| "—".to_string())}
                                            </td>
                                            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg">{row.enrolled_count}</td>
                                            <td class="px-6 py-4 whitespace-nowrap text-right space-x-2">
                                                <Button
                                                    variant=ButtonVariant::Ghost
                                                    on_click=move |_| on_edit.call(for_edit.clone())
                                                >
                                                    {"Edit"}
                                                </Button>
                                                <Button
                                                    variant=ButtonVariant::Danger
                                                    on_click=move |_| on_delete.call(for_delete.clone())
                                                >
                                                    {"Delete"}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
