use crate::components::common::{Button, ButtonVariant};
use leptos::*;

#[component]
pub fn RosterToolbar(
    search: RwSignal<String>,
    #[prop(into)] loading: Signal<bool>,
    on_add: Callback<()>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-3 md:flex-row md:items-center md:justify-between">
            <div class="relative w-full md:max-w-sm">
                <label for="teacher-search" class="sr-only">{"Search teachers"}</label>
                <input
                    id="teacher-search"
                    type="search"
                    class="w-full border border-border rounded-md px-3 py-2 text-sm bg-surface-elevated text-fg"
                    placeholder="Search by name, email or phone"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>
            <div class="flex gap-2">
                <Button
                    variant=ButtonVariant::Secondary
                    loading=loading
                    on_click=on_refresh
                >
                    {"Refresh"}
                </Button>
                <Button on_click=on_add>{"Add teacher"}</Button>
            </div>
        </div>
    }
}
