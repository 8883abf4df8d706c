use crate::{
    api::TeacherWithCount,
    components::common::{Button, ButtonVariant},
};
use leptos::{ev::KeyboardEvent, *};

pub fn delete_prompt(target: &TeacherWithCount) -> String {
    match target.enrolled_count {
        0 => format!("Delete {}? This cannot be undone.", target.teacher.name),
        count => format!(
            "Delete {}? They currently have {} enrolled student(s). This cannot be undone.",
            target.teacher.name, count
        ),
    }
}

/// Confirmation for removing a teacher. Open while `target` holds a row.
#[component]
pub fn DeleteTeacherDialog(
    target: RwSignal<Option<TeacherWithCount>>,
    #[prop(into)] pending: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let prompt = move || target.with(|t| t.as_ref().map(delete_prompt).unwrap_or_default());

    view! {
        <Show when=move || target.with(Option::is_some)>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="alertdialog"
                    aria-modal="true"
                    aria-labelledby="delete-teacher-title"
                    aria-describedby="delete-teacher-prompt"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" && !pending.get_untracked() {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 id="delete-teacher-title" class="text-lg font-semibold text-fg">
                        {"Delete teacher"}
                    </h2>
                    <p id="delete-teacher-prompt" class="text-sm text-fg-muted">{prompt}</p>
                    <div class="flex justify-end gap-2">
                        <Button variant=ButtonVariant::Secondary disabled=pending on_click=on_cancel>
                            {"Keep"}
                        </Button>
                        <Button variant=ButtonVariant::Danger loading=pending on_click=on_confirm>
                            {move || if pending.get() { "Deleting..." } else { "Delete" }}
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
