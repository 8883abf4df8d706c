use crate::{
    components::layout::ErrorMessage,
    pages::teachers::utils::{FormField, MessageState, TeacherFormState},
};
use leptos::{ev, *};

#[component]
fn FormInput(
    field: FormField,
    #[prop(into)] label: String,
    #[prop(optional, into)] input_type: Option<&'static str>,
    #[prop(optional)] required: bool,
    form: RwSignal<TeacherFormState>,
    on_input: Callback<(FormField, String)>,
) -> impl IntoView {
    let id = format!("teacher-{}", field.as_str());
    let error_id = format!("{}-error", id);
    let label_for = id.clone();
    let described_by = error_id.clone();
    let has_error = move || form.with(|f| f.errors.contains_key(&field));
    view! {
        <div>
            <label for=label_for class="block text-sm font-medium text-fg">
                {label}
                {required.then(|| view! { <span class="text-status-error-text">" *"</span> })}
            </label>
            <input
                id=id
                name=field.as_str()
                type=input_type.unwrap_or("text")
                class="mt-1 w-full border border-border rounded-md px-3 py-2 text-sm bg-surface-elevated text-fg"
                class:border-status-error-border=has_error
                aria-invalid=move || if has_error() { "true" } else { "false" }
                aria-describedby=described_by
                prop:value=move || form.with(|f| f.value(field).to_string())
                on:input=move |ev| on_input.call((field, event_target_value(&ev)))
            />
            <Show when=has_error>
                <p id=error_id.clone() class="mt-1 text-xs text-status-error-text">
                    {move || form.with(|f| f.error_for(field)).unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}

#[component]
pub fn TeacherFormModal(
    is_open: RwSignal<bool>,
    form: RwSignal<TeacherFormState>,
    messages: RwSignal<MessageState>,
    #[prop(into)] pending: Signal<bool>,
    on_input: Callback<(FormField, String)>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[61] w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="teacher-form-title"
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 id="teacher-form-title" class="text-lg font-semibold text-fg">
                        {move || form.with(|f| f.title())}
                    </h2>
                    <Show when=move || messages.with(|m| m.error.is_some())>
                        <ErrorMessage message=messages.get().error.unwrap_or_default() />
                    </Show>
                    <form class="space-y-4" on:submit=handle_submit novalidate=true>
                        <FormInput field=FormField::Name label="Name" required=true form=form on_input=on_input />
                        <FormInput
                            field=FormField::Email
                            label="Email"
                            input_type="email"
                            required=true
                            form=form
                            on_input=on_input
                        />
                        <FormInput field=FormField::Phone label="Phone" input_type="tel" form=form on_input=on_input />
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold border border-border text-fg"
                                on:click=move |_| on_cancel.call(())
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="submit"
                                class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
