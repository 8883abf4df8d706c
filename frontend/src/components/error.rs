use crate::api::ApiError;
use leptos::*;
use serde_json::Value;

fn detail_lines(details: Option<&Value>) -> Vec<String> {
    match details {
        Some(Value::String(text)) if !text.trim().is_empty() => vec![text.clone()],
        Some(Value::Object(map)) => map
            .get("errors")
            .and_then(|v| v.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    let lines = detail_lines(error.get().and_then(|e| e.details).as_ref());
                    if lines.is_empty() {
                        ().into_view()
                    } else {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                            </ul>
                        }
                        .into_view()
                    }
                }}
            </div>
        </Show>
    }
}

/// Dismissible banner for failed loads, with a retry button when the failure
/// is worth retrying.
#[component]
pub fn ErrorBanner(
    error: Signal<Option<ApiError>>,
    on_retry: Callback<()>,
    on_dismiss: Callback<()>,
    #[prop(optional, into)] retry_disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4 flex items-start justify-between gap-3"
                role="alert"
            >
                <p class="text-sm">{move || error.get().map(|e| e.error).unwrap_or_default()}</p>
                <div class="flex gap-2 shrink-0">
                    <button
                        type="button"
                        class="px-3 py-1 rounded text-sm font-medium border border-status-error-border disabled:opacity-50"
                        disabled=move || retry_disabled.get()
                        on:click=move |_| on_retry.call(())
                    >
                        "Retry"
                    </button>
                    <button
                        type="button"
                        aria-label="Dismiss"
                        class="px-2 py-1 text-sm"
                        on:click=move |_| on_dismiss.call(())
                    >
                        {"✕"}
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::detail_lines;
    use serde_json::json;

    #[test]
    fn detail_lines_reads_strings_and_error_lists() {
        assert_eq!(
            detail_lines(Some(&json!("Key (email) already exists."))),
            vec!["Key (email) already exists.".to_string()]
        );
        assert_eq!(
            detail_lines(Some(&json!({ "errors": ["a", "b"] }))),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(detail_lines(Some(&json!(42))).is_empty());
        assert!(detail_lines(None).is_empty());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Validation failed".into(),
                code: "VALIDATION_ERROR".into(),
                details: Some(json!({
                    "errors": ["Name is required", "Email is invalid"]
                })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("Name is required"));
        assert!(html.contains("Email is invalid"));
    }

    #[test]
    fn error_banner_renders_message_and_retry() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::timeout("The server did not respond")));
            view! {
                <ErrorBanner
                    error={signal.into()}
                    on_retry=Callback::new(|_| {})
                    on_dismiss=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("The server did not respond"));
        assert!(html.contains("Retry"));
    }

    #[test]
    fn error_banner_hidden_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! {
                <ErrorBanner
                    error={signal.into()}
                    on_retry=Callback::new(|_| {})
                    on_dismiss=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("Retry"));
    }
}
