use leptos::*;

#[component]
pub fn TeachersFrame(children: Children) -> impl IntoView {
    view! {
        <div class="space-y-6 px-4 sm:px-0">
            <div>
                <h1 class="text-2xl font-bold text-fg">{"Teachers"}</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    {"Manage the teaching staff and see how many students each one has enrolled."}
                </p>
            </div>
            {children()}
        </div>
    }
}
