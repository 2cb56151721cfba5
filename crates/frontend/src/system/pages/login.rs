use contracts::system::auth::{is_valid_otp, normalize_phone};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_AUTH;
use crate::system::auth::{api, context::use_auth};

#[derive(Clone, Debug, PartialEq)]
enum Step {
    Phone,
    /// Code sent to this (normalized) number
    Code(String),
}

/// Two-step sign-in: phone number, then the texted code.
/// Once the session exists the route gate takes over and leaves this page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let (step, set_step) = signal(Step::Phone);
    let (phone, set_phone) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_message.set(None);

        match step.get_untracked() {
            Step::Phone => {
                let Some(normalized) = normalize_phone(&phone.get_untracked()) else {
                    set_error_message.set(Some("Enter a valid phone number".to_string()));
                    return;
                };
                set_is_loading.set(true);
                spawn_local(async move {
                    match api::request_otp(normalized.clone()).await {
                        Ok(()) => {
                            set_otp.set(String::new());
                            set_step.set(Step::Code(normalized));
                        }
                        Err(e) => set_error_message.set(Some(e.to_string())),
                    }
                    set_is_loading.set(false);
                });
            }
            Step::Code(number) => {
                let code = otp.get_untracked().trim().to_string();
                if !is_valid_otp(&code) {
                    set_error_message.set(Some("The code is 4 to 6 digits".to_string()));
                    return;
                }
                set_is_loading.set(true);
                spawn_local(async move {
                    match api::verify_otp(number, code).await {
                        Ok(response) => auth.sign_in(response),
                        Err(e) => set_error_message.set(Some(e.to_string())),
                    }
                    let _ = set_is_loading.try_set(false);
                });
            }
        }
    };

    let back_to_phone = move |_| {
        set_error_message.set(None);
        set_step.set(Step::Phone);
    };

    view! {
        <PageFrame page_id="auth--login" category=PAGE_CAT_AUTH>
            <div class="login-container">
                <div class="login-box">
                    <h1>"Store Admin"</h1>
                    <h2>"Sign in"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        {move || match step.get() {
                            Step::Phone => view! {
                                <div class="form-group">
                                    <label for="phone">"Phone number"</label>
                                    <input
                                        type="tel"
                                        id="phone"
                                        placeholder="+966 5X XXX XXXX"
                                        prop:value=move || phone.get()
                                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                                        required
                                        disabled=move || is_loading.get()
                                    />
                                </div>
                            }.into_any(),
                            Step::Code(number) => view! {
                                <div class="form-group">
                                    <label for="otp">"Code sent to " {number}</label>
                                    <input
                                        type="text"
                                        id="otp"
                                        inputmode="numeric"
                                        autocomplete="one-time-code"
                                        maxlength="6"
                                        prop:value=move || otp.get()
                                        on:input=move |ev| set_otp.set(event_target_value(&ev))
                                        required
                                        disabled=move || is_loading.get()
                                    />
                                </div>
                                <button type="button" class="btn-link" on:click=back_to_phone>
                                    "Use another number"
                                </button>
                            }.into_any(),
                        }}

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || match (is_loading.get(), step.get()) {
                                (true, _) => "Please wait...",
                                (false, Step::Phone) => "Send code",
                                (false, Step::Code(_)) => "Sign in",
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </PageFrame>
    }
}
