use contracts::domain::a002_schedule::{TestType, COURSES};
use contracts::domain::a004_cash_memo::{amount_in_words, CashMemo, CashMemoDraft, DraftStep, PaymentMode};
use leptos::prelude::*;
use thaw::*;

use super::view_model::CashMemoFormViewModel;
use crate::domain::a004_cash_memo::api::pdf_url;
use crate::shared::components::stat_card::format_thousands;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notify::{use_notify, NotificationService};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;

type Getter = fn(&CashMemoDraft) -> String;
type Setter = fn(&mut CashMemoDraft, String);

fn draft_input(
    vm: CashMemoFormViewModel,
    label: &'static str,
    input_type: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                type=input_type
                class="form-field__input"
                prop:value=move || vm.draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    vm.draft.update(|d| set(d, value));
                }
            />
        </label>
    }
}

fn candidate_step(vm: CashMemoFormViewModel) -> impl IntoView {
    view! {
        <div class="form-grid">
            {draft_input(vm, "Candidate name", "text", |d| d.candidate_name.clone(), |d, v| d.candidate_name = v)}
            {draft_input(vm, "Contact number", "tel", |d| d.contact_no.clone(), |d, v| d.contact_no = v)}
            {draft_input(vm, "Email", "email", |d| d.email.clone(), |d, v| d.email = v)}
            {draft_input(vm, "Passport number", "text", |d| d.passport_number.clone(), |d, v| d.passport_number = v)}
        </div>
    }
}

fn payment_step(vm: CashMemoFormViewModel) -> impl IntoView {
    let needs_reference = move || vm.draft.with(|d| d.payment_mode.needs_reference());
    view! {
        <div class="form-grid">
            <label class="form-field">
                <span class="form-field__label">"Course"</span>
                <select
                    class="form-field__select"
                    prop:value=move || vm.draft.with(|d| d.course_name.clone())
                    on:change=move |ev| vm.draft.update(|d| d.course_name = event_target_value(&ev))
                >
                    <option value="">"Select..."</option>
                    {COURSES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                </select>
            </label>
            <label class="form-field">
                <span class="form-field__label">"Test type"</span>
                <select
                    class="form-field__select"
                    prop:value=move || vm.draft.with(|d| d.test_type.as_str().to_string())
                    on:change=move |ev| vm.draft.update(|d| d.test_type = TestType::from(event_target_value(&ev)))
                >
                    {TestType::ALL.iter().map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> }).collect_view()}
                </select>
            </label>
            {draft_input(vm, "Date", "date", |d| d.date.clone(), |d, v| d.date = v)}
            {draft_input(vm, "Amount (BDT)", "text", |d| d.amount.clone(), |d, v| d.amount = v)}
            <label class="form-field">
                <span class="form-field__label">"Payment mode"</span>
                <select
                    class="form-field__select"
                    prop:value=move || vm.draft.with(|d| d.payment_mode.as_str().to_string())
                    on:change=move |ev| {
                        let mode = PaymentMode::from_select(&event_target_value(&ev));
                        vm.draft.update(|d| d.payment_mode = mode);
                    }
                >
                    {PaymentMode::ALL.iter().map(|m| view! { <option value=m.as_str()>{m.as_str()}</option> }).collect_view()}
                </select>
            </label>
            <Show when=needs_reference>
                {draft_input(vm, "Transaction reference", "text", |d| d.transaction_id.clone(), |d, v| d.transaction_id = v)}
            </Show>
            {draft_input(vm, "Remarks", "text", |d| d.remarks.clone(), |d, v| d.remarks = v)}
        </div>
    }
}

fn review_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-field">
            <span class="detail-field__label">{label}</span>
            <span class="detail-field__value">{if value.trim().is_empty() { "-".to_string() } else { value }}</span>
        </div>
    }
}

fn review_step(vm: CashMemoFormViewModel) -> impl IntoView {
    move || {
        let d = vm.draft.get();
        let amount = d.parsed_amount().unwrap_or(0);
        let reference = if d.payment_mode.needs_reference() { d.transaction_id.clone() } else { String::new() };
        view! {
            <div class="card">
                <div class="card__body detail-grid">
                    {review_row("Memo no.", vm.memo_no.get().unwrap_or_default())}
                    {review_row("Candidate", d.candidate_name.clone())}
                    {review_row("Contact", d.contact_no.clone())}
                    {review_row("Email", d.email.clone())}
                    {review_row("Passport", d.passport_number.clone())}
                    {review_row("Course", format!("{} ({})", d.course_name, d.test_type.as_str()))}
                    {review_row("Date", format_date(&d.date))}
                    {review_row("Amount", format!("{} BDT", format_thousands(amount)))}
                    {review_row("In words", format!("{} Taka Only", amount_in_words(amount)))}
                    {review_row("Payment", d.payment_mode.as_str().to_string())}
                    {review_row("Reference", reference)}
                    {review_row("Remarks", d.remarks.clone())}
                </div>
            </div>
        }
    }
}

fn success_panel(memo: CashMemo, vm: CashMemoFormViewModel, notify: NotificationService) -> impl IntoView {
    let href = pdf_url(&memo.memo_no);
    view! {
        <div class="alert alert--success">
            {format!("Cash memo {} for {} saved.", memo.memo_no, memo.candidate_name)}
        </div>
        <Flex gap=FlexGap::Small>
            <a class="button button--primary" href=href target="_blank" rel="noopener">
                {icon("download")}
                " Open PDF"
            </a>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset(notify)>
                {icon("plus")}
                " New memo"
            </Button>
        </Flex>
    }
}

#[component]
pub fn CashMemoForm() -> impl IntoView {
    let notify = use_notify();
    let vm = CashMemoFormViewModel::new();
    vm.load_next_number(notify);

    let step_body = move || match vm.step.get() {
        DraftStep::Candidate => candidate_step(vm).into_any(),
        DraftStep::Payment => payment_step(vm).into_any(),
        DraftStep::Review => review_step(vm).into_any(),
    };

    view! {
        <PageFrame page_id="a004_cash_memo--form" category=PAGE_CAT_FORM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Cash memo"</h1>
                    <span class="badge badge--primary">
                        {move || vm.memo_no.get().unwrap_or_else(|| "...".to_string())}
                    </span>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show
                    when=move || vm.created.with(Option::is_none)
                    fallback=move || vm.created.get().map(|memo| success_panel(memo, vm, notify))
                >
                    <ol class="stepper">
                        {DraftStep::ALL.iter().map(|&s| view! {
                            <li
                                class="stepper__item"
                                class:stepper__item--active={move || vm.step.get() == s}
                                class:stepper__item--done={move || vm.step.get().number() > s.number()}
                            >
                                <span class="stepper__number">{s.number()}</span>
                                {s.title()}
                            </li>
                        }).collect_view()}
                    </ol>

                    {step_body}

                    <Flex gap=FlexGap::Small>
                        <Show when=move || vm.step.get().prev().is_some()>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.prev_step()>
                                {icon("chevron-left")}
                                " Back"
                            </Button>
                        </Show>
                        <Show
                            when=move || vm.step.get().next().is_some()
                            fallback=move || view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| vm.submit(notify)
                                    disabled=Signal::derive(move || vm.saving.get() || vm.memo_no.with(Option::is_none))
                                >
                                    {icon("check")}
                                    {move || if vm.saving.get() { " Saving..." } else { " Save memo" }}
                                </Button>
                            }
                        >
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.next_step()>
                                " Next "
                                {icon("chevron-right")}
                            </Button>
                        </Show>
                    </Flex>
                </Show>
            </div>
        </PageFrame>
    }
}
