use contracts::domain::a004_cash_memo::{amount_in_words, CashMemo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_cash_memo::api::{fetch_cash_memo, pdf_url};
use crate::shared::cancel::RequestSeq;
use crate::shared::components::stat_card::format_thousands;
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn memo_card(memo: CashMemo) -> impl IntoView {
    let rows = [
        ("Memo no.", memo.memo_no.clone()),
        ("Date", format_date(&memo.date)),
        ("Candidate", memo.candidate_name.clone()),
        ("Contact", memo.contact_no.clone()),
        ("Email", memo.email.clone()),
        ("Passport", memo.passport_number.clone()),
        ("Course", memo.course_name.clone()),
        ("Test type", memo.test_type.map(|t| t.as_str().to_string()).unwrap_or_default()),
        ("Amount", format!("{} BDT", format_thousands(memo.amount))),
        ("In words", format!("{} Taka Only", amount_in_words(memo.amount))),
        ("Payment", memo.payment_mode.as_str().to_string()),
        ("Reference", memo.transaction_id.clone().unwrap_or_default()),
        ("Remarks", memo.remarks.clone()),
        ("Issued", memo.created_at.as_deref().map(format_datetime).unwrap_or_default()),
    ];
    let href = pdf_url(&memo.memo_no);
    view! {
        <div class="card">
            <div class="card__body detail-grid">
                {rows.into_iter().map(|(label, value)| view! {
                    <div class="detail-field">
                        <span class="detail-field__label">{label}</span>
                        <span class="detail-field__value">{if value.is_empty() { "-".to_string() } else { value }}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
        <a class="button button--primary" href=href target="_blank" rel="noopener">
            {icon("download")}
            " Open PDF"
        </a>
    }
}

/// Finds an issued cash memo by its number.
#[component]
pub fn CashMemoLookup() -> impl IntoView {
    let notify = use_notify();
    let memo_no = RwSignal::new(String::new());
    let (result, set_result) = signal::<Option<CashMemo>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (searching, set_searching) = signal(false);
    // Only the latest lookup may write its answer
    let seq = RequestSeq::new();

    let search = move || {
        let wanted = memo_no.get_untracked().trim().to_string();
        if wanted.is_empty() {
            set_error.set(Some("Enter a memo number".to_string()));
            return;
        }
        let ticket = seq.next();
        let seq = seq.clone();
        set_searching.set(true);
        set_error.set(None);
        spawn_local(async move {
            let outcome = fetch_cash_memo(&wanted).await;
            if !seq.is_current(ticket) {
                return;
            }
            match outcome {
                Ok(memo) => set_result.set(Some(memo)),
                Err(e) => {
                    set_result.set(None);
                    notify.failed(&format!("find memo {}", wanted), &e);
                    set_error.set(Some(format!("Memo {} not found: {}", wanted, e)));
                }
            }
            set_searching.set(false);
        });
    };

    view! {
        <PageFrame page_id="a004_cash_memo--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Find cash memo"</h1>
                </div>
            </div>

            <div class="page__content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Memo number:"</Label>
                        <Input value=memo_no placeholder="e.g. CM-0042" />
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click={
                            let search = search.clone();
                            move |_| search()
                        }
                        disabled=Signal::derive(move || searching.get())
                    >
                        {icon("search")}
                        " Find"
                    </Button>
                </Flex>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                {move || result.get().map(memo_card)}
            </div>
        </PageFrame>
    }
}
