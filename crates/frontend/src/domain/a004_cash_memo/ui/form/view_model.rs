use contracts::domain::a004_cash_memo::{CashMemo, CashMemoDraft, DraftStep};
use leptos::prelude::*;

use crate::domain::a004_cash_memo::api::{create_cash_memo, fetch_next_number};
use crate::shared::date_utils::business_today;
use crate::shared::notify::NotificationService;

#[derive(Clone, Copy)]
pub struct CashMemoFormViewModel {
    pub draft: RwSignal<CashMemoDraft>,
    pub step: RwSignal<DraftStep>,
    /// Number reserved for this memo; `None` until the server answers
    pub memo_no: RwSignal<Option<String>>,
    pub created: RwSignal<Option<CashMemo>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

fn fresh_draft() -> CashMemoDraft {
    CashMemoDraft {
        date: business_today().format("%Y-%m-%d").to_string(),
        ..CashMemoDraft::default()
    }
}

impl CashMemoFormViewModel {
    pub fn new() -> Self {
        Self {
            draft: RwSignal::new(fresh_draft()),
            step: RwSignal::new(DraftStep::default()),
            memo_no: RwSignal::new(None),
            created: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn load_next_number(&self, notify: NotificationService) {
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_next_number().await {
                Ok(no) => this.memo_no.set(Some(no)),
                Err(e) => {
                    notify.failed("reserve a memo number", &e);
                    this.error
                        .set(Some(format!("Could not reserve a memo number: {}", e)));
                }
            }
        });
    }

    /// Moves forward only when the current step is valid.
    pub fn next_step(&self) {
        let step = self.step.get_untracked();
        match self.draft.with_untracked(|d| d.validate_step(step)) {
            Ok(()) => {
                self.error.set(None);
                if let Some(next) = step.next() {
                    self.step.set(next);
                }
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
    }

    pub fn prev_step(&self) {
        self.error.set(None);
        if let Some(prev) = self.step.get_untracked().prev() {
            self.step.set(prev);
        }
    }

    pub fn submit(&self, notify: NotificationService) {
        let Some(memo_no) = self.memo_no.get_untracked() else {
            self.error.set(Some("Memo number is not available yet".to_string()));
            return;
        };
        let dto = match self.draft.get_untracked().into_dto(memo_no) {
            Ok(dto) => dto,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match create_cash_memo(&dto).await {
                Ok(memo) => {
                    notify.success(format!("Cash memo {} saved", memo.memo_no));
                    this.created.set(Some(memo));
                }
                Err(e) => {
                    notify.failed("save the cash memo", &e);
                    this.error.set(Some(format!("Save failed: {}", e)));
                }
            }
            this.saving.set(false);
        });
    }

    /// Starts a new memo with a freshly reserved number.
    pub fn reset(&self, notify: NotificationService) {
        self.draft.set(fresh_draft());
        self.step.set(DraftStep::default());
        self.created.set(None);
        self.error.set(None);
        self.memo_no.set(None);
        self.load_next_number(notify);
    }
}

impl Default for CashMemoFormViewModel {
    fn default() -> Self {
        Self::new()
    }
}
