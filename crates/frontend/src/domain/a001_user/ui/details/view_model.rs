use contracts::domain::a001_user::User;
use contracts::domain::a003_booking::Booking;
use leptos::prelude::*;

use crate::domain::a001_user::api::{fetch_user, fetch_user_bookings};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::notify::NotificationService;

#[derive(Clone, Copy)]
pub struct CandidateDetailsViewModel {
    pub user: RwSignal<Option<User>>,
    pub bookings: RwSignal<Vec<Booking>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

impl CandidateDetailsViewModel {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
            bookings: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    /// Loads the profile first and renames the tab after it; bookings
    /// follow. A bookings failure keeps the profile on screen.
    pub fn load(
        &self,
        id: String,
        tab_key: String,
        tabs_store: AppGlobalContext,
        notify: NotificationService,
    ) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_user(&id).await {
                Ok(user) => {
                    tabs_store.update_tab_title(
                        &tab_key,
                        &detail_tab_label("Candidate", user.display_name()),
                    );
                    this.user.set(Some(user));
                }
                Err(e) => {
                    notify.failed("load the candidate", &e);
                    this.error.set(Some(format!("Failed to load candidate: {}", e)));
                    this.loading.set(false);
                    return;
                }
            }

            match fetch_user_bookings(&id).await {
                Ok(bookings) => this.bookings.set(bookings),
                Err(e) => {
                    notify.failed("load bookings", &e);
                    this.error.set(Some(format!("Failed to load bookings: {}", e)));
                }
            }
            this.loading.set(false);
        });
    }
}

impl Default for CandidateDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
