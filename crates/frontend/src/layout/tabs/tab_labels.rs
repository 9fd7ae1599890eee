//! Tab titles, one place for every tab key.

use super::registry::TabRoute;

/// Readable title for a tab key. Detail tabs get a generic title until the
/// page loads its record and renames the tab. Fallback: "".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match TabRoute::parse(key) {
        TabRoute::Overview => "Overview",
        TabRoute::Users => "Users",
        TabRoute::Candidates => "Candidates",
        TabRoute::ProfileRequests => "Profile requests",
        TabRoute::CandidateDetail(_) => "Candidate",
        TabRoute::MyProfile => "My profile",
        TabRoute::Schedules => "Schedules",
        TabRoute::CreateSchedule => "New schedule",
        TabRoute::Bookings => "Bookings",
        TabRoute::MyBookings => "My bookings",
        TabRoute::CashMemo => "Cash memo",
        TabRoute::CashMemoLookup => "Find cash memo",
        TabRoute::Trf => "Test report form",
        TabRoute::Unknown(_) => "",
    }
}

/// Title of a detail tab: «<entity> · <identifier>».
///
/// Example: `detail_tab_label("Candidate", "Nusrat")` -> `"Candidate · Nusrat"`
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_known_and_unknown_keys() {
        assert_eq!(tab_label_for_key("a002_schedules"), "Schedules");
        assert_eq!(tab_label_for_key("a001_candidate_detail_abc"), "Candidate");
        assert_eq!(tab_label_for_key("nope"), "");
        assert_eq!(detail_tab_label("Candidate", "Nusrat"), "Candidate · Nusrat");
    }
}
