use contracts::domain::a004_cash_memo::{CashMemo, CreateCashMemoDto, NextMemoNumber};
use contracts::shared::api::ApiError;
use gloo_net::http::Method;

use crate::shared::api_utils::{api_url, get_data, path_segment, send_json};

pub async fn fetch_next_number() -> Result<String, ApiError> {
    Ok(get_data::<NextMemoNumber>("/api/cash-memos/next-number")
        .await?
        .memo_no)
}

pub async fn create_cash_memo(dto: &CreateCashMemoDto) -> Result<CashMemo, ApiError> {
    send_json::<_, CashMemo>(Method::POST, "/api/cash-memos", dto)
        .await?
        .into_data()
}

pub async fn fetch_cash_memo(memo_no: &str) -> Result<CashMemo, ApiError> {
    get_data::<CashMemo>(&memo_path(memo_no)).await
}

fn memo_path(memo_no: &str) -> String {
    format!("/api/cash-memos/{}", path_segment(memo_no))
}

fn pdf_path(memo_no: &str) -> String {
    format!("{}/pdf", memo_path(memo_no))
}

/// Absolute PDF address, opened in a new browser tab.
pub fn pdf_url(memo_no: &str) -> String {
    api_url(&pdf_path(memo_no))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_path_escapes_memo_number() {
        assert_eq!(pdf_path("CM-0042"), "/api/cash-memos/CM-0042/pdf");
        assert_eq!(pdf_path("2025/17"), "/api/cash-memos/2025%2F17/pdf");
        assert_eq!(memo_path(" CM-7 "), "/api/cash-memos/CM-7");
    }
}
