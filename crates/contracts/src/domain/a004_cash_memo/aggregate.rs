use crate::domain::a002_schedule::TestType;
use crate::shared::date_bucket::CreationInstant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Payment mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cash,
    #[serde(alias = "bKash", alias = "bkash")]
    Bkash,
    #[serde(alias = "nagad")]
    Nagad,
    #[serde(rename = "Bank", alias = "bank", alias = "Bank Transfer")]
    Bank,
    #[serde(alias = "card")]
    Card,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 5] = [
        PaymentMode::Cash,
        PaymentMode::Bkash,
        PaymentMode::Nagad,
        PaymentMode::Bank,
        PaymentMode::Card,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Bkash => "Bkash",
            PaymentMode::Nagad => "Nagad",
            PaymentMode::Bank => "Bank",
            PaymentMode::Card => "Card",
        }
    }

    pub fn from_select(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }

    /// Every mode except cash leaves a transaction reference.
    pub fn needs_reference(self) -> bool {
        !matches!(self, PaymentMode::Cash)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMemo {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(alias = "memoNumber")]
    pub memo_no: String,
    #[serde(default)]
    pub date: String,
    pub candidate_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "contactNumber")]
    pub contact_no: String,
    #[serde(default)]
    pub passport_number: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub test_type: Option<TestType>,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl CreationInstant for CashMemo {
    fn created_at_raw(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn object_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMemoNumber {
    #[serde(alias = "memoNumber", alias = "nextMemoNo")]
    pub memo_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashMemoDto {
    pub memo_no: String,
    pub date: String,
    pub candidate_name: String,
    pub email: String,
    pub contact_no: String,
    pub passport_number: String,
    pub course_name: String,
    pub test_type: TestType,
    pub amount: u64,
    pub payment_mode: PaymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub remarks: String,
}

// ============================================================================
// Multi-step draft
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftStep {
    #[default]
    Candidate,
    Payment,
    Review,
}

impl DraftStep {
    pub const ALL: [DraftStep; 3] = [DraftStep::Candidate, DraftStep::Payment, DraftStep::Review];

    pub fn title(self) -> &'static str {
        match self {
            DraftStep::Candidate => "Candidate",
            DraftStep::Payment => "Payment",
            DraftStep::Review => "Review",
        }
    }

    pub fn number(self) -> usize {
        match self {
            DraftStep::Candidate => 1,
            DraftStep::Payment => 2,
            DraftStep::Review => 3,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            DraftStep::Candidate => Some(DraftStep::Payment),
            DraftStep::Payment => Some(DraftStep::Review),
            DraftStep::Review => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            DraftStep::Candidate => None,
            DraftStep::Payment => Some(DraftStep::Candidate),
            DraftStep::Review => Some(DraftStep::Payment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CashMemoError {
    #[error("Candidate name is required")]
    MissingName,
    #[error("Contact number is required")]
    MissingContact,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("Course is required")]
    MissingCourse,
    #[error("Date is required")]
    MissingDate,
    #[error("Amount must be a whole number greater than zero")]
    InvalidAmount,
    #[error("{0} payments need a transaction reference")]
    MissingReference(&'static str),
}

/// Form state of the cash memo wizard. Inputs are kept as typed text and only
/// parsed when a step is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashMemoDraft {
    pub candidate_name: String,
    pub email: String,
    pub contact_no: String,
    pub passport_number: String,
    pub course_name: String,
    pub test_type: TestType,
    pub date: String,
    pub amount: String,
    pub payment_mode: PaymentMode,
    pub transaction_id: String,
    pub remarks: String,
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl CashMemoDraft {
    pub fn parsed_amount(&self) -> Option<u64> {
        self.amount
            .trim()
            .replace(',', "")
            .parse::<u64>()
            .ok()
            .filter(|a| *a > 0)
    }

    pub fn validate_step(&self, step: DraftStep) -> Result<(), CashMemoError> {
        match step {
            DraftStep::Candidate => {
                if self.candidate_name.trim().is_empty() {
                    return Err(CashMemoError::MissingName);
                }
                if self.contact_no.trim().is_empty() {
                    return Err(CashMemoError::MissingContact);
                }
                let email = self.email.trim();
                if !email.is_empty() && !looks_like_email(email) {
                    return Err(CashMemoError::InvalidEmail(email.to_string()));
                }
                Ok(())
            }
            DraftStep::Payment => {
                if self.course_name.trim().is_empty() {
                    return Err(CashMemoError::MissingCourse);
                }
                if self.date.trim().is_empty() {
                    return Err(CashMemoError::MissingDate);
                }
                if self.parsed_amount().is_none() {
                    return Err(CashMemoError::InvalidAmount);
                }
                if self.payment_mode.needs_reference() && self.transaction_id.trim().is_empty() {
                    return Err(CashMemoError::MissingReference(self.payment_mode.as_str()));
                }
                Ok(())
            }
            DraftStep::Review => {
                self.validate_step(DraftStep::Candidate)?;
                self.validate_step(DraftStep::Payment)
            }
        }
    }

    pub fn into_dto(self, memo_no: impl Into<String>) -> Result<CreateCashMemoDto, CashMemoError> {
        self.validate_step(DraftStep::Review)?;
        let amount = self.parsed_amount().ok_or(CashMemoError::InvalidAmount)?;
        let transaction_id = Some(self.transaction_id.trim().to_string())
            .filter(|t| !t.is_empty() && self.payment_mode.needs_reference());
        Ok(CreateCashMemoDto {
            memo_no: memo_no.into(),
            date: self.date.trim().to_string(),
            candidate_name: self.candidate_name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact_no: self.contact_no.trim().to_string(),
            passport_number: self.passport_number.trim().to_string(),
            course_name: self.course_name.trim().to_string(),
            test_type: self.test_type,
            amount,
            payment_mode: self.payment_mode,
            transaction_id,
            remarks: self.remarks.trim().to_string(),
        })
    }
}

// ============================================================================
// Amount in words
// ============================================================================

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "Quintillion"),
    (1_000_000_000_000_000, "Quadrillion"),
    (1_000_000_000_000, "Trillion"),
    (1_000_000_000, "Billion"),
    (1_000_000, "Million"),
    (1_000, "Thousand"),
];

fn below_thousand(n: u64, out: &mut Vec<&'static str>) {
    let hundreds = n / 100;
    let rest = n % 100;
    if hundreds > 0 {
        out.push(ONES[hundreds as usize]);
        out.push("Hundred");
    }
    if rest >= 20 {
        out.push(TENS[(rest / 10) as usize]);
        if rest % 10 > 0 {
            out.push(ONES[(rest % 10) as usize]);
        }
    } else if rest > 0 {
        out.push(ONES[rest as usize]);
    }
}

/// Spells a whole amount in English words, e.g. `12500` →
/// `"Twelve Thousand Five Hundred"`.
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return ONES[0].to_string();
    }
    let mut words = Vec::new();
    let mut rest = amount;
    for (scale, name) in SCALES {
        let chunk = rest / scale;
        if chunk > 0 {
            below_thousand(chunk, &mut words);
            words.push(name);
            rest %= scale;
        }
    }
    below_thousand(rest, &mut words);
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CashMemoDraft {
        CashMemoDraft {
            candidate_name: "Nusrat Jahan".into(),
            email: "nusrat@example.com".into(),
            contact_no: "01711000000".into(),
            passport_number: "A1234567".into(),
            course_name: "IELTS".into(),
            test_type: TestType::ComputerBased,
            date: "2025-05-04".into(),
            amount: "12,500".into(),
            payment_mode: PaymentMode::Bkash,
            transaction_id: " TX99 ".into(),
            remarks: "".into(),
        }
    }

    #[test]
    fn words_for_common_amounts() {
        assert_eq!(amount_in_words(0), "Zero");
        assert_eq!(amount_in_words(7), "Seven");
        assert_eq!(amount_in_words(40), "Forty");
        assert_eq!(amount_in_words(115), "One Hundred Fifteen");
        assert_eq!(amount_in_words(12_500), "Twelve Thousand Five Hundred");
        assert_eq!(amount_in_words(1_000_001), "One Million One");
        assert_eq!(
            amount_in_words(u64::MAX),
            "Eighteen Quintillion Four Hundred Forty Six Quadrillion Seven Hundred Forty Four \
             Trillion Seventy Three Billion Seven Hundred Nine Million Five Hundred Fifty One \
             Thousand Six Hundred Fifteen"
        );
    }

    #[test]
    fn steps_are_validated_in_isolation() {
        let mut draft = CashMemoDraft::default();
        assert_eq!(draft.validate_step(DraftStep::Candidate), Err(CashMemoError::MissingName));
        draft.candidate_name = "A".into();
        draft.contact_no = "017".into();
        draft.email = "not-an-email".into();
        assert!(matches!(
            draft.validate_step(DraftStep::Candidate),
            Err(CashMemoError::InvalidEmail(_))
        ));
        draft.email.clear();
        assert_eq!(draft.validate_step(DraftStep::Candidate), Ok(()));
        assert_eq!(draft.validate_step(DraftStep::Payment), Err(CashMemoError::MissingCourse));
    }

    #[test]
    fn payment_step_checks_amount_and_reference() {
        let mut draft = filled();
        draft.amount = "-5".into();
        assert_eq!(draft.validate_step(DraftStep::Payment), Err(CashMemoError::InvalidAmount));
        draft.amount = "0".into();
        assert_eq!(draft.validate_step(DraftStep::Payment), Err(CashMemoError::InvalidAmount));

        let mut draft = filled();
        draft.transaction_id = "  ".into();
        assert_eq!(
            draft.validate_step(DraftStep::Payment),
            Err(CashMemoError::MissingReference("Bkash"))
        );
        draft.payment_mode = PaymentMode::Cash;
        assert_eq!(draft.validate_step(DraftStep::Payment), Ok(()));
    }

    #[test]
    fn into_dto_trims_and_parses() {
        let dto = filled().into_dto("CM-0042").unwrap();
        assert_eq!(dto.memo_no, "CM-0042");
        assert_eq!(dto.amount, 12_500);
        assert_eq!(dto.transaction_id.as_deref(), Some("TX99"));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["paymentMode"], "Bkash");
        assert_eq!(json["testType"], "Computer-Based");
        assert_eq!(json["memoNo"], "CM-0042");
    }

    #[test]
    fn cash_drops_reference() {
        let mut draft = filled();
        draft.payment_mode = PaymentMode::Cash;
        let dto = draft.into_dto("1").unwrap();
        assert_eq!(dto.transaction_id, None);
    }

    #[test]
    fn step_navigation() {
        assert_eq!(DraftStep::Candidate.next(), Some(DraftStep::Payment));
        assert_eq!(DraftStep::Review.next(), None);
        assert_eq!(DraftStep::Candidate.prev(), None);
        assert_eq!(DraftStep::Review.number(), 3);
    }

    #[test]
    fn reads_memo_and_next_number() {
        let memo: CashMemo = serde_json::from_str(
            r#"{"_id": "m1", "memoNumber": "CM-7", "candidateName": "X", "amount": 900, "paymentMode": "bKash"}"#,
        )
        .unwrap();
        assert_eq!(memo.memo_no, "CM-7");
        assert_eq!(memo.payment_mode, PaymentMode::Bkash);

        let next: NextMemoNumber = serde_json::from_str(r#"{"memoNo": "CM-8"}"#).unwrap();
        assert_eq!(next.memo_no, "CM-8");
        assert_eq!(PaymentMode::from_select("nagad"), PaymentMode::Nagad);
    }
}
