use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_BAND: f64 = 0.0;
pub const MAX_BAND: f64 = 9.0;

/// Band values offered by the score selects: 0.0, 0.5, ... 9.0.
pub fn band_options() -> Vec<f64> {
    (0..=18).map(|half| half as f64 / 2.0).collect()
}

/// Rounds a mean score to the band scale. Quarter values round up to the
/// next half band.
pub fn round_to_band(mean: f64) -> f64 {
    ((mean * 2.0) + 0.5).floor() / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Listening,
    Reading,
    Writing,
    Speaking,
}

impl Skill {
    pub const ALL: [Skill; 4] = [Skill::Listening, Skill::Reading, Skill::Writing, Skill::Speaking];

    pub fn label(self) -> &'static str {
        match self {
            Skill::Listening => "Listening",
            Skill::Reading => "Reading",
            Skill::Writing => "Writing",
            Skill::Speaking => "Speaking",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrfValidationError {
    #[error("Candidate is required")]
    MissingCandidate,
    #[error("Test date is required")]
    MissingTestDate,
    #[error("{skill} band {value} must be between 0 and 9 in steps of 0.5")]
    InvalidBand { skill: &'static str, value: f64 },
}

/// Test Report Form posted after a mock test has been marked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrfDto {
    #[serde(alias = "userId")]
    pub candidate_id: String,
    pub candidate_name: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    pub test_date: String,
    #[serde(default)]
    pub course_name: String,
    pub listening: f64,
    pub reading: f64,
    pub writing: f64,
    pub speaking: f64,
    #[serde(default)]
    pub overall: f64,
    #[serde(default)]
    pub remarks: String,
}

impl CreateTrfDto {
    pub fn band(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Listening => self.listening,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
            Skill::Speaking => self.speaking,
        }
    }

    pub fn set_band(&mut self, skill: Skill, value: f64) {
        match skill {
            Skill::Listening => self.listening = value,
            Skill::Reading => self.reading = value,
            Skill::Writing => self.writing = value,
            Skill::Speaking => self.speaking = value,
        }
    }

    pub fn overall_band(&self) -> f64 {
        let sum: f64 = Skill::ALL.iter().map(|s| self.band(*s)).sum();
        round_to_band(sum / Skill::ALL.len() as f64)
    }

    pub fn validate(&self) -> Result<(), TrfValidationError> {
        if self.candidate_id.trim().is_empty() && self.candidate_name.trim().is_empty() {
            return Err(TrfValidationError::MissingCandidate);
        }
        if self.test_date.trim().is_empty() {
            return Err(TrfValidationError::MissingTestDate);
        }
        for skill in Skill::ALL {
            let value = self.band(skill);
            let on_scale = (MIN_BAND..=MAX_BAND).contains(&value) && (value * 2.0).fract() == 0.0;
            if !on_scale {
                return Err(TrfValidationError::InvalidBand {
                    skill: skill.label(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Validated copy with `overall` filled in, ready to post.
    pub fn finalized(mut self) -> Result<Self, TrfValidationError> {
        self.validate()?;
        self.overall = self.overall_band();
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trf {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub overall: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(l: f64, r: f64, w: f64, s: f64) -> CreateTrfDto {
        CreateTrfDto {
            candidate_id: "u1".into(),
            candidate_name: "Tania".into(),
            test_date: "2025-05-20".into(),
            listening: l,
            reading: r,
            writing: w,
            speaking: s,
            ..Default::default()
        }
    }

    #[test]
    fn overall_rounds_to_half_bands() {
        assert_eq!(form(6.5, 6.5, 5.0, 7.0).overall_band(), 6.5); // 6.25
        assert_eq!(form(4.0, 3.5, 4.0, 4.0).overall_band(), 4.0); // 3.875
        assert_eq!(form(6.0, 6.0, 6.0, 6.5).overall_band(), 6.0); // 6.125
        assert_eq!(form(7.0, 7.0, 7.0, 8.0).overall_band(), 7.5); // 7.25
        assert_eq!(form(7.0, 7.5, 7.5, 8.0).overall_band(), 7.5); // 7.5
        assert_eq!(form(9.0, 9.0, 9.0, 9.0).overall_band(), 9.0);
    }

    #[test]
    fn rejects_off_scale_bands() {
        assert_eq!(form(6.5, 6.5, 5.0, 7.0).validate(), Ok(()));
        assert!(matches!(
            form(6.25, 6.5, 5.0, 7.0).validate(),
            Err(TrfValidationError::InvalidBand { skill: "Listening", .. })
        ));
        assert!(matches!(
            form(6.0, 6.0, 6.0, 9.5).validate(),
            Err(TrfValidationError::InvalidBand { skill: "Speaking", .. })
        ));
        assert!(form(6.0, -0.5, 6.0, 6.0).validate().is_err());
    }

    #[test]
    fn requires_candidate_and_date() {
        let mut f = form(5.0, 5.0, 5.0, 5.0);
        f.candidate_id.clear();
        f.candidate_name = " ".into();
        assert_eq!(f.validate(), Err(TrfValidationError::MissingCandidate));

        let mut f = form(5.0, 5.0, 5.0, 5.0);
        f.test_date.clear();
        assert_eq!(f.validate(), Err(TrfValidationError::MissingTestDate));
    }

    #[test]
    fn finalized_fills_overall() {
        let dto = form(6.5, 6.5, 5.0, 7.0).finalized().unwrap();
        assert_eq!(dto.overall, 6.5);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["candidateId"], "u1");
        assert_eq!(json["overall"], 6.5);
    }

    #[test]
    fn band_options_cover_scale() {
        let options = band_options();
        assert_eq!(options.len(), 19);
        assert_eq!(options.first(), Some(&0.0));
        assert_eq!(options.last(), Some(&9.0));
    }
}
