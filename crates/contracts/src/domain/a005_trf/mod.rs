pub mod aggregate;

pub use aggregate::{
    band_options, round_to_band, CreateTrfDto, Skill, Trf, TrfValidationError,
};
