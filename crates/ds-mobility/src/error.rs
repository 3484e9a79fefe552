use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MobilityError {
    #[error("kinematics parameter `{name}` must be finite and >= 0, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
