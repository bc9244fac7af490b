use thiserror::Error;

#[derive(Error, Debug)]
pub enum AltimetryError {
    #[error("no usable distance/altitude pairs in profile")]
    EmptyProfile,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
