use super::{OptionsErrorKind, RegisterErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum SpeckyErrorKind {
    #[error(transparent)]
    Options(#[from] OptionsErrorKind),
    #[error(transparent)]
    Register(#[from] RegisterErrorKind),
    #[error("No assembly was added or linked into the entry assembly, nothing to scan")]
    NoScanTarget,
    #[error("Scanning with configurations only was requested, but no configuration was found")]
    NoConfigurations,
}
