use alloc::string::String;

use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum OptionsErrorKind {
    #[error("Assembly `{name}` was already added to the options")]
    DuplicateAssembly { name: &'static str },
    #[error("Configuration `{type_info}` was already added to the options")]
    DuplicateConfiguration { type_info: TypeInfo },
    #[error("`{type_info}` must be marked as a configuration to be used as a configuration surface")]
    MissingConfigurationMarker { type_info: TypeInfo },
    #[error("`{type_info}` must be an interface to be used as a configuration surface")]
    NotAnInterface { type_info: TypeInfo },
    #[error("Option `{option}` was already added to the options")]
    DuplicateOption { option: String },
}
