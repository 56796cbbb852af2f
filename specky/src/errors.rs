mod add_specks;
mod options;
mod register;

pub use add_specks::SpeckyErrorKind;
pub use options::OptionsErrorKind;
pub use register::{Location, RegisterErrorKind};
