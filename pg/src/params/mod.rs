//! Parameter values and their interactive collection

mod collector;
mod prompter;
mod values;

pub use collector::{collect, collect_with};
pub use prompter::{LinePrompter, Prompter, ReadlinePrompter};
pub use values::{ParamValue, ParamValues};
