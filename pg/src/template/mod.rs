//! Template directories: configuration, parameter state and rendering

mod descriptor;
mod render;
mod spec;

pub use descriptor::{CONFIG_FILE, Template, list_templates};
pub use render::Renderer;
pub use spec::{GROUP_TYPE, ParamSpec, TemplateConfig};
