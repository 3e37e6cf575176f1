//! progen - project generator
//!
//! Renders a template directory into a new project. A template lives at
//! `<template-dir>/<type>/<name>/` and is described by a `config.yml`:
//!
//! ```yaml
//! files:
//!   - letter.tex
//! params:
//!   - name: title
//!     prompt: Title of the letter
//!   - name: author
//!     prompt: Author details
//!     type: group
//!     subfields:
//!       - name: name
//!         prompt: Full name
//! ```
//!
//! Each listed file is a Handlebars template (`{{title}}`, `{{author.name}}`).
//!
//! # Example
//!
//! ```ignore
//! use progen::{LinePrompter, Template};
//!
//! let mut template = Template::load("templates/latex/letter")?;
//! let mut prompter = LinePrompter::new(std::io::stdin().lock(), std::io::stderr());
//! template.prompt_values(&mut prompter)?;
//! template.render(Path::new("my-letter"))?;
//! ```
//!
//! # Modules
//!
//! - [`template`] - Config loading, validation and rendering
//! - [`params`] - Parameter values and prompting
//! - [`commands`] - CLI command implementations
//! - [`config`] - Tool configuration
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod params;
pub mod template;

pub use config::Config;
pub use error::{ProgenError, ProgenResult};
pub use params::{LinePrompter, ParamValue, ParamValues, Prompter, ReadlinePrompter, collect, collect_with};
pub use template::{CONFIG_FILE, ParamSpec, Renderer, Template, TemplateConfig, list_templates};
