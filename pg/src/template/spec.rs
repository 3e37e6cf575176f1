//! Template configuration schema
//!
//! `config.yml` is parsed into a loose document first and then validated into
//! the typed [`TemplateConfig`], so every later stage can rely on well-formed
//! parameter specs and existing files.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ProgenError, ProgenResult};

/// Type tag that marks a parameter spec as a group
pub const GROUP_TYPE: &str = "group";

/// One entry of the parameter schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// A single string value asked with `prompt`
    Scalar { name: String, prompt: String },
    /// A nested set of parameters introduced by `prompt`
    Group {
        name: String,
        prompt: String,
        subfields: Vec<ParamSpec>,
    },
}

impl ParamSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar { name, .. } | Self::Group { name, .. } => name,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::Scalar { prompt, .. } | Self::Group { prompt, .. } => prompt,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// Validated contents of a template's `config.yml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Files to render, relative to the template directory
    pub files: Vec<PathBuf>,
    /// Parameter schema, in prompt order
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    files: Vec<String>,
    params: Vec<RawParam>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawParam {
    name: Option<String>,
    prompt: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    subfields: Option<Vec<RawParam>>,
}

impl TemplateConfig {
    /// Parse and validate a configuration document
    ///
    /// `template_dir` is the directory listed files must exist under;
    /// `config_path` is only used for error reporting.
    pub fn parse(content: &str, template_dir: &Path, config_path: &Path) -> ProgenResult<Self> {
        debug!(?template_dir, content_len = content.len(), "TemplateConfig::parse: called");
        // An empty document is a config with no files and no params
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| ProgenError::invalid_config(config_path, format!("malformed document: {}", e)))?
        };

        let files = validate_files(&raw.files, template_dir, config_path)?;
        let params = validate_params(raw.params, "", config_path)?;

        if files.is_empty() {
            warn!("Template config {} lists no files to render", config_path.display());
        }

        debug!(files = files.len(), params = params.len(), "TemplateConfig::parse: validated");
        Ok(Self { files, params })
    }
}

fn validate_files(files: &[String], template_dir: &Path, config_path: &Path) -> ProgenResult<Vec<PathBuf>> {
    debug!(count = files.len(), "validate_files: called");
    let mut validated = Vec::with_capacity(files.len());
    for file in files {
        let rel = PathBuf::from(file);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if file.is_empty() || escapes {
            return Err(ProgenError::invalid_config(
                config_path,
                format!("file '{}' must be a relative path inside the template", file),
            ));
        }
        if !template_dir.join(&rel).is_file() {
            return Err(ProgenError::invalid_config(
                config_path,
                format!("file '{}' does not exist in {}", file, template_dir.display()),
            ));
        }
        validated.push(rel);
    }
    Ok(validated)
}

/// Validate a list of raw specs; `parent` is the dotted path used in messages
fn validate_params(raw: Vec<RawParam>, parent: &str, config_path: &Path) -> ProgenResult<Vec<ParamSpec>> {
    debug!(count = raw.len(), %parent, "validate_params: called");
    let mut seen = HashSet::new();
    let mut specs = Vec::with_capacity(raw.len());

    for (index, param) in raw.into_iter().enumerate() {
        let location = if parent.is_empty() {
            format!("params[{}]", index)
        } else {
            format!("{}.subfields[{}]", parent, index)
        };

        let name = non_empty(param.name)
            .ok_or_else(|| ProgenError::invalid_config(config_path, format!("{} is missing 'name'", location)))?;
        let prompt = non_empty(param.prompt).ok_or_else(|| {
            ProgenError::invalid_config(config_path, format!("{} ('{}') is missing 'prompt'", location, name))
        })?;

        // Dots address group members in templates and --set
        if name.contains('.') {
            return Err(ProgenError::invalid_config(
                config_path,
                format!("{} name '{}' must not contain '.'", location, name),
            ));
        }

        if !seen.insert(name.clone()) {
            return Err(ProgenError::invalid_config(
                config_path,
                format!("{} duplicates parameter name '{}'", location, name),
            ));
        }

        let qualified = if parent.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", parent, name)
        };

        if param.kind.as_deref() == Some(GROUP_TYPE) {
            let subfields = match param.subfields {
                Some(subfields) if !subfields.is_empty() => validate_params(subfields, &qualified, config_path)?,
                _ => {
                    return Err(ProgenError::invalid_config(
                        config_path,
                        format!("group '{}' needs a non-empty 'subfields' list", qualified),
                    ));
                }
            };
            specs.push(ParamSpec::Group {
                name,
                prompt,
                subfields,
            });
        } else {
            if param.subfields.is_some() {
                warn!("Ignoring 'subfields' on non-group parameter '{}'", qualified);
            }
            specs.push(ParamSpec::Scalar { name, prompt });
        }
    }

    Ok(specs)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
