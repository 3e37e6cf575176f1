//! Template descriptor
//!
//! A template is a directory holding a `config.yml` and the files it lists:
//!
//! ```text
//! <template-dir>/
//! └── {type}/
//!     └── {name}/
//!         ├── config.yml
//!         ├── README.md
//!         └── src/...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::render::Renderer;
use super::spec::{ParamSpec, TemplateConfig};
use crate::error::{ProgenError, ProgenResult};
use crate::params::{self, ParamValues, Prompter};

/// Conventional name of the configuration document inside a template
pub const CONFIG_FILE: &str = "config.yml";

/// A loaded and validated template directory
pub struct Template {
    path: PathBuf,
    config: TemplateConfig,
    renderer: Renderer,
    values: Option<ParamValues>,
}

impl Template {
    /// Load the template at `path`, validating its configuration
    pub fn load(path: impl Into<PathBuf>) -> ProgenResult<Self> {
        let path = path.into();
        debug!(?path, "Template::load: called");
        let config_path = path.join(CONFIG_FILE);
        if !path.is_dir() || !config_path.is_file() {
            debug!(?config_path, "Template::load: template or config missing");
            return Err(ProgenError::NotFound { path });
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ProgenError::io(&config_path, e))?;
        let config = TemplateConfig::parse(&content, &path, &config_path)?;

        info!(
            "Loaded template {} ({} files, {} params)",
            path.display(),
            config.files.len(),
            config.params.len()
        );
        Ok(Self {
            renderer: Renderer::load(&path, &config.files),
            path,
            config,
            values: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files to render, relative to the template directory
    pub fn files(&self) -> &[PathBuf] {
        &self.config.files
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.config.params
    }

    pub fn values(&self) -> Option<&ParamValues> {
        self.values.as_ref()
    }

    /// Supply parameter values directly, bypassing prompting
    pub fn set_values(&mut self, values: ParamValues) {
        debug!(count = values.len(), "Template::set_values: called");
        self.values = Some(values);
    }

    /// Prompt for every parameter and keep the answers
    pub fn prompt_values(&mut self, prompter: &mut dyn Prompter) -> ProgenResult<&ParamValues> {
        self.prompt_values_with(ParamValues::new(), prompter)
    }

    /// Prompt for parameters not already present in `preset`
    pub fn prompt_values_with(&mut self, preset: ParamValues, prompter: &mut dyn Prompter) -> ProgenResult<&ParamValues> {
        debug!(preset = preset.len(), "Template::prompt_values_with: called");
        let values = params::collect_with(&self.config.params, preset, prompter)?;
        let values = self.values.insert(values);
        Ok(&*values)
    }

    /// Render every listed file into `dest`
    ///
    /// Stops at the first failure; files written before it are left in place.
    /// Returns the written paths in list order.
    pub fn render(&self, dest: &Path) -> ProgenResult<Vec<PathBuf>> {
        debug!(?dest, "Template::render: called");
        let values = self.values.as_ref().ok_or(ProgenError::NotInitialized)?;
        let data = serde_json::to_value(values).map_err(|e| ProgenError::Render {
            file: self.path.display().to_string(),
            message: format!("Failed to build render context: {}", e),
        })?;

        fs::create_dir_all(dest).map_err(|e| ProgenError::io(dest, e))?;

        let mut written = Vec::with_capacity(self.config.files.len());
        for file in &self.config.files {
            written.push(self.renderer.render_to(file, &data, dest)?);
        }
        info!("Rendered {} files into {}", written.len(), dest.display());
        Ok(written)
    }
}

/// List `(type, name)` pairs of templates found under `base`
///
/// A template is any `<base>/<type>/<name>` directory containing a config.
pub fn list_templates(base: &Path) -> ProgenResult<Vec<(String, String)>> {
    debug!(?base, "list_templates: called");
    if !base.is_dir() {
        return Err(ProgenError::NotFound {
            path: base.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    for kind in subdirs(base)? {
        for name in subdirs(&kind)? {
            if name.join(CONFIG_FILE).is_file() {
                found.push((file_name(&kind), file_name(&name)));
            }
        }
    }
    found.sort();
    debug!(count = found.len(), "list_templates: done");
    Ok(found)
}

fn subdirs(dir: &Path) -> ProgenResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ProgenError::io(dir, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ProgenError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
