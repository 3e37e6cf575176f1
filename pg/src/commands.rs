//! Command implementations driving load -> collect -> render

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::params::{ParamValues, Prompter};
use crate::template::{Template, list_templates};

/// Outcome of a successful generate run
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Directory the template was loaded from
    pub template: PathBuf,
    /// Destination directory
    pub dest: PathBuf,
    /// Written files, in config order
    pub files: Vec<PathBuf>,
}

/// Render the template selected by `args`
///
/// `cwd` is the base for the default destination (`<cwd>/<name>`).
pub fn generate(config: &Config, args: &GenerateArgs, cwd: &Path, prompter: &mut dyn Prompter) -> Result<GenerateOutcome> {
    debug!(?args, "generate: called");
    let (Some(template_type), Some(name)) = (args.template_type.as_deref(), args.name.as_deref()) else {
        return Err(eyre!("Both a template TYPE and NAME are required"));
    };

    let base = config.template_base(args.template_dir.as_deref());
    let template_path = base.join(template_type).join(name);
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => cwd.join(name),
    };
    info!("Generating {}/{} into {}", template_type, name, dest.display());

    let mut template = Template::load(&template_path).context("Failed to load template")?;

    let preset = preset_values(args)?;
    template
        .prompt_values_with(preset, prompter)
        .context("Failed to collect parameter values")?;

    let files = template.render(&dest).context("Failed to render template")?;

    Ok(GenerateOutcome {
        template: template_path,
        dest,
        files,
    })
}

/// Values from `--values` overlaid with `--set`
fn preset_values(args: &GenerateArgs) -> Result<ParamValues> {
    let mut preset = match &args.values {
        Some(path) => ParamValues::load_yaml(path).context("Failed to load parameter values")?,
        None => ParamValues::new(),
    };
    preset.merge(ParamValues::from_assignments(&args.set).context("Invalid --set value")?);
    debug!(count = preset.len(), "preset_values: built");
    Ok(preset)
}

/// Available templates as `type/name` strings
pub fn list(config: &Config, template_dir: Option<&Path>) -> Result<Vec<String>> {
    let base = config.template_base(template_dir);
    debug!(?base, "list: called");
    let templates = list_templates(&base).context("Failed to list templates")?;
    Ok(templates
        .into_iter()
        .map(|(kind, name)| format!("{}/{}", kind, name))
        .collect())
}

/// Placeholder for creating a new template skeleton
pub fn generate_template(name: &str) -> Result<()> {
    warn!("generate-template '{}' requested but not implemented", name);
    Ok(())
}

/// Placeholder for fetching a template from a remote source
pub fn get_template(name: &str, url: Option<&str>) -> Result<()> {
    warn!("get-template '{}' (url: {:?}) requested but not implemented", name, url);
    Ok(())
}
