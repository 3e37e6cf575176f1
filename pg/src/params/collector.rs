//! Recursive parameter collection
//!
//! Walks the parameter schema in order and produces one value per spec,
//! asking the [`Prompter`] only for values that were not supplied up front.

use tracing::{debug, info, warn};

use super::prompter::Prompter;
use super::values::{ParamValue, ParamValues};
use crate::error::{ProgenError, ProgenResult};
use crate::template::ParamSpec;

/// Prompt for every parameter in `specs`
pub fn collect(specs: &[ParamSpec], prompter: &mut dyn Prompter) -> ProgenResult<ParamValues> {
    collect_with(specs, ParamValues::new(), prompter)
}

/// Collect values, prompting only for specs missing from `preset`
///
/// Preset entries whose shape does not match the schema fail with
/// [`ProgenError::InvalidValue`]; entries not named by the schema are dropped.
pub fn collect_with(specs: &[ParamSpec], preset: ParamValues, prompter: &mut dyn Prompter) -> ProgenResult<ParamValues> {
    debug!(specs = specs.len(), preset = preset.len(), "collect_with: called");
    let values = collect_level(specs, preset, "", prompter)?;
    info!("Collected {} top-level parameter values", values.len());
    Ok(values)
}

fn collect_level(
    specs: &[ParamSpec],
    mut preset: ParamValues,
    parent: &str,
    prompter: &mut dyn Prompter,
) -> ProgenResult<ParamValues> {
    let mut values = ParamValues::new();

    for spec in specs {
        let qualified = qualify(parent, spec.name());
        let supplied = preset.remove(spec.name());

        match (spec, supplied) {
            (ParamSpec::Scalar { .. }, Some(ParamValue::Scalar(value))) => {
                debug!(%qualified, "collect_level: using supplied value");
                values.insert(spec.name(), value);
            }
            (ParamSpec::Scalar { prompt, .. }, None) => {
                let answer = prompter.ask(prompt)?;
                values.insert(spec.name(), answer);
            }
            (ParamSpec::Group { prompt, subfields, .. }, supplied) => {
                let nested_preset = match supplied {
                    Some(ParamValue::Group(nested)) => nested,
                    Some(ParamValue::Scalar(_)) => {
                        return Err(ProgenError::InvalidValue(format!(
                            "'{}' is a group but was given a single value",
                            qualified
                        )));
                    }
                    None => ParamValues::new(),
                };
                // Fully supplied groups are filled in silently
                if !covers(subfields, &nested_preset) {
                    prompter.header(prompt)?;
                }
                let nested = collect_level(subfields, nested_preset, &qualified, prompter)?;
                values.insert(spec.name(), nested);
            }
            (ParamSpec::Scalar { .. }, Some(ParamValue::Group(_))) => {
                return Err(ProgenError::InvalidValue(format!(
                    "'{}' expects a single value but was given a group",
                    qualified
                )));
            }
        }
    }

    for (name, _) in preset.iter() {
        warn!("Ignoring value for unknown parameter '{}'", qualify(parent, name));
    }

    Ok(values)
}

/// Whether `preset` already holds a value for every leaf under `specs`
fn covers(specs: &[ParamSpec], preset: &ParamValues) -> bool {
    specs.iter().all(|spec| match (spec, preset.get(spec.name())) {
        (ParamSpec::Scalar { .. }, Some(ParamValue::Scalar(_))) => true,
        (ParamSpec::Group { subfields, .. }, Some(ParamValue::Group(nested))) => covers(subfields, nested),
        _ => false,
    })
}

fn qualify(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
