//! Template rendering
//!
//! Files are Handlebars templates. Strict mode turns references to undefined
//! parameters into errors and escaping is disabled so substitution is exact.
//! Every listed file is registered under its relative path, so one file can
//! pull in another with `{{> header.txt}}`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ProgenError, ProgenResult};

/// Renders files of one template directory
pub struct Renderer {
    /// Handlebars registry holding every listed file
    hbs: Handlebars<'static>,
    /// Files that failed to read or parse, reported when rendered
    broken: HashMap<String, String>,
}

impl Renderer {
    /// Register `files` (relative to `root`) as named templates
    ///
    /// Read and parse failures are deferred until the broken file is rendered,
    /// so files listed before it are still written.
    pub fn load(root: &Path, files: &[PathBuf]) -> Self {
        debug!(?root, count = files.len(), "Renderer::load: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);

        let mut broken = HashMap::new();
        for rel in files {
            let name = template_name(rel);
            let source = root.join(rel);
            let registered = fs::read_to_string(&source)
                .map_err(|e| format!("Failed to read {}: {}", source.display(), e))
                .and_then(|content| hbs.register_template_string(&name, content).map_err(|e| e.to_string()));
            if let Err(message) = registered {
                warn!("Template file {} is unusable: {}", name, message);
                broken.insert(name, message);
            }
        }
        Self { hbs, broken }
    }

    /// Render the registered template at `rel`
    pub fn render<T: Serialize>(&self, rel: &Path, data: &T) -> ProgenResult<String> {
        debug!(?rel, "Renderer::render: called");
        let name = template_name(rel);
        if let Some(message) = self.broken.get(&name) {
            return Err(ProgenError::Render {
                file: name,
                message: message.clone(),
            });
        }

        self.hbs.render(&name, data).map_err(|e| ProgenError::Render {
            file: name.clone(),
            message: e.to_string(),
        })
    }

    /// Render `rel` and write it to the same relative path under `dest`
    ///
    /// Parent directories are created; an existing file is replaced in full.
    pub fn render_to<T: Serialize>(&self, rel: &Path, data: &T, dest: &Path) -> ProgenResult<PathBuf> {
        let rendered = self.render(rel, data)?;
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ProgenError::io(parent, e))?;
        }
        fs::write(&target, rendered).map_err(|e| ProgenError::io(&target, e))?;
        info!("Rendered {} -> {}", rel.display(), target.display());
        Ok(target)
    }
}

/// Registry name of a template file: its relative path with `/` separators
fn template_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn renderer_with(files: &[(&str, &str)]) -> (TempDir, Renderer) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let listed: Vec<PathBuf> = files.iter().map(|(name, _)| PathBuf::from(name)).collect();
        let renderer = Renderer::load(dir.path(), &listed);
        (dir, renderer)
    }

    #[test]
    fn test_render_exact_substitution() {
        let (_dir, renderer) = renderer_with(&[("x.txt", "{{x}}")]);
        let out = renderer.render(Path::new("x.txt"), &json!({"x": "hello"})).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_render_does_not_escape() {
        let (_dir, renderer) = renderer_with(&[("x.txt", "<{{x}}>\n")]);
        let out = renderer
            .render(Path::new("x.txt"), &json!({"x": "a & \"b\" <c>"}))
            .unwrap();
        assert_eq!(out, "<a & \"b\" <c>>\n");
    }

    #[test]
    fn test_render_nested_access() {
        let (_dir, renderer) = renderer_with(&[("x.txt", "{{author.first}} {{author.last}}")]);
        let out = renderer
            .render(
                Path::new("x.txt"),
                &json!({"author": {"first": "Ada", "last": "Lovelace"}}),
            )
            .unwrap();
        assert_eq!(out, "Ada Lovelace");
    }

    #[test]
    fn test_render_undefined_parameter_fails() {
        let (_dir, renderer) = renderer_with(&[("x.txt", "{{missing}}")]);
        match renderer.render(Path::new("x.txt"), &json!({"x": "hello"})) {
            Err(ProgenError::Render { file, .. }) => assert_eq!(file, "x.txt"),
            other => panic!("expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_malformed_syntax_fails() {
        let (_dir, renderer) = renderer_with(&[("x.txt", "{{#if x}}unterminated")]);
        assert!(matches!(
            renderer.render(Path::new("x.txt"), &json!({"x": "1"})),
            Err(ProgenError::Render { .. })
        ));
    }

    #[test]
    fn test_render_to_creates_parents_and_overwrites() {
        let (_dir, renderer) = renderer_with(&[("src/main.txt", "{{x}}")]);
        let dest = TempDir::new().unwrap();
        let target_dir = dest.path().join("deep").join("out");

        let written = renderer
            .render_to(Path::new("src/main.txt"), &json!({"x": "first"}), &target_dir)
            .unwrap();
        assert_eq!(written, target_dir.join("src/main.txt"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "first");

        fs::write(&written, "a much longer pre-existing content").unwrap();
        renderer
            .render_to(Path::new("src/main.txt"), &json!({"x": "second"}), &target_dir)
            .unwrap();
        assert_eq!(fs::read_to_string(&written).unwrap(), "second");
    }

    #[test]
    fn test_render_includes_other_listed_file() {
        let (_dir, renderer) = renderer_with(&[
            ("header.txt", "== {{title}} =="),
            ("main.txt", "{{> header.txt}}\nbody"),
        ]);

        let out = renderer.render(Path::new("main.txt"), &json!({"title": "Report"})).unwrap();
        assert_eq!(out, "== Report ==\nbody");
    }

    #[test]
    fn test_parse_error_only_fails_that_file() {
        let (_dir, renderer) = renderer_with(&[("good.txt", "{{x}}"), ("bad.txt", "{{#each x}}open")]);

        assert_eq!(renderer.render(Path::new("good.txt"), &json!({"x": "ok"})).unwrap(), "ok");
        match renderer.render(Path::new("bad.txt"), &json!({"x": "ok"})) {
            Err(ProgenError::Render { file, .. }) => assert_eq!(file, "bad.txt"),
            other => panic!("expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn test_unlisted_file_is_not_rendered() {
        let (dir, renderer) = renderer_with(&[("a.txt", "{{x}}")]);
        fs::write(dir.path().join("other.txt"), "{{x}}").unwrap();
        assert!(matches!(
            renderer.render(Path::new("other.txt"), &json!({"x": "1"})),
            Err(ProgenError::Render { .. })
        ));
    }
}
