//! HTML templates from `{dir}/{name}.html` with `{{ key }}` placeholders.
//!
//! Files are read on every render, so edits show up without a restart. Values are HTML-escaped;
//! unknown placeholders are left as they are.

use std::path::PathBuf;

use async_trait::async_trait;
use dbot_core::{Result, ServiceError, TemplateRenderer};
use teloxide::utils::html;
use tracing::instrument;

pub struct FileTemplateRenderer {
    dir: PathBuf,
}

impl FileTemplateRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Replaces `{{key}}` and `{{ key }}` with the escaped value.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        let escaped = html::escape(value);
        out = out
            .replace(&format!("{{{{ {} }}}}", key), &escaped)
            .replace(&format!("{{{{{}}}}}", key), &escaped);
    }
    out
}

#[async_trait]
impl TemplateRenderer for FileTemplateRenderer {
    #[instrument(skip(self, vars))]
    async fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String> {
        let path = self.dir.join(format!("{}.html", name));
        let template = match tokio::fs::read_to_string(&path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ServiceError::TemplateNotFound(name.to_string()).into());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(substitute(&template, vars))
    }
}
