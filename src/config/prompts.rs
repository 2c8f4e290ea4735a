//! Prompt templates for Svar.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub qa: QaPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for question answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QaPrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant. Answer the question based on the provided \
                     context. If the answer cannot be found in the context, say so."
                .to_string(),

            user: r#"Context:
{{context}}

Question: {{question}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory
    /// and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let qa_path = custom_path.join("qa.toml");
            if qa_path.exists() {
                let content = std::fs::read_to_string(&qa_path)?;
                prompts.qa = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config
    /// variables. Provided variables take precedence.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.qa.system.is_empty());
        assert!(prompts.qa.user.contains("{{context}}"));
        assert!(prompts.qa.user.contains("{{question}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Context:\n{{context}}\n\nQuestion: {{question}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("context".to_string(), "Nvidia stock rose.".to_string());
        vars.insert("question".to_string(), "What rose?".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Context:\nNvidia stock rose.\n\nQuestion: What rose?");
    }

    #[test]
    fn test_custom_variables_are_overridden_by_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("question".to_string(), "from config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("question".to_string(), "from caller".to_string());

        let result = prompts.render_with_custom("Q: {{question}}", &vars);
        assert_eq!(result, "Q: from caller");
    }
}
