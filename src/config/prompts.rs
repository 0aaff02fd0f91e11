//! Prompt templates for the tutor agent.
//!
//! Prompts can be customized by placing a `tutor.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub tutor: TutorPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for chapter summarization and question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorPrompts {
    pub system: String,
}

impl Default for TutorPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful NCERT Tutor agent who will summarize a given chapter from NCERT and respond with a summary and a question bank with answers.

Please follow these guidelines:
1. Try to answer the question as accurately as possible, using only reliable sources like the ones provided.
2. Take in consideration the standard, subject, chapter, and question given.
3. Provide a detailed summary of the chapter.
4. Create a question bank with answers to the questions.
5. Provide the information in the exact JSON format: {"summary": "summary", "question_bank": "question_1\nquestion_2\n...", "answer_key": "answer_1\nanswer_2\n..."}
    - summary is the summary of the chapter given
    - question_bank is a newlined string of questions from the chapter
    - answer_key is a newlined string of answers to the questions made from the chapter

Respond with the JSON object only."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
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

            let tutor_path = custom_path.join("tutor.toml");
            if tutor_path.exists() {
                let content = std::fs::read_to_string(&tutor_path)?;
                prompts.tutor = toml::from_str(&content)?;
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

    /// System instruction for the tutor with custom config variables applied.
    pub fn tutor_system(&self) -> String {
        Self::render(&self.tutor.system, &self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_prompt_states_output_contract() {
        let prompts = Prompts::default();
        let system = prompts.tutor_system();
        assert!(system.contains("\"summary\""));
        assert!(system.contains("\"question_bank\""));
        assert!(system.contains("\"answer_key\""));
        assert!(system.contains("standard, subject, chapter, and question"));
    }

    #[test]
    fn test_render_template() {
        let template = "Tutor for {{board}} class {{class}}.";
        let mut vars = HashMap::new();
        vars.insert("board".to_string(), "NCERT".to_string());
        vars.insert("class".to_string(), "8".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Tutor for NCERT class 8.");
    }

    #[test]
    fn test_load_custom_tutor_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tutor.toml"),
            "system = \"Answer in {{language}}.\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("language".to_string(), "Hindi".to_string());

        let prompts = Prompts::load(dir.path().to_str(), Some(&vars)).unwrap();
        assert_eq!(prompts.tutor_system(), "Answer in Hindi.");
    }
}
