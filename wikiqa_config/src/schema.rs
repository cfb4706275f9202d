use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use wikiqa_core::PipelineConfig;
use wikiqa_providers::{HuggingFaceConfig, WikipediaConfig, ZhipuConfig};

const CONFIG_DIR: &str = "wikiqa";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub answer: AnswerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Which extractive reader answers the question.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerBackend {
    #[default]
    HuggingFace,
    Zhipu,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AnswerConfig {
    #[serde(default)]
    pub backend: AnswerBackend,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub zhipu: ZhipuConfig,
}

impl Config {
    /// Load `~/wikiqa/config.json`.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE);

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'wikiqa init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Optionally add a Hugging Face token under answer.huggingface.api_token");
        println!("   2. Or set answer.backend to \"zhipu\" and fill in answer.zhipu.api_key");
        println!("   3. Run 'wikiqa ask' to ask a question");
        println!();
        println!("🔧 Configuration options:");
        println!("   - wikipedia.api_url: MediaWiki endpoint (other languages or mirrors)");
        println!("   - pipeline.top_paragraphs: Paragraphs passed to the answer model");
        println!("   - pipeline.proper_noun_weight: Score multiplier for proper nouns");
        println!();
        Ok(())
    }

    fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "wikipedia": {
    "api_url": "https://en.wikipedia.org/w/api.php",
    "timeout": 20,
    "search_limit": 10,
    "retry_delays": [1, 2, 4]
  },
  "answer": {
    "backend": "huggingface",
    "huggingface": {
      "api_url": "https://api-inference.huggingface.co/models",
      "model": "distilbert-base-cased-distilled-squad",
      "timeout": 60,
      "retry_delays": [2, 5, 10]
    },
    "zhipu": {
      "api_key": "",
      "model": "glm-4-flash",
      "timeout": 60,
      "retry_delays": [2, 4, 8]
    }
  },
  "pipeline": {
    "top_paragraphs": 3,
    "proper_noun_weight": 2,
    "frequency_weight": 0.0001,
    "require_nouns": true
  }
}"#;

        std::fs::write(config_path, config_template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wikiqa-config-{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let Ok(config) = serde_json::from_str::<Config>("{}") else {
            panic!("Failed to parse empty config");
        };
        assert_eq!(config.answer.backend, AnswerBackend::HuggingFace);
        assert_eq!(config.wikipedia.search_limit, 10);
        assert_eq!(config.wikipedia.retry_delays, [1, 2, 4]);
        assert_eq!(config.pipeline.top_paragraphs, 3);
        assert!(config.pipeline.require_nouns);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let json = r#"{
            "answer": {"backend": "zhipu", "zhipu": {"api_key": "k"}},
            "pipeline": {"top_paragraphs": 5}
        }"#;
        let Ok(config) = serde_json::from_str::<Config>(json) else {
            panic!("Failed to parse partial config");
        };
        assert_eq!(config.answer.backend, AnswerBackend::Zhipu);
        assert_eq!(config.answer.zhipu.api_key, "k");
        assert_eq!(config.answer.zhipu.model, "glm-4-flash");
        assert_eq!(config.pipeline.top_paragraphs, 5);
        assert_eq!(config.pipeline.proper_noun_weight, 2);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let json = r#"{"answer": {"backend": "openai"}}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_template_round_trips_through_load_from() {
        let path = scratch_path("template.json");
        assert!(Config::write_template(&path).is_ok());

        let Ok(config) = Config::load_from(&path) else {
            panic!("Failed to load written template");
        };
        assert_eq!(config.answer.huggingface.model, "distilbert-base-cased-distilled-squad");
        assert!((config.pipeline.frequency_weight - 0.0001).abs() < f64::EPSILON);
        // no placeholder key, so an unedited zhipu backend fails fast
        assert!(config.answer.zhipu.api_key.is_empty());
        assert_eq!(config.answer.zhipu.retry_delays, [2, 4, 8]);

        // a second write refuses to clobber the file
        assert!(Config::write_template(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = scratch_path("missing.json");
        let Err(e) = Config::load_from(&path) else {
            panic!("expected missing file to fail");
        };
        assert!(e.to_string().contains("missing.json"));
    }
}
