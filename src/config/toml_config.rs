use crate::adapters::relay::DEFAULT_CONTACT_TIMEOUT;
use crate::core::project_store::{LoadPolicy, DEFAULT_LOAD_TIMEOUT, NO_RETRIES};
use crate::core::view::SocialLinkView;
use crate::domain::model::Theme;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub projects: ProjectsConfig,
    pub contact: ContactConfig,
    pub preferences: Option<PreferencesConfig>,
    pub appearance: Option<AppearanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub owner: String,
    pub tagline: Option<String>,
    pub links: Option<Vec<LinkConfig>>,
    pub skills: Option<Vec<SkillConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub relay_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub system_theme: Option<Theme>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("bad substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.owner", &self.site.owner)?;
        for link in self.site.links.iter().flatten() {
            validation::validate_link("site.links", &link.href)?;
        }

        validation::validate_url("projects.base_url", &self.projects.base_url)?;
        if self.projects.api_key.contains("${") {
            return Err(SiteError::MissingConfigError {
                field: "projects.api_key".to_string(),
            });
        }
        validation::validate_non_empty_string("projects.api_key", &self.projects.api_key)?;
        validation::validate_non_empty_string("projects.table", self.projects_table())?;
        if let Some(retries) = self.projects.max_retries {
            validation::validate_range("projects.max_retries", retries, 0, 10)?;
        }
        if let Some(timeout) = self.projects.timeout_seconds {
            validation::validate_range("projects.timeout_seconds", timeout, 0, 300)?;
        }

        validation::validate_url("contact.relay_url", &self.contact.relay_url)?;
        if let Some(timeout) = self.contact.timeout_seconds {
            validation::validate_range("contact.timeout_seconds", timeout, 0, 300)?;
        }
        validation::validate_path("preferences.path", &self.preferences_path())?;

        Ok(())
    }

    pub fn projects_table(&self) -> &str {
        self.projects.table.as_deref().unwrap_or("projects")
    }

    /// `timeout_seconds = 0` turns the timeout off.
    pub fn load_policy(&self) -> LoadPolicy {
        let timeout = match self.projects.timeout_seconds {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_LOAD_TIMEOUT),
        };

        LoadPolicy {
            max_retries: self.projects.max_retries.unwrap_or(NO_RETRIES),
            retry_delay: Duration::from_secs(self.projects.retry_delay_seconds.unwrap_or(1)),
            timeout,
        }
    }

    /// Same rules as the load timeout: unset uses the default, `0` turns it off.
    pub fn contact_timeout(&self) -> Option<Duration> {
        match self.contact.timeout_seconds {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_CONTACT_TIMEOUT),
        }
    }

    pub fn preferences_path(&self) -> String {
        self.preferences
            .as_ref()
            .map(|p| p.path.clone())
            .unwrap_or_else(|| ".folio/preferences.json".to_string())
    }

    pub fn system_theme_override(&self) -> Option<Theme> {
        self.appearance.as_ref().and_then(|a| a.system_theme)
    }

    pub fn social_links(&self) -> Vec<SocialLinkView> {
        self.site
            .links
            .iter()
            .flatten()
            .map(|link| SocialLinkView::new(&link.label, &link.href))
            .collect()
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[site]
owner = "Ada Lovelace"
tagline = "Turning Ideas Into Reality"
links = [
  { label = "GitHub", href = "https://github.com/ada" },
  { label = "Email", href = "mailto:ada@example.com" },
]

[projects]
base_url = "https://abc.supabase.co"
api_key = "anon-key"

[contact]
relay_url = "https://abc.supabase.co/functions/v1/send-contact-email"
"#;

    #[test]
    fn test_parse_basic_config_with_defaults() {
        let config = SiteConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.site.owner, "Ada Lovelace");
        assert_eq!(config.projects_table(), "projects");
        assert_eq!(config.load_policy(), LoadPolicy::default());
        assert_eq!(config.contact_timeout(), Some(DEFAULT_CONTACT_TIMEOUT));
        assert_eq!(config.preferences_path(), ".folio/preferences.json");
        assert_eq!(config.system_theme_override(), None);
        assert!(config.validate().is_ok());

        let links = config.social_links();
        assert_eq!(links.len(), 2);
        assert!(!links[1].opens_new_tab);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FOLIO_TEST_ANON_KEY", "secret-anon");

        let content = BASIC.replace("\"anon-key\"", "\"${FOLIO_TEST_ANON_KEY}\"");
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.projects.api_key, "secret-anon");

        std::env::remove_var("FOLIO_TEST_ANON_KEY");
    }

    #[test]
    fn test_unresolved_key_fails_validation() {
        let content = BASIC.replace("\"anon-key\"", "\"${FOLIO_TEST_UNSET_KEY}\"");
        let config = SiteConfig::from_toml_str(&content).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, SiteError::MissingConfigError { ref field } if field == "projects.api_key"));
    }

    #[test]
    fn test_explicit_retry_and_timeout_policy() {
        let content = BASIC.replace(
            "api_key = \"anon-key\"",
            "api_key = \"anon-key\"\nmax_retries = 2\nretry_delay_seconds = 3\ntimeout_seconds = 0",
        );
        let config = SiteConfig::from_toml_str(&content).unwrap();

        let policy = config.load_policy();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.retry_delay, Duration::from_secs(3));
        assert_eq!(policy.timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_contact_timeout_can_be_set_or_disabled() {
        let with = |secs: u64| {
            let content = BASIC.replace(
                "send-contact-email\"\n",
                &format!("send-contact-email\"\ntimeout_seconds = {}\n", secs),
            );
            SiteConfig::from_toml_str(&content).unwrap()
        };

        assert_eq!(with(5).contact_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(with(0).contact_timeout(), None);
        assert!(with(0).validate().is_ok());
        assert!(with(900).validate().is_err());
    }

    #[test]
    fn test_appearance_override() {
        let content = format!("{}\n[appearance]\nsystem_theme = \"light\"\n", BASIC);
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.system_theme_override(), Some(Theme::Light));
    }

    #[test]
    fn test_invalid_relay_url() {
        let content = BASIC.replace(
            "https://abc.supabase.co/functions/v1/send-contact-email",
            "not a url",
        );
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.contact.relay_url, "https://abc.supabase.co/functions/v1/send-contact-email");
    }
}
