use anyhow::{bail, Context, Result};
use indexmap::IndexMap;

use crate::{
    config::yml_settings::TemplateSettings,
    template::{Template, Variables},
};

const DEFAULT_CONFIG_FILE: &str = "templates.yml";

/// A named template, parsed and ready to expand
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub alias: String,
    pub description: String,
    pub template: Template,
    pub fallback: Option<String>,
    pub defaults: Variables,
}

impl TryFrom<TemplateSettings> for CatalogEntry {
    type Error = anyhow::Error;

    fn try_from(value: TemplateSettings) -> Result<Self> {
        let template = Template::parse(&value.template)
            .with_context(|| format!("Invalid template for alias '{}'", value.alias))?;
        Ok(Self {
            alias: value.alias,
            description: value.description,
            template,
            fallback: value.fallback,
            defaults: value.defaults,
        })
    }
}

/// Alias to template lookup, in the order the catalog file lists them
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl TemplateCatalog {
    pub fn from_settings(settings: Vec<TemplateSettings>) -> Result<Self> {
        let mut entries = IndexMap::new();
        for setting in settings {
            let entry = CatalogEntry::try_from(setting)?;
            if entries.contains_key(&entry.alias) {
                bail!("Duplicate alias: {}", entry.alias);
            }
            entries.insert(entry.alias.clone(), entry);
        }
        Ok(Self { entries })
    }

    pub fn from_yaml(yml: &str) -> Result<Self> {
        let settings: Vec<TemplateSettings> =
            serde_yaml::from_str(yml).context("Invalid yaml configuration")?;
        Self::from_settings(settings)
    }

    /// Loads the catalog from `path`, or from `templates.yml` when no path is given
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_FILE);
        let yml = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read template catalog '{}'", path))?;
        let catalog = Self::from_yaml(&yml)
            .with_context(|| format!("Could not load template catalog '{}'", path))?;
        tracing::info!(path, templates = catalog.len(), "loaded template catalog");
        Ok(catalog)
    }

    pub fn get(&self, alias: &str) -> Option<&CatalogEntry> {
        self.entries.get(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(alias: &str, template: &str) -> TemplateSettings {
        TemplateSettings {
            alias: alias.to_string(),
            description: format!("{} template", alias),
            template: template.to_string(),
            fallback: None,
            defaults: Variables::new(),
        }
    }

    #[test]
    fn test_valid_catalog() {
        // ensure that the bundled catalog can be loaded
        let catalog = TemplateCatalog::load(None).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_duplicate_alias_fails() {
        let result = TemplateCatalog::from_settings(vec![
            settings("a", "https://example.com/{x}"),
            settings("a", "https://example2.com/{x}"),
        ]);
        assert_eq!(result.unwrap_err().to_string(), "Duplicate alias: a");
    }

    #[test]
    fn test_invalid_template_fails() {
        let err = TemplateCatalog::from_settings(vec![settings("bad", "https://example.com/{x:0}")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid template for alias 'bad'");
        assert!(format!("{:#}", err).contains("Invalid expression '{x:0}'"));
    }

    #[test]
    fn test_catalog_keeps_file_order() {
        let catalog = TemplateCatalog::from_yaml(
            r#"
- alias: z
  description: last letter
  template: "https://example.com/z{?q}"
- alias: a
  description: first letter
  template: "https://example.com/a{?q}"
"#,
        )
        .unwrap();
        let aliases: Vec<&str> = catalog.iter().map(|entry| entry.alias.as_str()).collect();
        assert_eq!(aliases, vec!["z", "a"]);
        assert_eq!(
            catalog.get("a").unwrap().template.to_string(),
            "https://example.com/a{?q}"
        );
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(TemplateCatalog::load(Some("does-not-exist.yml")).is_err());
    }
}
