pub mod catalog;
pub mod yml_settings;

pub use catalog::{CatalogEntry, TemplateCatalog};
pub use yml_settings::TemplateSettings;
