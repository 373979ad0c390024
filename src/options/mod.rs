//! Centralized runtime options with TOML preset support.
//!
//! Backend location, element palette, primitive geometry, camera focus
//! transitions and search defaults are consolidated here. Options
//! serialize to/from TOML so a deployment can ship a single preset file.

mod backend;
mod camera;
mod colors;
mod geometry;
mod search;

use std::path::Path;

pub use backend::BackendOptions;
pub use camera::CameraOptions;
pub use colors::{ColorOptions, ElementStyle};
pub use geometry::GeometryOptions;
use schemars::JsonSchema;
pub use search::SearchOptions;
use serde::{Deserialize, Serialize};

use crate::error::MolpickError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[backend]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Backend location.
    pub backend: BackendOptions,
    /// Element palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Primitive sizes and pair color.
    pub geometry: GeometryOptions,
    /// Camera projection and focus transitions.
    pub camera: CameraOptions,
    /// Identifier lookup and search defaults.
    pub search: SearchOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Io`] if the file cannot be read,
    /// [`MolpickError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MolpickError> {
        let content = std::fs::read_to_string(path).map_err(MolpickError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolpickError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or write failures.
    pub fn save(&self, path: &Path) -> Result<(), MolpickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolpickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolpickError::Io)?;
        }
        std::fs::write(path, content).map_err(MolpickError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[backend]
base_url = "https://search.example.org/"
timeout_secs = 30
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.backend.timeout_secs, Some(30));
        assert_eq!(
            opts.backend.endpoint("/get_molecule/1ABC"),
            "https://search.example.org/get_molecule/1ABC"
        );
        // Everything else should be default
        assert_eq!(opts.geometry.picked_atom_radius, 0.75);
        assert_eq!(opts.camera.focus_duration_ms, 1000);
        assert_eq!(opts.search.max_search_len, 50);
    }

    #[test]
    fn element_palette_lookup() {
        let colors = ColorOptions::default();
        assert_eq!(colors.element_color(8), [1.0, 0.0, 0.0]);
        assert_eq!(colors.element_color(26), [0.0, 1.0, 0.0]);
        assert_eq!(colors.element_symbol(16), "S");
        assert_eq!(colors.element_symbol(26), "Element26");
    }

    #[test]
    fn custom_palette_from_toml() {
        let toml_str = r"
[colors]
default_color = [0.2, 0.2, 0.2]

[[colors.elements]]
atomic_number = 26
symbol = 'Fe'
color = [0.8, 0.4, 0.1]
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.colors.element_symbol(26), "Fe");
        assert_eq!(opts.colors.element_symbol(6), "Element6");
        assert_eq!(opts.colors.element_color(1), [0.2, 0.2, 0.2]);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir().join(format!(
            "molpick-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.search.use_postgis = true;
        opts.geometry.pair_radius = 0.2;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("backend"));
        assert!(props.contains_key("geometry"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("search"));
        assert!(!props.contains_key("colors"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("easing").is_none());
    }
}
