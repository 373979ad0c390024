use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Search", inline)]
#[serde(default)]
/// Identifier lookup and structural search settings.
pub struct SearchOptions {
    /// Longest identifier search text sent to the backend.
    #[schemars(title = "Max Search Length", range(min = 1, max = 200))]
    pub max_search_len: usize,
    /// Whether searches use the PostGIS query generator by default.
    #[schemars(title = "Use PostGIS")]
    pub use_postgis: bool,
    /// Path of the search results page.
    #[schemars(skip)]
    pub results_path: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_search_len: 50,
            use_postgis: false,
            results_path: "/search_results".to_owned(),
        }
    }
}
