//! irlink_options: Linker configuration.
//!
//! Options are read from a JSON object with camelCase keys. Every field is
//! optional; accessors supply the defaults.
//!
//! ```json
//! {
//!   "maxContainmentDepth": 32,
//!   "excludedModules": ["<stdlib>"],
//!   "recordSkippedAccessors": false
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Default limit on how many enclosing classes are followed when looking
/// for the top-level owner of a declaration.
pub const DEFAULT_MAX_CONTAINMENT_DEPTH: u32 = 64;

/// Options controlling dependency collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    /// Walking the containment chain beyond this depth is reported as an
    /// internal error.
    pub max_containment_depth: Option<u32>,
    /// Module names (as rendered by the resolver, e.g. `<stdlib>`) whose
    /// declarations are dropped from the finished index.
    pub excluded_modules: Option<Vec<String>>,
    /// Keep the list of synthesized accessors that were skipped.
    pub record_skipped_accessors: Option<bool>,
}

impl LinkOptions {
    pub fn max_containment_depth(&self) -> u32 {
        self.max_containment_depth
            .unwrap_or(DEFAULT_MAX_CONTAINMENT_DEPTH)
    }

    pub fn excluded_modules(&self) -> &[String] {
        self.excluded_modules.as_deref().unwrap_or(&[])
    }

    pub fn is_excluded(&self, module_name: &str) -> bool {
        self.excluded_modules().iter().any(|m| m == module_name)
    }

    pub fn record_skipped_accessors(&self) -> bool {
        self.record_skipped_accessors.unwrap_or(true)
    }
}

/// Parse options from a JSON string.
pub fn parse_link_options(content: &str) -> Result<LinkOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse options from a JSON file.
pub fn parse_link_options_file(path: &str) -> Result<LinkOptions, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let options = parse_link_options(&content)?;
    Ok(options)
}
