//! Format registry for discovering and accessing colormap formats.

use std::collections::HashMap;
use std::path::Path;

use crate::format::formats::{CssFormat, JsonFormat, NpyFormat, PngFormat, PythonFormat};
use crate::format::traits::ColormapFormat;

/// Registry of available colormap formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn ColormapFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(JsonFormat));
        registry.register(Box::new(NpyFormat));
        registry.register(Box::new(PngFormat));
        registry.register(Box::new(PythonFormat));
        registry.register(Box::new(CssFormat));

        registry
    }

    /// Register a format implementation, replacing any with the same ID.
    pub fn register(&mut self, format: Box<dyn ColormapFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn ColormapFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find formats by file extension.
    pub fn by_extension(&self, ext: &str) -> Vec<&dyn ColormapFormat> {
        let ext = ext.trim_start_matches('.');
        self.formats
            .values()
            .filter(|f| f.extensions().iter().any(|e| *e == ext))
            .map(|f| f.as_ref())
            .collect()
    }

    /// Pick the format whose extension matches the end of the file name.
    ///
    /// The longest matching extension wins, so `map.cmap.json` beats a plain
    /// `json` match of some other format.
    pub fn for_path(&self, path: &Path) -> Option<&dyn ColormapFormat> {
        let file_name = path.file_name()?.to_str()?.to_ascii_lowercase();
        self.formats
            .values()
            .filter_map(|f| {
                f.extensions()
                    .iter()
                    .filter(|e| file_name.ends_with(&format!(".{}", e)))
                    .map(|e| e.len())
                    .max()
                    .map(|len| (len, f.as_ref()))
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, f)| f)
    }

    /// Get all registered formats.
    pub fn all(&self) -> Vec<&dyn ColormapFormat> {
        let mut all: Vec<&dyn ColormapFormat> = self.formats.values().map(|f| f.as_ref()).collect();
        all.sort_by_key(|f| f.id());
        all
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get the native JSON format.
    pub fn native(&self) -> &dyn ColormapFormat {
        self.get("json")
            .expect("Native format should always be registered")
    }

    /// Get formats that can be imported.
    pub fn importable(&self) -> Vec<&dyn ColormapFormat> {
        self.all()
            .into_iter()
            .filter(|f| f.supports_import())
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
