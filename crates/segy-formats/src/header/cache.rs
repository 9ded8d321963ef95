//! Memoization of compiled layouts

use crate::datatypes::ByteOrder;
use crate::error::Result;
use crate::header::layout::{HeaderLayout, compile};
use crate::header::schema::{FieldSpec, HeaderSchema};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct CachedLayout {
    width: usize,
    fields: Vec<FieldSpec>,
    layout: Arc<HeaderLayout>,
}

impl CachedLayout {
    fn compiled_from(&self, schema: &HeaderSchema<'_>) -> bool {
        self.width == schema.width && self.fields == schema.fields
    }
}

/// Cache of compiled layouts keyed by schema and byte order
///
/// A layout depends only on its schema and byte order, so one compiled
/// layout can serve every file that shares them. Schemas are matched on
/// their width and field table as well as their name, so two different
/// tables sharing a name get separate layouts.
#[derive(Debug, Default)]
pub struct LayoutCache {
    layouts: HashMap<(&'static str, ByteOrder), Vec<CachedLayout>>,
}

impl LayoutCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached layout or compile and cache it
    pub fn get_or_compile(
        &mut self,
        schema: &HeaderSchema<'_>,
        order: ByteOrder,
    ) -> Result<Arc<HeaderLayout>> {
        let entries = self.layouts.entry((schema.name, order)).or_default();
        if let Some(cached) = entries.iter().find(|c| c.compiled_from(schema)) {
            return Ok(Arc::clone(&cached.layout));
        }
        let layout = Arc::new(compile(schema, order)?);
        entries.push(CachedLayout {
            width: schema.width,
            fields: schema.fields.to_vec(),
            layout: Arc::clone(&layout),
        });
        Ok(layout)
    }

    /// Number of cached layouts
    pub fn len(&self) -> usize {
        self.layouts.values().map(Vec::len).sum()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.layouts.values().all(Vec::is_empty)
    }
}
