use crate::prelude::Surface;
use crate::view::Handle;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory stand-in for the page, used natively and in tests.
///
/// Only handles the surface was created with accept writes; anything else
/// is dropped, the same way a missing element is in the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    present: BTreeSet<Handle>,
    texts: BTreeMap<Handle, String>,
    widths: BTreeMap<Handle, String>,
    writes: usize,
}

impl MemorySurface {
    /// A surface exposing every dashboard handle.
    pub fn new() -> Self {
        Self::with_handles(Handle::ALL)
    }

    pub fn with_handles(handles: impl IntoIterator<Item = Handle>) -> Self {
        Self {
            present: handles.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn text(&self, handle: Handle) -> Option<&str> {
        self.texts.get(&handle).map(String::as_str)
    }

    pub fn width(&self, handle: Handle) -> Option<&str> {
        self.widths.get(&handle).map(String::as_str)
    }

    /// Number of accepted writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// `id: value` lines for every populated handle, in handle order.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for handle in &self.present {
            if let Some(text) = self.texts.get(handle) {
                lines.push(format!("{handle}: {text}"));
            }
            if let Some(width) = self.widths.get(handle) {
                lines.push(format!("{handle} (width): {width}"));
            }
        }
        lines
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, handle: Handle, text: &str) {
        if self.present.contains(&handle) {
            self.texts.insert(handle, text.to_string());
            self.writes += 1;
        }
    }

    fn set_width(&mut self, handle: Handle, width: &str) {
        if self.present.contains(&handle) {
            self.widths.insert(handle, width.to_string());
            self.writes += 1;
        }
    }
}
