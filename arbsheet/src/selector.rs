//! Multi-select language picker state
//!
//! A `Selector` owns a catalog, the set of selected codes and the current
//! filtered view. Selection is independent of the view: filtering never
//! drops a selected code, and "toggle all" only touches the visible subset.
//!
//! # Example
//!
//! ```ignore
//! use arbsheet::{Catalog, Selector};
//!
//! let mut selector = Selector::new(Catalog::builtin());
//! selector.set_filter("slo");           // Slovak, Slovenian
//! selector.toggle_all_visible();        // selects sk, sl
//! selector.set_filter("");
//! selector.toggle("fr")?;
//! assert_eq!(selector.selected_codes(), ["sk", "sl", "fr"]);
//! ```

use crate::catalog::{Catalog, Language};
use crate::error::{SheetError, SheetResult};
use tracing::debug;

pub struct Selector {
    catalog: Catalog,
    // Selection order is kept so templates list targets the way they were picked
    selected: Vec<String>,
    visible: Vec<Language>,
}

impl Selector {
    /// Create a selector with nothing selected and the whole catalog visible
    pub fn new(catalog: Catalog) -> Self {
        let visible = catalog.languages().to_vec();
        Selector {
            catalog,
            selected: Vec::new(),
            visible,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Pure filter over the catalog; does not change the stored view
    pub fn filter(&self, query: &str) -> Vec<Language> {
        self.catalog.filter(query)
    }

    /// Replace the visible view with the languages matching `query`
    pub fn set_filter(&mut self, query: &str) -> &[Language] {
        self.visible = self.catalog.filter(query);
        debug!(query, visible = self.visible.len(), "filter applied");
        &self.visible
    }

    pub fn visible(&self) -> &[Language] {
        &self.visible
    }

    pub fn selected_codes(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c == code)
    }

    /// Flip the selection state of one catalog code
    ///
    /// # Errors
    /// - `InvalidCode` if `code` is not in the catalog; selection is unchanged
    pub fn toggle(&mut self, code: &str) -> SheetResult<()> {
        if !self.catalog.contains(code) {
            return Err(SheetError::InvalidCode(code.to_string()));
        }
        if let Some(pos) = self.selected.iter().position(|c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code.to_string());
        }
        Ok(())
    }

    /// True iff `visible` is non-empty and every code in it is selected
    pub fn is_all_selected(&self, visible: &[Language]) -> bool {
        !visible.is_empty() && visible.iter().all(|l| self.is_selected(&l.code))
    }

    /// Select every language in `visible`, or deselect them all if they
    /// already are. Codes outside `visible` are left alone.
    pub fn toggle_all(&mut self, visible: &[Language]) {
        if self.is_all_selected(visible) {
            self.selected
                .retain(|code| !visible.iter().any(|l| &l.code == code));
        } else {
            for language in visible {
                if !self.is_selected(&language.code) {
                    self.selected.push(language.code.clone());
                }
            }
        }
    }

    /// `toggle_all` over the stored view
    pub fn toggle_all_visible(&mut self) {
        let visible = std::mem::take(&mut self.visible);
        self.toggle_all(&visible);
        self.visible = visible;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
