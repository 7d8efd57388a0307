//! In-memory catalog of classified entries with a cached filtered view.

use std::collections::HashMap;

use super::{AssetKind, CatalogEntry, FilterState, FilterUpdate};
use crate::classifier::RawEntry;

/// Holds one kind of asset and the current filter.
///
/// The filtered view is recomputed eagerly on every load or filter change, so
/// `current_view` is a cheap read.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    kind: AssetKind,
    entries: Vec<CatalogEntry>,
    index_by_id: HashMap<String, usize>,
    filter: FilterState,
    /// Indices into `entries` that pass `filter`, in ingestion order.
    visible: Vec<usize>,
}

impl CatalogStore {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index_by_id: HashMap::new(),
            filter: FilterState::default(),
            visible: Vec::new(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Replace the whole catalog. Entries are classified once, here.
    ///
    /// Ids are positional, so an id issued by a previous load may name a
    /// different entry afterwards. Callers holding selections must map them
    /// by entry, e.g. through [`CatalogStore::find_by_name`].
    pub fn load(&mut self, raw: impl IntoIterator<Item = RawEntry>) {
        let kind = self.kind;
        let entries: Vec<CatalogEntry> = raw
            .into_iter()
            .enumerate()
            .map(|(index, raw)| CatalogEntry::from_raw(kind, index, raw))
            .collect();

        self.index_by_id = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        self.entries = entries;
        self.visible.clear();
        self.recompute();

        tracing::info!(
            "Loaded {} {} entries ({} visible)",
            self.entries.len(),
            self.kind,
            self.visible.len()
        );
    }

    /// Merge a partial filter and recompute the view.
    pub fn set_filter(&mut self, update: &FilterUpdate) {
        self.filter.apply(update);
        self.recompute();
        tracing::debug!(
            "Filter for {} is now {:?} ({} visible)",
            self.kind,
            self.filter,
            self.visible.len()
        );
    }

    /// Reset the filter to admit everything.
    pub fn reset_filter(&mut self) {
        self.filter = FilterState::default();
        self.recompute();
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Entries passing the current filter, in ingestion order.
    pub fn current_view(&self) -> Vec<&CatalogEntry> {
        self.visible.iter().map(|&i| &self.entries[i]).collect()
    }

    /// All entries in ingestion order, ignoring the filter.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index_by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Ingestion position of an id, used to order selections.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Look up an entry by its display name.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.display_name == name)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn recompute(&mut self) {
        let filter = &self.filter;
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| filter.matches(e))
            .map(|(i, _)| i)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryFilter, TypeFilter, VersionFilter};

    fn scenario_store() -> CatalogStore {
        let mut store = CatalogStore::new(AssetKind::Model);
        store.load(vec![
            RawEntry::new("RealismEngine"),
            RawEntry::new("AnythingXL_v5"),
            RawEntry::new("CounterfeitV3-inpainting"),
        ]);
        store
    }

    fn view_names(store: &CatalogStore) -> Vec<&str> {
        store
            .current_view()
            .into_iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    #[test]
    fn test_load_preserves_ingestion_order() {
        let store = scenario_store();
        assert_eq!(
            view_names(&store),
            vec!["RealismEngine", "AnythingXL_v5", "CounterfeitV3-inpainting"]
        );
        assert_eq!(store.ids().collect::<Vec<_>>(), vec!["model_0", "model_1", "model_2"]);
    }

    #[test]
    fn test_search_xl_returns_only_sdxl_entry() {
        let mut store = scenario_store();
        store.set_filter(&FilterUpdate::search("xl"));
        assert_eq!(view_names(&store), vec!["AnythingXL_v5"]);
    }

    #[test]
    fn test_set_filter_is_idempotent() {
        let mut store = scenario_store();
        let update = FilterUpdate::search("e").with_category(CategoryFilter::Realistic);
        store.set_filter(&update);
        let first: Vec<CatalogEntry> = store.current_view().into_iter().cloned().collect();
        store.set_filter(&update);
        let second: Vec<CatalogEntry> = store.current_view().into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(store.current_view(), store.current_view());
    }

    #[test]
    fn test_combined_predicates() {
        let mut store = scenario_store();
        store.set_filter(&FilterUpdate::default().with_type(TypeFilter::Inpainting));
        assert_eq!(view_names(&store), vec!["CounterfeitV3-inpainting"]);

        store.set_filter(&FilterUpdate::default().with_version(VersionFilter::Sdxl));
        assert!(store.current_view().is_empty());

        store.reset_filter();
        assert_eq!(store.visible_len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let mut store = scenario_store();
        store.set_filter(&FilterUpdate::default().with_category(CategoryFilter::Anime));
        assert_eq!(view_names(&store), vec!["CounterfeitV3-inpainting"]);
    }

    #[test]
    fn test_reload_keeps_filter_and_replaces_entries() {
        let mut store = scenario_store();
        store.set_filter(&FilterUpdate::search("xl"));
        store.load(vec![RawEntry::new("PonyXL"), RawEntry::new("DreamShaper")]);
        assert_eq!(store.len(), 2);
        assert_eq!(view_names(&store), vec!["PonyXL"]);
        assert!(!store.contains("model_2"));
        assert_eq!(store.get("model_0").unwrap().display_name, "PonyXL");
    }

    #[test]
    fn test_filtering_never_mutates_entries() {
        let mut store = scenario_store();
        let before = store.entries().to_vec();
        store.set_filter(&FilterUpdate::search("zzz"));
        assert!(store.current_view().is_empty());
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn test_lookup_helpers() {
        let store = scenario_store();
        assert_eq!(store.position("model_1"), Some(1));
        assert_eq!(store.find_by_name("AnythingXL_v5").unwrap().id, "model_1");
        assert!(store.find_by_name("missing").is_none());
    }
}
