// Selection/scroll cursor and the filtered list shared by the list panels

use crate::models::{ContainerSnapshot, ImageSnapshot};

/// Items that can be narrowed by a case-insensitive substring filter.
pub trait Filterable {
    /// `needle` is already lowercased and non-empty.
    fn matches_filter(&self, needle: &str) -> bool;
}

impl Filterable for ContainerSnapshot {
    fn matches_filter(&self, needle: &str) -> bool {
        self.matches(needle)
    }
}

impl Filterable for ImageSnapshot {
    fn matches_filter(&self, needle: &str) -> bool {
        self.matches(needle)
    }
}

/// Keeps `selected < len` and `offset <= selected < offset + visible`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    selected: usize,
    offset: usize,
}

impl ListCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pull the cursor back inside a list of `len` items shown `visible` at a time.
    pub fn clamp(&mut self, len: usize, visible: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.min(len - 1);
        let visible = visible.max(1);
        // Don't leave blank rows below the last item when the list shrank.
        self.offset = self.offset.min(len.saturating_sub(visible));
        self.follow(visible);
    }

    pub fn move_by(&mut self, delta: isize, len: usize, visible: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
        self.follow(visible.max(1));
    }

    /// Scroll just enough to keep the selection on screen.
    fn follow(&mut self, visible: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }

    /// First row to draw when only `visible` rows fit, starting from the
    /// stored offset but never hiding the selection.
    pub fn window_start(&self, visible: usize) -> usize {
        let visible = visible.max(1);
        if self.selected < self.offset {
            self.selected
        } else if self.selected >= self.offset + visible {
            self.selected + 1 - visible
        } else {
            self.offset
        }
    }
}

/// A replaceable item list viewed through a filter and a cursor.
///
/// The filter is applied on every read; the stored items are never narrowed.
#[derive(Debug, Clone)]
pub struct FilteredList<T> {
    items: Vec<T>,
    filter: String,
    cursor: ListCursor,
    visible_rows: usize,
}

impl<T> Default for FilteredList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: String::new(),
            cursor: ListCursor::default(),
            visible_rows: 1,
        }
    }
}

impl<T: Filterable> FilteredList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items and re-clamp the cursor.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.reclamp();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutate items in place; identity changes must go through [`set_items`](Self::set_items).
    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Set the filter and move the cursor back to the top.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.cursor.reset();
    }

    /// Items passing the current filter, in list order.
    pub fn filtered(&self) -> Vec<&T> {
        if self.filter.is_empty() {
            return self.items.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches_filter(&needle))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.filtered_len();
        self.cursor.move_by(delta, len, self.visible_rows);
    }

    /// The selected item after filtering; `None` iff nothing passes the filter.
    pub fn selected(&self) -> Option<&T> {
        self.filtered().get(self.cursor.selected()).copied()
    }

    pub fn cursor(&self) -> ListCursor {
        self.cursor
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.reclamp();
    }

    fn reclamp(&mut self) {
        let len = self.filtered_len();
        self.cursor.clamp(len, self.visible_rows);
    }
}
