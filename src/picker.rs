use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Abstract key surface the picker understands. Mapping from the concrete
/// input device encoding (crossterm) lives in the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    First,
    Last,
    Confirm,
    Escape,
    Backspace,
    Char(char),
}

/// Event emitted by [`Picker::handle_key`].
///
/// `Hover` fires after every key that did not select, including keys the
/// active mode ignores, so a client can always resynchronize its preview.
/// Neither variant is emitted while the filtered set is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent<T> {
    Selected(T),
    Hover(T),
}

/// Generic fuzzy-searchable list selection component.
///
/// Decoupled from any concrete item type by two functions supplied at
/// construction: one renders an item's display line, one produces the text
/// the fuzzy matcher runs against.
pub struct Picker<T> {
    items: Vec<T>,
    filtered: Vec<T>,
    cursor: usize,
    search: String,
    searching: bool,
    rows: usize,
    clear_search_on_exit: bool,
    matcher: SkimMatcherV2,
    render_label: fn(&T) -> String,
    search_text: fn(&T) -> String,
}

impl<T: Clone> Picker<T> {
    pub fn new(render_label: fn(&T) -> String, search_text: fn(&T) -> String) -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            search: String::new(),
            searching: false,
            rows: 5,
            clear_search_on_exit: false,
            matcher: SkimMatcherV2::default(),
            render_label,
            search_text,
        }
    }

    /// Whether leaving search mode also clears the typed query.
    pub fn clear_search_on_exit(mut self, clear: bool) -> Self {
        self.clear_search_on_exit = clear;
        self
    }

    pub fn searching(mut self, searching: bool) -> Self {
        self.searching = searching;
        self
    }

    /// Replace the item set, reapplying the current search string so an
    /// active search survives the swap. The cursor resets to index 0; item
    /// identity is not tracked across a replace.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.apply_filter();
    }

    /// Replace the search string and re-derive the filtered set.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.apply_filter();
    }

    /// Set the number of rows available for item display. Header and border
    /// rows are the presentation layer's business, not counted here.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    /// Move the cursor by `delta`, clamped to the filtered range. Moving
    /// past either end is a no-op.
    pub fn move_cursor(&mut self, delta: isize) {
        let max = self.filtered.len().saturating_sub(1) as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The item currently under the cursor, if any.
    pub fn hovered(&self) -> Option<&T> {
        self.filtered.get(self.cursor)
    }

    #[cfg(test)]
    fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Fixed-lookbehind scrolling window: the contiguous run of filtered
    /// items to render plus the cursor's position inside it.
    ///
    /// The cursor is pinned to its own row while near the top, pinned one
    /// row below the top once scrolling begins, and pinned to the bottom row
    /// at the end of the list. The middle branch only fires for a stale
    /// cursor left beyond the end by a set operation.
    pub fn window(&self) -> (usize, Vec<String>) {
        let n = self.filtered.len();
        let (relative, slice) = if self.cursor < 2 {
            (self.cursor, &self.filtered[..self.rows.min(n)])
        } else if self.cursor >= n {
            let slice = &self.filtered[n.saturating_sub(self.rows + 1)..n];
            (slice.len().saturating_sub(1), slice)
        } else {
            let first = self.cursor - 1;
            let last = (self.cursor + self.rows.saturating_sub(1)).min(n);
            (1, &self.filtered[first..last])
        };
        (relative, slice.iter().map(|i| (self.render_label)(i)).collect())
    }

    /// Drive the two-mode key state machine. Unhandled keys are ignored,
    /// never an error.
    pub fn handle_key(&mut self, key: Key) -> Option<PickerEvent<T>> {
        if self.searching {
            match key {
                Key::Up => self.move_cursor(-1),
                Key::Down => self.move_cursor(1),
                Key::Confirm => return self.selected(),
                Key::Escape => {
                    self.searching = false;
                    if self.clear_search_on_exit && !self.search.is_empty() {
                        self.search.clear();
                        self.apply_filter();
                    }
                }
                Key::Backspace => {
                    if self.search.pop().is_some() {
                        self.apply_filter();
                    }
                }
                Key::Char(c) => {
                    self.search.push(c);
                    self.apply_filter();
                }
                Key::First | Key::Last => {}
            }
        } else {
            match key {
                Key::Up => self.move_cursor(-1),
                Key::Down => self.move_cursor(1),
                Key::First => self.cursor = 0,
                Key::Last => self.cursor = self.filtered.len().saturating_sub(1),
                Key::Confirm | Key::Char(' ') => return self.selected(),
                Key::Char('/') => self.searching = true,
                Key::Escape | Key::Backspace | Key::Char(_) => {}
            }
        }

        self.hovered().cloned().map(PickerEvent::Hover)
    }

    fn selected(&self) -> Option<PickerEvent<T>> {
        self.hovered().cloned().map(PickerEvent::Selected)
    }

    /// Recompute `filtered` from `items` and the current search string.
    ///
    /// The cursor must reset since the underlying list changes. An empty
    /// query short-circuits to the full set in original order; the matcher
    /// is only consulted for non-empty queries, best score first with the
    /// item index as a stable tie-break.
    fn apply_filter(&mut self) {
        self.cursor = 0;

        if self.search.is_empty() {
            self.filtered = self.items.clone();
            return;
        }

        let mut scored: Vec<(i64, usize)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.matcher
                    .fuzzy_match(&(self.search_text)(item), &self.search)
                    .map(|score| (score, index))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        self.filtered = scored
            .into_iter()
            .map(|(_, index)| self.items[index].clone())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(s: &String) -> String {
        s.clone()
    }

    fn picker_with(items: &[&str]) -> Picker<String> {
        let mut p = Picker::new(identity, identity);
        p.set_items(items.iter().map(|s| s.to_string()).collect());
        p
    }

    fn numbered(n: usize) -> Picker<String> {
        let mut p = Picker::new(identity, identity);
        p.set_items((0..n).map(|i| i.to_string()).collect());
        p
    }

    #[test]
    fn empty_search_keeps_original_order() {
        let mut p = picker_with(&["banana", "apple", "cherry"]);
        p.set_search("");
        assert_eq!(p.filtered_len(), 3);
        assert_eq!(p.hovered().map(String::as_str), Some("banana"));
    }

    #[test]
    fn search_filters_to_matches() {
        let mut p = picker_with(&["apple", "banana", "grape"]);
        p.set_search("ap");
        let (_, window) = p.window();
        assert!(window.iter().all(|l| l.contains('a') && l.contains('p')));
        assert!(window.contains(&"apple".to_string()));
        assert!(!window.contains(&"banana".to_string()));
    }

    #[test]
    fn search_resets_cursor() {
        let mut p = picker_with(&["aa", "ab", "ac"]);
        p.move_cursor(2);
        assert_eq!(p.cursor(), 2);
        p.set_search("a");
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn clearing_search_restores_all_items() {
        let mut p = picker_with(&["apple", "banana"]);
        p.set_search("app");
        assert_eq!(p.filtered_len(), 1);
        p.set_search("");
        assert_eq!(p.filtered_len(), 2);
    }

    #[test]
    fn set_items_reapplies_active_search() {
        let mut p = picker_with(&["apple", "banana"]);
        p.set_search("app");
        p.set_items(vec![
            "pineapple".to_string(),
            "banana".to_string(),
            "apple".to_string(),
        ]);
        assert_eq!(p.search(), "app");
        assert_eq!(p.filtered_len(), 2);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut p = picker_with(&["a", "b", "c"]);
        p.move_cursor(-1);
        assert_eq!(p.cursor(), 0);
        p.move_cursor(10);
        assert_eq!(p.cursor(), 2);
        p.move_cursor(1);
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn cursor_on_empty_list_stays_zero() {
        let mut p = picker_with(&[]);
        p.move_cursor(1);
        assert_eq!(p.cursor(), 0);
        assert!(p.hovered().is_none());
    }

    // Window policy: fixed-lookbehind scrolling.

    #[test]
    fn window_pins_cursor_near_top() {
        let mut p = numbered(10);
        p.set_rows(3);
        let (rel, items) = p.window();
        assert_eq!(rel, 0);
        assert_eq!(items, vec!["0", "1", "2"]);

        p.move_cursor(1);
        let (rel, items) = p.window();
        assert_eq!(rel, 1);
        assert_eq!(items, vec!["0", "1", "2"]);
    }

    #[test]
    fn window_interior_keeps_one_lookbehind_row() {
        let mut p = numbered(10);
        p.set_rows(3);
        p.set_cursor(5);
        let (rel, items) = p.window();
        assert_eq!(rel, 1);
        assert_eq!(items, vec!["4", "5", "6"]);
    }

    #[test]
    fn window_at_last_item_still_interior() {
        let mut p = numbered(10);
        p.set_rows(3);
        p.set_cursor(9);
        let (rel, items) = p.window();
        assert_eq!(rel, 1);
        assert_eq!(items, vec!["8", "9"]);
    }

    #[test]
    fn window_stale_cursor_pins_to_bottom() {
        let mut p = numbered(10);
        p.set_rows(3);
        p.set_cursor(12);
        let (rel, items) = p.window();
        assert_eq!(items, vec!["6", "7", "8", "9"]);
        assert_eq!(rel, 3);
    }

    #[test]
    fn window_smaller_list_than_budget() {
        let mut p = numbered(2);
        p.set_rows(5);
        let (rel, items) = p.window();
        assert_eq!(rel, 0);
        assert_eq!(items, vec!["0", "1"]);
    }

    #[test]
    fn window_empty_list() {
        let mut p = numbered(0);
        p.set_rows(5);
        let (rel, items) = p.window();
        assert_eq!(rel, 0);
        assert!(items.is_empty());
    }

    #[test]
    fn window_cursor_item_always_visible() {
        for n in [1usize, 2, 3, 5, 10, 25] {
            for rows in [2usize, 3, 8] {
                let mut p = numbered(n);
                p.set_rows(rows);
                for cursor in 0..n {
                    p.set_cursor(cursor);
                    let (rel, items) = p.window();
                    assert!(
                        items.len() <= rows + 1,
                        "n={n} rows={rows} cursor={cursor} len={}",
                        items.len()
                    );
                    assert_eq!(
                        items[rel],
                        cursor.to_string(),
                        "n={n} rows={rows} cursor={cursor}"
                    );
                }
            }
        }
    }

    // Key state machine.

    #[test]
    fn normal_mode_navigation() {
        let mut p = picker_with(&["a", "b", "c"]);
        p.handle_key(Key::Down);
        assert_eq!(p.cursor(), 1);
        p.handle_key(Key::Up);
        assert_eq!(p.cursor(), 0);
        p.handle_key(Key::Last);
        assert_eq!(p.cursor(), 2);
        p.handle_key(Key::First);
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn slash_enters_search_mode() {
        let mut p = picker_with(&["a"]);
        assert!(!p.is_searching());
        p.handle_key(Key::Char('/'));
        assert!(p.is_searching());
        assert_eq!(p.search(), "", "slash itself is not part of the query");
    }

    #[test]
    fn search_mode_chars_append_and_filter() {
        let mut p = picker_with(&["apple", "banana"]);
        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('a'));
        p.handle_key(Key::Char('p'));
        assert_eq!(p.search(), "ap");
        assert_eq!(p.filtered_len(), 1);
    }

    #[test]
    fn backspace_pops_and_refilters() {
        let mut p = picker_with(&["apple", "banana"]);
        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('x'));
        assert_eq!(p.filtered_len(), 0);
        p.handle_key(Key::Backspace);
        assert_eq!(p.filtered_len(), 2);
    }

    #[test]
    fn backspace_on_empty_search_is_noop() {
        let mut p = picker_with(&["a"]);
        p.handle_key(Key::Char('/'));
        let event = p.handle_key(Key::Backspace);
        assert_eq!(p.search(), "");
        assert_eq!(event, Some(PickerEvent::Hover("a".to_string())));
    }

    #[test]
    fn escape_retains_search_by_default() {
        let mut p = picker_with(&["apple", "banana"]);
        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('a'));
        p.handle_key(Key::Char('p'));
        p.handle_key(Key::Escape);
        assert!(!p.is_searching());
        assert_eq!(p.search(), "ap");
        assert_eq!(p.filtered_len(), 1);
    }

    #[test]
    fn escape_clears_search_when_configured() {
        let mut p = Picker::new(identity, identity).clear_search_on_exit(true);
        p.set_items(vec!["apple".to_string(), "banana".to_string()]);
        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('a'));
        p.handle_key(Key::Char('p'));
        p.handle_key(Key::Escape);
        assert!(!p.is_searching());
        assert_eq!(p.search(), "");
        assert_eq!(p.filtered_len(), 2);
    }

    #[test]
    fn escape_in_normal_mode_is_noop() {
        let mut p = picker_with(&["a", "b"]);
        let event = p.handle_key(Key::Escape);
        assert!(!p.is_searching());
        assert_eq!(event, Some(PickerEvent::Hover("a".to_string())));
    }

    #[test]
    fn confirm_selects_item_at_cursor() {
        let mut p = picker_with(&["a", "b", "c"]);
        p.handle_key(Key::Down);
        let event = p.handle_key(Key::Confirm);
        assert_eq!(event, Some(PickerEvent::Selected("b".to_string())));
    }

    #[test]
    fn space_selects_in_normal_mode_but_types_in_search() {
        let mut p = picker_with(&["a b", "c"]);
        let event = p.handle_key(Key::Char(' '));
        assert_eq!(event, Some(PickerEvent::Selected("a b".to_string())));

        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('a'));
        p.handle_key(Key::Char(' '));
        assert_eq!(p.search(), "a ");
    }

    #[test]
    fn unrecognized_key_still_hovers() {
        let mut p = picker_with(&["a", "b"]);
        let event = p.handle_key(Key::Char('z'));
        assert_eq!(event, Some(PickerEvent::Hover("a".to_string())));
    }

    #[test]
    fn no_events_on_empty_filtered_set() {
        let mut p = picker_with(&["apple"]);
        p.handle_key(Key::Char('/'));
        p.handle_key(Key::Char('z'));
        assert_eq!(p.filtered_len(), 0);
        assert_eq!(p.handle_key(Key::Confirm), None);
        assert_eq!(p.handle_key(Key::Down), None);
    }

    #[test]
    fn fuzzy_matches_through_search_text() {
        fn label(s: &String) -> String {
            s.clone()
        }
        fn upper(s: &String) -> String {
            format!("{s} hidden-tag")
        }
        let mut p: Picker<String> = Picker::new(label, upper);
        p.set_items(vec!["one".to_string(), "two".to_string()]);
        p.set_search("hidden");
        // Both items match via the search-text projection, not the label.
        assert_eq!(p.filtered_len(), 2);
    }
}
