use crate::config::AppConfig;
use crate::picker::{Picker, PickerEvent};
use crate::preview;
use crate::theme::{resolve_theme, ThemeColors};
use crate::tree::{Entry, PathTree};

/// Content of the preview pane.
#[derive(Debug, Default)]
pub struct PreviewState {
    /// Path being previewed; empty when nothing is.
    pub path: String,
    pub content: String,
}

/// Main application state: the tree, the picker over its flattened entries,
/// and the preview of the hovered file.
pub struct App {
    pub tree: PathTree,
    pub picker: Picker<Entry>,
    pub hovered: Option<Entry>,
    pub preview: PreviewState,
    pub theme: ThemeColors,
    pub should_quit: bool,
    /// Set on confirmation; printed to stdout by the caller after restore.
    pub selected_path: Option<String>,
    preview_enabled: bool,
    preview_command: Option<String>,
    preview_width: u16,
}

impl App {
    /// Create a new App from the raw input paths.
    pub fn new<S: AsRef<str>>(paths: &[S], config: &AppConfig) -> Self {
        let mut tree = PathTree::build(paths);
        if config.flatten() {
            tree.flatten();
        }

        let render: fn(&Entry) -> String = if config.use_icons() {
            Entry::display
        } else {
            Entry::display_ascii
        };
        let mut picker = Picker::new(render, Entry::search_text)
            .clear_search_on_exit(config.clear_search_on_exit())
            .searching(config.start_in_search());
        picker.set_items(tree.entries());
        let hovered = picker.hovered().cloned();

        let mut app = Self {
            tree,
            picker,
            hovered,
            preview: PreviewState::default(),
            theme: resolve_theme(&config.theme),
            should_quit: false,
            selected_path: None,
            preview_enabled: config.preview_enabled(),
            preview_command: config.preview_command().map(str::to_string),
            preview_width: 80,
        };
        app.refresh_preview();
        app
    }

    /// Quit the application without a selection.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    /// React to a viewport resize: recompute the picker's row budget and the
    /// preview width, then re-render the preview at the new width.
    pub fn resize(&mut self, width: u16, height: u16) {
        // 2 border rows + 1 header row are presentation overhead.
        self.picker.set_rows(height.saturating_sub(3) as usize);
        self.preview_width = if self.preview_enabled {
            width / 2
        } else {
            width
        };
        self.refresh_preview();
    }

    /// Expand the hovered entry's backing node.
    pub fn expand_hovered(&mut self) {
        if let Some(entry) = &self.hovered {
            self.tree.expand(entry.node);
            self.refresh_items();
        }
    }

    /// Collapse the hovered entry's backing node.
    pub fn collapse_hovered(&mut self) {
        if let Some(entry) = &self.hovered {
            self.tree.collapse(entry.node);
            self.refresh_items();
        }
    }

    /// Expand the whole subtree below the hovered entry.
    pub fn expand_all_hovered(&mut self) {
        if let Some(entry) = &self.hovered {
            self.tree.expand_all(entry.node);
            self.refresh_items();
        }
    }

    /// Collapse the whole subtree below the hovered entry.
    pub fn collapse_all_hovered(&mut self) {
        if let Some(entry) = &self.hovered {
            self.tree.collapse_all(entry.node);
            self.refresh_items();
        }
    }

    /// Re-derive the flattened entry list after a tree mutation. The picker
    /// reapplies any active search; the cursor resets, so the hovered entry
    /// is resynced from the picker rather than assumed stable.
    fn refresh_items(&mut self) {
        self.picker.set_items(self.tree.entries());
        self.hovered = self.picker.hovered().cloned();
        self.refresh_preview();
    }

    /// React to a picker event.
    pub fn handle_picker_event(&mut self, event: PickerEvent<Entry>) {
        match event {
            PickerEvent::Selected(entry) => {
                self.selected_path = Some(entry.full_path);
                self.should_quit = true;
            }
            PickerEvent::Hover(entry) => {
                self.hovered = Some(entry);
                self.refresh_preview();
            }
        }
    }

    /// Re-render the preview for the hovered entry. Only files get a
    /// preview; folders show the placeholder.
    fn refresh_preview(&mut self) {
        if !self.preview_enabled {
            return;
        }
        match &self.hovered {
            Some(entry) if entry.is_file => {
                if self.preview.path != entry.full_path {
                    self.preview.path = entry.full_path.clone();
                    self.preview.content = preview::render(
                        &entry.full_path,
                        self.preview_width,
                        self.preview_command.as_deref(),
                    );
                }
            }
            _ => {
                self.preview.path.clear();
                self.preview.content = preview::NO_SELECTION.to_string();
            }
        }
    }
}
