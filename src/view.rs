//! View model for the journal screen.
//!
//! Rows are appended as entries are rendered and are only ever hidden by
//! the search filter, never detached by it.

use crate::entry::Entry;
use crate::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Textarea,
    Search,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Textarea => Focus::Search,
            Focus::Search => Focus::List,
            Focus::List => Focus::Textarea,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Textarea => Focus::List,
            Focus::Search => Focus::Textarea,
            Focus::List => Focus::Search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entry_id: i64,
    pub content: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct JournalView {
    rows: Vec<Row>,
    pub textarea: TextInput,
    pub search: TextInput,
    pub focus: Focus,
    pub no_results: bool,
    pub count_text: String,
    pub status: Option<String>,
    selected: usize,
}

impl JournalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row for `entry`. Entries without text are not rendered.
    pub fn render_entry(&mut self, entry: &Entry) -> bool {
        if !entry.is_renderable() {
            return false;
        }
        self.rows.push(Row {
            entry_id: entry.id,
            content: entry.display_line(),
            visible: true,
        });
        true
    }

    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        self.clamp_selection();
        Some(row)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().filter(|(_, r)| r.visible)
    }

    pub fn update_count(&mut self, count: usize) {
        self.count_text = count_line(count);
    }

    /// Case-insensitive substring filter over every row's text.
    pub fn apply_search(&mut self, keyword: &str) {
        let keyword = keyword.to_lowercase();
        let mut any_visible = false;
        for row in &mut self.rows {
            row.visible = row.content.to_lowercase().contains(&keyword);
            any_visible |= row.visible;
        }
        self.no_results = !any_visible;
        self.clamp_selection();
    }

    /// Index into `rows()` of the selected visible row.
    pub fn selected_row(&self) -> Option<usize> {
        self.visible_rows().nth(self.selected).map(|(i, _)| i)
    }

    /// Position of the selection among the visible rows.
    pub fn selected_position(&self) -> Option<usize> {
        self.selected_row().map(|_| self.selected)
    }

    pub fn select_next(&mut self) {
        let visible = self.visible_rows().count();
        if self.selected + 1 < visible {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_rows().count();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }
}

pub fn count_line(count: usize) -> String {
    format!(
        "You have {} entr{} logged.",
        count,
        if count == 1 { "y" } else { "ies" }
    )
}
