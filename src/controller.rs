//! Wires user interactions to the entry store and reflects the store into
//! the journal view.

use crate::entry::Entry;
use crate::entry_store::EntryStore;
use crate::error::{Error, Result};
use crate::keymap::{map_key, EditOp, Intent};
use crate::input::TextInput;
use crate::view::{Focus, JournalView};
use async_trait::async_trait;
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const EXPORT_FILENAME: &str = "dev-journal.txt";
pub const EXPORT_MIME: &str = "text/plain";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this entry?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

/// Dialogs and downloads supplied by the environment hosting the journal.
#[async_trait(?Send)]
pub trait Host {
    /// Blocking yes/no prompt. Resolves once the user answers.
    async fn confirm(&mut self, message: &str) -> Result<bool>;

    async fn alert(&mut self, message: &str) -> Result<()>;

    /// Hands the export to the user and returns where it ended up.
    fn download(&mut self, file: &ExportFile) -> Result<PathBuf>;
}

pub struct ViewController {
    store: EntryStore,
    view: JournalView,
}

impl ViewController {
    pub fn new(store: EntryStore) -> Self {
        let mut view = JournalView::new();
        view.update_count(store.count());
        ViewController { store, view }
    }

    /// Renders every stored entry and focuses the text field. There is no
    /// clear-before-render step, so calling this twice duplicates rows.
    pub fn load(&mut self) {
        for entry in self.store.entries() {
            self.view.render_entry(entry);
        }
        self.view.update_count(self.store.count());
        self.view.focus = Focus::Textarea;
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn view(&self) -> &JournalView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut JournalView {
        &mut self.view
    }

    pub fn submit(&mut self) -> Option<Entry> {
        let text = self.view.textarea.value().to_string();
        let before = self.store.count();

        let entry = match self.store.add(&text) {
            Ok(entry) => entry?,
            Err(e) => {
                warn!(error = %e, "failed to persist new entry");
                self.view.status = Some(format!("Failed to save journal: {e}"));
                self.store.entries().get(before)?.clone()
            }
        };

        self.view.render_entry(&entry);
        self.view.textarea.clear();
        self.view.update_count(self.store.count());
        Some(entry)
    }

    /// Deletes the row at `index` in the view once the host confirms.
    pub async fn delete_row<H: Host>(&mut self, index: usize, host: &mut H) -> Result<bool> {
        if index >= self.view.rows().len() {
            return Ok(false);
        }
        if !host.confirm(DELETE_PROMPT).await? {
            debug!(index, "deletion cancelled");
            return Ok(false);
        }

        let Some(row) = self.view.remove_row(index) else {
            return Ok(false);
        };
        if let Err(e) = self.store.remove(row.entry_id) {
            warn!(error = %e, "failed to persist deletion");
            self.view.status = Some(format!("Failed to save journal: {e}"));
        }
        self.view.update_count(self.store.count());
        Ok(true)
    }

    pub async fn delete_selected<H: Host>(&mut self, host: &mut H) -> Result<bool> {
        match self.view.selected_row() {
            Some(index) => self.delete_row(index, host).await,
            None => Ok(false),
        }
    }

    pub fn set_search(&mut self, keyword: &str) {
        self.view.search.set_value(keyword);
        self.search_changed();
    }

    fn search_changed(&mut self) {
        let keyword = self.view.search.value().to_string();
        self.view.apply_search(&keyword);
    }

    pub async fn export<H: Host>(&mut self, host: &mut H) -> Result<()> {
        let contents = match self.store.export_text() {
            Ok(contents) => contents,
            Err(Error::NothingToExport) => {
                return host.alert(&Error::NothingToExport.to_string()).await;
            }
            Err(e) => return Err(e),
        };

        let file = ExportFile {
            filename: EXPORT_FILENAME,
            mime: EXPORT_MIME,
            contents,
        };
        match host.download(&file) {
            Ok(path) => {
                info!(path = %path.display(), "exported journal");
                self.view.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.view.status = Some(format!("Export failed: {e}"));
            }
        }
        Ok(())
    }

    /// Applies one key press. Returns `false` when the user asked to quit.
    pub async fn handle_key<H: Host>(&mut self, key: KeyEvent, host: &mut H) -> Result<bool> {
        let Some(intent) = map_key(self.view.focus, key) else {
            return Ok(true);
        };

        match intent {
            Intent::Quit => return Ok(false),
            Intent::Submit => {
                self.submit();
            }
            Intent::Export => self.export(host).await?,
            Intent::DeleteSelected => {
                self.delete_selected(host).await?;
            }
            Intent::FocusNext => self.view.focus = self.view.focus.next(),
            Intent::FocusPrev => self.view.focus = self.view.focus.prev(),
            Intent::SelectNext => self.view.select_next(),
            Intent::SelectPrev => self.view.select_prev(),
            Intent::Edit(op) => self.edit(op),
        }
        Ok(true)
    }

    fn edit(&mut self, op: EditOp) {
        match self.view.focus {
            Focus::Textarea => apply_edit(&mut self.view.textarea, op),
            Focus::Search => {
                let before = self.view.search.value().to_string();
                apply_edit(&mut self.view.search, op);
                if self.view.search.value() != before {
                    self.search_changed();
                }
            }
            Focus::List => {}
        }
    }
}

fn apply_edit(input: &mut TextInput, op: EditOp) {
    match op {
        EditOp::Insert(c) => input.insert(c),
        EditOp::Newline => input.insert('\n'),
        EditOp::Backspace => {
            input.backspace();
        }
        EditOp::Delete => {
            input.delete();
        }
        EditOp::Left => input.move_left(),
        EditOp::Right => input.move_right(),
        EditOp::Up => input.move_up(),
        EditOp::Down => input.move_down(),
        EditOp::Home => input.move_home(),
        EditOp::End => input.move_end(),
    }
}
