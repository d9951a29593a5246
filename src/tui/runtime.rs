//! Appliance picker state.

use crate::catalog::Catalog;
use crate::config::SelectionConfig;
use crate::engine::{Evaluation, RowStatus, SizingPolicy, evaluate};
use crate::rules::RuleSet;
use crate::selection::Selection;

/// TUI application state.
///
/// The selection is the only mutable input; `evaluation` is recomputed after
/// every change.
pub struct App {
    catalog: Catalog,
    rules: RuleSet,
    policy: SizingPolicy,
    selection: Selection,
    /// Snapshot rendered by the layout.
    pub evaluation: Evaluation,
    /// Index of the highlighted catalog row.
    pub cursor: usize,
    /// Name of the loaded preset, or the selection file label.
    pub preset_name: String,
    /// One-line feedback for the last action.
    pub status: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates an app over the built-in catalog and rules.
    pub fn new(selection: Selection, label: &str, policy: SizingPolicy) -> Self {
        Self::with_tables(
            Catalog::builtin().clone(),
            RuleSet::builtin().clone(),
            policy,
            selection,
            label,
        )
    }

    pub fn with_tables(
        catalog: Catalog,
        rules: RuleSet,
        policy: SizingPolicy,
        selection: Selection,
        label: &str,
    ) -> Self {
        let evaluation = evaluate(&selection, &catalog, &rules, &policy);
        Self {
            catalog,
            rules,
            policy,
            selection,
            evaluation,
            cursor: 0,
            preset_name: label.to_string(),
            status: None,
            quit: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The highlighted row, if the catalog is non-empty.
    pub fn current_row(&self) -> Option<&RowStatus> {
        self.evaluation.rows.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.evaluation.rows.len() {
            self.cursor += 1;
        }
    }

    /// Adds one unit of the highlighted appliance; a blocked addition only
    /// sets the status line.
    pub fn add(&mut self) {
        let Some(id) = self.current_id() else {
            return;
        };
        match self.selection.increment(&id, &self.catalog, &self.rules) {
            Ok(_) => self.status = None,
            Err(e) => self.status = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn remove(&mut self) {
        let Some(id) = self.current_id() else {
            return;
        };
        self.selection.decrement(&id);
        self.status = None;
        self.refresh();
    }

    pub fn toggle(&mut self) {
        let Some(id) = self.current_id() else {
            return;
        };
        match self.selection.toggle(&id, &self.catalog, &self.rules) {
            Ok(_) => self.status = None,
            Err(e) => self.status = Some(e.to_string()),
        }
        self.refresh();
    }

    /// Drops the whole selection.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.status = Some("Selection cleared".to_string());
        self.refresh();
    }

    /// Replaces the selection with a preset. Unknown presets leave it as is.
    pub fn switch_preset(&mut self, name: &str) {
        let built = SelectionConfig::from_preset(name)
            .and_then(|cfg| cfg.build(&self.catalog, &self.rules));
        match built {
            Ok(selection) => {
                self.selection = selection;
                self.preset_name = name.to_string();
                self.status = Some(format!("Loaded preset {name}"));
                self.refresh();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Number of distinct selected entries, catalog and custom.
    pub fn selected_count(&self) -> usize {
        self.evaluation.lines.len()
    }

    /// Selected heavy-duty appliances.
    pub fn heavy_duty_count(&self) -> usize {
        self.selection.selected_heavy_duty_ids(&self.catalog).len()
    }

    /// Required over recommended capacity; 1.0 beyond the table.
    pub fn capacity_ratio(&self) -> f64 {
        let sizing = &self.evaluation.sizing;
        match sizing.recommended_kva {
            Some(kva) if kva > 0.0 => (sizing.required_kva / kva).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    fn current_id(&self) -> Option<String> {
        self.current_row().map(|row| row.id.clone())
    }

    fn refresh(&mut self) {
        self.evaluation = evaluate(&self.selection, &self.catalog, &self.rules, &self.policy);
    }
}
