//! Genre selection drawer: a button that opens a categorized list, and a
//! selection that reports the chosen value and closes the list. No validation
//! and nothing async.

use crate::{
    app_lib::Translate,
    features::genres::{GenreCategory, GenreOption},
};

pub struct GenreSelect<F: FnMut(&str)> {
    categories: Vec<GenreCategory>,
    selected: Option<String>,
    disabled: bool,
    open: bool,
    on_change: F,
}

impl<F: FnMut(&str)> GenreSelect<F> {
    pub fn new(categories: Vec<GenreCategory>, selected: Option<String>, on_change: F) -> Self {
        Self {
            categories,
            selected,
            disabled: false,
            open: false,
            on_change,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        if disabled {
            self.open = false;
        }
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the drawer unless the widget is disabled. Returns whether it is open.
    pub fn open(&mut self) -> bool {
        if !self.disabled {
            self.open = true;
        }
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn categories(&self) -> &[GenreCategory] {
        &self.categories
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, option: &GenreOption) -> bool {
        self.selected.as_deref() == Some(option.value.as_str())
    }

    /// Reports `value` to the callback and closes the drawer. Values that are
    /// not in any category are ignored.
    pub fn select(&mut self, value: &str) -> bool {
        let known = self
            .categories
            .iter()
            .flat_map(|category| category.options.iter())
            .any(|option| option.value == value);
        if !known || !self.open {
            return false;
        }
        self.selected = Some(value.to_string());
        (self.on_change)(value);
        self.close();
        true
    }

    pub fn button_label(&self, t: &impl Translate) -> String {
        match self.selected.as_deref() {
            Some(value) => t.t_with("selected", &[("value", value)]),
            None => t.t("btnSelectGenre"),
        }
    }

    pub fn title(&self, t: &impl Translate) -> String {
        t.t("drawerTitleGenre")
    }
}
