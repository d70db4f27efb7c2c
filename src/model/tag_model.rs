use crate::model::list::{ListChange, ObservableList};
use crate::signal::Signal;
use std::cell::RefCell;

/// One row of the tag checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckableTag {
    pub name: String,
    pub checked: bool,
}

/// Every known tag, each checked when the owning task carries it.
///
/// Mutators take `&self` and drop their borrow of the rows before emitting,
/// so listeners are free to read the model back.
#[derive(Debug, Default)]
pub struct CheckableTagModel {
    rows: RefCell<Vec<CheckableTag>>,
    changes: Signal<ListChange>,
}

impl CheckableTagModel {
    pub fn new(all_tags: &[String], checked_tags: &[String]) -> Self {
        Self {
            rows: RefCell::new(Self::build_rows(all_tags, checked_tags)),
            changes: Signal::new(),
        }
    }

    fn build_rows(all_tags: &[String], checked_tags: &[String]) -> Vec<CheckableTag> {
        let mut rows: Vec<CheckableTag> = Vec::with_capacity(all_tags.len());
        for name in all_tags {
            if rows.iter().any(|row| &row.name == name) {
                continue;
            }
            rows.push(CheckableTag {
                name: name.clone(),
                checked: checked_tags.contains(name),
            });
        }
        rows
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.rows.borrow().iter().position(|row| row.name == name)
    }

    /// Insert a tag at its sorted position. Returns the new row, or None if the
    /// tag already exists.
    pub fn insert_tag(&self, name: &str, checked: bool) -> Option<usize> {
        if self.position(name).is_some() {
            return None;
        }

        let row = {
            let rows = self.rows.borrow();
            rows.iter()
                .position(|existing| existing.name.as_str() > name)
                .unwrap_or(rows.len())
        };

        self.changes.emit(&ListChange::AboutToInsert(row..row + 1));
        self.rows.borrow_mut().insert(
            row,
            CheckableTag {
                name: name.to_string(),
                checked,
            },
        );
        self.changes.emit(&ListChange::Inserted(row..row + 1));
        Some(row)
    }

    pub fn remove_tag(&self, name: &str) -> bool {
        let Some(row) = self.position(name) else {
            return false;
        };

        self.changes.emit(&ListChange::AboutToRemove(row..row + 1));
        self.rows.borrow_mut().remove(row);
        self.changes.emit(&ListChange::Removed(row..row + 1));
        true
    }

    pub fn set_checked(&self, row: usize, checked: bool) {
        {
            let mut rows = self.rows.borrow_mut();
            match rows.get_mut(row) {
                Some(tag) if tag.checked != checked => tag.checked = checked,
                _ => return,
            }
        }
        self.changes.emit(&ListChange::DataChanged(row..row + 1));
    }

    pub fn toggle(&self, row: usize) {
        let checked = match self.rows.borrow().get(row) {
            Some(tag) => tag.checked,
            None => return,
        };
        self.set_checked(row, !checked);
    }

    /// Replace every row
    pub fn reset(&self, all_tags: &[String], checked_tags: &[String]) {
        self.changes.emit(&ListChange::AboutToReset);
        *self.rows.borrow_mut() = Self::build_rows(all_tags, checked_tags);
        self.changes.emit(&ListChange::Reset);
    }

    /// Sort rows by name
    pub fn sort(&self) {
        self.changes.emit(&ListChange::LayoutAboutToChange);
        self.rows
            .borrow_mut()
            .sort_by(|a, b| a.name.cmp(&b.name));
        self.changes.emit(&ListChange::LayoutChanged);
    }

    /// Names of checked tags, in row order
    pub fn checked_tags(&self) -> Vec<String> {
        self.rows
            .borrow()
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.name.clone())
            .collect()
    }
}

impl ObservableList for CheckableTagModel {
    type Item = CheckableTag;

    fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    fn row(&self, index: usize) -> Option<CheckableTag> {
        self.rows.borrow().get(index).cloned()
    }

    fn changes(&self) -> &Signal<ListChange> {
        &self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::record;
    use pretty_assertions::assert_eq;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_marks_checked_rows() {
        let model = CheckableTagModel::new(&tags(&["home", "work", "home"]), &tags(&["work"]));
        assert_eq!(model.len(), 2);
        assert!(!model.row(0).unwrap().checked);
        assert!(model.row(1).unwrap().checked);
        assert_eq!(model.checked_tags(), tags(&["work"]));
    }

    #[test]
    fn test_insert_tag_is_sorted_and_notifies() {
        let model = CheckableTagModel::new(&tags(&["alpha", "gamma"]), &[]);
        let seen = record(model.changes());

        assert_eq!(model.insert_tag("beta", false), Some(1));
        assert_eq!(model.insert_tag("beta", false), None);
        assert_eq!(model.row(1).unwrap().name, "beta");
        assert_eq!(
            *seen.borrow(),
            vec![ListChange::AboutToInsert(1..2), ListChange::Inserted(1..2)]
        );
    }

    #[test]
    fn test_remove_tag() {
        let model = CheckableTagModel::new(&tags(&["a", "b"]), &[]);
        let seen = record(model.changes());

        assert!(model.remove_tag("a"));
        assert!(!model.remove_tag("zzz"));
        assert_eq!(model.len(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![ListChange::AboutToRemove(0..1), ListChange::Removed(0..1)]
        );
    }

    #[test]
    fn test_toggle_emits_data_changed_only_on_change() {
        let model = CheckableTagModel::new(&tags(&["a", "b"]), &[]);
        let seen = record(model.changes());

        model.toggle(1);
        model.set_checked(1, true);
        model.toggle(9);

        assert!(model.row(1).unwrap().checked);
        assert_eq!(*seen.borrow(), vec![ListChange::DataChanged(1..2)]);
    }

    #[test]
    fn test_listener_can_read_model_during_notification() {
        let model = std::rc::Rc::new(CheckableTagModel::new(&tags(&["a"]), &[]));
        let lens = std::rc::Rc::new(RefCell::new(Vec::new()));

        let reader = std::rc::Rc::downgrade(&model);
        let sink = lens.clone();
        model.changes().connect(move |_| {
            if let Some(model) = reader.upgrade() {
                sink.borrow_mut().push(model.len());
            }
        });

        model.insert_tag("b", false);
        assert_eq!(*lens.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_reset_and_sort() {
        let model = CheckableTagModel::new(&tags(&["b", "a"]), &[]);
        let seen = record(model.changes());

        model.sort();
        assert_eq!(model.row(0).unwrap().name, "a");

        model.reset(&tags(&["x"]), &tags(&["x"]));
        assert_eq!(model.len(), 1);
        assert!(model.row(0).unwrap().checked);

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::LayoutAboutToChange,
                ListChange::LayoutChanged,
                ListChange::AboutToReset,
                ListChange::Reset,
            ]
        );
    }
}
