use crate::domain::Task;
use crate::model::list::{ListChange, ObservableList};
use crate::model::tag_model::CheckableTag;
use crate::signal::{ListenerId, Signal};
use std::cell::RefCell;
use std::rc::Rc;

/// Static actions at the top of a task's context menu, in row order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Edit,
    Delete,
    ConfigureTags,
    /// Move between today's and the later queue
    Queue,
}

impl MenuOption {
    pub const COUNT: usize = 4;

    pub fn from_row(row: usize) -> Option<MenuOption> {
        match row {
            0 => Some(Self::Edit),
            1 => Some(Self::Delete),
            2 => Some(Self::ConfigureTags),
            3 => Some(Self::Queue),
            _ => None,
        }
    }
}

/// What a consumer sees for one row of the context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub text: String,
    pub icon: String,
    pub checkable: bool,
    pub checked: bool,
}

impl MenuEntry {
    fn action(text: &str, icon: &str) -> Self {
        Self {
            text: text.to_string(),
            icon: icon.to_string(),
            checkable: false,
            checked: false,
        }
    }
}

/// Context menu for one task: the static actions followed by one checkable
/// row per tag of the upstream tag list.
///
/// Upstream notifications are forwarded with row indices moved into menu
/// space, so consumers never deal with upstream rows.
pub struct TaskContextMenuModel<L>
where
    L: ObservableList<Item = CheckableTag> + 'static,
{
    task: Rc<RefCell<Task>>,
    tags: Rc<L>,
    changes: Rc<Signal<ListChange>>,
    upstream_listener: ListenerId,
}

impl<L> TaskContextMenuModel<L>
where
    L: ObservableList<Item = CheckableTag> + 'static,
{
    pub fn new(task: Rc<RefCell<Task>>, tags: Rc<L>) -> Self {
        let changes: Rc<Signal<ListChange>> = Rc::new(Signal::new());

        let forward = changes.clone();
        let upstream_listener = tags.changes().connect(move |change: &ListChange| {
            if matches!(change, ListChange::CountChanged) {
                return;
            }
            forward.emit(&change.shifted(MenuOption::COUNT));
            if change.affects_count() {
                forward.emit(&ListChange::CountChanged);
            }
        });

        Self {
            task,
            tags,
            changes,
            upstream_listener,
        }
    }

    pub fn len(&self) -> usize {
        MenuOption::COUNT + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Static action for `row`, None for tag rows and out of range
    pub fn option_at(&self, row: usize) -> Option<MenuOption> {
        MenuOption::from_row(row)
    }

    /// Upstream tag row shown at menu `row`
    pub fn tag_row(&self, row: usize) -> Option<usize> {
        let tag_row = row.checked_sub(MenuOption::COUNT)?;
        (tag_row < self.tags.len()).then_some(tag_row)
    }

    pub fn entry_at(&self, row: usize) -> Option<MenuEntry> {
        if let Some(option) = self.option_at(row) {
            return Some(self.static_entry(option));
        }

        let tag_row = self.tag_row(row)?;
        let Some(tag) = self.tags.row(tag_row) else {
            tracing::warn!(row = tag_row, "context menu: invalid tag row");
            return None;
        };

        Some(MenuEntry {
            text: tag.name,
            icon: String::new(),
            checkable: true,
            checked: tag.checked,
        })
    }

    fn static_entry(&self, option: MenuOption) -> MenuEntry {
        match option {
            MenuOption::Edit => MenuEntry::action("Edit ...", "\u{f044}"),
            MenuOption::Delete => MenuEntry::action("Delete", "\u{f014}"),
            MenuOption::ConfigureTags => MenuEntry::action("Configure Tags", "\u{f02b}"),
            // Read on every call: the task may be moved between queues while the menu is open
            MenuOption::Queue => {
                if self.task.borrow().staged {
                    MenuEntry::action("Move to later queue", "\u{f187}")
                } else {
                    MenuEntry::action("Move to today's queue", "\u{f06a}")
                }
            }
        }
    }

    pub fn entries(&self) -> Vec<MenuEntry> {
        (0..self.len()).filter_map(|row| self.entry_at(row)).collect()
    }

    pub fn changes(&self) -> &Signal<ListChange> {
        &self.changes
    }

    pub fn task(&self) -> &Rc<RefCell<Task>> {
        &self.task
    }

    pub fn tags(&self) -> &Rc<L> {
        &self.tags
    }
}

impl<L> Drop for TaskContextMenuModel<L>
where
    L: ObservableList<Item = CheckableTag> + 'static,
{
    fn drop(&mut self) {
        self.tags.changes().disconnect(self.upstream_listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tag_model::CheckableTagModel;
    use crate::signal::record;
    use pretty_assertions::assert_eq;

    fn menu(names: &[&str], checked: &[&str]) -> TaskContextMenuModel<CheckableTagModel> {
        let all: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let checked: Vec<String> = checked.iter().map(|s| s.to_string()).collect();
        let task = Rc::new(RefCell::new(Task::new("Write report")));
        TaskContextMenuModel::new(task, Rc::new(CheckableTagModel::new(&all, &checked)))
    }

    #[test]
    fn test_len_is_static_plus_tags() {
        let model = menu(&["home", "work"], &[]);
        assert_eq!(model.len(), 6);
        assert_eq!(model.entry_at(4).unwrap().text, "home");
        assert!(model.entry_at(5).unwrap().checkable);
    }

    #[test]
    fn test_static_rows_are_not_checkable() {
        let model = menu(&["home"], &["home"]);
        for row in 0..MenuOption::COUNT {
            let entry = model.entry_at(row).unwrap();
            assert!(!entry.checkable);
            assert!(!entry.checked);
        }
        assert_eq!(model.entry_at(0).unwrap().text, "Edit ...");
        assert_eq!(model.entry_at(1).unwrap().text, "Delete");
        assert_eq!(model.entry_at(2).unwrap().text, "Configure Tags");
    }

    #[test]
    fn test_tag_rows_mirror_upstream() {
        let model = menu(&["home", "work"], &["work"]);
        for row in MenuOption::COUNT..model.len() {
            let upstream = model.tags().row(row - MenuOption::COUNT).unwrap();
            let entry = model.entry_at(row).unwrap();
            assert_eq!(entry.text, upstream.name);
            assert_eq!(entry.checked, upstream.checked);
            assert_eq!(entry.icon, "");
        }
        assert_eq!(model.tag_row(5), Some(1));
        assert_eq!(model.tag_row(2), None);
    }

    #[test]
    fn test_out_of_range_is_absent() {
        let model = menu(&["home"], &[]);
        assert!(model.entry_at(5).is_none());
        assert!(model.entry_at(100).is_none());
        assert!(model.option_at(4).is_none());
        assert!(model.tag_row(5).is_none());
    }

    #[test]
    fn test_queue_action_follows_staged_flag() {
        let model = menu(&[], &[]);
        assert_eq!(model.entry_at(3).unwrap().text, "Move to later queue");

        model.task().borrow_mut().staged = false;
        let entry = model.entry_at(3).unwrap();
        assert_eq!(entry.text, "Move to today's queue");
        assert_eq!(entry.icon, "\u{f06a}");
    }

    #[test]
    fn test_insert_is_forwarded_shifted() {
        let model = menu(&["a", "c"], &[]);
        let seen = record(model.changes());

        model.tags().insert_tag("b", false);

        assert_eq!(model.len(), 7);
        assert_eq!(model.entry_at(5).unwrap().text, "b");
        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::AboutToInsert(5..6),
                ListChange::Inserted(5..6),
                ListChange::CountChanged,
            ]
        );
    }

    #[test]
    fn test_remove_and_data_changed_are_forwarded_shifted() {
        let model = menu(&["a", "b"], &[]);
        let seen = record(model.changes());

        model.tags().toggle(1);
        model.tags().remove_tag("a");

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::DataChanged(5..6),
                ListChange::AboutToRemove(4..5),
                ListChange::Removed(4..5),
                ListChange::CountChanged,
            ]
        );
        assert_eq!(model.len(), 5);
        assert!(model.entry_at(4).unwrap().checked);
    }

    #[test]
    fn test_reset_and_layout_pass_through() {
        let model = menu(&["b", "a"], &[]);
        let seen = record(model.changes());

        model.tags().sort();
        model.tags().reset(&["x".to_string()], &[]);

        assert_eq!(
            *seen.borrow(),
            vec![
                ListChange::LayoutAboutToChange,
                ListChange::LayoutChanged,
                ListChange::CountChanged,
                ListChange::AboutToReset,
                ListChange::Reset,
                ListChange::CountChanged,
            ]
        );
        assert_eq!(model.len(), 5);
    }

    #[test]
    fn test_drop_disconnects_from_upstream() {
        let tags = Rc::new(CheckableTagModel::new(&["a".to_string()], &[]));
        let task = Rc::new(RefCell::new(Task::new("A")));
        {
            let _model = TaskContextMenuModel::new(task, tags.clone());
            assert_eq!(tags.changes().listener_count(), 1);
        }
        assert_eq!(tags.changes().listener_count(), 0);
        tags.insert_tag("b", false);
    }

    #[test]
    fn test_menu_can_be_dropped_by_an_upstream_listener() {
        let tags = Rc::new(CheckableTagModel::new(&["a".to_string()], &[]));
        let task = Rc::new(RefCell::new(Task::new("A")));
        let holder = Rc::new(RefCell::new(Some(TaskContextMenuModel::new(task, tags.clone()))));

        let closer = holder.clone();
        tags.changes().connect(move |change: &ListChange| {
            if matches!(change, ListChange::Reset) {
                closer.borrow_mut().take();
            }
        });

        tags.reset(&["b".to_string(), "c".to_string()], &[]);
        assert!(holder.borrow().is_none());
        assert_eq!(tags.changes().listener_count(), 1);

        tags.insert_tag("d", true);
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_listener_can_connect_while_menu_forwards() {
        let model = Rc::new(menu(&["home"], &[]));
        let late = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&model);
        let sink = late.clone();
        let hooked = Rc::new(std::cell::Cell::new(false));
        model.changes().connect(move |_: &ListChange| {
            if hooked.replace(true) {
                return;
            }
            if let Some(model) = weak.upgrade() {
                let sink = sink.clone();
                model.changes().connect(move |change: &ListChange| sink.borrow_mut().push(change.clone()));
            }
        });

        model.tags().insert_tag("work", false);
        assert!(late.borrow().is_empty());

        model.tags().toggle(0);
        assert_eq!(*late.borrow(), vec![ListChange::DataChanged(4..5)]);
    }
}
