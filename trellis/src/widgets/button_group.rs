use crate::error::{Error, Result};
use crate::scene::{ActorId, Stage};

slotmap::new_key_type! {
    /// Handle to a [`ButtonGroup`] owned by a [`Stage`].
    pub struct GroupId;
}

/// Bounds on how many member buttons may be checked at once.
///
/// The group is consulted before a change is committed and refuses changes
/// that would break the bounds. It never unchecks other members on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonGroup {
    pub(crate) buttons: Vec<ActorId>,
    min_checked: usize,
    max_checked: usize,
}

impl Default for ButtonGroup {
    fn default() -> Self {
        Self::with_bounds(1, 1)
    }
}

impl ButtonGroup {
    /// A radio-style group: exactly one checked button once one is checked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(min_checked: usize, max_checked: usize) -> Self {
        Self {
            buttons: Vec::new(),
            min_checked,
            max_checked,
        }
    }

    pub fn buttons(&self) -> &[ActorId] {
        &self.buttons
    }

    pub fn min_checked(&self) -> usize {
        self.min_checked
    }

    pub fn max_checked(&self) -> usize {
        self.max_checked
    }

    /// Whether a member currently `checked` may change to `new`, given
    /// `checked_count` members are checked now.
    pub fn can_check(&self, checked_count: usize, checked: bool, new: bool) -> bool {
        match (checked, new) {
            (false, true) => checked_count < self.max_checked,
            (true, false) => checked_count.saturating_sub(1) >= self.min_checked,
            _ => true,
        }
    }
}

impl Stage {
    /// Create a group allowing exactly one checked button.
    pub fn new_group(&mut self) -> GroupId {
        self.groups.insert(ButtonGroup::new())
    }

    pub fn new_group_with(&mut self, min_checked: usize, max_checked: usize) -> GroupId {
        self.groups
            .insert(ButtonGroup::with_bounds(min_checked, max_checked))
    }

    pub fn button_group(&self, group: GroupId) -> Option<&ButtonGroup> {
        self.groups.get(group)
    }

    fn group_mut(&mut self, group: GroupId) -> Result<&mut ButtonGroup> {
        self.groups
            .get_mut(group)
            .ok_or(Error::UnknownGroup(group))
    }

    /// Put `button` in `group`, taking it out of any group it was in. The
    /// button's checked state is left as it is.
    pub fn group_add(&mut self, group: GroupId, button: ActorId) -> Result<()> {
        self.group_mut(group)?;
        if let Some(previous) = self.button_ref(button)?.group {
            if previous == group {
                return Ok(());
            }
            self.group_remove(previous, button)?;
        }
        self.group_mut(group)?.buttons.push(button);
        self.button_mut(button)?.group = Some(group);
        log::debug!("[group] {:?} joined {:?}", button, group);
        Ok(())
    }

    pub fn group_remove(&mut self, group: GroupId, button: ActorId) -> Result<()> {
        self.group_mut(group)?
            .buttons
            .retain(|member| *member != button);
        let button = self.button_mut(button)?;
        if button.group == Some(group) {
            button.group = None;
        }
        Ok(())
    }

    pub fn set_group_bounds(
        &mut self,
        group: GroupId,
        min_checked: usize,
        max_checked: usize,
    ) -> Result<()> {
        let group = self.group_mut(group)?;
        group.min_checked = min_checked;
        group.max_checked = max_checked;
        Ok(())
    }

    /// Checked members of `group`, in the order they joined.
    pub fn checked_in(&self, group: GroupId) -> Result<Vec<ActorId>> {
        let group = self.groups.get(group).ok_or(Error::UnknownGroup(group))?;
        Ok(group
            .buttons
            .iter()
            .copied()
            .filter(|button| self.is_checked(*button))
            .collect())
    }

    /// The group `button` belongs to.
    pub fn group(&self, button: ActorId) -> Option<GroupId> {
        self.button(button)?.group
    }

    pub(crate) fn group_allows(&self, group: Option<GroupId>, button: ActorId, new: bool) -> bool {
        let Some(group) = group.and_then(|group| self.groups.get(group)) else {
            return true;
        };
        let checked_count = group
            .buttons
            .iter()
            .filter(|member| self.is_checked(**member))
            .count();
        group.can_check(checked_count, self.is_checked(button), new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_group_allows_first_check() {
        let group = ButtonGroup::new();
        assert!(group.can_check(0, false, true));
        assert!(!group.can_check(1, false, true));
    }

    #[test]
    fn min_blocks_unchecking_last() {
        let group = ButtonGroup::with_bounds(1, 3);
        assert!(!group.can_check(1, true, false));
        assert!(group.can_check(2, true, false));
    }

    #[test]
    fn no_op_always_allowed() {
        let group = ButtonGroup::with_bounds(2, 0);
        assert!(group.can_check(0, false, false));
        assert!(group.can_check(5, true, true));
    }

    #[test]
    fn zero_min_allows_empty_group() {
        let group = ButtonGroup::with_bounds(0, 2);
        assert!(group.can_check(1, true, false));
        assert!(group.can_check(1, false, true));
        assert!(!group.can_check(2, false, true));
    }
}
