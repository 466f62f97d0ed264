use crate::error::{KwLogError, Result};

/// Cyclic cursor over the configured groups
#[derive(Debug, Clone)]
pub struct GroupCycle {
    groups: Vec<u8>,
    pos: usize,
}

impl GroupCycle {
    pub fn new(groups: Vec<u8>) -> Result<Self> {
        if groups.is_empty() {
            return Err(KwLogError::validation(
                "groups",
                "At least one group must be configured",
            ));
        }
        Ok(Self { groups, pos: 0 })
    }

    /// Group to poll next
    pub fn current(&self) -> u8 {
        self.groups[self.pos]
    }

    /// True when `group` is the last configured entry. Compared by value, so a
    /// group that also appears earlier in the list ends a line there too.
    pub fn completes_line(&self, group: u8) -> bool {
        self.groups.last() == Some(&group)
    }

    /// Move to the next group, wrapping after the last
    pub fn advance(&mut self) {
        self.pos = (self.pos + 1) % self.groups.len();
    }

    pub fn groups(&self) -> &[u8] {
        &self.groups
    }
}
