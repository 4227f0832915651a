use alloc::vec::Vec;
use core::cell::RefCell;

/// The rendering surface a source drives.
///
/// Positions are in the flat position space the source exposes (header/footer slots
/// included). Commands are delivered synchronously from inside change handlers; an
/// implementation may query the source again while handling one.
pub trait RenderSurface {
    fn notify_item_inserted(&self, position: usize);
    fn notify_range_inserted(&self, position: usize, count: usize);
    fn notify_item_removed(&self, position: usize);
    fn notify_range_removed(&self, position: usize, count: usize);
    fn notify_item_changed(&self, position: usize);
    fn notify_range_changed(&self, position: usize, count: usize);
    fn notify_data_set_reset(&self);
}

/// One structural edit, as sent to a [`RenderSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditCommand {
    ItemInserted { position: usize },
    RangeInserted { position: usize, count: usize },
    ItemRemoved { position: usize },
    RangeRemoved { position: usize, count: usize },
    ItemChanged { position: usize },
    RangeChanged { position: usize, count: usize },
    Reset,
}

impl EditCommand {
    /// Picks the single-item or range form; `None` for an empty range.
    pub fn inserted(position: usize, count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::ItemInserted { position }),
            count => Some(Self::RangeInserted { position, count }),
        }
    }

    pub fn removed(position: usize, count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::ItemRemoved { position }),
            count => Some(Self::RangeRemoved { position, count }),
        }
    }

    pub fn changed(position: usize, count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::ItemChanged { position }),
            count => Some(Self::RangeChanged { position, count }),
        }
    }

    /// Returns the same command moved `offset` positions further down.
    pub fn shifted(self, offset: usize) -> Self {
        match self {
            Self::ItemInserted { position } => Self::ItemInserted {
                position: position + offset,
            },
            Self::RangeInserted { position, count } => Self::RangeInserted {
                position: position + offset,
                count,
            },
            Self::ItemRemoved { position } => Self::ItemRemoved {
                position: position + offset,
            },
            Self::RangeRemoved { position, count } => Self::RangeRemoved {
                position: position + offset,
                count,
            },
            Self::ItemChanged { position } => Self::ItemChanged {
                position: position + offset,
            },
            Self::RangeChanged { position, count } => Self::RangeChanged {
                position: position + offset,
                count,
            },
            Self::Reset => Self::Reset,
        }
    }

    /// Whether the command addresses positions inside a space that holds `count` positions
    /// once the edit is applied. Removed positions are checked against the space before it.
    pub fn fits(&self, count: usize) -> bool {
        match *self {
            Self::ItemInserted { position } | Self::ItemChanged { position } => position < count,
            Self::RangeInserted { position, count: n }
            | Self::RangeChanged { position, count: n } => {
                position.checked_add(n).is_some_and(|end| end <= count)
            }
            Self::ItemRemoved { position } | Self::RangeRemoved { position, .. } => {
                position <= count
            }
            Self::Reset => true,
        }
    }

    pub fn apply(self, surface: &dyn RenderSurface) {
        match self {
            Self::ItemInserted { position } => surface.notify_item_inserted(position),
            Self::RangeInserted { position, count } => {
                surface.notify_range_inserted(position, count)
            }
            Self::ItemRemoved { position } => surface.notify_item_removed(position),
            Self::RangeRemoved { position, count } => surface.notify_range_removed(position, count),
            Self::ItemChanged { position } => surface.notify_item_changed(position),
            Self::RangeChanged { position, count } => surface.notify_range_changed(position, count),
            Self::Reset => surface.notify_data_set_reset(),
        }
    }
}

/// A surface that records every command it receives.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: RefCell<Vec<EditCommand>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<EditCommand> {
        self.commands.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Drains and returns the recorded commands.
    pub fn take(&self) -> Vec<EditCommand> {
        core::mem::take(&mut *self.commands.borrow_mut())
    }

    /// Replays the recorded commands onto another surface, draining the log.
    pub fn flush_to(&self, surface: &dyn RenderSurface) {
        for command in self.take() {
            command.apply(surface);
        }
    }

    fn push(&self, command: EditCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl RenderSurface for CommandLog {
    fn notify_item_inserted(&self, position: usize) {
        self.push(EditCommand::ItemInserted { position });
    }

    fn notify_range_inserted(&self, position: usize, count: usize) {
        self.push(EditCommand::RangeInserted { position, count });
    }

    fn notify_item_removed(&self, position: usize) {
        self.push(EditCommand::ItemRemoved { position });
    }

    fn notify_range_removed(&self, position: usize, count: usize) {
        self.push(EditCommand::RangeRemoved { position, count });
    }

    fn notify_item_changed(&self, position: usize) {
        self.push(EditCommand::ItemChanged { position });
    }

    fn notify_range_changed(&self, position: usize, count: usize) {
        self.push(EditCommand::RangeChanged { position, count });
    }

    fn notify_data_set_reset(&self) {
        self.push(EditCommand::Reset);
    }
}
