use crate::SourceError;

/// The canonical kinds of collection mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeAction {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

impl ChangeAction {
    /// Maps the integer codes used by foreign change feeds
    /// (`0 = Add, 1 = Remove, 2 = Replace, 3 = Move, 4 = Reset`).
    pub fn from_code(code: i32) -> Result<Self, SourceError> {
        match code {
            0 => Ok(Self::Add),
            1 => Ok(Self::Remove),
            2 => Ok(Self::Replace),
            3 => Ok(Self::Move),
            4 => Ok(Self::Reset),
            other => {
                src_warn!(code = other, "unrecognized collection change kind");
                Err(SourceError::UnrecognizedChangeKind(other))
            }
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Add => 0,
            Self::Remove => 1,
            Self::Replace => 2,
            Self::Move => 3,
            Self::Reset => 4,
        }
    }
}

/// A single change notification raised by a backing collection.
///
/// Indices are in the collection's own index space (no header/footer slots). `None` means the
/// feed did not report where the change happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionChange {
    pub action: ChangeAction,
    pub new_start: Option<usize>,
    pub old_start: Option<usize>,
    /// Number of items after the change (added / replacement / moved items).
    pub new_count: usize,
    /// Number of items before the change (removed / replaced / moved items).
    pub old_count: usize,
}

impl CollectionChange {
    pub fn added(index: usize, count: usize) -> Self {
        Self {
            action: ChangeAction::Add,
            new_start: Some(index),
            old_start: None,
            new_count: count,
            old_count: 0,
        }
    }

    /// A removal; pass `None` when the feed cannot say where the items were.
    pub fn removed(index: Option<usize>, count: usize) -> Self {
        Self {
            action: ChangeAction::Remove,
            new_start: None,
            old_start: index,
            new_count: 0,
            old_count: count,
        }
    }

    pub fn replaced(index: usize, old_count: usize, new_count: usize) -> Self {
        Self {
            action: ChangeAction::Replace,
            new_start: Some(index),
            old_start: Some(index),
            new_count,
            old_count,
        }
    }

    pub fn moved(old_index: usize, new_index: usize, count: usize) -> Self {
        Self {
            action: ChangeAction::Move,
            new_start: Some(new_index),
            old_start: Some(old_index),
            new_count: count,
            old_count: count,
        }
    }

    pub fn reset() -> Self {
        Self {
            action: ChangeAction::Reset,
            new_start: None,
            old_start: None,
            new_count: 0,
            old_count: 0,
        }
    }

    /// Builds a change from an integer-coded feed where a negative start index means
    /// "unknown".
    pub fn from_raw(
        kind: i32,
        new_start: isize,
        old_start: isize,
        new_count: usize,
        old_count: usize,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            action: ChangeAction::from_code(kind)?,
            new_start: usize::try_from(new_start).ok(),
            old_start: usize::try_from(old_start).ok(),
            new_count,
            old_count,
        })
    }
}
