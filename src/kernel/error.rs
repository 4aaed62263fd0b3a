use super::GroupId;

pub type Result<T> = std::result::Result<T, ShellError>;

/// Invalid handles passed into the shell. User cancellation is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    UnknownGroup(GroupId),
    TabOutOfRange { group: GroupId, index: usize },
    NoGroups,
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::UnknownGroup(group) => write!(f, "Unknown tab group: {}", group.raw()),
            ShellError::TabOutOfRange { group, index } => {
                write!(f, "Tab {} out of range in group {}", index, group.raw())
            }
            ShellError::NoGroups => write!(f, "No tab groups"),
        }
    }
}

impl std::error::Error for ShellError {}
