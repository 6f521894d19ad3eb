use crate::error::SheetError;

/// The single human-readable feedback line of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Parsing,
    Failed(SheetError),
    Done(String),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Failed(_) | Status::Done(_))
    }
}

impl From<SheetError> for Status {
    fn from(err: SheetError) -> Self {
        Status::Failed(err)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Parsing => write!(f, "Parsing…"),
            Status::Failed(err) => write!(f, "{}", err.user_message()),
            Status::Done(msg) => write!(f, "{}", msg),
        }
    }
}
