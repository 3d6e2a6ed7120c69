use crate::MuscleID;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for WriteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => WriteError::Storage(storage),
            ReadError::Other(other) => WriteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("corrupt data: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no exercise for {}", .muscle.name())]
pub struct MissingExerciseError {
    pub muscle: MuscleID,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingError {
    #[error("no eligible accessory muscles")]
    EmptyCandidatePool,
    #[error("all candidate scores are zero")]
    DegenerateScores,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogInputError {
    #[error("Please enter a weight")]
    MissingWeight,
    #[error("Please enter at least one set")]
    NoSets,
    #[error("No exercise at position {0}")]
    IndexOutOfRange(usize),
    #[error("Session is already finalized")]
    AlreadyFinalized,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("current session has logged results that would be discarded")]
    UnsavedResults,
    #[error("no session in progress")]
    NoSessionInProgress,
    #[error(transparent)]
    Log(#[from] LogInputError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
