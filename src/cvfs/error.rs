use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvfsError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("A file named {0} already exists in this directory")]
    NameConflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}, please use $:<dir>:...:<file> format")]
    InvalidPath(String),

    #[error("This is the root directory")]
    AtRoot,

    #[error("Invalid logic operator {0}, must be && or ||")]
    InvalidOperator(String),

    #[error("Invalid criterion argument: {0}")]
    InvalidCriterionSpec(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Nothing to check: the node does not exist")]
    NullSubject,

    #[error("No more step can be undone")]
    NothingToUndo,

    #[error("No more step can be redone")]
    NothingToRedo,

    #[error("Please first create a disk")]
    NoDisk,

    #[error("Persistence error: {0}")]
    PersistenceIo(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CvfsError>;
