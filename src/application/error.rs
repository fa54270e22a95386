use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Group is full ({max} members)")]
    GroupFull { max: usize },

    #[error("A member named '{0}' already exists")]
    DuplicateName(String),

    #[error("No members to play the game")]
    EmptyGroup,

    #[error("Total principal is zero")]
    ZeroPrincipal,

    #[error("Member not found: {0}")]
    MemberNotFound(String),
}
