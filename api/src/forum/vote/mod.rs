pub mod create;
pub mod delete;
pub mod get;

use serde::Deserialize;

use crate::{error::AppError, forum::ledger::VoteKind, forum::store::VoteTarget};

/// Wire shape shared by apply and retract: exactly one of the two target
/// ids must be present.
#[derive(Deserialize)]
pub struct VoteSubmission {
    pub post_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub kind: Option<VoteKind>,
}

impl VoteSubmission {
    pub fn target(&self) -> Result<VoteTarget, AppError> {
        VoteTarget::from_ids(self.post_id, self.comment_id)
    }
}
