//! Comment parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{require_text, IssueNumber, RepoParams};
use crate::error::KanbanResult;
use crate::types::IssueState;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    #[serde(flatten)]
    pub repository: RepoParams,
    #[schemars(description = "Issue number")]
    pub issue_number: IssueNumber,
    #[schemars(description = "Comment body in markdown")]
    pub body: String,
    #[schemars(description = "Move the issue to this state (open, closed) before commenting")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

impl AddCommentParams {
    pub fn validate(&self) -> KanbanResult<u64> {
        let number = self.issue_number.value()?;
        require_text("body", &self.body)?;
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_is_required() {
        assert!(serde_json::from_value::<AddCommentParams>(json!({ "issue_number": 3 })).is_err());

        let blank: AddCommentParams =
            serde_json::from_value(json!({ "issue_number": 3, "body": "\n" })).unwrap();
        assert!(blank.validate().is_err());
    }
}
