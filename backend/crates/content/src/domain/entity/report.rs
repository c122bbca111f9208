//! Comment reports

use chrono::{DateTime, Utc};
use kernel::id::{PostId, ReportId, UserId};
use uuid::Uuid;

use crate::domain::entity::comment::{PostComment, RemovedComments, SubComment};
use crate::domain::entity::view::{AuthorCard, PostRef};
use crate::domain::value_object::{comment_type::CommentType, report_status::ReportStatus};

/// A moderation flag on one comment; at most one per comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportComment {
    pub id: ReportId,
    /// Author of the reported comment
    pub user_id: UserId,
    pub post_id: PostId,
    /// Row id in the table selected by `type_comment`
    pub comment_id: Uuid,
    pub type_comment: CommentType,
    /// Text at the time of reporting
    pub comment: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportComment {
    fn new(
        user_id: UserId,
        post_id: PostId,
        comment_id: Uuid,
        type_comment: CommentType,
        comment: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReportId::new(),
            user_id,
            post_id,
            comment_id,
            type_comment,
            comment: comment.to_string(),
            status: ReportStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn for_comment(comment: &PostComment) -> Self {
        Self::new(
            comment.user_id,
            comment.post_id,
            comment.id.into_uuid(),
            CommentType::Base,
            &comment.comment,
        )
    }

    pub fn for_sub_comment(sub: &SubComment) -> Self {
        Self::new(
            sub.user_id,
            sub.post_id,
            sub.id.into_uuid(),
            CommentType::Sub,
            &sub.comment,
        )
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ReportStatus::Resolved
    }
}

/// Report with the comment author and the post it was made on
#[derive(Debug, Clone)]
pub struct ReportView {
    pub report: ReportComment,
    pub author: AuthorCard,
    pub post: PostRef,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedReports {
    pub report_ids: Vec<ReportId>,
    pub removed: RemovedComments,
}
