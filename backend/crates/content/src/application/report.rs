//! Report Use Case
//!
//! Anyone may flag a comment. Resolving a report deletes the comment it
//! points at and marks the report resolved; a resolved report never deletes
//! anything again.

use std::sync::Arc;

use kernel::id::{CommentId, ReportId, SubCommentId};
use uuid::Uuid;

use crate::domain::entity::comment::RemovedComments;
use crate::domain::entity::report::{ReportComment, ReportView, ResolvedReports};
use crate::domain::repository::{CommentRepository, ReportRepository};
use crate::domain::value_object::comment_type::CommentType;
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Created(ReportComment),
    /// The comment already had a report; nothing was written
    AlreadyReported,
}

pub struct ReportUseCase<K, R>
where
    K: CommentRepository,
    R: ReportRepository,
{
    comments: Arc<K>,
    reports: Arc<R>,
}

impl<K, R> ReportUseCase<K, R>
where
    K: CommentRepository,
    R: ReportRepository,
{
    pub fn new(comments: Arc<K>, reports: Arc<R>) -> Self {
        Self { comments, reports }
    }

    pub async fn create(&self, comment_id: Uuid, type_comment: &str) -> ContentResult<ReportOutcome> {
        let type_comment =
            CommentType::from_code(type_comment).ok_or(ContentError::UnknownCommentType)?;

        if self
            .reports
            .find_report_for(type_comment, comment_id)
            .await?
            .is_some()
        {
            return Ok(ReportOutcome::AlreadyReported);
        }

        let report = match type_comment {
            CommentType::Base => {
                let comment = self
                    .comments
                    .find_comment(&CommentId::from_uuid(comment_id))
                    .await?
                    .ok_or(ContentError::CommentNotFound)?;
                ReportComment::for_comment(&comment)
            }
            CommentType::Sub => {
                let sub = self
                    .comments
                    .find_sub_comment(&SubCommentId::from_uuid(comment_id))
                    .await?
                    .ok_or(ContentError::CommentNotFound)?;
                ReportComment::for_sub_comment(&sub)
            }
        };

        // A concurrent report of the same comment loses on the unique key
        if !self.reports.insert_report(&report).await? {
            return Ok(ReportOutcome::AlreadyReported);
        }

        tracing::info!(
            report_id = %report.id,
            type_comment = %report.type_comment,
            comment_id = %report.comment_id,
            "Comment reported"
        );
        Ok(ReportOutcome::Created(report))
    }

    /// Delete the reported comment and mark the report resolved.
    ///
    /// A report whose comment is already gone is still marked resolved,
    /// with nothing removed, rather than failing with a not-found error.
    /// Other reports on the removed comments are dropped.
    pub async fn resolve(&self, id: ReportId) -> ContentResult<RemovedComments> {
        let report = self
            .reports
            .find_report(&id)
            .await?
            .ok_or(ContentError::ReportNotFound)?;
        if report.is_resolved() {
            return Err(ContentError::ReportResolved);
        }

        let removed = self
            .reports
            .resolve_report(&id)
            .await?
            .ok_or(ContentError::ReportResolved)?;

        tracing::info!(report_id = %id, removed = removed.total(), "Report resolved");
        Ok(removed)
    }

    /// Resolve the pending reports among `ids`, skipping resolved ones
    pub async fn resolve_many(&self, ids: &[ReportId]) -> ContentResult<ResolvedReports> {
        let pending: Vec<ReportComment> = self
            .reports
            .find_reports(ids)
            .await?
            .into_iter()
            .filter(|r| !r.is_resolved())
            .collect();
        if pending.is_empty() {
            return Err(ContentError::NothingToResolve);
        }

        let mut resolved = ResolvedReports::default();
        for report in pending {
            if let Some(removed) = self.reports.resolve_report(&report.id).await? {
                resolved.report_ids.push(report.id);
                resolved.removed.extend(removed);
            }
        }

        tracing::info!(
            resolved = resolved.report_ids.len(),
            removed = resolved.removed.total(),
            "Reports resolved"
        );
        Ok(resolved)
    }

    /// Unconditional; returns the number removed
    pub async fn delete_many(&self, ids: &[ReportId]) -> ContentResult<u64> {
        let deleted = self.reports.delete_reports(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Reports deleted");
        Ok(deleted)
    }

    pub async fn list(&self) -> ContentResult<Vec<ReportView>> {
        self.reports.list_reports().await
    }
}
