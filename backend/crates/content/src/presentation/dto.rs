//! Data Transfer Objects

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CommentId, PostId, ReportId, SubCommentId, TagId, UserId};
use kernel::page::{Page, PageQuery};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::comment::CommentRecord;
use crate::domain::entity::{
    category::{Category, CategoryWithCount},
    comment::{CommentThread, RemovedComments, ReplyView},
    post::DeletedPosts,
    report::{ReportComment, ReportView, ResolvedReports},
    tag::{Tag, TagUsage},
    view::{AuthorCard, CategoryRef, PostRef, PostView},
};
use crate::domain::value_object::{
    comment_type::CommentType, post_status::PostStatus, report_status::ReportStatus,
};

// ============================================================================
// Queries and requests
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

/// `GET /api/v1/posts/get-all`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl PostListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminPostListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

impl AdminPostListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedQuery {
    pub post_id: PostId,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct PostIdsRequest {
    pub ids: Vec<PostId>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub post_id: PostId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: PostId,
    pub comment: String,
    pub parent_comment_id: Option<CommentId>,
}

/// `?type=base|sub`; base when absent
#[derive(Debug, Default, Deserialize)]
pub struct CommentTypeQuery {
    #[serde(rename = "type")]
    pub type_comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub comment_id: Uuid,
    pub type_comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIdsRequest {
    pub report_ids: Vec<ReportId>,
}

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
}

impl From<AuthorCard> for AuthorResponse {
    fn from(card: AuthorCard) -> Self {
        Self {
            id: card.id,
            username: card.username,
            name: card.name,
            avatar: card.avatar,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRefResponse {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

impl From<CategoryRef> for CategoryRefResponse {
    fn from(category: CategoryRef) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUsageResponse {
    #[serde(flatten)]
    pub tag: TagResponse,
    pub post_count: i64,
}

impl From<TagUsage> for TagUsageResponse {
    fn from(usage: TagUsage) -> Self {
        Self {
            tag: usage.tag.into(),
            post_count: usage.post_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    pub thumbnail_url: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorResponse,
    pub category: Option<CategoryRefResponse>,
    pub tags: Vec<TagResponse>,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        let post = view.post;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            status: post.status,
            thumbnail_url: post.thumbnail_url,
            view_count: post.view_count,
            like_count: post.like_count,
            comment_count: post.comment_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: view.author.into(),
            category: view.category.map(Into::into),
            tags: view.tags.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn post_list(views: Vec<PostView>) -> Vec<PostResponse> {
    views.into_iter().map(PostResponse::from).collect()
}

#[derive(Debug, Serialize)]
pub struct PostPayload {
    pub post: PostResponse,
}

#[derive(Debug, Serialize)]
pub struct PostsPayload {
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Serialize)]
pub struct PostPagePayload {
    pub posts: Page<PostResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPostsPayload {
    pub deleted_post_ids: Vec<PostId>,
    pub deleted_comment_count: i64,
    pub deleted_sub_comment_count: i64,
}

impl From<DeletedPosts> for DeletedPostsPayload {
    fn from(deleted: DeletedPosts) -> Self {
        Self {
            deleted_post_ids: deleted.post_ids,
            deleted_comment_count: deleted.comments,
            deleted_sub_comment_count: deleted.sub_comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImagePayload {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TagsPayload {
    pub tags: Vec<TagResponse>,
}

#[derive(Debug, Serialize)]
pub struct PopularTagsPayload {
    pub tags: Vec<TagUsageResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedPayload {
    pub modified_count: u64,
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            slug: category.slug,
            created_at: category.created_at,
            updated_at: category.updated_at,
            post_count: None,
        }
    }
}

impl From<CategoryWithCount> for CategoryResponse {
    fn from(row: CategoryWithCount) -> Self {
        Self {
            post_count: Some(row.post_count),
            ..row.category.into()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryPayload {
    pub category: CategoryResponse,
}

#[derive(Debug, Serialize)]
pub struct CategoriesPayload {
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPostsPayload<P> {
    pub category: CategoryResponse,
    pub posts: P,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub type_comment: CommentType,
    pub post_id: PostId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
    pub user_id: UserId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        match record {
            CommentRecord::Base(c) => Self {
                id: c.id.into_uuid(),
                type_comment: CommentType::Base,
                post_id: c.post_id,
                parent_comment_id: None,
                user_id: c.user_id,
                comment: c.comment,
                created_at: c.created_at,
                updated_at: c.updated_at,
            },
            CommentRecord::Sub(s) => Self {
                id: s.id.into_uuid(),
                type_comment: CommentType::Sub,
                post_id: s.post_id,
                parent_comment_id: Some(s.post_comment_id),
                user_id: s.user_id,
                comment: s.comment,
                created_at: s.created_at,
                updated_at: s.updated_at,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentPayload {
    pub comment: CommentResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: SubCommentId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: AuthorResponse,
}

impl From<ReplyView> for ReplyResponse {
    fn from(view: ReplyView) -> Self {
        Self {
            id: view.reply.id,
            comment: view.reply.comment,
            created_at: view.reply.created_at,
            updated_at: view.reply.updated_at,
            user: view.author.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: CommentId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: AuthorResponse,
    pub sub_comments: Vec<ReplyResponse>,
}

impl From<CommentThread> for ThreadResponse {
    fn from(thread: CommentThread) -> Self {
        Self {
            id: thread.comment.id,
            comment: thread.comment.comment,
            created_at: thread.comment.created_at,
            updated_at: thread.comment.updated_at,
            user: thread.author.into(),
            sub_comments: thread.replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentsPayload {
    pub comments: Vec<ThreadResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedCommentsPayload {
    pub deleted_post_comment_ids: Vec<CommentId>,
    pub deleted_sub_comment_ids: Vec<SubCommentId>,
}

impl From<RemovedComments> for RemovedCommentsPayload {
    fn from(removed: RemovedComments) -> Self {
        Self {
            deleted_post_comment_ids: removed.comments,
            deleted_sub_comment_ids: removed.sub_comments,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRefResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub thumbnail_url: String,
}

impl From<PostRef> for PostRefResponse {
    fn from(post: PostRef) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            thumbnail_url: post.thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub comment_id: Uuid,
    pub type_comment: CommentType,
    pub comment: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportComment> for ReportResponse {
    fn from(report: ReportComment) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            post_id: report.post_id,
            comment_id: report.comment_id,
            type_comment: report.type_comment,
            comment: report.comment,
            status: report.status,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportPayload {
    pub report: ReportResponse,
}

#[derive(Debug, Serialize)]
pub struct ReportViewResponse {
    #[serde(flatten)]
    pub report: ReportResponse,
    pub user: AuthorResponse,
    pub post: PostRefResponse,
}

impl From<ReportView> for ReportViewResponse {
    fn from(view: ReportView) -> Self {
        Self {
            report: view.report.into(),
            user: view.author.into(),
            post: view.post.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportsPayload {
    pub reports: Vec<ReportViewResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedReportsPayload {
    pub resolved_report_ids: Vec<ReportId>,
    pub deleted_post_comment_ids: Vec<CommentId>,
    pub deleted_sub_comment_ids: Vec<SubCommentId>,
}

impl From<ResolvedReports> for ResolvedReportsPayload {
    fn from(resolved: ResolvedReports) -> Self {
        Self {
            resolved_report_ids: resolved.report_ids,
            deleted_post_comment_ids: resolved.removed.comments,
            deleted_sub_comment_ids: resolved.removed.sub_comments,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCountPayload {
    pub deleted_count: u64,
}
