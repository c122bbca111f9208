//! Repository Traits
//!
//! Persistence seams of the content domain. Methods that touch several rows
//! at once (post cascades, comment counters, report resolution) are atomic in
//! every implementation.

use kernel::id::{CategoryId, CommentId, PostId, ReportId, SubCommentId, UserId};
use uuid::Uuid;

use crate::domain::entity::{
    category::{Category, CategoryWithCount},
    comment::{CommentThread, PostComment, RemovedComments, SubComment},
    post::{DeletedPosts, Post},
    report::{ReportComment, ReportView},
    tag::{NewTag, Tag, TagUsage},
    view::PostView,
};
use crate::domain::value_object::{comment_type::CommentType, post_status::PostStatus};
use crate::error::ContentResult;

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn insert_category(&self, category: &Category) -> ContentResult<()>;

    async fn update_category(&self, category: &Category) -> ContentResult<()>;

    async fn find_category(&self, id: &CategoryId) -> ContentResult<Option<Category>>;

    async fn find_category_by_slug(&self, slug: &str) -> ContentResult<Option<Category>>;

    /// True if another category than `except` holds the slug
    async fn slug_taken(&self, slug: &str, except: Option<CategoryId>) -> ContentResult<bool>;

    /// Returns false if the category was already gone
    async fn delete_category(&self, id: &CategoryId) -> ContentResult<bool>;

    /// Posts of any status referencing the category
    async fn count_category_posts(&self, id: &CategoryId) -> ContentResult<i64>;

    /// Newest first; counts only published posts unless `all_statuses`
    async fn list_categories(&self, all_statuses: bool) -> ContentResult<Vec<CategoryWithCount>>;
}

/// Which posts a listing returns and in what order
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub category_id: Option<CategoryId>,
    pub author_id: Option<UserId>,
    pub tag_slug: Option<String>,
    /// Case-insensitive title substring
    pub search: Option<String>,
    pub exclude: Option<PostId>,
    pub order: PostOrder,
    /// `None` returns every match
    pub limit: Option<i64>,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostOrder {
    #[default]
    Newest,
    MostViewed,
}

impl PostQuery {
    pub fn published() -> Self {
        Self {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
    }

    pub fn any_status() -> Self {
        Self::default()
    }

    pub fn window(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }
}

#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert the post and link its tags, creating missing ones
    async fn insert_post(&self, post: &Post, tags: &[NewTag]) -> ContentResult<()>;

    /// Persist the fields and replace the tag links
    async fn update_post(&self, post: &Post, tags: &[NewTag]) -> ContentResult<()>;

    async fn find_post(&self, id: &PostId) -> ContentResult<Option<Post>>;

    async fn find_post_view(&self, id: &PostId) -> ContentResult<Option<PostView>>;

    /// Published post by slug, counting the view
    async fn view_published_post(&self, slug: &str) -> ContentResult<Option<PostView>>;

    async fn list_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostView>>;

    /// Ignores `limit`, `offset` and `order`
    async fn count_posts(&self, query: &PostQuery) -> ContentResult<i64>;

    /// Delete with comments, sub-comments, tag links and reports
    async fn delete_posts(&self, ids: &[PostId]) -> ContentResult<DeletedPosts>;

    /// Returns the number of posts changed; `only_from` restricts the source status
    async fn set_post_status(
        &self,
        ids: &[PostId],
        status: PostStatus,
        only_from: Option<PostStatus>,
    ) -> ContentResult<u64>;
}

#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Alphabetical
    async fn list_tags(&self) -> ContentResult<Vec<Tag>>;

    /// Most used among published posts first
    async fn popular_tags(&self, limit: i64) -> ContentResult<Vec<TagUsage>>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Insert and bump the post's comment counter
    async fn insert_comment(&self, comment: &PostComment) -> ContentResult<()>;

    /// Insert and bump the counter of the parent's post
    async fn insert_sub_comment(&self, sub: &SubComment) -> ContentResult<()>;

    async fn find_comment(&self, id: &CommentId) -> ContentResult<Option<PostComment>>;

    async fn find_sub_comment(&self, id: &SubCommentId) -> ContentResult<Option<SubComment>>;

    async fn update_comment(&self, comment: &PostComment) -> ContentResult<()>;

    async fn update_sub_comment(&self, sub: &SubComment) -> ContentResult<()>;

    /// Remove the comment and its replies, lower the counter and drop reports
    /// on anything removed
    async fn delete_comment(&self, id: &CommentId) -> ContentResult<RemovedComments>;

    async fn delete_sub_comment(&self, id: &SubCommentId) -> ContentResult<RemovedComments>;

    /// Newest base comment first
    async fn list_threads(&self, post_id: &PostId) -> ContentResult<Vec<CommentThread>>;
}

#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    async fn find_report(&self, id: &ReportId) -> ContentResult<Option<ReportComment>>;

    async fn find_report_for(
        &self,
        type_comment: CommentType,
        comment_id: Uuid,
    ) -> ContentResult<Option<ReportComment>>;

    async fn find_reports(&self, ids: &[ReportId]) -> ContentResult<Vec<ReportComment>>;

    /// Returns false if the comment already had a report
    async fn insert_report(&self, report: &ReportComment) -> ContentResult<bool>;

    /// Delete the reported comment (if still there) and mark the report
    /// resolved in one transaction
    ///
    /// Returns `None`, changing nothing, if the report was already resolved
    /// or is gone.
    async fn resolve_report(&self, id: &ReportId) -> ContentResult<Option<RemovedComments>>;

    async fn delete_reports(&self, ids: &[ReportId]) -> ContentResult<u64>;

    /// Newest first
    async fn list_reports(&self) -> ContentResult<Vec<ReportView>>;
}

/// Everything the content HTTP layer needs from one store
pub trait ContentStore:
    CategoryRepository
    + PostRepository
    + TagRepository
    + CommentRepository
    + ReportRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> ContentStore for T where
    T: CategoryRepository
        + PostRepository
        + TagRepository
        + CommentRepository
        + ReportRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
