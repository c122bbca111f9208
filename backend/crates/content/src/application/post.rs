//! Post Use Case
//!
//! Authoring, moderation and the public feeds. A thumbnail is stored before
//! the post is validated; when anything after that fails, the stored file is
//! discarded again.

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::{CategoryId, PostId};
use kernel::page::{Page, PageQuery};
use platform::media::{MediaStore, Upload, discard};

use crate::application::config::ContentConfig;
use crate::domain::entity::{
    post::{DeletedPosts, Post, PostDraft},
    tag::{Tag, TagUsage},
    view::PostView,
};
use crate::domain::repository::{
    CategoryRepository, PostOrder, PostQuery, PostRepository, TagRepository,
};
use crate::domain::value_object::post_status::PostStatus;
use crate::error::{ContentError, ContentResult};

/// Form fields of a create or update
#[derive(Debug, Default)]
pub struct PostInput {
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub content: String,
    /// Draft when absent
    pub status: Option<String>,
    /// Comma-separated
    pub tags: String,
    pub thumbnail: Option<Upload>,
}

/// Public listing filters
#[derive(Debug, Default)]
pub struct PostFilter {
    pub category_id: Option<CategoryId>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

pub struct PostUseCase<P, C, M>
where
    P: PostRepository + TagRepository,
    C: CategoryRepository,
    M: MediaStore + Sync,
{
    posts: Arc<P>,
    categories: Arc<C>,
    media: Arc<M>,
    config: Arc<ContentConfig>,
}

impl<P, C, M> PostUseCase<P, C, M>
where
    P: PostRepository + TagRepository,
    C: CategoryRepository,
    M: MediaStore + Sync,
{
    pub fn new(posts: Arc<P>, categories: Arc<C>, media: Arc<M>, config: Arc<ContentConfig>) -> Self {
        Self {
            posts,
            categories,
            media,
            config,
        }
    }

    pub async fn create(&self, actor: AuthUser, mut input: PostInput) -> ContentResult<PostView> {
        let thumbnail = self.store_thumbnail(input.thumbnail.take()).await?;

        let created = self.insert(actor, input, thumbnail.clone()).await;
        if created.is_err() && !thumbnail.is_empty() {
            discard(self.media.as_ref(), &thumbnail).await;
        }
        created
    }

    /// Owner or admin; a new thumbnail replaces the old one
    pub async fn update(
        &self,
        actor: AuthUser,
        id: PostId,
        mut input: PostInput,
    ) -> ContentResult<PostView> {
        let post = self.load(id).await?;
        ensure_owner_or_admin(actor, &post)?;
        if post.status == PostStatus::Blocked && !actor.is_admin() {
            return Err(ContentError::PostBlocked);
        }

        let thumbnail = self.store_thumbnail(input.thumbnail.take()).await?;
        let previous = post.thumbnail_url.clone();

        match self.save(actor, post, input, thumbnail.clone()).await {
            Ok(view) => {
                if !thumbnail.is_empty() && !previous.is_empty() {
                    discard(self.media.as_ref(), &previous).await;
                }
                Ok(view)
            }
            Err(e) => {
                if !thumbnail.is_empty() {
                    discard(self.media.as_ref(), &thumbnail).await;
                }
                Err(e)
            }
        }
    }

    pub async fn delete(&self, actor: AuthUser, id: PostId) -> ContentResult<DeletedPosts> {
        let post = self.load(id).await?;
        ensure_owner_or_admin(actor, &post)?;
        self.remove(&[id]).await
    }

    pub async fn delete_many(&self, ids: &[PostId]) -> ContentResult<DeletedPosts> {
        let deleted = self.remove(ids).await?;
        if deleted.post_ids.is_empty() {
            return Err(ContentError::PostNotFound);
        }
        Ok(deleted)
    }

    /// Store an inline image for use in post content
    pub async fn upload_image(&self, upload: Upload) -> ContentResult<String> {
        Ok(self.media.save(upload).await?.url)
    }

    pub async fn latest(&self, limit: Option<u32>) -> ContentResult<Vec<PostView>> {
        let query = PostQuery::published().window(self.config.feed_limit(limit), 0);
        self.posts.list_posts(&query).await
    }

    pub async fn most_viewed(&self, limit: Option<u32>) -> ContentResult<Vec<PostView>> {
        let query = PostQuery {
            order: PostOrder::MostViewed,
            ..PostQuery::published()
        }
        .window(self.config.feed_limit(limit), 0);
        self.posts.list_posts(&query).await
    }

    pub async fn list_published(&self, filter: PostFilter, page: PageQuery) -> ContentResult<Page<PostView>> {
        let query = PostQuery {
            category_id: filter.category_id,
            tag_slug: filter.tag.as_deref().map(platform::slug::tag_slug),
            search: non_blank(filter.search),
            ..PostQuery::published()
        };
        self.page(query, page).await
    }

    /// Published posts of the same category, excluding the post itself
    pub async fn related(&self, id: PostId, limit: Option<u32>) -> ContentResult<Vec<PostView>> {
        let post = self.load(id).await?;
        let Some(category_id) = post.category_id else {
            return Ok(Vec::new());
        };

        let query = PostQuery {
            category_id: Some(category_id),
            exclude: Some(id),
            ..PostQuery::published()
        }
        .window(self.config.feed_limit(limit), 0);
        self.posts.list_posts(&query).await
    }

    pub async fn popular_tags(&self, limit: Option<u32>) -> ContentResult<Vec<TagUsage>> {
        self.posts.popular_tags(self.config.feed_limit(limit)).await
    }

    pub async fn tags(&self) -> ContentResult<Vec<Tag>> {
        self.posts.list_tags().await
    }

    /// Public detail; counts a view
    pub async fn detail_by_slug(&self, slug: &str) -> ContentResult<PostView> {
        self.posts
            .view_published_post(slug)
            .await?
            .ok_or(ContentError::PostNotFound)
    }

    /// Any status, for the owner or an admin
    pub async fn detail(&self, actor: AuthUser, id: PostId) -> ContentResult<PostView> {
        let view = self.load_view(id).await?;
        ensure_owner_or_admin(actor, &view.post)?;
        Ok(view)
    }

    pub async fn admin_detail(&self, id: PostId) -> ContentResult<PostView> {
        self.load_view(id).await
    }

    pub async fn mine(&self, actor: AuthUser, page: PageQuery) -> ContentResult<Page<PostView>> {
        let query = PostQuery {
            author_id: Some(actor.user_id),
            ..PostQuery::any_status()
        };
        self.page(query, page).await
    }

    pub async fn admin_list(
        &self,
        status: Option<PostStatus>,
        search: Option<String>,
        page: PageQuery,
    ) -> ContentResult<Page<PostView>> {
        let query = PostQuery {
            status,
            search: non_blank(search),
            ..PostQuery::any_status()
        };
        self.page(query, page).await
    }

    pub async fn block(&self, ids: &[PostId]) -> ContentResult<u64> {
        let changed = self
            .posts
            .set_post_status(ids, PostStatus::Blocked, None)
            .await?;
        tracing::info!(requested = ids.len(), changed, "Posts blocked");
        Ok(changed)
    }

    /// Blocked posts go back to draft; others are left alone
    pub async fn unblock(&self, ids: &[PostId]) -> ContentResult<u64> {
        let changed = self
            .posts
            .set_post_status(ids, PostStatus::Draft, Some(PostStatus::Blocked))
            .await?;
        tracing::info!(requested = ids.len(), changed, "Posts unblocked");
        Ok(changed)
    }

    async fn insert(&self, actor: AuthUser, input: PostInput, thumbnail: String) -> ContentResult<PostView> {
        let draft = self.draft(actor, input).await?;
        let post = Post::new(actor.user_id, &draft, thumbnail);
        self.posts.insert_post(&post, &draft.tags).await?;

        tracing::info!(post_id = %post.id, user_id = %actor.user_id, status = %post.status, "Post created");
        self.load_view(post.id).await
    }

    async fn save(
        &self,
        actor: AuthUser,
        mut post: Post,
        input: PostInput,
        thumbnail: String,
    ) -> ContentResult<PostView> {
        let draft = self.draft(actor, input).await?;
        post.apply(&draft);
        if !thumbnail.is_empty() {
            post.thumbnail_url = thumbnail;
        }
        self.posts.update_post(&post, &draft.tags).await?;

        tracing::debug!(post_id = %post.id, status = %post.status, "Post updated");
        self.load_view(post.id).await
    }

    /// Parse and validate the form, including the category lookup
    async fn draft(&self, actor: AuthUser, input: PostInput) -> ContentResult<PostDraft> {
        let status = match input.status.as_deref().map(str::trim) {
            None | Some("") => PostStatus::Draft,
            Some(code) => code
                .parse::<PostStatus>()
                .map_err(|e| ContentError::Validation(e.to_string()))?,
        };
        if status == PostStatus::Blocked && !actor.is_admin() {
            return Err(ContentError::NotAllowed);
        }

        let draft = PostDraft::new(
            input.category_id,
            &input.title,
            input.content,
            status,
            &input.tags,
        );
        draft.validate()?;

        if let Some(category_id) = draft.category_id {
            if self.categories.find_category(&category_id).await?.is_none() {
                return Err(ContentError::CategoryMissing);
            }
        }
        Ok(draft)
    }

    async fn store_thumbnail(&self, upload: Option<Upload>) -> ContentResult<String> {
        match upload {
            Some(upload) => Ok(self.media.save(upload).await?.url),
            None => Ok(String::new()),
        }
    }

    async fn remove(&self, ids: &[PostId]) -> ContentResult<DeletedPosts> {
        let deleted = self.posts.delete_posts(ids).await?;
        for url in &deleted.thumbnails {
            discard(self.media.as_ref(), url).await;
        }

        tracing::info!(
            posts = deleted.post_ids.len(),
            comments = deleted.comments,
            sub_comments = deleted.sub_comments,
            "Posts deleted"
        );
        Ok(deleted)
    }

    async fn page(&self, query: PostQuery, page: PageQuery) -> ContentResult<Page<PostView>> {
        let total = self.posts.count_posts(&query).await?;
        let items = self
            .posts
            .list_posts(&query.window(i64::from(page.limit()), page.offset()))
            .await?;
        Ok(Page::new(items, total, &page))
    }

    async fn load(&self, id: PostId) -> ContentResult<Post> {
        self.posts
            .find_post(&id)
            .await?
            .ok_or(ContentError::PostNotFound)
    }

    async fn load_view(&self, id: PostId) -> ContentResult<PostView> {
        self.posts
            .find_post_view(&id)
            .await?
            .ok_or(ContentError::PostNotFound)
    }
}

fn ensure_owner_or_admin(actor: AuthUser, post: &Post) -> ContentResult<()> {
    if actor.is_admin() || post.is_owned_by(actor.user_id) {
        Ok(())
    } else {
        Err(ContentError::NotAllowed)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
