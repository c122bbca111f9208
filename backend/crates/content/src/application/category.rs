//! Category Use Case

use std::sync::Arc;

use kernel::id::CategoryId;
use kernel::page::{Page, PageQuery};
use platform::slug::category_slug;

use crate::application::config::ContentConfig;
use crate::domain::entity::category::{Category, CategoryWithCount, category_name};
use crate::domain::entity::view::PostView;
use crate::domain::repository::{CategoryRepository, PostQuery, PostRepository};
use crate::error::{ContentError, ContentResult, is_unique_violation};

pub struct CategoryUseCase<C, P>
where
    C: CategoryRepository,
    P: PostRepository,
{
    categories: Arc<C>,
    posts: Arc<P>,
    config: Arc<ContentConfig>,
}

impl<C, P> CategoryUseCase<C, P>
where
    C: CategoryRepository,
    P: PostRepository,
{
    pub fn new(categories: Arc<C>, posts: Arc<P>, config: Arc<ContentConfig>) -> Self {
        Self {
            categories,
            posts,
            config,
        }
    }

    pub async fn create(&self, name: &str, description: Option<String>) -> ContentResult<Category> {
        let name = category_name(name)?;
        let slug = self.unique_slug(&name, None).await?;
        let description = description.map(|d| d.trim().to_string()).unwrap_or_default();

        let category = Category::new(name, description, slug);
        self.categories
            .insert_category(&category)
            .await
            .map_err(slug_conflict)?;

        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
        description: Option<String>,
    ) -> ContentResult<Category> {
        let mut category = self.load(id).await?;
        let name = category_name(name)?;
        let slug = self.unique_slug(&name, Some(id)).await?;

        category.rename(name, description.map(|d| d.trim().to_string()), slug);
        self.categories
            .update_category(&category)
            .await
            .map_err(slug_conflict)?;

        Ok(category)
    }

    /// Refused while any post, of any status, references the category
    pub async fn delete(&self, id: CategoryId) -> ContentResult<()> {
        self.load(id).await?;
        if self.categories.count_category_posts(&id).await? > 0 {
            return Err(ContentError::CategoryHasPosts);
        }
        if !self.categories.delete_category(&id).await? {
            return Err(ContentError::CategoryNotFound);
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    /// Alphabetical with the fallback category last; published posts counted
    pub async fn list_public(&self) -> ContentResult<Vec<CategoryWithCount>> {
        let mut categories = self.categories.list_categories(false).await?;
        let fallback = self.config.fallback_category.to_lowercase();
        categories.sort_by_cached_key(|c| {
            let name = c.category.name.to_lowercase();
            (name == fallback, name)
        });
        Ok(categories)
    }

    /// Newest first with every post counted
    pub async fn list_admin(&self) -> ContentResult<Vec<CategoryWithCount>> {
        self.categories.list_categories(true).await
    }

    /// A category and one page of its published posts
    pub async fn detail(&self, slug: &str, page: PageQuery) -> ContentResult<(Category, Page<PostView>)> {
        let category = self
            .categories
            .find_category_by_slug(slug)
            .await?
            .ok_or(ContentError::CategoryNotFound)?;

        let query = PostQuery {
            category_id: Some(category.id),
            ..PostQuery::published()
        };
        let total = self.posts.count_posts(&query).await?;
        let items = self
            .posts
            .list_posts(&query.window(i64::from(page.limit()), page.offset()))
            .await?;

        Ok((category, Page::new(items, total, &page)))
    }

    /// Every post of the category regardless of status
    pub async fn posts_of(&self, id: CategoryId) -> ContentResult<(Category, Vec<PostView>)> {
        let category = self.load(id).await?;
        let posts = self
            .posts
            .list_posts(&PostQuery {
                category_id: Some(id),
                ..PostQuery::any_status()
            })
            .await?;
        Ok((category, posts))
    }

    /// The plain slug if free, else `slug-<0..1000>` until a free one turns up
    async fn unique_slug(&self, name: &str, except: Option<CategoryId>) -> ContentResult<String> {
        let base = category_slug(name);
        if base.is_empty() {
            return Err(ContentError::Validation(
                "Category name must contain letters or digits".to_string(),
            ));
        }
        if !self.categories.slug_taken(&base, except).await? {
            return Ok(base);
        }

        for _ in 0..self.config.slug_attempts {
            let candidate = format!("{base}-{}", rand::random_range(0..1000));
            if !self.categories.slug_taken(&candidate, except).await? {
                return Ok(candidate);
            }
        }

        tracing::warn!(slug = %base, "No free category slug suffix");
        Err(ContentError::SlugUnavailable)
    }

    async fn load(&self, id: CategoryId) -> ContentResult<Category> {
        self.categories
            .find_category(&id)
            .await?
            .ok_or(ContentError::CategoryNotFound)
    }
}

/// A concurrent insert won the slug between the check and the write
fn slug_conflict(err: ContentError) -> ContentError {
    if is_unique_violation(&err) {
        ContentError::SlugUnavailable
    } else {
        err
    }
}
