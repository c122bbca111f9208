//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CommentId, PostId, ReportId, SubCommentId, TagId, UserId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    category::{Category, CategoryWithCount},
    comment::{CommentThread, PostComment, RemovedComments, ReplyView, SubComment},
    post::{DeletedPosts, Post},
    report::{ReportComment, ReportView},
    tag::{NewTag, Tag, TagUsage},
    view::{AuthorCard, CategoryRef, PostRef, PostView},
};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, PostOrder, PostQuery, PostRepository,
    ReportRepository, TagRepository,
};
use crate::domain::value_object::{
    comment_type::CommentType, post_status::PostStatus, report_status::ReportStatus,
};
use crate::error::{ContentError, ContentResult};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_POST_VIEW: &str = r#"
    SELECT
        p.id,
        p.user_id,
        p.category_id,
        p.title,
        p.slug,
        p.content,
        p.status,
        p.thumbnail_url,
        p.view_count,
        p.like_count,
        p.comment_count,
        p.created_at,
        p.updated_at,
        u.username AS author_username,
        u.name AS author_name,
        u.avatar AS author_avatar,
        c.name AS category_name,
        c.slug AS category_slug
    FROM posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Every filter is skipped when its parameter is NULL
const POST_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR p.status = $1)
      AND ($2::uuid IS NULL OR p.category_id = $2)
      AND ($3::uuid IS NULL OR p.user_id = $3)
      AND ($4::text IS NULL OR EXISTS (
            SELECT 1 FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = p.id AND t.slug = $4))
      AND ($5::text IS NULL OR p.title ILIKE '%' || $5 || '%')
      AND ($6::uuid IS NULL OR p.id <> $6)
"#;

const SELECT_REPORT: &str = r#"
    SELECT id, user_id, post_id, comment_id, type_comment, comment, status, created_at, updated_at
    FROM report_comments
"#;

fn post_uuids(ids: &[PostId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn report_uuids(ids: &[ReportId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

/// Escape LIKE wildcards in user search input
fn like_literal(search: &str) -> String {
    search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl PgContentRepository {
    async fn fetch_views(&self, sql: &str, query: &PostQuery) -> ContentResult<Vec<PostView>> {
        let rows = sqlx::query_as::<_, PostViewRow>(sql)
            .bind(query.status.map(|s| s.code()))
            .bind(query.category_id.map(CategoryId::into_uuid))
            .bind(query.author_id.map(UserId::into_uuid))
            .bind(query.tag_slug.as_deref())
            .bind(query.search.as_deref().map(like_literal))
            .bind(query.exclude.map(PostId::into_uuid))
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        self.with_tags(rows).await
    }

    async fn fetch_view(&self, id: Uuid) -> ContentResult<Option<PostView>> {
        let row = sqlx::query_as::<_, PostViewRow>(&format!("{SELECT_POST_VIEW} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Second query for the tags of every row, grouped in memory
    async fn with_tags(&self, rows: Vec<PostViewRow>) -> ContentResult<Vec<PostView>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.post.id).collect();
        let tag_rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT pt.post_id, t.id, t.name, t.slug
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            by_post.entry(row.post_id).or_default().push(Tag {
                id: TagId::from_uuid(row.id),
                name: row.name,
                slug: row.slug,
            });
        }

        rows.into_iter()
            .map(|row| {
                let tags = by_post.remove(&row.post.id).unwrap_or_default();
                row.into_view(tags)
            })
            .collect()
    }
}

/// Get-or-create each tag by slug and link it to the post
async fn link_tags(conn: &mut PgConnection, post_id: Uuid, tags: &[NewTag]) -> ContentResult<()> {
    for tag in tags {
        let tag_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO tags (id, name, slug)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&tag.name)
        .bind(&tag.slug)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn lower_comment_count(conn: &mut PgConnection, post_id: Uuid, by: i64) -> ContentResult<()> {
    sqlx::query("UPDATE posts SET comment_count = GREATEST(comment_count - $2, 0) WHERE id = $1")
        .bind(post_id)
        .bind(by)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete a base comment with its replies; empty if it was already gone
async fn remove_comment(conn: &mut PgConnection, id: Uuid) -> ContentResult<RemovedComments> {
    let subs: Vec<Uuid> =
        sqlx::query_scalar("DELETE FROM sub_post_comments WHERE post_comment_id = $1 RETURNING id")
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

    let post_id: Option<Uuid> =
        sqlx::query_scalar("DELETE FROM post_comments WHERE id = $1 RETURNING post_id")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some(post_id) = post_id else {
        return Ok(RemovedComments::default());
    };

    lower_comment_count(conn, post_id, 1 + subs.len() as i64).await?;

    Ok(RemovedComments {
        comments: vec![CommentId::from_uuid(id)],
        sub_comments: subs.into_iter().map(SubCommentId::from_uuid).collect(),
    })
}

async fn remove_sub_comment(conn: &mut PgConnection, id: Uuid) -> ContentResult<RemovedComments> {
    let post_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        DELETE FROM sub_post_comments s
        USING post_comments c
        WHERE s.id = $1 AND c.id = s.post_comment_id
        RETURNING c.post_id
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(post_id) = post_id else {
        return Ok(RemovedComments::default());
    };

    lower_comment_count(conn, post_id, 1).await?;

    Ok(RemovedComments {
        comments: Vec::new(),
        sub_comments: vec![SubCommentId::from_uuid(id)],
    })
}

/// Drop reports that point at any of the removed comments, except `keep`
async fn drop_reports_for(
    conn: &mut PgConnection,
    removed: &RemovedComments,
    keep: Option<Uuid>,
) -> ContentResult<u64> {
    let comments: Vec<Uuid> = removed.comments.iter().map(|id| *id.as_uuid()).collect();
    let subs: Vec<Uuid> = removed.sub_comments.iter().map(|id| *id.as_uuid()).collect();

    let deleted = sqlx::query(
        r#"
        DELETE FROM report_comments
        WHERE ((type_comment = 'base' AND comment_id = ANY($1))
           OR (type_comment = 'sub' AND comment_id = ANY($2)))
          AND id IS DISTINCT FROM $3
        "#,
    )
    .bind(&comments)
    .bind(&subs)
    .bind(keep)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    Ok(deleted)
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgContentRepository {
    async fn insert_category(&self, category: &Category) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, slug, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.slug)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(category_id = %category.id, "Category inserted");
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> ContentResult<()> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, slug = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.slug)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_category(&self, id: &CategoryId) -> ContentResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, slug, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn find_category_by_slug(&self, slug: &str) -> ContentResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, slug, created_at, updated_at FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn slug_taken(&self, slug: &str, except: Option<CategoryId>) -> ContentResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(except.map(CategoryId::into_uuid))
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn delete_category(&self, id: &CategoryId) -> ContentResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_category_posts(&self, id: &CategoryId) -> ContentResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE category_id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_categories(&self, all_statuses: bool) -> ContentResult<Vec<CategoryWithCount>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            r#"
            SELECT
                c.id,
                c.name,
                c.description,
                c.slug,
                c.created_at,
                c.updated_at,
                COUNT(p.id) FILTER (WHERE $1 OR p.status = 'published') AS post_count
            FROM categories c
            LEFT JOIN posts p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(all_statuses)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryWithCount {
                post_count: row.post_count,
                category: row.category.into_category(),
            })
            .collect())
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgContentRepository {
    async fn insert_post(&self, post: &Post, tags: &[NewTag]) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, user_id, category_id, title, slug, content, status,
                thumbnail_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.user_id.as_uuid())
        .bind(post.category_id.map(CategoryId::into_uuid))
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(post.status.code())
        .bind(&post.thumbnail_url)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?;

        link_tags(&mut tx, post.id.into_uuid(), tags).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_post(&self, post: &Post, tags: &[NewTag]) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE posts
            SET category_id = $2, title = $3, slug = $4, content = $5, status = $6,
                thumbnail_url = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.category_id.map(CategoryId::into_uuid))
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(post.status.code())
        .bind(&post.thumbnail_url)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post.id.as_uuid())
            .execute(&mut *tx)
            .await?;
        link_tags(&mut tx, post.id.into_uuid(), tags).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> ContentResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, category_id, title, slug, content, status, thumbnail_url,
                   view_count, like_count, comment_count, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PostRow::into_post).transpose()
    }

    async fn find_post_view(&self, id: &PostId) -> ContentResult<Option<PostView>> {
        self.fetch_view(id.into_uuid()).await
    }

    async fn view_published_post(&self, slug: &str) -> ContentResult<Option<PostView>> {
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE posts SET view_count = view_count + 1
            WHERE slug = $1 AND status = 'published'
            RETURNING id
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match id {
            Some(id) => self.fetch_view(id).await,
            None => Ok(None),
        }
    }

    async fn list_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostView>> {
        let order = match query.order {
            PostOrder::Newest => "p.created_at DESC",
            PostOrder::MostViewed => "p.view_count DESC, p.created_at DESC",
        };
        let sql = format!("{SELECT_POST_VIEW} {POST_FILTER} ORDER BY {order} LIMIT $7 OFFSET $8");
        self.fetch_views(&sql, query).await
    }

    async fn count_posts(&self, query: &PostQuery) -> ContentResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM posts p {POST_FILTER}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(query.status.map(|s| s.code()))
            .bind(query.category_id.map(CategoryId::into_uuid))
            .bind(query.author_id.map(UserId::into_uuid))
            .bind(query.tag_slug.as_deref())
            .bind(query.search.as_deref().map(like_literal))
            .bind(query.exclude.map(PostId::into_uuid))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delete_posts(&self, ids: &[PostId]) -> ContentResult<DeletedPosts> {
        let ids = post_uuids(ids);
        let mut tx = self.pool.begin().await?;

        let comments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM post_comments WHERE post_id = ANY($1)")
                .bind(&ids)
                .fetch_one(&mut *tx)
                .await?;
        let sub_comments: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM sub_post_comments s
            JOIN post_comments c ON c.id = s.post_comment_id
            WHERE c.post_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM report_comments WHERE post_id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;

        // Comments, sub-comments, tag links and favorites cascade
        let deleted: Vec<(Uuid, String)> =
            sqlx::query_as("DELETE FROM posts WHERE id = ANY($1) RETURNING id, thumbnail_url")
                .bind(&ids)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        let mut result = DeletedPosts {
            comments,
            sub_comments,
            ..Default::default()
        };
        for (id, thumbnail_url) in deleted {
            result.post_ids.push(PostId::from_uuid(id));
            if !thumbnail_url.is_empty() {
                result.thumbnails.push(thumbnail_url);
            }
        }
        Ok(result)
    }

    async fn set_post_status(
        &self,
        ids: &[PostId],
        status: PostStatus,
        only_from: Option<PostStatus>,
    ) -> ContentResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET status = $2, updated_at = now()
            WHERE id = ANY($1) AND ($3::text IS NULL OR status = $3)
            "#,
        )
        .bind(post_uuids(ids))
        .bind(status.code())
        .bind(only_from.map(|s| s.code()))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgContentRepository {
    async fn list_tags(&self) -> ContentResult<Vec<Tag>> {
        let rows: Vec<(Uuid, String, String)> =
            sqlx::query_as("SELECT id, name, slug FROM tags ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, slug)| Tag {
                id: TagId::from_uuid(id),
                name,
                slug,
            })
            .collect())
    }

    async fn popular_tags(&self, limit: i64) -> ContentResult<Vec<TagUsage>> {
        let rows: Vec<(Uuid, String, String, i64)> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.slug, COUNT(*) AS post_count
            FROM tags t
            JOIN post_tags pt ON pt.tag_id = t.id
            JOIN posts p ON p.id = pt.post_id AND p.status = 'published'
            GROUP BY t.id
            ORDER BY post_count DESC, t.name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, slug, post_count)| TagUsage {
                tag: Tag {
                    id: TagId::from_uuid(id),
                    name,
                    slug,
                },
                post_count,
            })
            .collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgContentRepository {
    async fn insert_comment(&self, comment: &PostComment) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO post_comments (id, user_id, post_id, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(&comment.comment)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1")
            .bind(comment.post_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn insert_sub_comment(&self, sub: &SubComment) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sub_post_comments (id, user_id, post_comment_id, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(sub.id.as_uuid())
        .bind(sub.user_id.as_uuid())
        .bind(sub.post_comment_id.as_uuid())
        .bind(&sub.comment)
        .bind(sub.created_at)
        .bind(sub.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1")
            .bind(sub.post_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_comment(&self, id: &CommentId) -> ContentResult<Option<PostComment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, user_id, post_id, comment, created_at, updated_at
            FROM post_comments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn find_sub_comment(&self, id: &SubCommentId) -> ContentResult<Option<SubComment>> {
        let row = sqlx::query_as::<_, SubCommentRow>(
            r#"
            SELECT s.id, s.user_id, s.post_comment_id, c.post_id, s.comment, s.created_at, s.updated_at
            FROM sub_post_comments s
            JOIN post_comments c ON c.id = s.post_comment_id
            WHERE s.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubCommentRow::into_sub_comment))
    }

    async fn update_comment(&self, comment: &PostComment) -> ContentResult<()> {
        sqlx::query("UPDATE post_comments SET comment = $2, updated_at = $3 WHERE id = $1")
            .bind(comment.id.as_uuid())
            .bind(&comment.comment)
            .bind(comment.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_sub_comment(&self, sub: &SubComment) -> ContentResult<()> {
        sqlx::query("UPDATE sub_post_comments SET comment = $2, updated_at = $3 WHERE id = $1")
            .bind(sub.id.as_uuid())
            .bind(&sub.comment)
            .bind(sub.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: &CommentId) -> ContentResult<RemovedComments> {
        let mut tx = self.pool.begin().await?;
        let removed = remove_comment(&mut tx, id.into_uuid()).await?;
        let reports = drop_reports_for(&mut tx, &removed, None).await?;
        tx.commit().await?;

        tracing::debug!(comment_id = %id, removed = removed.total(), reports, "Comment removed");
        Ok(removed)
    }

    async fn delete_sub_comment(&self, id: &SubCommentId) -> ContentResult<RemovedComments> {
        let mut tx = self.pool.begin().await?;
        let removed = remove_sub_comment(&mut tx, id.into_uuid()).await?;
        drop_reports_for(&mut tx, &removed, None).await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn list_threads(&self, post_id: &PostId) -> ContentResult<Vec<CommentThread>> {
        let comments = sqlx::query_as::<_, CommentWithAuthorRow>(
            r#"
            SELECT
                c.id, c.user_id, c.post_id, c.comment, c.created_at, c.updated_at,
                u.username AS author_username,
                u.name AS author_name,
                u.avatar AS author_avatar
            FROM post_comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let replies = sqlx::query_as::<_, SubCommentWithAuthorRow>(
            r#"
            SELECT
                s.id, s.user_id, s.post_comment_id, c.post_id, s.comment, s.created_at, s.updated_at,
                u.username AS author_username,
                u.name AS author_name,
                u.avatar AS author_avatar
            FROM sub_post_comments s
            JOIN post_comments c ON c.id = s.post_comment_id
            JOIN users u ON u.id = s.user_id
            WHERE c.post_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let mut by_parent: HashMap<Uuid, Vec<ReplyView>> = HashMap::new();
        for row in replies {
            let author = row.author.into_card(row.sub.user_id);
            let reply = row.sub.into_sub_comment();
            by_parent
                .entry(reply.post_comment_id.into_uuid())
                .or_default()
                .push(ReplyView { reply, author });
        }

        Ok(comments
            .into_iter()
            .map(|row| {
                let author = row.author.into_card(row.comment.user_id);
                let comment = row.comment.into_comment();
                let replies = by_parent.remove(comment.id.as_uuid()).unwrap_or_default();
                CommentThread {
                    comment,
                    author,
                    replies,
                }
            })
            .collect())
    }
}

// ============================================================================
// Report Repository Implementation
// ============================================================================

impl ReportRepository for PgContentRepository {
    async fn find_report(&self, id: &ReportId) -> ContentResult<Option<ReportComment>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!("{SELECT_REPORT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ReportRow::into_report).transpose()
    }

    async fn find_report_for(
        &self,
        type_comment: CommentType,
        comment_id: Uuid,
    ) -> ContentResult<Option<ReportComment>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "{SELECT_REPORT} WHERE type_comment = $1 AND comment_id = $2"
        ))
        .bind(type_comment.code())
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReportRow::into_report).transpose()
    }

    async fn find_reports(&self, ids: &[ReportId]) -> ContentResult<Vec<ReportComment>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "{SELECT_REPORT} WHERE id = ANY($1) ORDER BY created_at"
        ))
        .bind(report_uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }

    async fn insert_report(&self, report: &ReportComment) -> ContentResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO report_comments (
                id, user_id, post_id, comment_id, type_comment, comment, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (type_comment, comment_id) DO NOTHING
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.user_id.as_uuid())
        .bind(report.post_id.as_uuid())
        .bind(report.comment_id)
        .bind(report.type_comment.code())
        .bind(&report.comment)
        .bind(report.status.code())
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn resolve_report(&self, id: &ReportId) -> ContentResult<Option<RemovedComments>> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent resolutions of the same report
        let row: Option<(String, Uuid, String)> = sqlx::query_as(
            "SELECT type_comment, comment_id, status FROM report_comments WHERE id = $1 FOR UPDATE",
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some((type_comment, comment_id, status)) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        if ReportStatus::from_code(&status) == ReportStatus::Resolved {
            tx.rollback().await?;
            return Ok(None);
        }

        let removed = match CommentType::from_code(&type_comment) {
            Some(CommentType::Base) => remove_comment(&mut tx, comment_id).await?,
            Some(CommentType::Sub) => remove_sub_comment(&mut tx, comment_id).await?,
            None => {
                return Err(ContentError::Internal(format!(
                    "Invalid comment type in database: {type_comment}"
                )));
            }
        };

        sqlx::query("UPDATE report_comments SET status = 'resolved', updated_at = now() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        let dropped = drop_reports_for(&mut tx, &removed, Some(id.into_uuid())).await?;
        tx.commit().await?;

        tracing::debug!(report_id = %id, removed = removed.total(), dropped, "Report resolved");
        Ok(Some(removed))
    }

    async fn delete_reports(&self, ids: &[ReportId]) -> ContentResult<u64> {
        let result = sqlx::query("DELETE FROM report_comments WHERE id = ANY($1)")
            .bind(report_uuids(ids))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_reports(&self) -> ContentResult<Vec<ReportView>> {
        let rows = sqlx::query_as::<_, ReportViewRow>(
            r#"
            SELECT
                r.id, r.user_id, r.post_id, r.comment_id, r.type_comment, r.comment, r.status,
                r.created_at, r.updated_at,
                u.username AS author_username,
                u.name AS author_name,
                u.avatar AS author_avatar,
                p.title AS post_title,
                p.slug AS post_slug,
                p.thumbnail_url AS post_thumbnail_url
            FROM report_comments r
            JOIN users u ON u.id = r.user_id
            JOIN posts p ON p.id = r.post_id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let author = row.author.into_card(row.report.user_id);
                let post = PostRef {
                    id: PostId::from_uuid(row.report.post_id),
                    title: row.post_title,
                    slug: row.post_slug,
                    thumbnail_url: row.post_thumbnail_url,
                };
                Ok(ReportView {
                    report: row.report.into_report()?,
                    author,
                    post,
                })
            })
            .collect()
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            slug: self.slug,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryCountRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    post_count: i64,
}

#[derive(sqlx::FromRow)]
struct AuthorColumns {
    author_username: String,
    author_name: String,
    author_avatar: String,
}

impl AuthorColumns {
    fn into_card(self, id: Uuid) -> AuthorCard {
        AuthorCard {
            id: UserId::from_uuid(id),
            username: self.author_username,
            name: self.author_name,
            avatar: self.author_avatar,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    category_id: Option<Uuid>,
    title: String,
    slug: String,
    content: String,
    status: String,
    thumbnail_url: String,
    view_count: i64,
    like_count: i64,
    comment_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> ContentResult<Post> {
        let status = PostStatus::from_code(&self.status)
            .map_err(|e| ContentError::Internal(format!("Invalid post status in database: {e}")))?;

        Ok(Post {
            id: PostId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            category_id: self.category_id.map(CategoryId::from_uuid),
            title: self.title,
            slug: self.slug,
            content: self.content,
            status,
            thumbnail_url: self.thumbnail_url,
            view_count: self.view_count,
            like_count: self.like_count,
            comment_count: self.comment_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostViewRow {
    #[sqlx(flatten)]
    post: PostRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl PostViewRow {
    fn into_view(self, tags: Vec<Tag>) -> ContentResult<PostView> {
        let author = self.author.into_card(self.post.user_id);
        let category = match (self.post.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategoryRef {
                id: CategoryId::from_uuid(id),
                name,
                slug,
            }),
            _ => None,
        };

        Ok(PostView {
            post: self.post.into_post()?,
            author,
            category,
            tags,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostTagRow {
    post_id: Uuid,
    id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    post_id: Uuid,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> PostComment {
        PostComment {
            id: CommentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            post_id: PostId::from_uuid(self.post_id),
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentWithAuthorRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
}

#[derive(sqlx::FromRow)]
struct SubCommentRow {
    id: Uuid,
    user_id: Uuid,
    post_comment_id: Uuid,
    post_id: Uuid,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SubCommentRow {
    fn into_sub_comment(self) -> SubComment {
        SubComment {
            id: SubCommentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            post_comment_id: CommentId::from_uuid(self.post_comment_id),
            post_id: PostId::from_uuid(self.post_id),
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubCommentWithAuthorRow {
    #[sqlx(flatten)]
    sub: SubCommentRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    post_id: Uuid,
    comment_id: Uuid,
    type_comment: String,
    comment: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> ContentResult<ReportComment> {
        let type_comment = CommentType::from_code(&self.type_comment).ok_or_else(|| {
            ContentError::Internal(format!(
                "Invalid comment type in database: {}",
                self.type_comment
            ))
        })?;

        Ok(ReportComment {
            id: ReportId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            post_id: PostId::from_uuid(self.post_id),
            comment_id: self.comment_id,
            type_comment,
            comment: self.comment,
            status: ReportStatus::from_code(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReportViewRow {
    #[sqlx(flatten)]
    report: ReportRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
    post_title: String,
    post_slug: String,
    post_thumbnail_url: String,
}
