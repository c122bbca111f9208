//! HTTP Handlers

use std::sync::Arc;

use auth::{AuthUser, TokenIssuer};
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use kernel::id::{CategoryId, CommentId, PostId, ReportId, SubCommentId};
use kernel::page::PageQuery;
use kernel::response::ApiResponse;
use platform::media::{MediaError, MediaStore, Upload};
use uuid::Uuid;

use crate::application::{
    CategoryUseCase, CommentUseCase, ContentConfig, PostFilter, PostInput, PostUseCase,
    ReportOutcome, ReportUseCase,
};
use crate::domain::entity::comment::CommentTarget;
use crate::domain::repository::ContentStore;
use crate::domain::value_object::comment_type::CommentType;
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::{
    AdminPostListQuery, CategoriesPayload, CategoryPayload, CategoryPostsPayload, CategoryRequest,
    CategoryResponse, CommentListQuery, CommentPayload, CommentResponse, CommentTypeQuery,
    CommentsPayload, CreateCommentRequest, CreateReportRequest, DeletedCountPayload,
    DeletedPostsPayload, ImagePayload, LimitQuery, ModifiedPayload, PopularTagsPayload,
    PostIdsRequest, PostListQuery, PostPagePayload, PostPayload, PostResponse, PostsPayload,
    RelatedQuery, RemovedCommentsPayload, ReportIdsRequest, ReportPayload, ReportsPayload,
    ResolvedReportsPayload, SlugQuery, TagsPayload, UpdateCommentRequest, post_list,
};

/// Shared state for content handlers
pub struct ContentAppState<R, S>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<S>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<ContentConfig>,
}

impl<R, S> Clone for ContentAppState<R, S>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            media: self.media.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, S> ContentAppState<R, S>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    pub fn new(repo: R, media: Arc<S>, tokens: Arc<TokenIssuer>, config: Arc<ContentConfig>) -> Self {
        Self {
            repo: Arc::new(repo),
            media,
            tokens,
            config,
        }
    }

    fn posts(&self) -> PostUseCase<R, R, S> {
        PostUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.media.clone(),
            self.config.clone(),
        )
    }

    fn categories(&self) -> CategoryUseCase<R, R> {
        CategoryUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    fn comments(&self) -> CommentUseCase<R, R> {
        CommentUseCase::new(self.repo.clone(), self.repo.clone())
    }

    fn reports(&self) -> ReportUseCase<R, R> {
        ReportUseCase::new(self.repo.clone(), self.repo.clone())
    }
}

// ============================================================================
// Posts (authoring)
// ============================================================================

/// POST /api/v1/posts
pub async fn create_post<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    multipart: Multipart,
) -> ContentResult<ApiResponse<PostPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let input = read_post_form(multipart).await?;
    let view = state.posts().create(actor, input).await?;

    Ok(ApiResponse::created(
        "Create post successfully",
        PostPayload { post: view.into() },
    ))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Path(id): Path<PostId>,
    multipart: Multipart,
) -> ContentResult<ApiResponse<PostPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let input = read_post_form(multipart).await?;
    let view = state.posts().update(actor, id, input).await?;

    Ok(ApiResponse::ok(
        "Update post successfully",
        PostPayload { post: view.into() },
    ))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Path(id): Path<PostId>,
) -> ContentResult<ApiResponse<DeletedPostsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let deleted = state.posts().delete(actor, id).await?;
    Ok(ApiResponse::ok("Delete post successfully", deleted.into()))
}

/// POST /api/v1/posts/image
pub async fn upload_image<R, S>(
    State(state): State<ContentAppState<R, S>>,
    multipart: Multipart,
) -> ContentResult<ApiResponse<ImagePayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let upload = read_image(multipart).await?;
    let url = state.posts().upload_image(upload).await?;
    Ok(ApiResponse::ok("Upload image successfully", ImagePayload { url }))
}

/// GET /api/v1/posts/detail/{id}
pub async fn post_detail_by_id<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Path(id): Path<PostId>,
) -> ContentResult<ApiResponse<PostPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let view = state.posts().detail(actor, id).await?;
    Ok(ApiResponse::ok("Get post successfully", PostPayload { post: view.into() }))
}

/// GET /api/v1/posts/me
pub async fn my_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Query(page): Query<PageQuery>,
) -> ContentResult<ApiResponse<PostPagePayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let posts = state.posts().mine(actor, page).await?;
    Ok(ApiResponse::ok(
        "Get posts successfully",
        PostPagePayload {
            posts: posts.map(PostResponse::from),
        },
    ))
}

/// GET /api/v1/posts/tags
pub async fn list_tags<R, S>(
    State(state): State<ContentAppState<R, S>>,
) -> ContentResult<ApiResponse<TagsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let tags = state.posts().tags().await?;
    Ok(ApiResponse::ok(
        "Get tags successfully",
        TagsPayload {
            tags: tags.into_iter().map(Into::into).collect(),
        },
    ))
}

// ============================================================================
// Posts (public feeds)
// ============================================================================

/// GET /api/v1/posts/latest
pub async fn latest_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<LimitQuery>,
) -> ContentResult<ApiResponse<PostsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let posts = state.posts().latest(query.limit).await?;
    Ok(ApiResponse::ok(
        "Get latest posts successfully",
        PostsPayload {
            posts: post_list(posts),
        },
    ))
}

/// GET /api/v1/posts/get-all
pub async fn list_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<PostListQuery>,
) -> ContentResult<ApiResponse<PostPagePayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let page = query.page_query();
    let filter = PostFilter {
        category_id: query.category_id,
        tag: query.tag,
        search: query.search,
    };
    let posts = state.posts().list_published(filter, page).await?;

    Ok(ApiResponse::ok(
        "Get posts successfully",
        PostPagePayload {
            posts: posts.map(PostResponse::from),
        },
    ))
}

/// GET /api/v1/posts/most-view
pub async fn most_viewed_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<LimitQuery>,
) -> ContentResult<ApiResponse<PostsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let posts = state.posts().most_viewed(query.limit).await?;
    Ok(ApiResponse::ok(
        "Get most viewed posts successfully",
        PostsPayload {
            posts: post_list(posts),
        },
    ))
}

/// GET /api/v1/posts/most-tags
pub async fn popular_tags<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<LimitQuery>,
) -> ContentResult<ApiResponse<PopularTagsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let tags = state.posts().popular_tags(query.limit).await?;
    Ok(ApiResponse::ok(
        "Get popular tags successfully",
        PopularTagsPayload {
            tags: tags.into_iter().map(Into::into).collect(),
        },
    ))
}

/// GET /api/v1/posts/relate-posts
pub async fn related_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<RelatedQuery>,
) -> ContentResult<ApiResponse<PostsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let posts = state.posts().related(query.post_id, query.limit).await?;
    Ok(ApiResponse::ok(
        "Get related posts successfully",
        PostsPayload {
            posts: post_list(posts),
        },
    ))
}

/// GET /api/v1/posts/detail?slug=
pub async fn post_detail<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<SlugQuery>,
) -> ContentResult<ApiResponse<PostPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let view = state.posts().detail_by_slug(&query.slug).await?;
    Ok(ApiResponse::ok("Get post successfully", PostPayload { post: view.into() }))
}

// ============================================================================
// Posts (admin)
// ============================================================================

/// GET /api/v1/posts/admin/get-all
pub async fn admin_list_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<AdminPostListQuery>,
) -> ContentResult<ApiResponse<PostPagePayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let page = query.page_query();
    let posts = state
        .posts()
        .admin_list(query.status, query.search, page)
        .await?;

    Ok(ApiResponse::ok(
        "Get posts successfully",
        PostPagePayload {
            posts: posts.map(PostResponse::from),
        },
    ))
}

/// GET /api/v1/posts/admin/detail/{id}
pub async fn admin_post_detail<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(id): Path<PostId>,
) -> ContentResult<ApiResponse<PostPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let view = state.posts().admin_detail(id).await?;
    Ok(ApiResponse::ok("Get post successfully", PostPayload { post: view.into() }))
}

/// PUT /api/v1/posts/admin/block
pub async fn block_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<PostIdsRequest>,
) -> ContentResult<ApiResponse<ModifiedPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let modified_count = state.posts().block(&req.ids).await?;
    Ok(ApiResponse::ok(
        "Block posts successfully",
        ModifiedPayload { modified_count },
    ))
}

/// PUT /api/v1/posts/admin/unblock
pub async fn unblock_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<PostIdsRequest>,
) -> ContentResult<ApiResponse<ModifiedPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let modified_count = state.posts().unblock(&req.ids).await?;
    Ok(ApiResponse::ok(
        "Unblock posts successfully",
        ModifiedPayload { modified_count },
    ))
}

/// POST /api/v1/posts/admin/delete-many-posts
pub async fn delete_many_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<PostIdsRequest>,
) -> ContentResult<ApiResponse<DeletedPostsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let deleted = state.posts().delete_many(&req.ids).await?;
    Ok(ApiResponse::ok("Delete posts successfully", deleted.into()))
}

// ============================================================================
// Categories
// ============================================================================

/// POST /api/v1/category-post
pub async fn create_category<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<CategoryRequest>,
) -> ContentResult<ApiResponse<CategoryPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let category = state
        .categories()
        .create(&req.name, req.description)
        .await?;

    Ok(ApiResponse::created(
        "Create category successfully",
        CategoryPayload {
            category: category.into(),
        },
    ))
}

/// PUT /api/v1/category-post/{id}
pub async fn update_category<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(id): Path<CategoryId>,
    Json(req): Json<CategoryRequest>,
) -> ContentResult<ApiResponse<CategoryPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let category = state
        .categories()
        .update(id, &req.name, req.description)
        .await?;

    Ok(ApiResponse::ok(
        "Update category successfully",
        CategoryPayload {
            category: category.into(),
        },
    ))
}

/// DELETE /api/v1/category-post/{id}
pub async fn delete_category<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(id): Path<CategoryId>,
) -> ContentResult<ApiResponse>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    state.categories().delete(id).await?;
    Ok(ApiResponse::message("Delete category successfully"))
}

/// GET /api/v1/category-post
pub async fn list_categories<R, S>(
    State(state): State<ContentAppState<R, S>>,
) -> ContentResult<ApiResponse<CategoriesPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let categories = state.categories().list_public().await?;
    Ok(ApiResponse::ok(
        "Get categories successfully",
        CategoriesPayload {
            categories: categories.into_iter().map(Into::into).collect(),
        },
    ))
}

/// GET /api/v1/category-post/get/by-admin
pub async fn admin_list_categories<R, S>(
    State(state): State<ContentAppState<R, S>>,
) -> ContentResult<ApiResponse<CategoriesPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let categories = state.categories().list_admin().await?;
    Ok(ApiResponse::ok(
        "Get categories successfully",
        CategoriesPayload {
            categories: categories.into_iter().map(Into::into).collect(),
        },
    ))
}

/// GET /api/v1/category-post/{slug}
///
/// Shares the path segment with update and delete, which read it as an id.
pub async fn category_detail<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(slug): Path<String>,
    Query(page): Query<PageQuery>,
) -> ContentResult<ApiResponse<CategoryPostsPayload<kernel::page::Page<PostResponse>>>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let (category, posts) = state.categories().detail(&slug, page).await?;
    Ok(ApiResponse::ok(
        "Get category successfully",
        CategoryPostsPayload {
            category: CategoryResponse::from(category),
            posts: posts.map(PostResponse::from),
        },
    ))
}

/// GET /api/v1/category-post/posts/{id}
pub async fn category_posts<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(id): Path<CategoryId>,
) -> ContentResult<ApiResponse<CategoryPostsPayload<Vec<PostResponse>>>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let (category, posts) = state.categories().posts_of(id).await?;
    Ok(ApiResponse::ok(
        "Get posts successfully",
        CategoryPostsPayload {
            category: category.into(),
            posts: post_list(posts),
        },
    ))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/v1/posts/comment
pub async fn create_comment<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Json(req): Json<CreateCommentRequest>,
) -> ContentResult<ApiResponse<CommentPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let record = state
        .comments()
        .create(actor, req.post_id, &req.comment, req.parent_comment_id)
        .await?;

    Ok(ApiResponse::created(
        "Comment successfully",
        CommentPayload {
            comment: CommentResponse::from(record),
        },
    ))
}

/// GET /api/v1/posts/comment?postId=
pub async fn list_comments<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Query(query): Query<CommentListQuery>,
) -> ContentResult<ApiResponse<CommentsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let threads = state.comments().list(query.post_id).await?;
    Ok(ApiResponse::ok(
        "Get comments successfully",
        CommentsPayload {
            comments: threads.into_iter().map(Into::into).collect(),
        },
    ))
}

/// PUT /api/v1/posts/comment/{id}?type=
pub async fn update_comment<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CommentTypeQuery>,
    Json(req): Json<UpdateCommentRequest>,
) -> ContentResult<ApiResponse<CommentPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let target = comment_target(id, query)?;
    let record = state.comments().update(actor, target, &req.comment).await?;

    Ok(ApiResponse::ok(
        "Update comment successfully",
        CommentPayload {
            comment: CommentResponse::from(record),
        },
    ))
}

/// DELETE /api/v1/posts/comment/{id}?type=
pub async fn delete_comment<R, S>(
    State(state): State<ContentAppState<R, S>>,
    actor: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CommentTypeQuery>,
) -> ContentResult<ApiResponse<RemovedCommentsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let target = comment_target(id, query)?;
    let removed = state.comments().delete(actor, target).await?;
    Ok(ApiResponse::ok("Delete comment successfully", removed.into()))
}

// ============================================================================
// Reports
// ============================================================================

/// POST /api/v1/posts/comment/report
pub async fn report_comment<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<CreateReportRequest>,
) -> ContentResult<axum::response::Response>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    use axum::response::IntoResponse;

    let outcome = state
        .reports()
        .create(req.comment_id, &req.type_comment)
        .await?;

    Ok(match outcome {
        ReportOutcome::Created(report) => ApiResponse::created(
            "Report comment successfully",
            ReportPayload {
                report: report.into(),
            },
        )
        .into_response(),
        ReportOutcome::AlreadyReported => {
            ApiResponse::message("Report comment successfully").into_response()
        }
    })
}

/// GET /api/v1/posts/comment/report
pub async fn list_reports<R, S>(
    State(state): State<ContentAppState<R, S>>,
) -> ContentResult<ApiResponse<ReportsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let reports = state.reports().list().await?;
    Ok(ApiResponse::ok(
        "Get report comments successfully",
        ReportsPayload {
            reports: reports.into_iter().map(Into::into).collect(),
        },
    ))
}

/// PUT /api/v1/posts/comment/report/{id}/resolve
pub async fn resolve_report<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Path(id): Path<ReportId>,
) -> ContentResult<ApiResponse<RemovedCommentsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let removed = state.reports().resolve(id).await?;
    Ok(ApiResponse::ok("Resolve report comment successfully", removed.into()))
}

/// PUT /api/v1/posts/comment/report/resolve/multiple
pub async fn resolve_reports<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<ReportIdsRequest>,
) -> ContentResult<ApiResponse<ResolvedReportsPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let resolved = state.reports().resolve_many(&req.report_ids).await?;
    Ok(ApiResponse::ok(
        "Resolve report comments successfully",
        resolved.into(),
    ))
}

/// PUT /api/v1/posts/comment/report/delete/multiple
pub async fn delete_reports<R, S>(
    State(state): State<ContentAppState<R, S>>,
    Json(req): Json<ReportIdsRequest>,
) -> ContentResult<ApiResponse<DeletedCountPayload>>
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let deleted_count = state.reports().delete_many(&req.report_ids).await?;
    Ok(ApiResponse::ok(
        "Delete report comments successfully",
        DeletedCountPayload { deleted_count },
    ))
}

// ============================================================================
// Helpers
// ============================================================================

fn comment_target(id: Uuid, query: CommentTypeQuery) -> ContentResult<CommentTarget> {
    let type_comment = match query.type_comment.as_deref() {
        None | Some("") => CommentType::Base,
        Some(code) => CommentType::from_code(code).ok_or(ContentError::UnknownCommentType)?,
    };
    Ok(match type_comment {
        CommentType::Base => CommentTarget::Base(CommentId::from_uuid(id)),
        CommentType::Sub => CommentTarget::Sub(SubCommentId::from_uuid(id)),
    })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ContentError {
    ContentError::Validation(err.body_text())
}

/// Post form fields plus the optional `thumbnail` file
async fn read_post_form(mut multipart: Multipart) -> ContentResult<PostInput> {
    let mut input = PostInput::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "thumbnail" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !bytes.is_empty() {
                input.thumbnail = Some(Upload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "categoryId" => {
                let value = value.trim();
                input.category_id = if value.is_empty() {
                    None
                } else {
                    Some(value.parse::<CategoryId>().map_err(|_| {
                        ContentError::Validation("Invalid categoryId".to_string())
                    })?)
                };
            }
            "title" => input.title = value,
            "content" => input.content = value,
            "status" => input.status = Some(value),
            "tags" => input.tags = value,
            _ => {}
        }
    }

    Ok(input)
}

/// The `image` file of a multipart body
async fn read_image(mut multipart: Multipart) -> ContentResult<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ContentError::Media(MediaError::Empty))
}
