//! API route configuration.
//!
//! Routes are grouped by the access they require. Authentication layers are
//! applied by [`protected`] and [`admin_only`]; rate limiting is applied by
//! the top-level router.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{algo, auth, career, coding, members, study, study_recruit};
use crate::api::middleware::auth as auth_middleware;
use crate::application::services::image_upload::MAX_IMAGES_PER_POST;
use crate::state::AppState;

/// Room for the text fields of a multipart form.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Body limit for a multipart post carrying the maximum number of images.
pub fn upload_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .saturating_mul(MAX_IMAGES_PER_POST)
        .saturating_add(FORM_OVERHEAD_BYTES)
}

/// `POST` route for a multipart handler with a raised body limit.
fn upload<H, T>(handler: H, body_limit: usize) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler)
        .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
}

/// Unauthenticated routes.
///
/// - `POST /auth/register`
/// - `POST /auth/login`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
}

/// Routes available to every authenticated member.
///
/// # Endpoints
///
/// - `POST   /auth/logout`
/// - `GET    /members/me`, `/members/me/career-posts`, `/members/{id}`, `/members/{id}/career-posts`
/// - `GET    /algo/roadmaps`, `/algo/roadmaps/{id}/posts`, `/algo/posts/{id}`, `/algo/posts/{id}/quizzes`
/// - `POST   /algo/quizzes/{id}/answer`, `/algo/posts/{id}/likes`
/// - `GET|POST /algo/posts/{id}/comments`, `PUT|DELETE /algo/comments/{id}`
/// - `GET    /coding/problems`, `/coding/problems/{id}`
/// - `GET|POST /coding/posts`, `GET|PUT|DELETE /coding/posts/{id}`
/// - `POST   /coding/posts/{id}/images`, `/coding/posts/{id}/likes`
/// - `GET|POST /coding/posts/{id}/comments`, `PUT|DELETE /coding/comments/{id}`
/// - `GET|POST /study-recruit/posts`, `GET|PUT|DELETE /study-recruit/posts/{id}`
/// - `POST   /study-recruit/posts/{id}/close`
/// - `GET|POST|DELETE /study-recruit/posts/{id}/applicants`
/// - `PATCH  /study-recruit/posts/{id}/applicants/{applicant_id}`
/// - `GET|POST /study-recruit/posts/{id}/comments`, `PUT|DELETE /study-recruit/comments/{id}`
/// - `POST   /studies`, `GET /studies/{id}`, `POST /studies/{id}/members`
/// - `POST   /studies/{id}/roadmaps`, `GET /studies/{id}/roadmaps/{roadmap_id}`
/// - `GET|POST /career/posts`, `GET|DELETE /career/posts/{id}`
pub fn member_routes(max_image_bytes: usize) -> Router<AppState> {
    let body_limit = upload_body_limit(max_image_bytes);

    Router::new()
        .route("/auth/logout", post(auth::logout_handler))
        // Members
        .route("/members/me", get(members::me_handler))
        .route(
            "/members/me/career-posts",
            get(members::my_career_posts_handler),
        )
        .route("/members/{id}", get(members::member_handler))
        .route(
            "/members/{id}/career-posts",
            get(career::member_posts_handler),
        )
        // Algo
        .route("/algo/roadmaps", get(algo::list_roadmaps_handler))
        .route("/algo/roadmaps/{id}/posts", get(algo::list_posts_handler))
        .route("/algo/posts/{id}", get(algo::get_post_handler))
        .route("/algo/posts/{id}/quizzes", get(algo::list_quizzes_handler))
        .route("/algo/posts/{id}/likes", post(algo::like_post_handler))
        .route(
            "/algo/posts/{id}/comments",
            get(algo::list_comments_handler).post(algo::add_comment_handler),
        )
        .route(
            "/algo/comments/{id}",
            put(algo::update_comment_handler).delete(algo::delete_comment_handler),
        )
        .route(
            "/algo/quizzes/{id}/answer",
            post(algo::submit_answer_handler),
        )
        // Coding
        .route("/coding/problems", get(coding::list_problems_handler))
        .route("/coding/problems/{id}", get(coding::get_problem_handler))
        .route(
            "/coding/posts",
            upload(coding::create_post_handler, body_limit).get(coding::list_posts_handler),
        )
        .route(
            "/coding/posts/{id}",
            get(coding::get_post_handler)
                .put(coding::update_post_handler)
                .delete(coding::delete_post_handler),
        )
        .route(
            "/coding/posts/{id}/images",
            upload(coding::add_image_handler, body_limit),
        )
        .route("/coding/posts/{id}/likes", post(coding::like_post_handler))
        .route(
            "/coding/posts/{id}/comments",
            get(coding::list_comments_handler).post(coding::add_comment_handler),
        )
        .route(
            "/coding/comments/{id}",
            put(coding::update_comment_handler).delete(coding::delete_comment_handler),
        )
        // Study recruitment
        .route(
            "/study-recruit/posts",
            get(study_recruit::list_posts_handler).post(study_recruit::create_post_handler),
        )
        .route(
            "/study-recruit/posts/{id}",
            get(study_recruit::get_post_handler)
                .put(study_recruit::update_post_handler)
                .delete(study_recruit::delete_post_handler),
        )
        .route(
            "/study-recruit/posts/{id}/close",
            post(study_recruit::close_handler),
        )
        .route(
            "/study-recruit/posts/{id}/applicants",
            get(study_recruit::list_applicants_handler)
                .post(study_recruit::apply_handler)
                .delete(study_recruit::cancel_application_handler),
        )
        .route(
            "/study-recruit/posts/{id}/applicants/{applicant_id}",
            axum::routing::patch(study_recruit::decide_applicant_handler),
        )
        .route(
            "/study-recruit/posts/{id}/comments",
            get(study_recruit::list_comments_handler).post(study_recruit::create_comment_handler),
        )
        .route(
            "/study-recruit/comments/{id}",
            put(study_recruit::update_comment_handler)
                .delete(study_recruit::delete_comment_handler),
        )
        // Studies
        .route("/studies", post(study::create_study_handler))
        .route("/studies/{id}", get(study::get_study_handler))
        .route("/studies/{id}/members", post(study::add_member_handler))
        .route("/studies/{id}/roadmaps", post(study::create_roadmap_handler))
        .route(
            "/studies/{id}/roadmaps/{roadmap_id}",
            get(study::get_roadmap_handler),
        )
        // Career
        .route(
            "/career/posts",
            get(career::list_posts_handler).post(career::create_post_handler),
        )
        .route(
            "/career/posts/{id}",
            get(career::get_post_handler).delete(career::delete_post_handler),
        )
}

/// Content management routes, mounted under `/admin`.
///
/// # Endpoints
///
/// - `POST   /algo/roadmaps`, `PUT /algo/roadmaps/{id}`
/// - `POST   /algo/posts` (multipart), `PUT|DELETE /algo/posts/{id}`
/// - `POST   /algo/posts/{id}/quizzes`, `PUT|DELETE /algo/quizzes/{id}`
/// - `DELETE /algo/comments/{id}`
/// - `POST   /coding/problems`
/// - `DELETE /study-recruit/comments/{id}`
pub fn admin_routes(max_image_bytes: usize) -> Router<AppState> {
    let body_limit = upload_body_limit(max_image_bytes);

    Router::new()
        .route("/algo/roadmaps", post(algo::create_roadmap_handler))
        .route("/algo/roadmaps/{id}", put(algo::update_roadmap_handler))
        .route(
            "/algo/posts",
            upload(algo::create_post_handler, body_limit),
        )
        .route(
            "/algo/posts/{id}",
            put(algo::update_post_handler).delete(algo::delete_post_handler),
        )
        .route("/algo/posts/{id}/quizzes", post(algo::create_quiz_handler))
        .route(
            "/algo/quizzes/{id}",
            put(algo::update_quiz_handler).delete(algo::delete_quiz_handler),
        )
        .route(
            "/algo/comments/{id}",
            delete(algo::admin_delete_comment_handler),
        )
        .route("/coding/problems", post(coding::create_problem_handler))
        .route(
            "/study-recruit/comments/{id}",
            delete(study_recruit::admin_delete_comment_handler),
        )
}

/// Requires a valid bearer token on every route of `router`.
pub fn protected(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware::layer,
    ))
}

/// Requires a bearer token that belongs to an admin.
pub fn admin_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    protected(
        router.route_layer(middleware::from_fn(auth_middleware::require_admin)),
        state,
    )
}
