//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AlgoService, AuthService, CareerService, CodingService, LikeService, MemberService,
    StudyRecruitService, StudyService,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::feedback::FeedbackClient;
use crate::infrastructure::persistence::{
    PgAlgoRepository, PgCareerRepository, PgCodingRepository, PgCommentRepository,
    PgLikeRepository, PgMemberRepository, PgStudyRecruitRepository, PgStudyRepository,
    PgTokenRepository,
};
use crate::infrastructure::storage::ImageStorage;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub auth_service: Arc<AuthService<PgMemberRepository, PgTokenRepository>>,
    pub member_service: Arc<MemberService<PgMemberRepository>>,
    pub algo_service: Arc<AlgoService<PgAlgoRepository, PgCommentRepository>>,
    pub coding_service: Arc<CodingService<PgCodingRepository, PgCommentRepository>>,
    pub like_service: Arc<LikeService<PgLikeRepository>>,
    pub study_recruit_service: Arc<StudyRecruitService<PgStudyRecruitRepository, PgCommentRepository>>,
    pub study_service: Arc<StudyService<PgStudyRepository>>,
    pub career_service: Arc<CareerService<PgCareerRepository, PgMemberRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub storage: Arc<dyn ImageStorage>,
    pub feedback: Arc<dyn FeedbackClient>,
}

/// Runtime knobs needed to wire the services.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub token_signing_secret: String,
    pub max_image_bytes: usize,
}

impl AppState {
    /// Builds repositories and services on top of one connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        storage: Arc<dyn ImageStorage>,
        feedback: Arc<dyn FeedbackClient>,
        settings: StateSettings,
    ) -> Self {
        let member_repository = Arc::new(PgMemberRepository::new(pool.clone()));
        let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));
        let algo_repository = Arc::new(PgAlgoRepository::new(pool.clone()));
        let coding_repository = Arc::new(PgCodingRepository::new(pool.clone()));
        let like_repository = Arc::new(PgLikeRepository::new(pool.clone()));
        let recruit_repository = Arc::new(PgStudyRecruitRepository::new(pool.clone()));
        let study_repository = Arc::new(PgStudyRepository::new(pool.clone()));
        let career_repository = Arc::new(PgCareerRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            member_repository.clone(),
            token_repository,
            settings.token_signing_secret,
        ));
        let member_service = Arc::new(MemberService::new(member_repository.clone(), cache.clone()));
        let algo_service = Arc::new(AlgoService::new(
            algo_repository,
            Arc::new(PgCommentRepository::algo(pool.clone())),
            storage.clone(),
            settings.max_image_bytes,
        ));
        let coding_service = Arc::new(CodingService::new(
            coding_repository,
            Arc::new(PgCommentRepository::coding(pool.clone())),
            storage.clone(),
            feedback.clone(),
            settings.max_image_bytes,
        ));
        let like_service = Arc::new(LikeService::new(like_repository, cache.clone()));
        let study_recruit_service = Arc::new(StudyRecruitService::new(
            recruit_repository,
            Arc::new(PgCommentRepository::study_recruit(pool.clone())),
        ));
        let study_service = Arc::new(StudyService::new(study_repository));
        let career_service = Arc::new(CareerService::new(career_repository, member_repository));

        Self {
            pool,
            auth_service,
            member_service,
            algo_service,
            coding_service,
            like_service,
            study_recruit_service,
            study_service,
            career_service,
            cache,
            storage,
            feedback,
        }
    }
}
