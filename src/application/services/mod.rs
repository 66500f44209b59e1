//! Business logic services for the application layer.

pub mod algo_service;
pub mod auth_service;
pub mod career_service;
pub mod coding_service;
pub mod comment_service;
pub mod image_upload;
pub mod like_service;
pub mod member_service;
pub mod study_recruit_service;
pub mod study_service;

pub use algo_service::AlgoService;
pub use auth_service::{AuthService, IssuedToken, Registration};
pub use career_service::CareerService;
pub use coding_service::{CodingPostDraft, CodingService};
pub use comment_service::CommentService;
pub use like_service::LikeService;
pub use member_service::{MemberDetail, MemberService};
pub use study_recruit_service::StudyRecruitService;
pub use study_service::{StudyOverview, StudyService};
