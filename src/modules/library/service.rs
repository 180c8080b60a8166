use super::dto::{
    CONTINUE_WATCHING_LIMIT, ContinueWatchingItem, LIKED_VIDEOS_LIMIT, LikeResponse,
    MyListResponse,
};
use super::model::WatchProgress;
use crate::common::error::AppError;
use crate::modules::auth::dto::AuthUser;
use crate::state::AppState;

pub struct LibraryService;

impl LibraryService {
    pub async fn toggle_like(
        state: AppState,
        user: &AuthUser,
        video_id: &str,
    ) -> Result<LikeResponse, AppError> {
        if state.content.find_playable(video_id).await.is_none() {
            return Err(AppError::not_found("Video"));
        }

        let liked = state.library.toggle_like(&user.id, video_id).await;
        Ok(LikeResponse {
            video_id: video_id.to_string(),
            liked,
        })
    }

    pub async fn is_liked(state: AppState, user: &AuthUser, video_id: &str) -> LikeResponse {
        LikeResponse {
            video_id: video_id.to_string(),
            liked: state.library.is_liked(&user.id, video_id).await,
        }
    }

    /// Continue-watching and liked rows. Ids no longer in the catalog are
    /// skipped before the row limits apply.
    pub async fn my_list(state: AppState, user: &AuthUser) -> MyListResponse {
        let library = state.library.get(&user.id).await;

        let mut continue_watching = Vec::new();
        for record in library.continue_watching() {
            if continue_watching.len() == CONTINUE_WATCHING_LIMIT {
                break;
            }
            if let Some(video) = state.content.find_playable(&record.video_id).await {
                continue_watching.push(ContinueWatchingItem {
                    video,
                    progress: record.progress,
                    last_watched: record.last_watched,
                });
            }
        }

        let mut liked = Vec::new();
        for video_id in &library.liked_video_ids {
            if liked.len() == LIKED_VIDEOS_LIMIT {
                break;
            }
            if let Some(video) = state.content.find_playable(video_id).await {
                liked.push(video);
            }
        }

        MyListResponse {
            continue_watching,
            liked,
        }
    }

    pub async fn progress(state: AppState, user: &AuthUser) -> Vec<WatchProgress> {
        state.library.progress(&user.id).await
    }

    pub async fn mark_landing_seen(state: AppState, user: &AuthUser) {
        state.library.mark_landing_seen(&user.id).await
    }
}
