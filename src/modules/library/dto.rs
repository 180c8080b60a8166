use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::modules::content::model::PlayableItem;

pub const CONTINUE_WATCHING_LIMIT: usize = 6;
pub const LIKED_VIDEOS_LIMIT: usize = 12;

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub video_id: String,
    pub liked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContinueWatchingItem {
    pub video: PlayableItem,
    pub progress: f64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_watched: OffsetDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyListResponse {
    pub continue_watching: Vec<ContinueWatchingItem>,
    pub liked: Vec<PlayableItem>,
}
