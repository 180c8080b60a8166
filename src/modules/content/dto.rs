use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::media_url::{VideoSource, normalize_video_url};
use super::model::{Movie, Orientation, ReleaseLabel, Series, calendar_date};

// --- MOVIE DTOs ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[validate(length(min = 1, message = "Video URL is required"))]
    pub video_url: String,
    pub duration: Option<u32>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    pub orientation: Option<Orientation>,
    #[serde(default, with = "calendar_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub upload_date: Option<Date>,
    #[serde(default, with = "calendar_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub release_date: Option<Date>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<u32>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub orientation: Option<Orientation>,
    #[serde(default, with = "calendar_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub release_date: Option<Date>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MovieFilter {
    /// `All` or absent disables the filter.
    pub category: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("") | Some("All") => true,
            Some(category) => movie.category == category,
        };
        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(q) => movie.title.to_lowercase().contains(&q.to_lowercase()),
        };
        category_ok && search_ok
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieResponse {
    pub movie: Movie,
    pub label: Option<ReleaseLabel>,
    pub source: VideoSource,
    pub playback_warning: Option<String>,
}

impl MovieResponse {
    pub fn new(movie: Movie, today: Date) -> Self {
        let normalized = normalize_video_url(&movie.video_url);
        Self {
            label: ReleaseLabel::for_release(movie.release_date, today),
            source: normalized.source,
            playback_warning: normalized.warning().map(str::to_string),
            movie,
        }
    }
}

// --- SERIES DTOs ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EpisodeInput {
    /// Kept when unique within the series, otherwise a fresh id is issued.
    pub id: Option<String>,
    pub episode_number: Option<u32>,
    #[validate(length(min = 1, message = "Episode title is required"))]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[validate(length(min = 1, message = "Episode video URL is required"))]
    pub video_url: String,
    pub duration: Option<u32>,
    #[serde(default)]
    pub description: String,
    pub orientation: Option<Orientation>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SeasonInput {
    pub season_number: u32,
    #[serde(default)]
    #[validate(nested)]
    pub episodes: Vec<EpisodeInput>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSeriesRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    #[serde(default, with = "calendar_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub upload_date: Option<Date>,
    #[serde(default)]
    #[validate(nested)]
    pub seasons: Vec<SeasonInput>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSeriesRequest {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    /// Replaces every season when present.
    #[validate(nested)]
    pub seasons: Option<Vec<SeasonInput>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEpisodeRequest {
    pub episode_number: Option<u32>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<u32>,
    pub description: Option<String>,
    pub orientation: Option<Orientation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesListResponse {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub category: String,
    pub views: u64,
    pub likes: u64,
    pub season_count: usize,
    pub episode_count: usize,
}

impl From<&Series> for SeriesListResponse {
    fn from(s: &Series) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            thumbnail: s.thumbnail.clone(),
            category: s.category.clone(),
            views: s.views,
            likes: s.likes,
            season_count: s.seasons.len(),
            episode_count: s.seasons.iter().map(|season| season.episodes.len()).sum(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesResponse {
    pub series: Series,
    /// Episode a detail screen starts on.
    pub default_episode_id: Option<String>,
}

impl From<Series> for SeriesResponse {
    fn from(series: Series) -> Self {
        Self {
            default_episode_id: series.first_episode().map(|e| e.id.clone()),
            series,
        }
    }
}
