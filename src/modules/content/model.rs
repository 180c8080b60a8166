use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

time::serde::format_description!(pub calendar_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    pub duration: u32,
    pub views: u64,
    pub likes: u64,
    pub category: String,
    pub description: String,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub upload_date: Date,
    pub orientation: Orientation,
    #[serde(default, with = "calendar_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub release_date: Option<Date>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Episode {
    pub id: String,
    pub episode_number: u32,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    pub duration: u32,
    pub description: String,
    pub orientation: Orientation,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Season {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub category: String,
    pub views: u64,
    pub likes: u64,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub upload_date: Date,
    pub seasons: Vec<Season>,
}

impl Series {
    pub fn first_episode(&self) -> Option<&Episode> {
        self.seasons.first().and_then(|s| s.episodes.first())
    }

    pub fn find_episode(&self, episode_id: &str) -> Option<(u32, &Episode)> {
        self.seasons.iter().find_map(|season| {
            season
                .episodes
                .iter()
                .find(|e| e.id == episode_id)
                .map(|e| (season.season_number, e))
        })
    }
}

/// Anything a player screen can be pointed at: a movie, or an episode
/// presented with its series' catalogue metadata.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct PlayableItem {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    pub duration: u32,
    pub views: u64,
    pub likes: u64,
    pub category: String,
    pub description: String,
    pub orientation: Orientation,
    pub series_id: Option<String>,
}

impl From<&Movie> for PlayableItem {
    fn from(m: &Movie) -> Self {
        Self {
            id: m.id.clone(),
            title: m.title.clone(),
            thumbnail: m.thumbnail.clone(),
            video_url: m.video_url.clone(),
            duration: m.duration,
            views: m.views,
            likes: m.likes,
            category: m.category.clone(),
            description: m.description.clone(),
            orientation: m.orientation,
            series_id: None,
        }
    }
}

impl PlayableItem {
    pub fn from_episode(series: &Series, episode: &Episode) -> Self {
        Self {
            id: episode.id.clone(),
            title: episode.title.clone(),
            thumbnail: episode.thumbnail.clone(),
            video_url: episode.video_url.clone(),
            duration: episode.duration,
            views: series.views,
            likes: series.likes,
            category: series.category.clone(),
            description: episode.description.clone(),
            orientation: episode.orientation,
            series_id: Some(series.id.clone()),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum ReleaseLabel {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "COMING SOON")]
    ComingSoon,
}

/// Days after release during which a title still counts as new.
pub const NEW_RELEASE_WINDOW_DAYS: i64 = 30;

impl ReleaseLabel {
    pub fn for_release(release: Option<Date>, today: Date) -> Option<Self> {
        let release = release?;
        if release > today {
            return Some(ReleaseLabel::ComingSoon);
        }
        if (today - release).whole_days() <= NEW_RELEASE_WINDOW_DAYS {
            return Some(ReleaseLabel::New);
        }
        None
    }
}

pub const CATEGORIES: [&str; 6] = ["All", "Drama", "Romance", "Thriller", "Comedy", "Action"];
