use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::dto::{
    CreateMovieRequest, CreateSeriesRequest, EpisodeInput, MovieFilter, SeasonInput,
    UpdateEpisodeRequest, UpdateMovieRequest, UpdateSeriesRequest,
};
use super::media_url::{normalize_thumbnail_url, normalize_video_url};
use super::model::{Episode, Movie, PlayableItem, Season, Series};
use super::seed;
use crate::common::clock::Clock;
use crate::infrastructure::storage::{
    KeyValueStore, MOVIES_KEY, SERIES_KEY, StorageError, load_json,
};

const DEFAULT_CATEGORY: &str = "Drama";

#[derive(Debug, Clone, Copy)]
enum Collection {
    Movies,
    Series,
}

impl Collection {
    fn key(self) -> &'static str {
        match self {
            Collection::Movies => MOVIES_KEY,
            Collection::Series => SERIES_KEY,
        }
    }
}

#[derive(Debug, Default)]
struct Catalog {
    movies: Vec<Movie>,
    series: Vec<Series>,
}

/// In-memory catalogue of movies and series, written through to the
/// key-value store after every mutation.
pub struct ContentRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    catalog: RwLock<Catalog>,
    last_token: AtomicI64,
}

impl ContentRepository {
    /// Cold start: read both collections, falling back to the built-in
    /// catalogue on a miss or an unreadable document.
    pub async fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let movies = match load_json::<Vec<Movie>>(store.as_ref(), MOVIES_KEY).await {
            Ok(Some(movies)) => movies,
            Ok(None) => {
                info!("No stored movies, seeding built-in catalog");
                seed::movies()
            }
            Err(e) => {
                error!(error = %e, "Error loading movies, seeding built-in catalog");
                seed::movies()
            }
        };

        let series = match load_json::<Vec<Series>>(store.as_ref(), SERIES_KEY).await {
            Ok(Some(series)) => series,
            Ok(None) => {
                info!("No stored series, seeding built-in catalog");
                seed::series()
            }
            Err(e) => {
                error!(error = %e, "Error loading series, seeding built-in catalog");
                seed::series()
            }
        };

        info!(movies = movies.len(), series = series.len(), "Content catalog loaded");

        Self {
            store,
            clock,
            catalog: RwLock::new(Catalog { movies, series }),
            last_token: AtomicI64::new(0),
        }
    }

    /// Monotonic, time-derived token used to mint ids.
    fn next_token(&self) -> i64 {
        let now = self.clock.now_millis();
        let mut last = self.last_token.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last_token
                .compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    async fn persist(&self, collection: Collection) {
        let encoded = {
            let catalog = self.catalog.read().await;
            match collection {
                Collection::Movies => serde_json::to_string(&catalog.movies),
                Collection::Series => serde_json::to_string(&catalog.series),
            }
        };

        let result = match encoded {
            Ok(raw) => self.store.set_item(collection.key(), raw).await,
            Err(e) => Err(StorageError::from(e)),
        };

        match result {
            Ok(()) => debug!(key = collection.key(), "Catalog saved"),
            Err(e) => error!(key = collection.key(), error = %e, "Error saving catalog"),
        }
    }

    /// Writes both collections. No ordering between the two writes.
    pub async fn flush(&self) {
        futures_util::join!(
            self.persist(Collection::Movies),
            self.persist(Collection::Series)
        );
    }

    // --- READS ---

    pub async fn movies(&self, filter: &MovieFilter) -> Vec<Movie> {
        self.catalog
            .read()
            .await
            .movies
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    pub async fn movie(&self, id: &str) -> Option<Movie> {
        self.catalog.read().await.movies.iter().find(|m| m.id == id).cloned()
    }

    pub async fn series_list(&self) -> Vec<Series> {
        self.catalog.read().await.series.clone()
    }

    pub async fn series(&self, id: &str) -> Option<Series> {
        self.catalog.read().await.series.iter().find(|s| s.id == id).cloned()
    }

    /// Movie by id first, then any episode of any series.
    pub async fn find_playable(&self, id: &str) -> Option<PlayableItem> {
        let catalog = self.catalog.read().await;
        if let Some(movie) = catalog.movies.iter().find(|m| m.id == id) {
            return Some(PlayableItem::from(movie));
        }

        catalog.series.iter().find_map(|series| {
            series
                .find_episode(id)
                .map(|(_, episode)| PlayableItem::from_episode(series, episode))
        })
    }

    pub async fn find_episode(&self, series_id: &str, episode_id: &str) -> Option<PlayableItem> {
        let catalog = self.catalog.read().await;
        let series = catalog.series.iter().find(|s| s.id == series_id)?;
        series
            .find_episode(episode_id)
            .map(|(_, episode)| PlayableItem::from_episode(series, episode))
    }

    // --- MOVIES ---

    pub async fn add_movie(&self, req: CreateMovieRequest) -> Movie {
        let video = normalize_video_url(&req.video_url);
        if let Some(warning) = video.warning() {
            warn!(title = %req.title, source = ?video.source, "{}", warning);
        }

        let mut movie = Movie {
            id: String::new(),
            title: req.title,
            thumbnail: normalize_thumbnail_url(&req.thumbnail),
            video_url: video.playable_url,
            duration: req.duration.unwrap_or(0),
            views: req.views.unwrap_or(0),
            likes: req.likes.unwrap_or(0),
            category: req.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: req.description,
            upload_date: req.upload_date.unwrap_or_else(|| self.clock.today()),
            orientation: req.orientation.unwrap_or_default(),
            release_date: req.release_date,
        };

        {
            let mut catalog = self.catalog.write().await;
            let mut id = self.next_token().to_string();
            while catalog.movies.iter().any(|m| m.id == id) {
                id = self.next_token().to_string();
            }
            movie.id = id;
            catalog.movies.insert(0, movie.clone());
        }

        info!(movie_id = %movie.id, title = %movie.title, "Movie added");
        self.persist(Collection::Movies).await;
        movie
    }

    /// Merges `patch` into the movie. `None` when the id is unknown.
    pub async fn update_movie(&self, id: &str, patch: UpdateMovieRequest) -> Option<Movie> {
        let updated = {
            let mut catalog = self.catalog.write().await;
            let movie = catalog.movies.iter_mut().find(|m| m.id == id)?;

            if let Some(title) = patch.title {
                movie.title = title;
            }
            if let Some(raw) = patch.video_url {
                let video = normalize_video_url(&raw);
                if let Some(warning) = video.warning() {
                    warn!(movie_id = %id, source = ?video.source, "{}", warning);
                }
                movie.video_url = video.playable_url;
            }
            if let Some(raw) = patch.thumbnail {
                movie.thumbnail = normalize_thumbnail_url(&raw);
            }
            if let Some(duration) = patch.duration {
                movie.duration = duration;
            }
            if let Some(views) = patch.views {
                movie.views = views;
            }
            if let Some(likes) = patch.likes {
                movie.likes = likes;
            }
            if let Some(category) = patch.category {
                movie.category = category;
            }
            if let Some(description) = patch.description {
                movie.description = description;
            }
            if let Some(orientation) = patch.orientation {
                movie.orientation = orientation;
            }
            if patch.release_date.is_some() {
                movie.release_date = patch.release_date;
            }
            movie.clone()
        };

        self.persist(Collection::Movies).await;
        Some(updated)
    }

    pub async fn delete_movie(&self, id: &str) -> bool {
        let removed = {
            let mut catalog = self.catalog.write().await;
            let before = catalog.movies.len();
            catalog.movies.retain(|m| m.id != id);
            catalog.movies.len() != before
        };

        if removed {
            info!(movie_id = %id, "Movie deleted");
            self.persist(Collection::Movies).await;
        }
        removed
    }

    // --- SERIES ---

    fn build_episode(
        &self,
        series_id: &str,
        season_number: u32,
        position: usize,
        input: EpisodeInput,
        taken: &mut HashSet<String>,
    ) -> Episode {
        let id = match input.id {
            Some(id) if !id.is_empty() && !taken.contains(&id) => id,
            _ => loop {
                let candidate = format!("{}s{}e{}", series_id, season_number, self.next_token());
                if !taken.contains(&candidate) {
                    break candidate;
                }
            },
        };
        taken.insert(id.clone());

        let video = normalize_video_url(&input.video_url);
        if let Some(warning) = video.warning() {
            warn!(series_id = %series_id, episode = %input.title, "{}", warning);
        }

        Episode {
            id,
            episode_number: input.episode_number.unwrap_or(position as u32 + 1),
            title: input.title,
            thumbnail: normalize_thumbnail_url(&input.thumbnail),
            video_url: video.playable_url,
            duration: input.duration.unwrap_or(0),
            description: input.description,
            orientation: input.orientation.unwrap_or_default(),
        }
    }

    /// Seasons sorted ascending; inputs sharing a season number are merged.
    fn build_seasons(&self, series_id: &str, inputs: Vec<SeasonInput>) -> Vec<Season> {
        let mut taken = HashSet::new();
        let mut seasons: Vec<Season> = Vec::new();

        for input in inputs {
            let idx = match seasons.binary_search_by_key(&input.season_number, |s| s.season_number) {
                Ok(idx) => idx,
                Err(idx) => {
                    seasons.insert(
                        idx,
                        Season {
                            season_number: input.season_number,
                            episodes: Vec::new(),
                        },
                    );
                    idx
                }
            };

            for episode in input.episodes {
                let position = seasons[idx].episodes.len();
                let built =
                    self.build_episode(series_id, input.season_number, position, episode, &mut taken);
                seasons[idx].episodes.push(built);
            }
        }

        seasons
    }

    pub async fn add_series(&self, req: CreateSeriesRequest) -> Series {
        let mut catalog = self.catalog.write().await;
        let mut id = format!("s{}", self.next_token());
        while catalog.series.iter().any(|s| s.id == id) {
            id = format!("s{}", self.next_token());
        }

        let series = Series {
            seasons: self.build_seasons(&id, req.seasons),
            id,
            title: req.title,
            thumbnail: normalize_thumbnail_url(&req.thumbnail),
            description: req.description,
            category: req.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            views: req.views.unwrap_or(0),
            likes: req.likes.unwrap_or(0),
            upload_date: req.upload_date.unwrap_or_else(|| self.clock.today()),
        };
        catalog.series.insert(0, series.clone());
        drop(catalog);

        info!(series_id = %series.id, title = %series.title, "Series added");
        self.persist(Collection::Series).await;
        series
    }

    pub async fn update_series(&self, id: &str, patch: UpdateSeriesRequest) -> Option<Series> {
        let updated = {
            let mut catalog = self.catalog.write().await;
            let series = catalog.series.iter_mut().find(|s| s.id == id)?;

            if let Some(title) = patch.title {
                series.title = title;
            }
            if let Some(raw) = patch.thumbnail {
                series.thumbnail = normalize_thumbnail_url(&raw);
            }
            if let Some(description) = patch.description {
                series.description = description;
            }
            if let Some(category) = patch.category {
                series.category = category;
            }
            if let Some(views) = patch.views {
                series.views = views;
            }
            if let Some(likes) = patch.likes {
                series.likes = likes;
            }
            if let Some(seasons) = patch.seasons {
                series.seasons = self.build_seasons(id, seasons);
            }
            series.clone()
        };

        self.persist(Collection::Series).await;
        Some(updated)
    }

    pub async fn delete_series(&self, id: &str) -> bool {
        let removed = {
            let mut catalog = self.catalog.write().await;
            let before = catalog.series.len();
            catalog.series.retain(|s| s.id != id);
            catalog.series.len() != before
        };

        if removed {
            info!(series_id = %id, "Series deleted");
            self.persist(Collection::Series).await;
        }
        removed
    }

    // --- EPISODES ---

    /// Appends to the season, creating it in sorted position when missing.
    pub async fn add_episode_to_series(
        &self,
        series_id: &str,
        season_number: u32,
        input: EpisodeInput,
    ) -> Option<Episode> {
        let episode = {
            let mut catalog = self.catalog.write().await;
            let series = catalog.series.iter_mut().find(|s| s.id == series_id)?;

            let mut taken: HashSet<String> = series
                .seasons
                .iter()
                .flat_map(|s| s.episodes.iter().map(|e| e.id.clone()))
                .collect();

            let idx = match series
                .seasons
                .binary_search_by_key(&season_number, |s| s.season_number)
            {
                Ok(idx) => idx,
                Err(idx) => {
                    info!(series_id = %series_id, season_number, "Creating season");
                    series.seasons.insert(
                        idx,
                        Season {
                            season_number,
                            episodes: Vec::new(),
                        },
                    );
                    idx
                }
            };

            let position = series.seasons[idx].episodes.len();
            let episode = self.build_episode(series_id, season_number, position, input, &mut taken);
            series.seasons[idx].episodes.push(episode.clone());
            episode
        };

        info!(series_id = %series_id, episode_id = %episode.id, "Episode added");
        self.persist(Collection::Series).await;
        Some(episode)
    }

    pub async fn update_episode(
        &self,
        series_id: &str,
        season_number: u32,
        episode_id: &str,
        patch: UpdateEpisodeRequest,
    ) -> Option<Episode> {
        let updated = {
            let mut catalog = self.catalog.write().await;
            let episode = catalog
                .series
                .iter_mut()
                .find(|s| s.id == series_id)?
                .seasons
                .iter_mut()
                .find(|s| s.season_number == season_number)?
                .episodes
                .iter_mut()
                .find(|e| e.id == episode_id)?;

            if let Some(number) = patch.episode_number {
                episode.episode_number = number;
            }
            if let Some(title) = patch.title {
                episode.title = title;
            }
            if let Some(raw) = patch.video_url {
                let video = normalize_video_url(&raw);
                if let Some(warning) = video.warning() {
                    warn!(episode_id = %episode_id, source = ?video.source, "{}", warning);
                }
                episode.video_url = video.playable_url;
            }
            if let Some(raw) = patch.thumbnail {
                episode.thumbnail = normalize_thumbnail_url(&raw);
            }
            if let Some(duration) = patch.duration {
                episode.duration = duration;
            }
            if let Some(description) = patch.description {
                episode.description = description;
            }
            if let Some(orientation) = patch.orientation {
                episode.orientation = orientation;
            }
            episode.clone()
        };

        self.persist(Collection::Series).await;
        Some(updated)
    }

    pub async fn delete_episode(&self, series_id: &str, season_number: u32, episode_id: &str) -> bool {
        let removed = {
            let mut catalog = self.catalog.write().await;
            let season = catalog
                .series
                .iter_mut()
                .find(|s| s.id == series_id)
                .and_then(|s| s.seasons.iter_mut().find(|s| s.season_number == season_number));

            match season {
                Some(season) => {
                    let before = season.episodes.len();
                    season.episodes.retain(|e| e.id != episode_id);
                    season.episodes.len() != before
                }
                None => false,
            }
        };

        if removed {
            info!(series_id = %series_id, episode_id = %episode_id, "Episode deleted");
            self.persist(Collection::Series).await;
        }
        removed
    }
}
