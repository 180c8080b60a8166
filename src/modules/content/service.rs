use super::dto::{
    CreateMovieRequest, CreateSeriesRequest, EpisodeInput, MovieFilter, MovieResponse,
    SeriesListResponse, SeriesResponse, UpdateEpisodeRequest, UpdateMovieRequest,
    UpdateSeriesRequest,
};
use super::model::Episode;
use crate::common::error::AppError;
use crate::state::AppState;
use validator::Validate;

pub struct ContentService;

impl ContentService {
    // --- MOVIE ---

    pub async fn list_movies(state: AppState, filter: MovieFilter) -> Vec<MovieResponse> {
        let today = state.clock.today();
        state
            .content
            .movies(&filter)
            .await
            .into_iter()
            .map(|movie| MovieResponse::new(movie, today))
            .collect()
    }

    pub async fn get_movie(state: AppState, id: &str) -> Result<MovieResponse, AppError> {
        let movie = state
            .content
            .movie(id)
            .await
            .ok_or_else(|| AppError::not_found("Movie"))?;

        Ok(MovieResponse::new(movie, state.clock.today()))
    }

    pub async fn create_movie(
        state: AppState,
        req: CreateMovieRequest,
    ) -> Result<MovieResponse, AppError> {
        req.validate()?;
        let movie = state.content.add_movie(req).await;
        Ok(MovieResponse::new(movie, state.clock.today()))
    }

    pub async fn update_movie(
        state: AppState,
        id: &str,
        req: UpdateMovieRequest,
    ) -> Result<MovieResponse, AppError> {
        let movie = state
            .content
            .update_movie(id, req)
            .await
            .ok_or_else(|| AppError::not_found("Movie"))?;

        Ok(MovieResponse::new(movie, state.clock.today()))
    }

    pub async fn delete_movie(state: AppState, id: &str) -> Result<(), AppError> {
        if state.content.delete_movie(id).await {
            Ok(())
        } else {
            Err(AppError::not_found("Movie"))
        }
    }

    // --- SERIES ---

    pub async fn list_series(state: AppState) -> Vec<SeriesListResponse> {
        state
            .content
            .series_list()
            .await
            .iter()
            .map(SeriesListResponse::from)
            .collect()
    }

    pub async fn get_series(state: AppState, id: &str) -> Result<SeriesResponse, AppError> {
        state
            .content
            .series(id)
            .await
            .map(SeriesResponse::from)
            .ok_or_else(|| AppError::not_found("Series"))
    }

    pub async fn create_series(
        state: AppState,
        req: CreateSeriesRequest,
    ) -> Result<SeriesResponse, AppError> {
        req.validate()?;
        let series = state.content.add_series(req).await;
        Ok(SeriesResponse::from(series))
    }

    pub async fn update_series(
        state: AppState,
        id: &str,
        req: UpdateSeriesRequest,
    ) -> Result<SeriesResponse, AppError> {
        req.validate()?;
        state
            .content
            .update_series(id, req)
            .await
            .map(SeriesResponse::from)
            .ok_or_else(|| AppError::not_found("Series"))
    }

    pub async fn delete_series(state: AppState, id: &str) -> Result<(), AppError> {
        if state.content.delete_series(id).await {
            Ok(())
        } else {
            Err(AppError::not_found("Series"))
        }
    }

    // --- EPISODES ---

    pub async fn add_episode(
        state: AppState,
        series_id: &str,
        season_number: u32,
        req: EpisodeInput,
    ) -> Result<Episode, AppError> {
        req.validate()?;
        state
            .content
            .add_episode_to_series(series_id, season_number, req)
            .await
            .ok_or_else(|| AppError::not_found("Series"))
    }

    pub async fn update_episode(
        state: AppState,
        series_id: &str,
        season_number: u32,
        episode_id: &str,
        req: UpdateEpisodeRequest,
    ) -> Result<Episode, AppError> {
        state
            .content
            .update_episode(series_id, season_number, episode_id, req)
            .await
            .ok_or_else(|| AppError::not_found("Episode"))
    }

    pub async fn delete_episode(
        state: AppState,
        series_id: &str,
        season_number: u32,
        episode_id: &str,
    ) -> Result<(), AppError> {
        if state
            .content
            .delete_episode(series_id, season_number, episode_id)
            .await
        {
            Ok(())
        } else {
            Err(AppError::not_found("Episode"))
        }
    }
}
