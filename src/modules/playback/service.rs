use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::device::RemoteDevice;
use super::dto::{OpenSessionRequest, OpenSessionResponse, SessionView, SwitchEpisodeRequest};
use super::model::{ContentDescriptor, PlaybackContext, PlaybackTick, SESSION_IDLE_TIMEOUT};
use super::progress::LibraryProgress;
use super::registry::{SessionEntry, SharedSession};
use super::session::WatchSession;
use crate::common::error::AppError;
use crate::modules::auth::dto::AuthUser;
use crate::modules::content::model::PlayableItem;
use crate::modules::subscription::service::SubscriptionService;
use crate::state::AppState;

pub struct PlaybackService;

impl PlaybackService {
    async fn view(session_id: Uuid, entry: &mut SessionEntry) -> SessionView {
        entry.touch();
        entry.session.poll_autoplay().await;
        SessionView {
            session_id,
            snapshot: entry.session.snapshot(),
            commands: entry.device.drain_commands(),
        }
    }

    async fn lookup(state: &AppState, user: &AuthUser, id: Uuid) -> Result<SharedSession, AppError> {
        let shared = state
            .sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::not_found("Playback session"))?;

        if shared.lock().await.user_id != user.id {
            return Err(AppError::not_found("Playback session"));
        }
        Ok(shared)
    }

    async fn resolve(
        state: &AppState,
        content_id: &str,
        context: PlaybackContext,
    ) -> Option<PlayableItem> {
        if context == PlaybackContext::Series {
            if let Some(series) = state.content.series(content_id).await {
                let episode = series.first_episode()?;
                return Some(PlayableItem::from_episode(&series, episode));
            }
        }
        state.content.find_playable(content_id).await
    }

    /// Consults the gate first. A denial carries the redirect and no
    /// session is created.
    pub async fn open(
        state: AppState,
        user: Option<AuthUser>,
        req: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, AppError> {
        req.validate()?;

        let decision = SubscriptionService::gate(&state, user.as_ref()).await;
        let user = match user {
            Some(user) if decision.is_allowed() => user,
            _ => {
                info!(content_id = %req.content_id, decision = ?decision, "Playback denied");
                return Ok(OpenSessionResponse::denied(decision));
            }
        };

        let item = Self::resolve(&state, &req.content_id, req.context)
            .await
            .ok_or_else(|| AppError::not_found("Video"))?;

        let device = Arc::new(RemoteDevice::new());
        let sink = Arc::new(LibraryProgress::new(state.library.clone(), user.id.clone()));
        let mut session = WatchSession::new(
            ContentDescriptor::from(item),
            req.context,
            req.platform,
            device.clone(),
            device.clone(),
            sink,
        );
        session.start().await;

        let (session_id, shared) = state
            .sessions
            .insert(SessionEntry::new(user.id.clone(), session, device))
            .await;

        info!(session_id = %session_id, user_id = %user.id, content_id = %req.content_id, "Watch session opened");
        let mut entry = shared.lock().await;
        Ok(OpenSessionResponse::allowed(Self::view(session_id, &mut entry).await))
    }

    pub async fn get(state: AppState, user: &AuthUser, id: Uuid) -> Result<SessionView, AppError> {
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;
        Ok(Self::view(id, &mut entry).await)
    }

    pub async fn tick(
        state: AppState,
        user: &AuthUser,
        id: Uuid,
        tick: PlaybackTick,
    ) -> Result<SessionView, AppError> {
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;
        entry.device.report_loaded(tick.is_loaded);
        entry.session.handle_tick(tick).await;
        Ok(Self::view(id, &mut entry).await)
    }

    pub async fn toggle(state: AppState, user: &AuthUser, id: Uuid) -> Result<SessionView, AppError> {
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;
        entry.session.toggle().await;
        Ok(Self::view(id, &mut entry).await)
    }

    pub async fn enter_fullscreen(
        state: AppState,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<SessionView, AppError> {
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;
        entry.session.enter_fullscreen().await;
        Ok(Self::view(id, &mut entry).await)
    }

    pub async fn exit_fullscreen(
        state: AppState,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<SessionView, AppError> {
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;
        entry.session.exit_fullscreen().await;
        Ok(Self::view(id, &mut entry).await)
    }

    pub async fn switch_episode(
        state: AppState,
        user: &AuthUser,
        id: Uuid,
        req: SwitchEpisodeRequest,
    ) -> Result<SessionView, AppError> {
        req.validate()?;
        let shared = Self::lookup(&state, user, id).await?;
        let mut entry = shared.lock().await;

        if !entry.session.context().allows_episode_switch() {
            return Err(AppError::Validation(
                "Episode switching is only available for series".to_string(),
            ));
        }

        let series_id = entry
            .session
            .content()
            .series_id
            .clone()
            .ok_or_else(|| AppError::not_found("Series"))?;
        let episode = state
            .content
            .find_episode(&series_id, &req.episode_id)
            .await
            .ok_or_else(|| AppError::not_found("Episode"))?;

        entry.session.switch_content(ContentDescriptor::from(episode)).await;
        Ok(Self::view(id, &mut entry).await)
    }

    /// Tears the session down and forgets it.
    pub async fn close(state: AppState, user: &AuthUser, id: Uuid) -> Result<SessionView, AppError> {
        Self::lookup(&state, user, id).await?;
        let shared = state
            .sessions
            .remove(id)
            .await
            .ok_or_else(|| AppError::not_found("Playback session"))?;

        let mut entry = shared.lock().await;
        entry.session.teardown().await;
        info!(session_id = %id, "Watch session closed");
        Ok(Self::view(id, &mut entry).await)
    }

    /// Tears down every session left idle past the timeout.
    pub async fn evict_idle(state: &AppState) -> usize {
        let evicted = state.sessions.evict_idle(SESSION_IDLE_TIMEOUT).await;
        for (id, shared) in &evicted {
            let mut entry = shared.lock().await;
            entry.session.teardown().await;
            warn!(session_id = %id, user_id = %entry.user_id, "Idle watch session evicted");
        }
        evicted.len()
    }
}
