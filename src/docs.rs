use utoipa::OpenApi;
use crate::modules::auth::dto::*;
use crate::modules::content::dto::*;
use crate::modules::content::model::{Episode, Movie, Orientation, PlayableItem, ReleaseLabel, Season, Series};
use crate::modules::discount::dto::*;
use crate::modules::discount::model::{DiscountCode, DiscountValidation, Redemption};
use crate::modules::library::dto::*;
use crate::modules::library::model::WatchProgress;
use crate::modules::playback::dto::*;
use crate::modules::playback::model::PlaybackTick;
use crate::modules::subscription::dto::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::handler::get_me,
        crate::modules::content::handler::list_movies,
        crate::modules::content::handler::get_movie,
        crate::modules::content::handler::list_categories,
        crate::modules::content::handler::list_series,
        crate::modules::content::handler::get_series,
        crate::modules::content::handler::create_movie,
        crate::modules::content::handler::update_movie,
        crate::modules::content::handler::delete_movie,
        crate::modules::content::handler::create_series,
        crate::modules::content::handler::update_series,
        crate::modules::content::handler::delete_series,
        crate::modules::content::handler::create_episode,
        crate::modules::content::handler::update_episode,
        crate::modules::content::handler::delete_episode,
        crate::modules::library::handler::toggle_like,
        crate::modules::library::handler::is_liked,
        crate::modules::library::handler::my_list,
        crate::modules::library::handler::list_progress,
        crate::modules::library::handler::mark_landing_seen,
        crate::modules::discount::handler::list_discounts,
        crate::modules::discount::handler::generate_discount,
        crate::modules::discount::handler::delete_discount,
        crate::modules::discount::handler::validate_discount,
        crate::modules::subscription::handler::list_plans,
        crate::modules::subscription::handler::get_subscription,
        crate::modules::subscription::handler::start_checkout,
        crate::modules::subscription::handler::report_navigation,
        crate::modules::playback::handler::open_session,
        crate::modules::playback::handler::get_session,
        crate::modules::playback::handler::post_tick,
        crate::modules::playback::handler::toggle,
        crate::modules::playback::handler::enter_fullscreen,
        crate::modules::playback::handler::exit_fullscreen,
        crate::modules::playback::handler::switch_episode,
        crate::modules::playback::handler::close_session,
    ),
    components(
        schemas(
            AuthUser, MeResponse,
            Movie, Series, Season, Episode, Orientation, PlayableItem, ReleaseLabel,
            CreateMovieRequest, UpdateMovieRequest, MovieResponse,
            CreateSeriesRequest, UpdateSeriesRequest, SeasonInput, EpisodeInput, UpdateEpisodeRequest,
            SeriesListResponse, SeriesResponse,
            DiscountCode, DiscountValidation, Redemption,
            GenerateDiscountRequest, ValidateDiscountRequest,
            WatchProgress, LikeResponse, ContinueWatchingItem, MyListResponse,
            PlanResponse, SubscriptionStatusResponse, StartCheckoutRequest, CheckoutResponse,
            NavigationRequest, NavigationResponse,
            OpenSessionRequest, OpenSessionResponse, SessionView, SwitchEpisodeRequest, PlaybackTick,
        )
    ),
    tags(
        (name = "Auth", description = "Signed-in session"),
        (name = "Content", description = "Movie and series catalog"),
        (name = "Admin", description = "Catalog and discount administration"),
        (name = "Library", description = "Likes, watch progress and my list"),
        (name = "Subscription", description = "Plans, checkout and discount redemption"),
        (name = "Playback", description = "Watch sessions")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
