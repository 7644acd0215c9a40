use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    directions::{DirectionRequester, RouteOutcome},
    errors::DirectionsError,
    geo_point::{GeoPoint, TimestampedPoint},
    markers::marker::{Marker, MarkerId},
    position::{
        position_tracker::{PositionTracker, PositionTrackerParams},
        refresh_handle::RefreshHandle,
    },
    search_bar::SearchBar,
    services::{
        geocoding::Geocoder,
        geolocation::GeolocationSource,
        places::{PlaceSearch, PlaceSelection, PlaceSuggestion},
        routing::RoutingService,
    },
};

use super::{map_options::MapOptions, map_state::MapState, map_view::MapView};

pub type RouteTask = JoinHandle<Result<RouteOutcome, DirectionsError>>;

/// One interactive map session.
///
/// Owns the position refresh task: it is started by [`MapController::start`]
/// and disposed of by [`MapController::shutdown`], or when the controller is dropped.
pub struct MapController<L, M> {
    options: MapOptions,
    state: Arc<Mutex<MapState>>,
    tracker: Arc<PositionTracker<L>>,
    search: SearchBar<M>,
    directions: Arc<DirectionRequester<M>>,
    refresh: Mutex<Option<RefreshHandle>>,
    revision: Arc<watch::Sender<u64>>,
}

impl<L, M> MapController<L, M>
where
    L: GeolocationSource,
    M: Geocoder + RoutingService + PlaceSearch,
{
    pub fn new(options: MapOptions, location: Arc<L>, maps: Arc<M>) -> Self {
        let tracker = PositionTracker::new(
            location,
            PositionTrackerParams {
                fallback: options.fallback_position,
                refresh_interval: options.refresh_interval,
            },
        );

        Self {
            state: Arc::new(Mutex::new(MapState::new(
                options.default_zoom,
                options.recenter_zoom,
            ))),
            tracker: Arc::new(tracker),
            search: SearchBar::new(maps.clone(), options.search_radius_meters),
            directions: Arc::new(DirectionRequester::new(maps)),
            refresh: Mutex::new(None),
            revision: Arc::new(watch::channel(0).0),
            options,
        }
    }

    /// Starts the position refresh and resolves the initial center.
    pub async fn start(&self) {
        {
            let mut refresh = self.refresh.lock();
            if refresh.is_none() {
                *refresh = Some(self.tracker.start());
            }
        }

        let center = self.tracker.resolve_initial_center().await;
        let became_ready = self.state.lock().initial_center_resolved(center);
        debug!("Initial center resolved to {}", center);
        if became_ready {
            self.notify();
        }
    }

    /// Signal from the map surface that it finished loading.
    pub fn map_loaded(&self) {
        if self.state.lock().map_loaded() {
            self.notify();
        }
    }

    /// Stops the position refresh and waits for it to end.
    pub async fn shutdown(&self) {
        let handle = self.refresh.lock().take();
        if let Some(handle) = handle {
            handle.stop().await;
            info!("Map session shut down");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.lock().is_ready()
    }

    pub fn click_map(&self, point: GeoPoint) -> Option<Marker> {
        let marker = self.state.lock().click_map(point)?;
        debug!("Marker {} added at {}", marker.id(), point);
        self.notify();
        Some(marker)
    }

    /// Selects the marker and requests a route from the user's position to it.
    ///
    /// Selection and the request token are taken immediately, so the latest
    /// click wins however the spawned tasks get scheduled. The returned task
    /// resolves once the route request finishes. Failures of the latest
    /// request are also reported through the view's status.
    pub fn click_marker(&self, id: MarkerId) -> Option<RouteTask> {
        let marker = self.state.lock().select_marker(id)?;
        self.notify();
        let token = self.directions.issue();

        let origin = self
            .tracker
            .last_known()
            .map(|position| position.point())
            .unwrap_or(self.options.fallback_position);
        let destination = marker.point();

        let directions = Arc::clone(&self.directions);
        let state = Arc::clone(&self.state);
        let revision = Arc::clone(&self.revision);

        Some(tokio::spawn(async move {
            let outcome = directions.run(token, origin, destination).await;

            match &outcome {
                Ok(RouteOutcome::Applied(_)) => {
                    state.lock().clear_status();
                    bump(&revision);
                }
                Ok(RouteOutcome::Superseded(_)) => {}
                Err(err) => {
                    warn!("Directions to {} failed: {}", destination, err);
                    state
                        .lock()
                        .set_status(format!("Could not get directions: {err}"));
                    bump(&revision);
                }
            }

            outcome
        }))
    }

    pub fn click_user_marker(&self) -> Option<TimestampedPoint> {
        let position = self.tracker.last_known()?;
        if !self.state.lock().select_user_position(position) {
            return None;
        }
        self.notify();
        Some(position)
    }

    pub fn dismiss_popup(&self) {
        if self.state.lock().dismiss_popup() {
            self.notify();
        }
    }

    pub async fn suggest_places(&self, input: &str) -> Vec<PlaceSuggestion> {
        if !self.is_ready() {
            return Vec::new();
        }
        let user_position = self.tracker.last_known().map(|position| position.point());
        self.search.suggest(input, user_position).await
    }

    /// Recenters on the selected place. `None` if it could not be resolved.
    pub async fn select_place(&self, selection: &PlaceSelection) -> Option<GeoPoint> {
        if !self.is_ready() {
            return None;
        }
        let center = self.search.on_place_selected(selection).await?;
        if !self.state.lock().recenter(center) {
            return None;
        }
        self.notify();
        Some(center)
    }

    pub fn view(&self) -> MapView {
        let user_position = if self.is_ready() {
            self.tracker.last_known()
        } else {
            None
        };

        self.state.lock().view(
            user_position,
            self.directions.current_route(),
            self.options.styles.clone(),
        )
    }

    /// Revision counter bumped on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn subscribe_position(&self) -> watch::Receiver<Option<TimestampedPoint>> {
        self.tracker.subscribe()
    }

    fn notify(&self) {
        bump(&self.revision);
    }
}

fn bump(revision: &watch::Sender<u64>) {
    revision.send_modify(|revision| *revision += 1);
}
