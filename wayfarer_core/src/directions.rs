use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use futures::future::try_join;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    errors::DirectionsError,
    geo_point::GeoPoint,
    services::{
        geocoding::Geocoder,
        routing::{Route, RouteRequest, RoutingService, TravelMode},
    },
};

/// Issue order of a route request. Later requests have larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The route is now the current one.
    Applied(Route),
    /// A newer request was issued while this one was in flight; the result was dropped.
    Superseded(RequestToken),
}

#[derive(Default)]
struct RouteSlot {
    route: Option<Route>,
    applied: Option<RequestToken>,
}

/// Resolves origin and destination to addresses, then asks for a driving route.
///
/// Holds the single current route. Results and failures of requests that were
/// overtaken by a newer request are discarded.
pub struct DirectionRequester<M> {
    maps: Arc<M>,
    mode: TravelMode,
    issued: AtomicU64,
    slot: Mutex<RouteSlot>,
}

impl<M> DirectionRequester<M>
where
    M: Geocoder + RoutingService,
{
    pub fn new(maps: Arc<M>) -> Self {
        Self {
            maps,
            mode: TravelMode::Driving,
            issued: AtomicU64::new(0),
            slot: Mutex::new(RouteSlot::default()),
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.slot.lock().route.clone()
    }

    pub fn applied_token(&self) -> Option<RequestToken> {
        self.slot.lock().applied
    }

    /// Takes the next request token. Every request issued before it is now stale.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.issued.load(Ordering::SeqCst) == token.get()
    }

    pub async fn request_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteOutcome, DirectionsError> {
        self.run(self.issue(), origin, destination).await
    }

    /// Runs a request whose token was taken with [`DirectionRequester::issue`].
    ///
    /// Failures of a request that is no longer the latest are dropped like
    /// its successes and reported as [`RouteOutcome::Superseded`].
    pub async fn run(
        &self,
        token: RequestToken,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteOutcome, DirectionsError> {
        debug!(
            "Route request #{}: {} -> {}",
            token.get(),
            origin,
            destination
        );

        match self.resolve_route(token, origin, destination).await {
            Ok(route) => Ok(self.apply(token, route)),
            Err(err) if self.is_latest(token) => Err(err),
            Err(err) => {
                debug!("Route request #{} superseded, dropping error: {}", token.get(), err);
                Ok(RouteOutcome::Superseded(token))
            }
        }
    }

    async fn resolve_route(
        &self,
        token: RequestToken,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, DirectionsError> {
        let (origin_address, destination_address) = try_join(
            self.origin_address(origin),
            self.destination_address(destination),
        )
        .await?;

        let request = RouteRequest {
            origin: origin_address,
            destination: destination_address,
            mode: self.mode,
        };

        debug!(
            "Route request #{}: routing {:?} -> {:?}",
            token.get(),
            request.origin,
            request.destination
        );

        self.maps
            .route(&request)
            .await
            .map_err(DirectionsError::Routing)
    }

    fn apply(&self, token: RequestToken, route: Route) -> RouteOutcome {
        let mut slot = self.slot.lock();

        if !self.is_latest(token) {
            debug!("Route request #{} superseded, dropping result", token.get());
            return RouteOutcome::Superseded(token);
        }

        info!("Route request #{} applied", token.get());
        slot.route = Some(route.clone());
        slot.applied = Some(token);
        RouteOutcome::Applied(route)
    }

    async fn origin_address(&self, origin: GeoPoint) -> Result<String, DirectionsError> {
        let results = self
            .maps
            .reverse_geocode(origin)
            .await
            .map_err(DirectionsError::Geocode)?;

        results
            .first()
            .map(|result| result.component_address())
            .filter(|address| !address.is_empty())
            .ok_or(DirectionsError::OriginNotFound)
    }

    async fn destination_address(&self, destination: GeoPoint) -> Result<String, DirectionsError> {
        let results = self
            .maps
            .reverse_geocode(destination)
            .await
            .map_err(DirectionsError::Geocode)?;

        results
            .first()
            .map(|result| result.formatted_address.clone())
            .filter(|address| !address.is_empty())
            .ok_or(DirectionsError::DestinationNotFound)
    }
}
