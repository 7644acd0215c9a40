use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{oneshot, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};

use crate::{
    errors::GeolocationError,
    geo_point::{GeoPoint, TimestampedPoint},
    services::geolocation::GeolocationSource,
};

use super::refresh_handle::RefreshHandle;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

pub struct PositionTrackerParams {
    pub fallback: GeoPoint,
    pub refresh_interval: Duration,
}

/// Keeps the last known user position, polling the device on an interval.
pub struct PositionTracker<L> {
    source: Arc<L>,
    params: PositionTrackerParams,
    latest: watch::Sender<Option<TimestampedPoint>>,
}

impl<L> PositionTracker<L>
where
    L: GeolocationSource,
{
    /// A zero `refresh_interval` is replaced by [`DEFAULT_REFRESH_INTERVAL`].
    pub fn new(source: Arc<L>, mut params: PositionTrackerParams) -> Self {
        if params.refresh_interval.is_zero() {
            warn!(
                "Refresh interval must be positive, using {:?}",
                DEFAULT_REFRESH_INTERVAL
            );
            params.refresh_interval = DEFAULT_REFRESH_INTERVAL;
        }

        let (latest, _) = watch::channel(None);
        Self {
            source,
            params,
            latest,
        }
    }

    /// Never fails: every failure degrades to the fallback position.
    pub async fn refresh_position(&self) -> TimestampedPoint {
        let point = self.locate().await;
        let position = TimestampedPoint::now(point);
        self.latest.send_replace(Some(position));
        position
    }

    /// One-shot lookup used to seed the viewport. Leaves the tracked position alone.
    pub async fn resolve_initial_center(&self) -> GeoPoint {
        self.locate().await
    }

    pub fn last_known(&self) -> Option<TimestampedPoint> {
        *self.latest.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TimestampedPoint>> {
        self.latest.subscribe()
    }

    pub fn fallback(&self) -> GeoPoint {
        self.params.fallback
    }

    /// Spawns the refresh loop: once now, then every `refresh_interval`.
    pub fn start(self: &Arc<Self>) -> RefreshHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let tracker = Arc::clone(self);
        let period = self.params.refresh_interval;

        info!("Starting position refresh every {:?}", period);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        let position = tracker.refresh_position().await;
                        debug!("Position refreshed: {}", position.point());
                    }
                }
            }

            info!("Position refresh stopped");
        });

        RefreshHandle::new(stop_tx, task)
    }

    async fn locate(&self) -> GeoPoint {
        match self.source.current_position().await {
            Ok(point) => point,
            Err(GeolocationError::PermissionDenied) | Err(GeolocationError::Unavailable) => {
                debug!("Device location not available, using fallback");
                self.params.fallback
            }
            Err(err) => {
                warn!("{err}, using fallback");
                self.params.fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use jiff::Timestamp;

    use crate::{
        geo_point::FALLBACK_POSITION,
        position::fixed_location::{FixedLocation, NoGeolocation},
        test_utils::{CountingLocation, point},
    };

    use super::*;

    fn params() -> PositionTrackerParams {
        PositionTrackerParams {
            fallback: FALLBACK_POSITION,
            refresh_interval: Duration::from_secs(3),
        }
    }

    #[tokio::test]
    async fn test_fallback_when_denied_or_absent() {
        for error in [
            GeolocationError::PermissionDenied,
            GeolocationError::Unavailable,
            GeolocationError::Failed("timeout".to_string()),
        ] {
            let tracker = PositionTracker::new(Arc::new(CountingLocation::failing(error)), params());
            let before = Timestamp::now();
            let position = tracker.refresh_position().await;

            assert_eq!(position.point(), FALLBACK_POSITION);
            assert!(position.captured_at() >= before);
            assert_eq!(tracker.last_known(), Some(position));
        }

        let tracker = PositionTracker::new(Arc::new(NoGeolocation), params());
        assert_eq!(tracker.refresh_position().await.point(), FALLBACK_POSITION);
    }

    #[tokio::test]
    async fn test_reports_device_position() {
        let tracker = PositionTracker::new(Arc::new(FixedLocation(point(52.52, 13.40))), params());
        assert_eq!(tracker.refresh_position().await.point(), point(52.52, 13.40));
    }

    #[tokio::test]
    async fn test_initial_center_does_not_publish() {
        let tracker = PositionTracker::new(Arc::new(FixedLocation(point(52.52, 13.40))), params());

        assert_eq!(tracker.resolve_initial_center().await, point(52.52, 13.40));
        assert_eq!(tracker.last_known(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_runs_until_stopped() {
        let source = Arc::new(CountingLocation::at(point(52.52, 13.40)));
        let tracker = Arc::new(PositionTracker::new(source.clone(), params()));

        let handle = tracker.start();
        tokio::time::sleep(Duration::from_millis(7_000)).await;

        // t = 0, 3 and 6 seconds
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert!(tracker.last_known().is_some());

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_uses_default() {
        let source = Arc::new(CountingLocation::at(point(52.52, 13.40)));
        let tracker = Arc::new(PositionTracker::new(
            source.clone(),
            PositionTrackerParams {
                fallback: FALLBACK_POSITION,
                refresh_interval: Duration::ZERO,
            },
        ));

        let handle = tracker.start();
        tokio::time::sleep(Duration::from_millis(7_000)).await;
        handle.stop().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_refresh() {
        let source = Arc::new(CountingLocation::at(point(52.52, 13.40)));
        let tracker = Arc::new(PositionTracker::new(source.clone(), params()));

        let handle = tracker.start();
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
