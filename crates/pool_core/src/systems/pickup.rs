use bevy_ecs::prelude::{Res, ResMut};
use tracing::{trace, warn};

use crate::clock::{CurrentEvent, EventKind};
use crate::request::RequestStore;
use crate::telemetry::DispatchTelemetry;

/// Records the request's origin as the next stop of its trip.
pub fn pickup_system(
    event: Res<CurrentEvent>,
    store: Res<RequestStore>,
    mut telemetry: ResMut<DispatchTelemetry>,
) {
    let event = event.0;
    if event.kind != EventKind::Pickup {
        return;
    }
    let Some(request) = store.get(event.request_id) else {
        warn!(request = event.request_id, "pickup for unknown request");
        return;
    };

    telemetry.record_stop(event.trip_id, request.origin(), event.time);
    trace!(
        time = event.time,
        trip = event.trip_id,
        request = request.id(),
        leg = event.leg_index,
        "pickup"
    );
}
