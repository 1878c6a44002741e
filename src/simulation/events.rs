//! Events surfaced by association and the economy tick
//!
//! The core reports state changes as plain data; hosts decide how to log or
//! render them.

use super::types::{BuildingKind, ConsumerId, ProducerId, TileCoord, VehicleId};

/// A state change a host may want to render or log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A consumer was linked to its nearest producer
    AssociationEstablished {
        consumer: ConsumerId,
        producer: ProducerId,
    },
    /// No producer was reachable from this consumer
    ConsumerUnreachable { consumer: ConsumerId },
    /// A producer's unclaimed stock changed
    ProducerStockChanged { producer: ProducerId, available: u32 },
    /// A consumer's delivered stock changed
    ConsumerStockChanged { consumer: ConsumerId, available: u32 },
    VehicleSpawned {
        vehicle: VehicleId,
        consumer: ConsumerId,
        producer: ProducerId,
        coord: TileCoord,
    },
    VehicleMoved { vehicle: VehicleId, coord: TileCoord },
    VehicleArrived { vehicle: VehicleId, at: BuildingKind },
}
