//! Producer and consumer buildings
//!
//! Producers emit one unit per interval and allocate it round-robin over
//! their consumer slots. Consumers hold the association, the stored path
//! and the delivered stock.

use super::types::{ConsumerId, ProducerId, TileCoord};

/// One consumer's allocation slot inside a producer
///
/// Slot order is fixed at association time and forms the round-robin ring.
#[derive(Debug, Clone)]
pub struct ConsumerSlot {
    pub consumer: ConsumerId,
    /// Units allocated to this consumer and waiting at the producer
    pub available_products: u32,
    /// Units already claimed by an in-flight vehicle
    pub reserved_products: u32,
}

impl ConsumerSlot {
    pub fn new(consumer: ConsumerId) -> Self {
        Self {
            consumer,
            available_products: 0,
            reserved_products: 0,
        }
    }
}

/// A producer building
#[derive(Debug, Clone)]
pub struct Producer {
    pub coord: TileCoord,
    /// Seconds between produced units
    pub production_interval: f32,
    pub time_last_produced: f32,
    /// Total unclaimed units at this producer
    pub available_products: u32,
    /// Ring position of the last allocation; None until the first one
    pub last_recipient_slot: Option<usize>,
    /// One slot per associated consumer, in association order
    pub slots: Vec<ConsumerSlot>,
}

impl Producer {
    pub fn new(coord: TileCoord, production_interval: f32) -> Self {
        Self {
            coord,
            production_interval,
            time_last_produced: 0.0,
            available_products: 0,
            last_recipient_slot: None,
            slots: Vec::new(),
        }
    }

    /// Emit at most one unit if the production interval has elapsed
    ///
    /// The unit goes to the next slot in the ring when any slots exist,
    /// starting from slot zero. With no slots the unit stays unallocated.
    /// Returns whether a unit was produced.
    pub fn update(&mut self, time: f32) -> bool {
        if time < self.time_last_produced + self.production_interval {
            return false;
        }

        self.available_products += 1;

        if !self.slots.is_empty() {
            let recipient = match self.last_recipient_slot {
                Some(last) => (last + 1) % self.slots.len(),
                None => 0,
            };
            self.slots[recipient].available_products += 1;
            self.last_recipient_slot = Some(recipient);
        }

        self.time_last_produced = time;
        true
    }

    /// The slot belonging to the given consumer
    pub fn slot_for(&self, consumer: ConsumerId) -> Option<&ConsumerSlot> {
        self.slots.iter().find(|slot| slot.consumer == consumer)
    }

    pub fn slot_for_mut(&mut self, consumer: ConsumerId) -> Option<&mut ConsumerSlot> {
        self.slots.iter_mut().find(|slot| slot.consumer == consumer)
    }
}

/// A consumer building
#[derive(Debug, Clone)]
pub struct Consumer {
    pub coord: TileCoord,
    /// The associated producer; None means no producer was reachable and
    /// this consumer never dispatches vehicles
    pub producer: Option<ProducerId>,
    /// Index of this consumer's slot in the owning producer's ring,
    /// meaningful only while `producer` is set
    pub slot_index: usize,
    /// Tile path from this consumer to its producer, endpoints inclusive
    pub path: Vec<TileCoord>,
    /// Units delivered and not yet consumed
    pub available_products: u32,
}

impl Consumer {
    pub fn new(coord: TileCoord) -> Self {
        Self {
            coord,
            producer: None,
            slot_index: 0,
            path: Vec::new(),
            available_products: 0,
        }
    }
}
