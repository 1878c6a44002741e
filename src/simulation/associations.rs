//! Consumer-producer association
//!
//! Runs once after generation: every consumer searches for its nearest
//! producer, stores the path, registers itself in the producer's slot ring
//! and paints the intermediate path tiles as roads.

use log::{debug, warn};

use super::building::{Consumer, ConsumerSlot, Producer};
use super::events::SimEvent;
use super::grid::Grid;
use super::pathfinding::Pathfinder;
use super::types::{ConsumerId, ProducerId, TileCoord, TileKind};

/// Associate every consumer with its cheapest reachable producer
///
/// Consumers are processed in id order and appended to the chosen
/// producer's slot ring in that order, which later drives the round-robin
/// allocation. Path cost ties keep the lowest producer id. Consumers with
/// no reachable producer stay unassociated.
pub fn establish(
    grid: &mut Grid,
    producers: &mut [Producer],
    consumers: &mut [Consumer],
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let mut pathfinder = Pathfinder::new();

    for (consumer_index, consumer) in consumers.iter_mut().enumerate() {
        let consumer_id = ConsumerId(consumer_index);

        let mut nearest: Option<(u32, usize, Vec<TileCoord>)> = None;
        for (producer_index, producer) in producers.iter().enumerate() {
            if let Some((cost, path)) = pathfinder.find_path(grid, consumer.coord, producer.coord) {
                let improves = match &nearest {
                    Some((nearest_cost, _, _)) => cost < *nearest_cost,
                    None => true,
                };
                if improves {
                    nearest = Some((cost, producer_index, path));
                }
            }
        }

        let Some((cost, producer_index, path)) = nearest else {
            warn!(
                "consumer {} at ({}, {}) has no reachable producer",
                consumer_index, consumer.coord.x, consumer.coord.y
            );
            events.push(SimEvent::ConsumerUnreachable {
                consumer: consumer_id,
            });
            continue;
        };

        // intermediate tiles become roads; the endpoints keep their building kind
        if path.len() > 2 {
            for tile in &path[1..path.len() - 1] {
                grid.set(*tile, TileKind::Road);
            }
        }

        let producer = &mut producers[producer_index];
        producer.slots.push(ConsumerSlot::new(consumer_id));
        consumer.producer = Some(ProducerId(producer_index));
        consumer.slot_index = producer.slots.len() - 1;
        consumer.path = path;

        debug!(
            "consumer {} associated with producer {} at cost {}",
            consumer_index, producer_index, cost
        );
        events.push(SimEvent::AssociationEstablished {
            consumer: consumer_id,
            producer: ProducerId(producer_index),
        });
    }

    events
}
