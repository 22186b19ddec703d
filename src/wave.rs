//! C3 — wave object. Ported from `original_source/grasp/wave.py`.

use ahash::AHashMap;

use crate::area::area_side;
use crate::error::BatchingError;
use crate::types::{BoxRecord, WaveClass, WaveId};

/// Corridor occupancy for one floor, split by parity so a picker can walk
/// one side of an aisle without crossing (spec.md §9, "Parity partition").
#[derive(Debug, Clone, Default)]
struct FloorOccupancy {
    even: AHashMap<i64, u64>,
    odd: AHashMap<i64, u64>,
}

impl FloorOccupancy {
    fn is_empty(&self) -> bool {
        self.even.is_empty() && self.odd.is_empty()
    }

    fn side_mut(&mut self, corridor: i64) -> &mut AHashMap<i64, u64> {
        if corridor % 2 == 0 {
            &mut self.even
        } else {
            &mut self.odd
        }
    }

    fn area(&self, floor: i64) -> u64 {
        let even: Vec<(i64, i64, u64)> = self
            .even
            .iter()
            .map(|(&corridor, &qty)| (floor, corridor, qty))
            .collect();
        let odd: Vec<(i64, i64, u64)> = self
            .odd
            .iter()
            .map(|(&corridor, &qty)| (floor, corridor, qty))
            .collect();
        area_side(&even) + area_side(&odd)
    }
}

/// A batched collection of boxes picked together: one wave class, bounded
/// by `wave_capacity` pieces, incrementally tracking corridor occupancy.
#[derive(Debug, Clone)]
pub struct Wave {
    pub id: WaveId,
    pub wave_class: WaveClass,
    pub boxes: Vec<BoxRecord>,
    pub total_pieces: u64,
    floors: AHashMap<i64, FloorOccupancy>,
}

impl Wave {
    pub fn new(id: WaveId, wave_class: WaveClass) -> Self {
        Self {
            id,
            wave_class,
            boxes: Vec::new(),
            total_pieces: 0,
            floors: AHashMap::default(),
        }
    }

    /// Appends `box` to this wave's membership and accumulates its corridor
    /// occupancy, regardless of `tentative` (matching the source's literal
    /// behavior — only the `assigned_wave` back-pointer mutation is gated).
    ///
    /// Rejects a non-tentative add when `box.assigned_wave` is already set
    /// (spec.md §9, the "stricter reading" of the double-assignment bug).
    pub fn add_box(&mut self, target: &mut BoxRecord, tentative: bool) -> Result<(), BatchingError> {
        if !tentative && target.assigned_wave.is_some() {
            return Err(BatchingError::DoubleAssignment {
                caixa_id: target.caixa_id.clone(),
            });
        }

        self.total_pieces += target.pieces;
        for position in &target.corridors {
            let entry = self.floors.entry(position.floor).or_default();
            *entry.side_mut(position.corridor).entry(position.corridor).or_insert(0) +=
                position.qty;
        }
        self.boxes.push(target.clone());

        if !tentative {
            target.assigned_wave = Some(self.id);
        }
        Ok(())
    }

    /// Exact inverse of `add_box`: removes the box (by `caixa_id`) from
    /// membership, decrements corridor occupancy, and drops entries that
    /// drop to zero (and floors that become empty on both parities). For a
    /// non-tentative remove, also clears `box.assigned_wave`.
    pub fn remove_box(&mut self, target: &mut BoxRecord, tentative: bool) {
        let Some(pos) = self.boxes.iter().position(|b| b.caixa_id == target.caixa_id) else {
            return;
        };
        let removed = self.boxes.remove(pos);
        self.total_pieces -= removed.pieces;

        for position in &removed.corridors {
            if let Some(floor) = self.floors.get_mut(&position.floor) {
                let side = floor.side_mut(position.corridor);
                if let Some(qty) = side.get_mut(&position.corridor) {
                    if *qty <= position.qty {
                        side.remove(&position.corridor);
                    } else {
                        *qty -= position.qty;
                    }
                }
            }
        }
        self.floors.retain(|_, floor| !floor.is_empty());

        if !tentative {
            target.assigned_wave = None;
        }
    }

    /// Per-floor sum of `area_side(even) + area_side(odd)`, plus the
    /// floor-transition penalties. Returns 0 for an empty wave.
    pub fn area(&self) -> u64 {
        if self.total_pieces == 0 {
            return 0;
        }

        let total_area: u64 = self
            .floors
            .iter()
            .map(|(&floor, occupancy)| occupancy.area(floor))
            .sum();

        let mut floor_list: Vec<i64> = self.floors.keys().copied().collect();
        floor_list.sort_unstable();

        let (base_penalty, extra_penalty) = match (floor_list.first(), floor_list.last()) {
            (Some(&lo), Some(&hi)) => {
                let num_floors = floor_list.len() as u64;
                (10 * (num_floors - 1), 5 * (hi - lo) as u64)
            }
            _ => (0, 0),
        };

        total_area + base_penalty + extra_penalty
    }
}
