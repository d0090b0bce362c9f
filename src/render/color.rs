use std::collections::HashMap;

/// The ten-hue categorical palette used for satellite markers.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal satellite-id to color mapping. Ids are assigned palette slots
/// in first-seen order and memoized for the process lifetime, so a
/// satellite keeps its color across frames and sessions. Once all ten
/// hues are taken, assignment wraps around.
#[derive(Debug, Default)]
pub struct ColorAssigner {
    assigned: HashMap<u32, usize>,
}

impl ColorAssigner {
    pub fn new() -> Self {
        ColorAssigner::default()
    }

    pub fn color_for(&mut self, satellite_id: u32) -> &'static str {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(satellite_id).or_insert(next);
        PALETTE[slot % PALETTE.len()]
    }
}
