use awsinv_common::regions::{KNOWN_REGIONS, partition_for_region};
use colored::*;

use crate::terminal::{colors, print};

pub fn regions() {
    let rows: Vec<(&str, ColoredString)> = KNOWN_REGIONS
        .iter()
        .map(|region| (*region, partition_for_region(region).color(colors::ACCENT)))
        .collect();
    print::key_values(&rows);
}
