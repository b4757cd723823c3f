use awsinv_core::Service;
use colored::*;

use crate::terminal::{colors, print};

pub fn services() {
    let rows: Vec<(&str, ColoredString)> = Service::ALL
        .iter()
        .map(|service| {
            let scope = if service.is_global() {
                "global".color(colors::GLOBAL)
            } else {
                "regional".color(colors::REGIONAL)
            };
            (service.key(), scope)
        })
        .collect();
    print::key_values(&rows);
}
