//! Device characterization for the `stats` subcommand.

use std::io::Write;

use mfnet_common::Device;
use serde::Serialize;

/// One summary row per device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceStats {
    /// Device name.
    pub name: String,
    /// Number of components.
    pub components: usize,
    /// Number of connections.
    pub connections: usize,
    /// Number of valve-mapped components.
    pub valves: usize,
    /// Number of layers.
    pub layers: usize,
    /// Whether any layer is of type CONTROL.
    pub has_control_layer: bool,
    /// Largest connection fan-out, counting the source (max sinks + 1).
    pub max_connectivity: usize,
    /// Mean component area in mm².
    pub mean_component_area: f64,
    /// Standard deviation of component areas in mm².
    pub std_component_area: f64,
}

impl DeviceStats {
    /// Characterizes a device.
    pub fn characterize(device: &Device) -> Self {
        let areas: Vec<f64> = device
            .components()
            .map(|c| (c.xspan * c.yspan) as f64 / 1.0e6)
            .collect();
        let mean = if areas.is_empty() {
            0.0
        } else {
            areas.iter().sum::<f64>() / areas.len() as f64
        };
        let variance = if areas.is_empty() {
            0.0
        } else {
            areas.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / areas.len() as f64
        };

        DeviceStats {
            name: device.name.clone(),
            components: device.component_count(),
            connections: device.connection_count(),
            valves: device.valves().count(),
            layers: device.layers().count(),
            has_control_layer: device.layers().any(|l| l.layer_type == "CONTROL"),
            max_connectivity: device
                .connections()
                .map(|c| c.sinks.len() + 1)
                .max()
                .unwrap_or(0),
            mean_component_area: mean,
            std_component_area: variance.sqrt(),
        }
    }
}

/// Writes the rows as CSV with a header line.
///
/// # Errors
/// Propagates writer failures.
pub fn write_csv<W: Write>(out: W, rows: &[DeviceStats]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the rows as a plain text table.
pub fn render_table(rows: &[DeviceStats]) -> String {
    let mut text = format!(
        "{:<24} {:>10} {:>11} {:>6} {:>6} {:>8} {:>8} {:>12} {:>12}\n",
        "name",
        "components",
        "connections",
        "valves",
        "layers",
        "control",
        "max-con",
        "mean-area",
        "std-area"
    );
    for row in rows {
        text.push_str(&format!(
            "{:<24} {:>10} {:>11} {:>6} {:>6} {:>8} {:>8} {:>12.3} {:>12.3}\n",
            row.name,
            row.components,
            row.connections,
            row.valves,
            row.layers,
            if row.has_control_layer { "YES" } else { "NO" },
            row.max_connectivity,
            row.mean_component_area,
            row.std_component_area,
        ));
    }
    text
}
