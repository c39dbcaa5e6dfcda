mod gauge_vm;

pub use gauge_vm::{AverageVm, GaugeVm, map_averages, map_section_gauges};
