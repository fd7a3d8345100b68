//! Interrupt counters collector.
//!
//! This module parses /proc/interrupts into per-CPU series and exposes them
//! as `node_interrupts_total{cpu,type,info,devices}`.
//!
//! The snapshot looks like this (x86_64, two CPUs):
//!
//! ```text
//!            CPU0       CPU1
//!   0:         31          0   IO-APIC   2-edge      timer
//!   8:          0          0   IO-APIC   8-edge      rtc0
//! NMI:         47         39   Non-maskable interrupts
//! ERR:          0
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use tracing::debug;

use crate::collectors::Collector;
use crate::error::CollectError;
use crate::filter::NameFilter;
use crate::procfs::ProcFs;
use crate::sink::{InterruptObservation, MetricSink, Observation};

/// One row of /proc/interrupts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptRecord {
    /// IRQ number or symbolic name (`NMI`, `LOC`, ...).
    pub name: String,
    /// Controller / trigger type column.
    pub info: String,
    /// Space-joined device list; always empty for symbolic interrupts.
    pub devices: String,
    /// Raw per-CPU counters, index = CPU number.
    pub values: Vec<String>,
}

impl InterruptRecord {
    /// Identity passed to the name filter: `name;info;devices`.
    pub fn filter_name(&self) -> String {
        format!("{};{};{}", self.name, self.info, self.devices)
    }
}

/// Reads and parses `<procfs>/interrupts`.
pub fn get_interrupts(procfs: &ProcFs) -> Result<BTreeMap<String, InterruptRecord>, CollectError> {
    let path = procfs.path("interrupts");
    let file = File::open(&path).map_err(|e| CollectError::io(&path, e))?;

    parse_interrupts(BufReader::new(file)).map_err(|e| match e {
        CollectError::Read(source) => CollectError::io(&path, source),
        other => other,
    })
}

/// Parses an interrupts snapshot.
///
/// The header line has one field per CPU. Rows without a colon, and rows
/// with fewer than `cpus + 1` columns after the label (`ERR`, `MIS`), are
/// skipped. Numeric IRQs split the trailing columns into `info` and
/// `devices`; symbolic ones keep everything in `info`.
pub fn parse_interrupts<R: BufRead>(
    reader: R,
) -> Result<BTreeMap<String, InterruptRecord>, CollectError> {
    // Device names are not guaranteed to be UTF-8, so lines are read as
    // bytes and decoded lossily.
    let mut lines = reader.split(b'\n').map(|line| {
        line.map(|bytes| {
            let mut text = String::from_utf8_lossy(&bytes).into_owned();
            if text.ends_with('\r') {
                text.pop();
            }
            text
        })
    });

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(CollectError::Format("interrupts empty".to_string())),
    };
    // One header field per CPU.
    let cpu_count = header.split_whitespace().count();

    let mut interrupts = BTreeMap::new();

    for line in lines {
        let line = line?;

        // On aarch64 the label can run straight into the first value, so the
        // label is split off at the colon before splitting on whitespace.
        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        if parts.len() < cpu_count + 1 {
            debug!("skipping interrupts row with too few columns: {}", label.trim());
            continue;
        }

        let name = label.trim_start().to_string();
        let values = parts[..cpu_count].iter().map(|v| v.to_string()).collect();

        let (info, devices) = if name.parse::<i64>().is_ok() {
            (parts[cpu_count].to_string(), parts[cpu_count + 1..].join(" "))
        } else {
            (parts[cpu_count..].join(" "), String::new())
        };

        interrupts.insert(
            name.clone(),
            InterruptRecord {
                name,
                info,
                devices,
                values,
            },
        );
    }

    Ok(interrupts)
}

/// Applies filtering and zero suppression to parsed records and emits the
/// surviving points.
///
/// The name filter is evaluated once per record and drops all of its CPUs;
/// zero suppression then drops single points. The first value that is not a
/// number aborts the whole call and nothing is emitted.
pub fn emit_interrupts(
    interrupts: &BTreeMap<String, InterruptRecord>,
    filter: &dyn NameFilter,
    include_zeros: bool,
    sink: &mut dyn MetricSink,
) -> Result<(), CollectError> {
    let mut points = Vec::new();

    for record in interrupts.values() {
        let filter_name = record.filter_name();
        if filter.ignored(&filter_name) {
            debug!("ignoring interrupt name {}", filter_name);
            continue;
        }

        for (cpu, value) in record.values.iter().enumerate() {
            let fv: f64 = value.parse().map_err(|e| CollectError::InvalidValue {
                value: value.clone(),
                source_name: "interrupts",
                source: e,
            })?;

            if !include_zeros && fv == 0.0 {
                debug!(
                    "ignoring interrupt with zero value {} on cpu {}",
                    filter_name, cpu
                );
                continue;
            }

            points.push(InterruptObservation {
                value: fv,
                cpu: cpu.to_string(),
                name: record.name.clone(),
                info: record.info.clone(),
                devices: record.devices.clone(),
            });
        }
    }

    for point in points {
        sink.emit(Observation::Interrupt(point));
    }

    Ok(())
}

/// Collector for /proc/interrupts.
pub struct InterruptsCollector {
    procfs: ProcFs,
    filter: Arc<dyn NameFilter>,
    include_zeros: bool,
}

impl InterruptsCollector {
    pub fn new(procfs: ProcFs, filter: Arc<dyn NameFilter>, include_zeros: bool) -> Self {
        Self {
            procfs,
            filter,
            include_zeros,
        }
    }
}

impl Collector for InterruptsCollector {
    fn name(&self) -> &'static str {
        "interrupts"
    }

    fn update(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError> {
        let interrupts = get_interrupts(&self.procfs)?;
        emit_interrupts(&interrupts, self.filter.as_ref(), self.include_zeros, sink)
    }
}
