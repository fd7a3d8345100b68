//! Test command implementation.
//!
//! Runs the enabled collectors and displays the observations.

use std::time::Instant;

use anyhow::Context;
use herakles_irq_exporter::Observation;

use crate::config::Config;
use crate::state::build_collectors;

/// Tests metrics collection.
pub fn command_test(iterations: usize, verbose: bool, config: &Config) -> anyhow::Result<()> {
    println!("🧪 Herakles IRQ Exporter - Test Mode");
    println!("====================================");

    let collectors =
        build_collectors(config).context("failed to build collectors from configuration")?;

    for iteration in 1..=iterations {
        println!("\n🔄 Iteration {}/{}:", iteration, iterations);

        for collector in &collectors {
            let start = Instant::now();
            let mut observations: Vec<Observation> = Vec::new();

            collector
                .update(&mut observations)
                .with_context(|| format!("collector {} failed", collector.name()))?;

            println!(
                "   📊 {}: {} observations in {:.2}ms",
                collector.name(),
                observations.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );

            if verbose {
                for observation in &observations {
                    match observation {
                        Observation::Interrupt(i) => println!(
                            "   ├─ cpu={} type={} info=\"{}\" devices=\"{}\" {}",
                            i.cpu, i.name, i.info, i.devices, i.value
                        ),
                        Observation::FileFd(f) => println!("   ├─ {} {}", f.name, f.value),
                    }
                }
            }
        }
    }

    println!("\n✅ Test completed successfully");
    Ok(())
}
