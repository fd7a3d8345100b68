//! Check command implementation.
//!
//! Validates that the procfs snapshot files exist and parse.

use anyhow::bail;
use herakles_irq_exporter::{get_interrupts, parse_file_fd_stats};

use crate::config::{validate_effective_config, Config};

/// Validates procfs access and configuration.
pub fn command_check(config: &Config) -> anyhow::Result<()> {
    println!("🔍 Herakles IRQ Exporter - System Check");
    println!("=======================================");

    let procfs = config.procfs();

    let mut all_ok = true;

    println!("\n📁 Checking {}...", procfs.root().display());
    if procfs.root().exists() {
        println!("   ✅ procfs accessible");
    } else {
        println!("   ❌ procfs not found");
        all_ok = false;
    }

    if config.enable_interrupts_collector.unwrap_or(true) {
        println!("\n⚡ Checking interrupts...");
        match get_interrupts(&procfs) {
            Ok(interrupts) => {
                let cpus = interrupts
                    .values()
                    .next()
                    .map(|r| r.values.len())
                    .unwrap_or(0);
                println!(
                    "   ✅ Parsed {} interrupts across {} CPUs",
                    interrupts.len(),
                    cpus
                );
            }
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    }

    if config.enable_filefd_collector.unwrap_or(true) {
        println!("\n📂 Checking file-nr...");
        match parse_file_fd_stats(&procfs.path("sys/fs/file-nr")) {
            Ok(stats) => {
                println!(
                    "   ✅ allocated={} maximum={}",
                    stats.get("allocated").map(String::as_str).unwrap_or("?"),
                    stats.get("maximum").map(String::as_str).unwrap_or("?")
                );
            }
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        bail!("some checks failed - please review the output above")
    }
}
