//! Help message display for CLI.

#![allow(clippy::print_stdout)]

/// Print help message based on whether a configuration file exists.
pub fn print_smart_help(config_exists: bool) {
    if config_exists {
        print_configured_help();
    } else {
        print_first_time_help();
    }
}

/// Print setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No configuration found. Get started with grouper:");
    println!();
    println!("1. Initialize configuration:");
    println!("   grouper config init");
    println!();
    println!("2. Edit thresholds and allowed codes:");
    println!("   grouper config path");
    println!();
    println!("3. Group an occurrence export:");
    println!("   grouper occurrences.csv");
    println!();
    println!("An existing export_config.txt can be used directly with -c.");
    println!();
    println!("Run 'grouper -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: grouper [FILES]... [OPTIONS]");
    println!();
    println!("Example: grouper occurrences.csv -t 85 --min-group-size 1");
    println!();
    println!("Run 'grouper -h' for all options or 'grouper config show' to see the settings.");
}
