use std::process::Command;
use chrono::TimeZone;

/// Short commit hash, or "unknown" outside a git checkout
fn commit_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Local build time with the zone abbreviation, e.g. "2026-10-19 14:03:11 PDT"
fn build_timestamp() -> String {
    let now = chrono::Local::now();
    let zone = iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<chrono_tz::Tz>().ok())
        .map(|tz| tz.from_utc_datetime(&now.naive_utc()).format("%Z").to_string());
    match zone {
        Some(zone) => format!("{} {}", now.format("%Y-%m-%d %H:%M:%S"), zone),
        None => now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

fn main() {
    // Shown in the page footer
    println!("cargo:rustc-env=BUILD_HASH={}", commit_hash());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp());

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
