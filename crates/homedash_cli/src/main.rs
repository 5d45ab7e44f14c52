//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `homedash_core` linkage.
//! - Keep output deterministic apart from the date-dependent check line.

use homedash_core::{check_days_today, NullUiEffects};

fn main() {
    println!("homedash_core ping={}", homedash_core::ping());
    println!("homedash_core version={}", homedash_core::core_version());

    let mut effects = NullUiEffects;
    match check_days_today(&mut effects) {
        Some(matched) => println!(
            "memorial_check today={} label={}",
            matched.date, matched.label
        ),
        None => println!("memorial_check today=none"),
    }
}
