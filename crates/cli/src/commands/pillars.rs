//! `pillarwise pillars`: list the interview pillars in order.

use pillarwise_core::PILLARS;

pub fn run() {
    println!();
    for (i, name) in PILLARS.iter().enumerate() {
        println!("  {:>2}. {name}", i + 1);
    }
    println!();
}
