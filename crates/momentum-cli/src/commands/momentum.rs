use momentum_core::TaskPriority;
use serde_json::json;

use super::open_tracker;

pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let snapshot = tracker.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

pub fn complete(priority: TaskPriority) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let change = tracker.record_completion(priority);
    let snapshot = tracker.snapshot();
    let out = json!({
        "priority": priority,
        "change": change,
        "delta": change.delta(),
        "level_changed": change.level_changed(),
        "status": snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn comeback() -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let change = tracker.apply_comeback_boost();
    let snapshot = tracker.snapshot();
    let out = json!({
        "applied": change.is_some(),
        "boost": change.map(|c| c.delta()),
        "status": snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn rest(clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let out = if clear {
        let cleared = tracker.clear_rest_day();
        json!({ "cleared": cleared, "status": tracker.snapshot() })
    } else {
        let marked = tracker.mark_rest_day();
        json!({ "marked": marked, "status": tracker.snapshot() })
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn decay() -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let pending = tracker.pending_decay();
    let change = tracker.apply_decay_if_needed();
    let out = json!({
        "days": pending,
        "change": change,
        "status": tracker.snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
