use super::open_tracker;

pub fn run(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    let events = tracker.recent_events(limit)?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
