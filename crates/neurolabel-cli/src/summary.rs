use console::Style;
use neurolabel_core::protocol::{DetectResponse, HistoryEntry};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    class: Style,
    hidden: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            class: Style::new().green(),
            hidden: Style::new().dim().yellow(),
        }
    }
}

/// Detections of a fresh upload; entries below `threshold` are counted but
/// not listed.
pub fn print_detections(resp: &DetectResponse, threshold: f32) {
    let s = Styles::new();

    println!();
    println!(
        "  {} {}",
        s.title.apply_to(format!("Image #{}", resp.image_id)),
        s.value.apply_to(&resp.filename)
    );
    println!();

    let (shown, hidden): (Vec<_>, Vec<_>) = resp
        .detections
        .iter()
        .partition(|d| d.confidence >= threshold);

    for d in &shown {
        println!(
            "    {:<16}{:>5}  ({:.0}, {:.0}) - ({:.0}, {:.0})",
            s.class.apply_to(&d.label),
            s.value.apply_to(format!("{:.0}%", d.confidence * 100.0)),
            d.bbox.x1,
            d.bbox.y1,
            d.bbox.x2,
            d.bbox.y2
        );
    }
    if shown.is_empty() {
        println!("    {}", s.label.apply_to("no detections above threshold"));
    }
    if !hidden.is_empty() {
        println!(
            "    {}",
            s.hidden.apply_to(format!(
                "{} below {:.0}% not shown",
                hidden.len(),
                threshold * 100.0
            ))
        );
    }
    println!();
}

pub fn print_history(entries: &[HistoryEntry]) {
    let s = Styles::new();

    if entries.is_empty() {
        println!("{}", s.label.apply_to("No processed images"));
        return;
    }

    println!(
        "  {:>5}  {:<17}  {:>6}  {}",
        s.label.apply_to("id"),
        s.label.apply_to("processed"),
        s.label.apply_to("boxes"),
        s.label.apply_to("file")
    );
    for entry in entries {
        println!(
            "  {:>5}  {:<17}  {:>6}  {}",
            s.value.apply_to(entry.id),
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.detection_count,
            s.class.apply_to(&entry.filename)
        );
    }
}
