// ASCII visualization for board snapshots.
//
// Renders one pane per level, air first down to depth, matching how the
// game narrates the arena. The string renderers are separated from the
// printing wrapper so tests can assert on output.

use submarines_core::{Level, Snapshot, ViewCell};

/// Render a single plane of `snapshot` with row/column rulers. Empty cells
/// print `.`, hit cells `X`, intact components their owning unit's tag.
pub fn level_to_string(snapshot: &Snapshot, level: Level) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for col in 0..snapshot.cols {
        out.push_str(&format!("{col:>3} "));
    }
    out.push('\n');
    for (row, cells) in snapshot.levels[level.index()].iter().enumerate() {
        out.push_str(&format!("{row:>3} "));
        for cell in cells {
            let mark = match cell {
                ViewCell::Empty => ".",
                ViewCell::Hit => "X",
                ViewCell::Intact { tag } => tag.as_str(),
            };
            out.push_str(&format!("{mark:>3} "));
        }
        out.push('\n');
    }
    out
}

/// Render all three panes of `snapshot`, air down to depth.
pub fn snapshot_to_string(snapshot: &Snapshot) -> String {
    let mut out = format!("Board of {}\n", snapshot.owner);
    let panes = [
        ("In air:", Level::Air),
        ("Sea surface:", Level::Surface),
        ("In depth:", Level::Depth),
    ];
    for (title, level) in panes {
        out.push_str(title);
        out.push('\n');
        out.push_str(&level_to_string(snapshot, level));
    }
    out
}

/// Print `snapshot` to stdout.
pub fn display_snapshot(snapshot: &Snapshot) {
    println!("{}", snapshot_to_string(snapshot));
}
