//! Plain-text summary of a decoded schematic.

use std::collections::HashMap;
use std::fmt::Write;

use mc_schem_mcedit::Diagnostic;
use mc_schem_world::{BlockState, Clipboard, LegacyMapper};

use crate::config::ReportSection;

/// Block states with their cell counts, most common first. Ties sort by the
/// state string.
pub fn block_histogram(clipboard: &Clipboard) -> Vec<(&BlockState, usize)> {
    let mut counts: HashMap<&BlockState, usize> = HashMap::new();
    for (_, block) in clipboard.iter_blocks() {
        *counts.entry(&block.state).or_default() += 1;
    }
    let mut histogram: Vec<_> = counts.into_iter().collect();
    histogram.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
    });
    histogram
}

/// `id:data` the state maps back to, or `-` when the table has no entry.
fn legacy_label(legacy: &LegacyMapper, state: &BlockState) -> String {
    match legacy.legacy_of(state) {
        Some((id, data)) => format!("{id}:{data}"),
        None => "-".to_string(),
    }
}

pub fn render(
    clipboard: &Clipboard,
    diagnostics: &[Diagnostic],
    legacy: &LegacyMapper,
    options: &ReportSection,
) -> String {
    let mut out = String::new();
    let region = clipboard.region();
    let size = clipboard.dimensions();

    let _ = writeln!(out, "Size:     {} x {} x {}", size.x, size.y, size.z);
    let _ = writeln!(
        out,
        "Region:   {} .. {}",
        region.minimum_point(),
        region.maximum_point()
    );
    let _ = writeln!(out, "Origin:   {}", clipboard.origin());
    let _ = writeln!(
        out,
        "Blocks:   {} of {} cells",
        clipboard.block_count(),
        region.volume()
    );

    let histogram = block_histogram(clipboard);
    let shown = match options.top_blocks {
        0 => histogram.len(),
        n => n.min(histogram.len()),
    };
    for (state, count) in &histogram[..shown] {
        let _ = writeln!(
            out,
            "  {count:>8}  {:<7} {state}",
            legacy_label(legacy, state)
        );
    }
    if shown < histogram.len() {
        let _ = writeln!(out, "  ... {} more types", histogram.len() - shown);
    }

    let _ = writeln!(out, "Entities: {}", clipboard.entities().len());
    if options.list_entities {
        for e in clipboard.entities() {
            let l = e.location;
            let _ = writeln!(
                out,
                "  {} at ({:.2}, {:.2}, {:.2})",
                e.entity.entity_type, l.x, l.y, l.z
            );
        }
    }

    if !diagnostics.is_empty() {
        let _ = writeln!(out, "Skipped:  {}", diagnostics.len());
        for d in diagnostics {
            let _ = writeln!(out, "  {d}");
        }
    }
    out
}
