//! Plain-text rendering of a [`TimelineView`]. One card shape and one year
//! selector shape serve both the timeline and the dashboard.

use std::fmt::Write as _;

use shared::domain::{FilterSelection, MemoryRecord, Year};
use timeline_core::{copy, group_by_year, sequence, SequencedItem, TimelineView, ViewState};

pub fn render_header(out: &mut String) {
    let _ = writeln!(out, "{}", copy::HEADER_TITLE);
    let _ = writeln!(out, "{}", copy::HEADER_SUBTITLE);
    out.push('\n');
}

pub fn render_year_selector(out: &mut String, years: &[Year], filter: FilterSelection) {
    if years.is_empty() {
        return;
    }
    let chip = |label: String, active: bool| {
        if active {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    let mut chips = vec![chip("All".into(), filter == FilterSelection::All)];
    chips.extend(
        years
            .iter()
            .map(|year| chip(year.to_string(), filter == FilterSelection::Year(*year))),
    );
    let _ = writeln!(out, "{}", chips.join(" "));
    out.push('\n');
}

pub fn render_card(out: &mut String, title: &str, artist: &str, year: Option<Year>, note: &str) {
    match (artist.is_empty(), year) {
        (false, Some(year)) => {
            let _ = writeln!(out, "  {title} · {artist} ({year})");
        }
        (true, Some(year)) => {
            let _ = writeln!(out, "  {title} ({year})");
        }
        (false, None) => {
            let _ = writeln!(out, "  {title} · {artist}");
        }
        (true, None) => {
            let _ = writeln!(out, "  {title}");
        }
    }
    if !note.is_empty() {
        let _ = writeln!(out, "    {note}");
    }
}

fn render_record(out: &mut String, record: &MemoryRecord, empty_note: &str) {
    let note = record
        .note
        .as_deref()
        .filter(|note| !note.is_empty())
        .unwrap_or(empty_note);
    render_card(out, &record.title, &record.artist, Some(record.year), note);
}

fn render_delayed(out: &mut String, item: &SequencedItem) {
    let _ = writeln!(out, "+{}ms", item.delay_ms);
    render_record(out, &item.record, "");
}

fn render_items(out: &mut String, view: &TimelineView) {
    if view.filter != FilterSelection::All {
        for item in &view.items {
            render_delayed(out, item);
        }
        return;
    }

    // Grouping reorders the list, so delays are assigned again in printed order.
    let records: Vec<MemoryRecord> = view.items.iter().map(|item| item.record.clone()).collect();
    let groups = group_by_year(&records);
    let printed: Vec<MemoryRecord> = groups
        .iter()
        .flat_map(|(_, group)| group.iter().cloned())
        .collect();
    let mut sequenced = sequence(&printed, view.stagger_ms).into_iter();
    for (year, group) in &groups {
        let _ = writeln!(out, "── {year} ──");
        for item in sequenced.by_ref().take(group.len()) {
            render_delayed(out, &item);
        }
    }
}

pub fn render_timeline(view: &TimelineView) -> String {
    let mut out = String::new();
    render_header(&mut out);
    render_year_selector(&mut out, &view.years, view.filter);

    match &view.state {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", copy::LOADING_TEXT);
        }
        ViewState::Error(message) => render_card(&mut out, message, "", None, copy::ERROR_BODY),
        ViewState::Empty if view.stats.total == 0 => {
            render_card(&mut out, copy::EMPTY_TITLE, "", None, copy::EMPTY_BODY)
        }
        ViewState::Empty => render_card(
            &mut out,
            copy::EMPTY_FILTERED_TITLE,
            "",
            None,
            copy::EMPTY_FILTERED_BODY,
        ),
        ViewState::Populated(_) => render_items(&mut out, view),
    }
    out
}

pub fn render_dashboard(view: &TimelineView) -> String {
    let mut out = String::new();
    render_header(&mut out);

    match &view.state {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", copy::LOADING_TEXT);
        }
        ViewState::Error(message) => render_card(&mut out, message, "", None, copy::ERROR_BODY),
        _ if view.stats.total == 0 => {
            render_card(&mut out, copy::EMPTY_TITLE, "", None, copy::EMPTY_BODY)
        }
        _ => {
            let _ = writeln!(out, "{}: {}", copy::STATS_TITLE, view.stats.total);
            let _ = writeln!(out, "  {}", copy::distinct_years_note(view.stats.distinct_years));
            out.push('\n');
            if let Some(latest) = &view.stats.latest {
                let _ = writeln!(out, "{}", copy::RECENT_TITLE);
                render_record(&mut out, latest, copy::RECENT_EMPTY_NOTE);
            }
        }
    }
    out
}
