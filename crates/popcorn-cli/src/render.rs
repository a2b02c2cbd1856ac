use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use popcorn_core::{format_rating, format_runtime, WatchedList, WatchedSummary};
use popcorn_models::{MovieDetail, SearchResult};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

/// Numbered search results. The row number matches the menu index in
/// interactive mode (1-based).
pub fn results_table(results: &[SearchResult], selected_id: Option<&str>) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("🗓 Year"), header("IMDb ID")]);

    for (index, result) in results.iter().enumerate() {
        let mut title = Cell::new(&result.title);
        if selected_id == Some(result.imdb_id.as_str()) {
            title = title.fg(Color::Cyan).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(index + 1),
            title,
            Cell::new(&result.year),
            Cell::new(&result.imdb_id),
        ]);
    }

    table
}

/// Detail pane for one movie. `user_rating` is set when the movie is
/// already on the watched list.
pub fn detail_pane(detail: &MovieDetail, user_rating: Option<u8>) -> String {
    let mut table = styled_table();
    table.set_header(vec![Cell::new(&detail.title)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);

    let released = if detail.released.is_empty() {
        detail.year.clone()
    } else {
        detail.released.clone()
    };
    let mut facts = format!("{} • {}", released, format_runtime(f64::from(detail.runtime_minutes)));
    if !detail.genre.is_empty() {
        facts.push_str(&format!(" • {}", detail.genre));
    }

    table.add_row(vec![facts]);
    table.add_row(vec![format!("⭐️ {} IMDb rating", detail.imdb_rating)]);
    if let Some(stars) = user_rating {
        table.add_row(vec![format!("You rated this movie {} ⭐️", stars)]);
    }
    table.add_row(vec![detail.plot.clone()]);
    table.add_row(vec![format!("Starring {}", detail.actors)]);
    table.add_row(vec![format!("Directed by {}", detail.director)]);
    table.add_row(vec![format!("Written by {}", detail.writer)]);
    table.add_row(vec![format!("{} • {}", detail.country, detail.language)]);
    if !detail.poster_url.is_empty() && detail.poster_url != "N/A" {
        table.add_row(vec![format!("Poster: {}", detail.poster_url)]);
    }

    table.to_string()
}

/// One-line summary shown above the watched list.
pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies   ⭐️ {}   🌟 {}   ⏳ {}",
        summary.count,
        summary.imdb_rating_display(),
        summary.user_rating_display(),
        summary.runtime_display(),
    )
}

pub fn watched_table(watched: &WatchedList) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("Title"),
        header("⭐️ IMDb"),
        header("🌟 Yours"),
        header("⏳ Runtime"),
    ]);

    for entry in watched.iter() {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(format_rating(entry.imdb_rating)),
            Cell::new(entry.user_rating),
            Cell::new(format_runtime(f64::from(entry.runtime_minutes))),
        ]);
    }

    table
}

/// Menu label for a watched entry.
pub fn watched_label(title: &str, imdb_rating: f64, user_rating: u8, runtime_minutes: u32) -> String {
    format!(
        "{}  ⭐️ {}  🌟 {}  ⏳ {}",
        title,
        format_rating(imdb_rating),
        user_rating,
        format_runtime(f64::from(runtime_minutes))
    )
}
