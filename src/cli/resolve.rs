use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error,
    resolver::Resolver,
    success,
    types::{CodeStyle, ResolvedTrack, SpotifyKind, TrackTableRow},
    utils, warning,
};

pub async fn resolve(link: String, style: CodeStyle) {
    let Some(parsed) = utils::parse_spotify_link(&link) else {
        error!(
            "Invalid link. Example: https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    };

    let uri = utils::spotify_uri(parsed.kind, &parsed.id);
    let code_url = utils::scannable_code_url(&uri, style);

    if parsed.kind != SpotifyKind::Track {
        success!("Spotify code for {} {}:\n{}", parsed.kind, parsed.id, code_url);
        return;
    }

    let resolver = Resolver::new(Config::from_env());

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Resolving track {}...", parsed.id));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = resolver.resolve(&parsed.id).await;
    pb.finish_and_clear();

    let resolution = match result {
        Ok(r) => r,
        Err(e) => error!("{}", e.message()),
    };

    let estimated = resolution.is_estimated();
    let mut rows = vec![
        row("Song", resolution.track.name()),
        row("Artist", &resolution.track.artist_names()),
    ];

    let duration = utils::format_duration(resolution.track.duration_ms());
    if estimated {
        rows.push(row("Duration", &format!("~{duration} (estimated)")));
    } else {
        rows.push(row("Duration", &duration));
    }

    if let ResolvedTrack::Full(data) = &resolution.track {
        rows.push(row("Album", &data.album.name));
        rows.push(row("Released", &data.album.release_date));
        if let Some(cover) = data.album.images.first() {
            rows.push(row("Cover", &cover.url));
        }
    }

    rows.push(row("Source", resolution.provenance.as_str()));
    rows.push(row("Code", &code_url));

    println!("{}", Table::new(rows));

    if resolution.is_stale() {
        warning!("Spotify is unreachable, showing previously cached data.");
    }
    if estimated {
        warning!("Data obtained from the public page, duration is an estimate.");
    }
}

fn row(field: &str, value: &str) -> TrackTableRow {
    TrackTableRow {
        field: field.to_string(),
        value: value.to_string(),
    }
}
