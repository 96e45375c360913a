//! Text rendering for tool results
//!
//! Timestamps are shown as `YYYY-MM-DD HH:MM:SS UTC`; anything that does not
//! parse as RFC 3339 is shown verbatim.

use crate::gist::{Gist, GistComment};
use chrono::{DateTime, Utc};

pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn visibility(gist: &Gist) -> &'static str {
    if gist.public {
        "Public"
    } else {
        "Private"
    }
}

fn description(gist: &Gist) -> &str {
    gist.description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description")
}

/// Multi-line summary of one gist
pub fn format_gist_info(gist: &Gist) -> String {
    let owner = gist
        .owner
        .as_ref()
        .map(|o| o.login.as_str())
        .unwrap_or("Anonymous");

    format!(
        "Gist ID: {}\nDescription: {}\nOwner: {}\nVisibility: {}\nFiles: {}\nCreated: {}\nUpdated: {}\nURL: {}",
        gist.id,
        description(gist),
        owner,
        visibility(gist),
        gist.file_names(),
        format_timestamp(&gist.created_at),
        format_timestamp(&gist.updated_at),
        gist.html_url
    )
}

/// Numbered list entries, separated by blank lines
pub fn format_gist_list(gists: &[Gist]) -> String {
    gists
        .iter()
        .enumerate()
        .map(|(index, gist)| {
            format!(
                "{}. {} ({})\n   ID: {}\n   Files: {}\n   Updated: {}\n   URL: {}",
                index + 1,
                description(gist),
                visibility(gist),
                gist.id,
                gist.file_names(),
                format_timestamp(&gist.updated_at),
                gist.html_url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_comment(comment: &GistComment) -> String {
    let author = comment
        .user
        .as_ref()
        .map(|u| u.login.as_str())
        .unwrap_or("unknown");

    format!(
        "#{} by @{} at {}\n{}",
        comment.id,
        author,
        format_timestamp(&comment.created_at),
        comment.body
    )
}
