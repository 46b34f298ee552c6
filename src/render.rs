use log::info;
use std::fs;
use std::path::Path;

use crate::db::DbPool;
use crate::grid;
use crate::models::post::Post;
use crate::models::settings::Setting;
use crate::theme::Theme;

/// Built-in page layout, used when no custom layout file is present.
/// Placeholders are replaced at render time; whatever is left over is
/// stripped before the page is written out.
const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en" class="{{theme_class}}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{site_title}}</title>
    <link href="https://unpkg.com/boxicons@2.1.4/css/boxicons.min.css" rel="stylesheet">
    <link href="/static/css/style.css" rel="stylesheet">
</head>
<body>
    <header class="site-header">
        <h1 class="site-title">{{site_title}}</h1>
        {{theme_toggle}}
    </header>
    <main>
        <div class="bento-grid">{{bento_grid}}</div>
    </main>
    <footer class="site-footer">{{footer}}</footer>
</body>
</html>
"#;

/// The theme toggle control; a layout without the slot renders no control.
const THEME_TOGGLE_HTML: &str =
    r#"<button class="theme-switch" type="button" aria-label="Toggle theme"><i class='bx bx-moon'></i></button>"#;

/// Where the assembled page is written.
const OUTPUT_FILE: &str = "website/index.html";

/// Date presentation settings, read once per render.
pub struct DateStyle {
    pub format: String,
    pub timezone: String,
}

impl DateStyle {
    pub fn load(pool: &DbPool) -> Self {
        DateStyle {
            format: Setting::get_or(pool, "date_format", "%Y-%m-%d"),
            timezone: Setting::get_or(pool, "timezone", "UTC"),
        }
    }
}

/// Format a generator timestamp ("YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD").
/// Unparseable input falls back to the raw string.
pub fn format_date(raw: &str, style: &DateStyle) -> String {
    let naive = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").or_else(|_| {
        chrono::NaiveDateTime::parse_from_str(&format!("{} 00:00:00", raw), "%Y-%m-%d %H:%M:%S")
    });

    match naive {
        Ok(ndt) => {
            let utc_dt = chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(ndt, chrono::Utc);
            if let Ok(tz) = style.timezone.parse::<chrono_tz::Tz>() {
                utc_dt.with_timezone(&tz).format(&style.format).to_string()
            } else {
                utc_dt.format(&style.format).to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Remove any {{placeholder}} tags left unreplaced in the rendered page.
/// Only tags that look like valid placeholders (lowercase + underscores)
/// are stripped.
pub fn strip_unreplaced_placeholders(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        let (before, tail) = rest.split_at(start);
        result.push_str(before);

        match tail[2..].find("}}") {
            Some(end)
                if end > 0
                    && tail[2..2 + end]
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b == b'_') =>
            {
                rest = &tail[2 + end + 2..];
            }
            _ => {
                result.push_str("{{");
                rest = &tail[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// A custom layout at website/layout.html takes precedence over the
/// built-in default.
fn load_layout() -> String {
    let custom = Path::new("website/layout.html");
    if custom.exists() {
        if let Ok(layout) = fs::read_to_string(custom) {
            if !layout.trim().is_empty() {
                return layout;
            }
        }
    }
    DEFAULT_LAYOUT.to_string()
}

/// Assemble the full page against a given layout. The grid slot is only
/// filled when there are posts; an empty list (or a layout without the
/// slot) leaves it alone, and leftover placeholders are stripped at the
/// end.
pub fn render_with_layout(pool: &DbPool, layout: &str, posts: &[Post], theme: Theme) -> String {
    let site_name = Setting::get_or(pool, "site_name", "Bento Blog");
    let dates = DateStyle::load(pool);

    let mut html = layout.to_string();
    html = html.replace("{{theme_class}}", theme.as_class());
    html = html.replace("{{site_title}}", &html_escape(&site_name));
    html = html.replace("{{theme_toggle}}", THEME_TOGGLE_HTML);
    html = html.replace(
        "{{footer}}",
        &format!(
            "<p>&copy; {} {}</p>",
            chrono::Utc::now().format("%Y"),
            html_escape(&site_name)
        ),
    );
    html = html.replace("{{current_year}}", &chrono::Utc::now().format("%Y").to_string());

    if !posts.is_empty() {
        html = html.replace("{{bento_grid}}", &grid::render_grid(posts, &dates));
    }

    strip_unreplaced_placeholders(&html)
}

pub fn render_home(pool: &DbPool, posts: &[Post], theme: Theme) -> String {
    render_with_layout(pool, &load_layout(), posts, theme)
}

/// Render and write the home page.
pub fn write_home(pool: &DbPool, posts: &[Post], theme: Theme) -> Result<(), String> {
    let html = render_home(pool, posts, theme);
    fs::write(OUTPUT_FILE, &html).map_err(|e| e.to_string())?;
    info!(
        "Rendered {} post(s) to {} (theme: {})",
        posts.len().min(grid::MAX_POSTS),
        OUTPUT_FILE,
        theme.as_class()
    );
    Ok(())
}
