use log::debug;
use regex::Regex;

use crate::models::post::Post;
use crate::render::{format_date, html_escape, DateStyle};

/// How many posts the grid shows.
pub const MAX_POSTS: usize = 10;

/// Marker separating the summary from the full body in generated content.
const MORE_MARKER: &str = "<!-- more -->";

/// Description length cap when falling back to raw content.
const DESCRIPTION_MAX_CHARS: usize = 200;

/// Fallback description for posts with neither excerpt nor content.
const NO_EXCERPT_FALLBACK: &str = "这篇文章没有摘要...";

/// Icon identifiers (boxicons) cycled by post index.
const ICONS: [&str; 8] = [
    "bx-file", "bx-book-open", "bx-news", "bx-message-square-detail",
    "bx-edit", "bx-notepad", "bx-book-content", "bx-message-dots",
];

/// Icon colors cycled by post index.
const COLORS: [&str; 8] = [
    "#3b82f6", "#10b981", "#ef4444", "#f59e0b",
    "#8b5cf6", "#0ea5e9", "#6366f1", "#ec4899",
];

/// One renderable card. Rebuilt from its post on every render, never cached.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub title: String,
    pub meta: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: String,
    pub col_span: u8,
    pub has_persistent_hover: bool,
    pub icon: String,
    pub icon_color: String,
    pub links: Option<String>,
}

pub fn icon_for_post(index: usize) -> &'static str {
    ICONS[index % ICONS.len()]
}

pub fn color_for_post(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// Remove HTML tags. A failed pattern compile degrades to the raw text.
fn strip_html(text: &str) -> String {
    match Regex::new(r"<[^>]*>") {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Derive the card description, in priority order: non-blank excerpt,
/// content before the more-marker, truncated content, fixed fallback.
/// Tags are stripped whichever source wins.
pub fn build_description(post: &Post) -> String {
    if let Some(excerpt) = post.excerpt.as_deref() {
        if !excerpt.trim().is_empty() {
            debug!("\"{}\": description from excerpt", post.title);
            return strip_html(excerpt);
        }
    }

    if let Some(content) = post.content.as_deref() {
        if let Some((summary, _)) = content.split_once(MORE_MARKER) {
            debug!("\"{}\": description from more-marker", post.title);
            return strip_html(summary);
        }

        let plain = strip_html(content);
        let mut description: String = plain.chars().take(DESCRIPTION_MAX_CHARS).collect();
        if plain.chars().count() > DESCRIPTION_MAX_CHARS {
            description.push_str("...");
        }
        debug!("\"{}\": description from content", post.title);
        return description;
    }

    debug!("\"{}\": no excerpt or content, using fallback", post.title);
    NO_EXCERPT_FALLBACK.to_string()
}

/// Derive the display attributes for the post at `index`.
pub fn classify(post: &Post, index: usize, dates: &DateStyle) -> CardItem {
    // A links value that is blank after trim counts as no link.
    let links = post
        .links
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    CardItem {
        title: post.title.clone(),
        meta: format_date(&post.date, dates),
        description: build_description(post),
        tags: post.tags.iter().map(|t| t.name.clone()).collect(),
        status: "Post".to_string(),
        col_span: if index % 5 == 0 { 2 } else { 1 }, // every 5th post spans 2 columns
        has_persistent_hover: index == 0,
        icon: icon_for_post(index).to_string(),
        icon_color: color_for_post(index).to_string(),
        links,
    }
}

/// Anchor target for an outbound link: bare hosts get an http:// prefix.
pub fn normalize_link(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("http://{}", link)
    }
}

/// Render one card fragment against the fixed class contract.
pub fn render_card(item: &CardItem) -> String {
    let span_class = if item.col_span == 2 { "col-span-2" } else { "col-span-1" };
    let hover_class = if item.has_persistent_hover { " persistent-hover" } else { "" };

    let icon = if item.icon.is_empty() { "bx-file" } else { &item.icon };
    let icon_color = if item.icon_color.is_empty() { "#3b82f6" } else { &item.icon_color };
    let status = if item.status.is_empty() { "Blog" } else { &item.status };

    let meta_html = if item.meta.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="card-meta">{}</span>"#, html_escape(&item.meta))
    };

    let tags_html: String = item
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="card-tag">#{}</span>"#, html_escape(tag)))
        .collect();

    let direct_link = match item.links.as_deref() {
        Some(link) => format!(
            r#"<a href="{}" class="card-direct-link" target="_blank">点击直达</a>"#,
            html_escape(&normalize_link(link))
        ),
        None => String::new(),
    };

    format!(
        "<div class=\"card-container {span_class}\">\
         <div class=\"card{hover_class}\">\
         <div class=\"card-pattern\"></div>\
         <div class=\"card-header\">\
         <div class=\"card-header-content\">\
         <div class=\"icon-wrapper\">\
         <i class='bx {icon}' style=\"color: {icon_color}; font-size: 16px;\"></i>\
         </div>\
         <span class=\"status-badge\">{status}</span>\
         </div>\
         </div>\
         <div class=\"card-content\">\
         <h3 class=\"card-title\">{title}{meta_html}</h3>\
         <p class=\"card-description\">{description}</p>\
         </div>\
         <div class=\"card-footer\">\
         <div class=\"card-tags\">{tags_html}</div>\
         {direct_link}\
         </div>\
         <div class=\"card-border\"></div>\
         </div>\
         </div>",
        span_class = span_class,
        hover_class = hover_class,
        icon = icon,
        icon_color = icon_color,
        status = status,
        title = html_escape(&item.title),
        meta_html = meta_html,
        description = html_escape(&item.description),
        tags_html = tags_html,
        direct_link = direct_link,
    )
}

/// Inner HTML of the grid container: the first MAX_POSTS posts, one card
/// each, input order preserved.
pub fn render_grid(posts: &[Post], dates: &DateStyle) -> String {
    posts
        .iter()
        .take(MAX_POSTS)
        .enumerate()
        .map(|(index, post)| render_card(&classify(post, index, dates)))
        .collect()
}
