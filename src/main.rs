use std::path::Path;
use std::process;

use log::error;

mod boot;
mod db;
mod grid;
mod render;
mod theme;

mod models;

use models::post::Post;
use theme::Theme;

fn main() {
    env_logger::init();

    // Boot check — verify/create directories, validate input files
    boot::run();

    let pool = db::init_pool().expect("Failed to initialize database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");
    db::seed_defaults(&pool).expect("Failed to seed default settings");

    let mode = std::env::args().nth(1).unwrap_or_else(|| "render".to_string());
    let system_dark = Theme::system_prefers_dark();

    let theme = match mode.as_str() {
        "render" => Theme::resolve(&pool, system_dark),
        "theme" => Theme::toggle(&pool, system_dark),
        other => {
            eprintln!("Unknown mode '{}'. Usage: bentogrid [render|theme]", other);
            process::exit(2);
        }
    };

    let posts = Post::load(Path::new(boot::POSTS_FILE));
    if let Err(e) = render::write_home(&pool, &posts, theme) {
        error!("Render failed: {}", e);
        process::exit(1);
    }
}
