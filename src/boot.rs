use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "website",
    "website/db",
    "website/static",
    "website/static/css",
];

/// Post list produced by the external site generator. Rendering degrades
/// to a page without cards when it is absent.
pub const POSTS_FILE: &str = "website/posts.json";

/// Stylesheet that styles the rendered markup contract.
const STYLESHEET: &str = "website/static/css/style.css";

/// Optional custom page layout; the built-in default is used without it.
const CUSTOM_LAYOUT: &str = "website/layout.html";

/// Run all boot checks. Call this before rendering.
/// Creates missing directories, warns about missing files, and
/// aborts if critical dependencies are absent.
pub fn run() {
    info!("Bentogrid boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Posts input ─────────────────────────────────
    if !Path::new(POSTS_FILE).exists() {
        warn!("  Missing posts file: {} (grid will be empty)", POSTS_FILE);
        warnings += 1;
    }

    // ── 3. Stylesheet ──────────────────────────────────
    if !Path::new(STYLESHEET).exists() {
        warn!("  Missing stylesheet: {} (page will be unstyled)", STYLESHEET);
        warnings += 1;
    }

    if Path::new(CUSTOM_LAYOUT).exists() {
        info!("  Using custom layout: {}", CUSTOM_LAYOUT);
    }

    // ── 4. Database directory writable ─────────────────
    let db_dir = Path::new("website/db");
    if db_dir.exists() {
        let test_file = db_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Database directory not writable: {}", e);
                errors += 1;
            }
        }
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some output may be incomplete.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
