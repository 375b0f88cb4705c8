// What you SEE:
// • Violet stars drift across a dark window and bounce off its edges.
// • Stars closer than the connection distance are joined by lines that fade with distance.
// • With ZODIAC_INTERACTION_ENABLED=true, holding Left Mouse drops a star under the cursor.
// • R regenerates the field, S saves a PNG snapshot, ESC quits.
// All star settings come from ZODIAC_* environment variables (see config.rs).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use zodiac::config::{HostConfig, ZodiacConfig};
use zodiac::draw::Drawer;
use zodiac::error::Error;
use zodiac::field::StarField;
use zodiac::gamma::GammaLut;
use zodiac::input::PointerTracker;
use zodiac::raster::Canvas;
use zodiac::types::FrameBuffer;

const TITLE: &str = "Zodiac";

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let host = HostConfig::from_env()?;
    let config = ZodiacConfig::from_env()?;
    tracing::info!(?host, ?config, "zodiac starting");

    /* --- Window + star field setup --- */
    let mut drawer = Drawer::new(TITLE, host.width, host.height, host.target_fps)?;
    let mut field = StarField::new(config)?;

    let (w, h) = drawer.size();
    let mut screen = FrameBuffer::new(w, h);
    field.on_surface_size(w, h);

    let lut = GammaLut::new();
    let mut pointer = PointerTracker::new();
    let mut snapshots: u32 = 0;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Follow window resizes; a new size means a new field. */
        let (w, h) = drawer.size();
        if w == 0 || h == 0 {
            drawer.idle(); // minimized
            continue;
        }
        if (w, h) != (screen.width, screen.height) {
            tracing::info!(width = w, height = h, "window resized");
            screen.resize(w, h);
            field.on_surface_size(w, h);
        }

        /* 2) Inputs */
        if drawer.r_pressed_once() {
            field.regenerate();
        }
        if let Some(event) = pointer.update(drawer.left_mouse_down(), drawer.mouse_pos()) {
            field.handle_pointer(event);
        }

        /* 3) One simulate + draw pass into the frame buffer. */
        let stats = field.on_render_tick(&mut Canvas::new(&mut screen, &lut));

        if drawer.s_pressed_once() {
            snapshots += 1;
            match save_snapshot(&screen, snapshots) {
                Ok(path) => tracing::info!(path = %path.display(), "snapshot saved"),
                Err(e) => tracing::warn!(error = %e, "snapshot failed"),
            }
        }

        /* 4) Present to the window. */
        drawer.present(&screen)?;

        /* 5) Once per second: log + title bar stats. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::info!(fps = %format!("{fps:.1}"), stars = stats.stars, connections = stats.connections, "frame stats");
            drawer.set_title(&format!("{TITLE} | {} stars | {} links | FPS: {fps:.1}", stats.stars, stats.connections));
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

/// Write the current frame to `zodiac-<n>.png` in the working directory.
fn save_snapshot(screen: &FrameBuffer, n: u32) -> Result<PathBuf, Error> {
    let path = PathBuf::from(format!("zodiac-{n}.png"));
    let img = screen.to_image().ok_or_else(|| Error::Snapshot("frame buffer size mismatch".into()))?;
    img.save(&path).map_err(|e| Error::Snapshot(e.to_string()))?;
    Ok(path)
}
