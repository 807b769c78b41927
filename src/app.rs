use crate::io::config::Config;
use crate::io::image::{default_screenshot_name, save_framebuffer};
use crate::pipeline::renderer::{FrameStats, Renderer};
use crate::scene::loader::build_context;
use crate::ui::input::{CameraController, InputState};
use log::{info, warn};
use nalgebra::Vector3;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Renders `config.render.frames` frames and saves each one.
///
/// Between frames the controller replays `camera.input` for
/// `camera.frame_time` seconds. With more than one frame the frame number is
/// appended to the file name.
pub fn run(config: &Config) -> Result<Vec<FrameStats>, String> {
    let width = config.render.width;
    let height = config.render.height;
    if width == 0 || height == 0 {
        return Err(format!("Invalid output size {}x{}", width, height));
    }
    let frames = config.render.frames;
    if frames == 0 {
        return Err("Frame count must be at least 1".to_string());
    }

    let mut context = build_context(config)?;

    let mut renderer = Renderer::new(width, height);
    renderer.clear_options.color = Vector3::from(config.render.background_color);
    renderer.rasterizer.sample_offset = config.render.sample_offset;

    let output = config
        .render
        .output
        .clone()
        .unwrap_or_else(default_screenshot_name);
    let controller = CameraController::from_config(&config.camera);
    let input = InputState::from(&config.camera.input);
    let scripted = !config.camera.input.is_idle();

    info!("Rendering {} frame(s) at {}x{}...", frames, width, height);

    let mut all_stats = Vec::with_capacity(frames);
    for i in 0..frames {
        if i > 0 && scripted {
            controller.update(&input, &mut context.camera, config.camera.frame_time);
        }

        let start = Instant::now();
        let stats = renderer.render(&mut context);
        info!(
            "Frame {} rendered in {:.2?} ({} pixels shaded)",
            stats.frame,
            start.elapsed(),
            stats.raster.pixels_shaded
        );
        if stats.raster.triangles == 0 {
            warn!("Frame {} drew no triangles", stats.frame);
        }

        let path = if frames > 1 {
            numbered_path(&output, i)
        } else {
            PathBuf::from(&output)
        };
        save_framebuffer(&renderer.framebuffer, &path)?;

        all_stats.push(stats);
    }

    Ok(all_stats)
}

/// `out.png` -> `out_0003.png`
fn numbered_path(output: &str, index: usize) -> PathBuf {
    let path = Path::new(output);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{:04}.{}", stem, index, ext),
        None => format!("{}_{:04}", stem, index),
    };
    path.with_file_name(file_name)
}
