use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use anyhow::{Context, Result};
use raylib::prelude::*;
use tracing::{info, warn};

/// Pipes rendered RGBA frames into an ffmpeg process that encodes them to H.264.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl Ffmpeg {
    pub fn spawn(width: i32, height: i32, fps: u32, output: &Path) -> Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()
            .context("failed to start ffmpeg")?;
        let stdin = process.stdin.take().context("ffmpeg stdin is not piped")?;
        info!(output = %output.display(), "recording hero to video");
        Ok(Ffmpeg { process, stdin: Some(stdin) })
    }

    pub fn write(&mut self, image: &Image) -> io::Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "ffmpeg stdin already closed"));
        };

        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // RGBA

        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, row_len * height) };

        // raylib hands render textures back bottom-up, ffmpeg wants top-down rows
        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row)?;
        }
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg finish the file
        self.stdin = None;
        if let Err(e) = self.process.wait() {
            warn!("failed to wait for ffmpeg: {}", e);
        }
    }
}
