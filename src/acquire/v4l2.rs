/// Video4Linux still capture
///
/// Opens the device, asks for MJPEG, lets the sensor settle for a few frames
/// and keeps the next one. Devices that only offer YUYV get converted and
/// encoded here.
use image::{ImageFormat, RgbImage};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::io::Cursor;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

use super::camera::Camera;
use super::permission::{probe_device, CameraAccess};

const BUFFER_COUNT: u32 = 4;

pub struct V4l2Camera {
    device: PathBuf,
    warmup_frames: u32,
}

impl V4l2Camera {
    pub fn new(device: PathBuf, warmup_frames: u32) -> Self {
        Self {
            device,
            warmup_frames,
        }
    }
}

impl Camera for V4l2Camera {
    fn request_access(&self) -> CameraAccess {
        probe_device(&self.device)
    }

    fn confirm_shot(&self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Tomar Foto")
            .set_description("Apunta la cámara hacia la flor y pulsa Aceptar para tomar la foto.")
            .set_buttons(MessageButtons::OkCancel)
            .show();

        matches!(answer, MessageDialogResult::Ok | MessageDialogResult::Yes)
    }

    fn capture_jpeg(&self) -> Result<Vec<u8>, String> {
        let mut dev = Device::with_path(&self.device).map_err(|e| {
            format!("No se pudo abrir la cámara {}: {}", self.device.display(), e)
        })?;

        let mjpeg = FourCC::new(b"MJPG");
        let yuyv = FourCC::new(b"YUYV");

        let mut format = dev
            .format()
            .map_err(|e| format!("Failed to query format: {}", e))?;
        format.fourcc = mjpeg;
        let format = match dev.set_format(&format) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "Could not set MJPEG, using current device format");
                dev.format()
                    .map_err(|e| format!("Failed to query format: {}", e))?
            }
        };

        info!(
            width = format.width,
            height = format.height,
            fourcc = ?format.fourcc,
            "Capturing still"
        );

        if format.fourcc != mjpeg && format.fourcc != yuyv {
            return Err(format!("Formato de cámara no soportado: {}", format.fourcc));
        }

        let mut stream = MmapStream::with_buffers(&mut dev, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|e| format!("Failed to create buffer stream: {}", e))?;

        for skipped in 0..self.warmup_frames {
            stream
                .next()
                .map_err(|e| format!("Failed to read frame: {}", e))?;
            debug!(skipped, "Discarded warm-up frame");
        }

        let (buf, meta) = stream
            .next()
            .map_err(|e| format!("Failed to read frame: {}", e))?;
        let used = (meta.bytesused as usize).min(buf.len());
        let frame = &buf[..used];

        if format.fourcc == mjpeg {
            return Ok(frame.to_vec());
        }

        let rgb = yuyv_to_rgb(frame, format.width, format.height)
            .ok_or_else(|| format!("Frame too short: {} bytes", frame.len()))?;
        let mut jpeg = Cursor::new(Vec::new());
        rgb.write_to(&mut jpeg, ImageFormat::Jpeg)
            .map_err(|e| format!("Failed to encode JPEG: {}", e))?;

        Ok(jpeg.into_inner())
    }
}

/// Convert packed YUYV 4:2:2 to RGB
///
/// Y0 U Y1 V - each 4-byte group encodes 2 pixels. BT.601 coefficients.
fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<RgbImage> {
    let pixels = (width as usize) * (height as usize);
    if data.len() < pixels * 2 {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixels * 3);
    for chunk in data[..pixels * 2].chunks_exact(4) {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        rgb.extend_from_slice(&yuv_pixel(y0, u, v));
        rgb.extend_from_slice(&yuv_pixel(y1, u, v));
    }

    RgbImage::from_raw(width, height, rgb)
}

fn yuv_pixel(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    [
        (y + 1.402 * v).clamp(0.0, 255.0) as u8,
        (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8,
        (y + 1.772 * u).clamp(0.0, 255.0) as u8,
    ]
}
