//! Frame builder.
//!
//! Turns a normalized [`AnimationDescription`] plus the real pixel size of its
//! sprite sheet into an ordered list of timed [`Frame`]s. Explicit `rects`
//! win; otherwise the sheet is sliced as a single row or a `rows x cols` grid.
//!
//! An empty result means the entry is unusable. Callers skip it.

use serde::Serialize;

use crate::resources::manifest::{AnimationDescription, DEFAULT_FPS, Layout};

/// Integer rectangle in texture pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Inclusive-edge containment test.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// One timed sub-rectangle of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub source: Rect,
    /// Always `> 0`.
    pub duration_ms: u32,
}

/// Milliseconds per frame at `fps`, never below 1.
fn frame_duration_ms(fps: i32) -> u32 {
    let fps = if fps > 0 { fps } else { DEFAULT_FPS };
    (1000 / fps).max(1) as u32
}

/// Build the frame list for `desc`.
pub fn build_frames(desc: &AnimationDescription, tex_width: i32, tex_height: i32) -> Vec<Frame> {
    if desc.rects.is_empty() {
        build_frames_from_grid(desc, tex_width, tex_height)
    } else {
        build_frames_from_rects(desc)
    }
}

/// One frame per explicit rect. A rect without a positive duration plays for
/// `1000 / fps` milliseconds.
pub fn build_frames_from_rects(desc: &AnimationDescription) -> Vec<Frame> {
    let fallback = frame_duration_ms(desc.fps);
    desc.rects
        .iter()
        .map(|r| Frame {
            source: Rect::new(r.x, r.y, r.w, r.h),
            duration_ms: if r.duration_ms > 0 {
                r.duration_ms as u32
            } else {
                fallback
            },
        })
        .collect()
}

/// Slice the sheet into equally sized cells.
///
/// Frame count is the explicit `frames` when set, else `rows * cols` for a
/// grid, else as many cells as fit across the texture width.
pub fn build_frames_from_grid(desc: &AnimationDescription, tex_width: i32, _tex_height: i32) -> Vec<Frame> {
    let fw = desc.frame_width;
    let fh = desc.frame_height;
    if fw <= 0 {
        return Vec::new();
    }
    let layout = desc.layout_or_row();
    let duration_ms = frame_duration_ms(desc.fps);

    let count = if desc.frames > 0 {
        desc.frames
    } else if layout == Layout::Grid && desc.rows > 0 && desc.cols > 0 {
        desc.rows * desc.cols
    } else {
        tex_width / fw
    };
    if count <= 0 {
        return Vec::new();
    }

    let mut frames = Vec::with_capacity(count as usize);
    match layout {
        Layout::Grid => {
            'rows: for row in 0..desc.rows.max(0) {
                for col in 0..desc.cols.max(0) {
                    if frames.len() as i32 >= count {
                        break 'rows;
                    }
                    frames.push(Frame {
                        source: Rect::new(col * fw, row * fh, fw, fh),
                        duration_ms,
                    });
                }
            }
        }
        Layout::Row => {
            for i in 0..count {
                frames.push(Frame {
                    source: Rect::new(i * fw, 0, fw, fh),
                    duration_ms,
                });
            }
        }
    }
    frames
}
