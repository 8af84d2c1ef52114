use serde::{Deserialize, Serialize};

use crate::appium::protocol::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Source of the virtual-desktop origin used to turn element rectangles into
/// click coordinates. On multi-monitor setups the origin is negative when a
/// display sits left of or above the primary one.
pub trait ScreenMetrics {
    fn virtual_origin(&self) -> Point;
}

/// Reads the origin from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMetrics;

impl SystemMetrics {
    pub fn new() -> Self {
        SystemMetrics
    }
}

#[cfg(windows)]
impl ScreenMetrics for SystemMetrics {
    fn virtual_origin(&self) -> Point {
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            GetSystemMetrics, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN, SetProcessDPIAware,
        };

        // Without DPI awareness the metrics come back scaled and disagree with
        // the physical coordinates the driver reports.
        unsafe {
            SetProcessDPIAware();
            Point::new(
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
            )
        }
    }
}

#[cfg(not(windows))]
impl ScreenMetrics for SystemMetrics {
    fn virtual_origin(&self) -> Point {
        Point::default()
    }
}

/// A fixed origin, from config or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOrigin(pub Point);

impl ScreenMetrics for FixedOrigin {
    fn virtual_origin(&self) -> Point {
        self.0
    }
}

/// Absolute click coordinates for the center of `rect`.
pub fn click_point(rect: &Rect, origin: Point) -> Point {
    let (cx, cy) = rect.center();
    Point::new(cx - origin.x, cy - origin.y)
}
