use glam::Vec2;

/// Side-scrolling 2D camera.
///
/// `x`/`y` are the world-space pixel coordinates of the viewport's top-left
/// corner. The camera only ever scrolls forward when following.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Visible width in pixels.
    pub width: f32,
    /// Visible height in pixels.
    pub height: f32,
    /// Left edge of the viewport in world space.
    pub x: f32,
    /// Top edge of the viewport in world space.
    pub y: f32,
    /// Optional horizontal world bounds (min_x, max_x) the viewport must stay inside.
    pub bounds: Option<(f32, f32)>,
    /// Top edge restored by `reset`.
    pub anchor_y: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
            bounds: None,
            anchor_y: 0.0,
        }
    }

    /// Keep the viewport inside `[min_x, max_x]` horizontally.
    pub fn set_bounds(&mut self, min_x: f32, max_x: f32) {
        self.bounds = Some((min_x, max_x));
        self.clamp_to_bounds();
    }

    /// Pin the viewport's bottom edge to the bottom of a world `world_height`
    /// pixels tall. Worlds no taller than the viewport stay top-aligned.
    pub fn anchor_bottom(&mut self, world_height: f32) {
        self.anchor_y = (world_height - self.height).max(0.0);
        self.y = self.anchor_y;
    }

    /// World y of the viewport's bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// One-directional follow: once the target passes the viewport's
    /// horizontal midpoint the camera keeps it there. Never scrolls back.
    pub fn follow_forward(&mut self, target_x: f32) {
        let half_w = self.width / 2.0;
        if target_x > self.x + half_w {
            self.x = (target_x - half_w).max(0.0);
            self.clamp_to_bounds();
        }
    }

    /// Scroll right by `dx` pixels (auto-scrolling stages).
    pub fn scroll_by(&mut self, dx: f32) {
        self.x = (self.x + dx).max(0.0);
        self.clamp_to_bounds();
    }

    /// Back to the start of the level.
    pub fn reset(&mut self) {
        self.x = self.bounds.map(|(min_x, _)| min_x).unwrap_or(0.0);
        self.y = self.anchor_y;
    }

    /// Whether the camera is pinned against the right bound.
    pub fn at_right_bound(&self) -> bool {
        match self.bounds {
            Some((min_x, max_x)) => self.x >= (max_x - self.width).max(min_x),
            None => false,
        }
    }

    fn clamp_to_bounds(&mut self) {
        if let Some((min_x, max_x)) = self.bounds {
            // Viewport wider than the level: pin to the left edge.
            let max_left = (max_x - self.width).max(min_x);
            self.x = self.x.clamp(min_x, max_left);
        }
    }

    /// Convert a world-space point to viewport pixels.
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.x, point.y - self.y)
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if a world-space rectangle (top-left + size) overlaps the viewport.
    pub fn is_rect_visible(&self, pos: Vec2, size: Vec2) -> bool {
        pos.x + size.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y + size.y >= self.y
            && pos.y <= self.y + self.height
    }
}
