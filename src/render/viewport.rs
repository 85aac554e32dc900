use crate::geometry::Rect;

/// Maps board units onto canvas pixels, keeping the board's aspect ratio
/// and centering it (letterboxed) on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    board_w: f64,
    board_h: f64,
}

impl Viewport {
    pub fn fit(canvas_w: usize, canvas_h: usize, board_w: f64, board_h: f64) -> Self {
        let scale = (canvas_w as f64 / board_w).min(canvas_h as f64 / board_h);
        Self {
            scale,
            origin_x: ((canvas_w as f64 - board_w * scale) / 2.0).floor(),
            origin_y: ((canvas_h as f64 - board_h * scale) / 2.0).floor(),
            board_w,
            board_h,
        }
    }

    pub fn px_x(&self, bx: f64) -> i32 {
        (self.origin_x + bx * self.scale).floor() as i32
    }

    pub fn px_y(&self, by: f64) -> i32 {
        (self.origin_y + by * self.scale).floor() as i32
    }

    /// Canvas rectangle `(x, y, w, h)` covering `r`, at least one pixel each way.
    pub fn px_rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = self.px_x(r.x);
        let y0 = self.px_y(r.y);
        let x1 = self.px_x(r.right());
        let y1 = self.px_y(r.bottom());
        (x0, y0, (x1 - x0).max(1), (y1 - y0).max(1))
    }

    /// The whole board in canvas pixels.
    pub fn board_rect(&self) -> (i32, i32, i32, i32) {
        self.px_rect(&Rect::new(0.0, 0.0, self.board_w, self.board_h))
    }

    /// Board point under the center of terminal cell `(col, row)`, or `None`
    /// when the cell lies in the letterbox.
    pub fn cell_to_board(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        if self.scale <= 0.0 {
            return None;
        }
        let px = col as f64 + 0.5;
        let py = row as f64 * 2.0 + 1.0;
        let bx = (px - self.origin_x) / self.scale;
        let by = (py - self.origin_y) / self.scale;
        ((0.0..self.board_w).contains(&bx) && (0.0..self.board_h).contains(&by)).then_some((bx, by))
    }

    /// Font scale for text that should be about `size` board units tall.
    pub fn text_scale(&self, size: f64) -> i32 {
        ((size * self.scale) / 6.0).round().max(1.0) as i32
    }
}
