// Character-cell rendering of percent time series

use crate::config::GraphStyle;

/// Eighth-block glyphs, index = filled eighths.
const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
/// Enters from the left, turns up.
const LEFT_UP: char = '╯';
/// Enters from the left, turns down.
const LEFT_DOWN: char = '╮';
/// Arrives from below, leaves right.
const UP_RIGHT: char = '╭';
/// Arrives from above, leaves right.
const DOWN_RIGHT: char = '╰';

/// Fixed-size character grid, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y` (top = 0).
    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    fn set(&mut self, x: usize, y: usize, c: char) {
        self.cells[y * self.width + x] = c;
    }

    /// Set a cell addressed from the bottom (level 0 = last row).
    fn set_level(&mut self, x: usize, level: usize, c: char) {
        let y = self.height - 1 - level;
        self.set(x, y, c);
    }

    pub fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row(y)).collect()
    }

    pub fn is_column_blank(&self, x: usize) -> bool {
        (0..self.height).all(|y| self.get(x, y) == ' ')
    }
}

/// Fit `samples` to exactly `width` columns.
///
/// With at least `width` samples, column `c` takes `samples[c * len / width]`
/// (nearest-index decimation). With fewer, the samples are right-aligned and
/// the leading columns are `None`.
pub fn resample(samples: &[f64], width: usize) -> Vec<Option<f64>> {
    let len = samples.len();
    if len >= width {
        (0..width).map(|c| Some(samples[c * len / width])).collect()
    } else {
        let pad = width - len;
        std::iter::repeat_n(None, pad)
            .chain(samples.iter().copied().map(Some))
            .collect()
    }
}

/// Render with the configured style.
pub fn render(style: GraphStyle, samples: &[f64], width: usize, height: usize) -> Grid {
    match style {
        GraphStyle::Blocks => render_blocks(samples, width, height),
        GraphStyle::Line => render_line(samples, width, height),
    }
}

/// Filled block graph on a fixed 0–100 scale: full blocks from the bottom and
/// one partial eighth-block on top. Fewer samples than columns leave the
/// leading columns blank, never zero.
pub fn render_blocks(samples: &[f64], width: usize, height: usize) -> Grid {
    let mut grid = Grid::blank(width, height);
    if width == 0 || height == 0 {
        return grid;
    }
    for (x, value) in resample(samples, width).into_iter().enumerate() {
        let Some(value) = value else { continue };
        if value.is_nan() || value <= 0.0 {
            continue;
        }
        let fraction = (value / 100.0).min(1.0);
        let eighths = (fraction * height as f64 * 8.0) as usize;
        let full = eighths / 8;
        let partial = eighths % 8;
        for level in 0..full.min(height) {
            grid.set_level(x, level, BLOCKS[8]);
        }
        if partial > 0 && full < height {
            grid.set_level(x, full, BLOCKS[partial]);
        }
    }
    grid
}

/// Slope-aware line graph, auto-scaled to the visible samples.
///
/// Each column draws its own point and, when the next column sits on a
/// different row, the vertical run to it. A column therefore only ever
/// touches rows between its own level and its right neighbour's, and
/// consecutive columns share a row, so the line has no gaps.
pub fn render_line(samples: &[f64], width: usize, height: usize) -> Grid {
    let mut grid = Grid::blank(width, height);
    if width == 0 || height == 0 {
        return grid;
    }
    let levels = line_levels(&resample(samples, width), height);

    for x in 0..width {
        let Some(cur) = levels[x] else { continue };
        // A missing neighbour counts as level with this column.
        let next = levels.get(x + 1).copied().flatten().unwrap_or(cur);
        draw_segment(&mut grid, x, cur, next);
    }
    grid
}

/// Map set samples to discrete levels `0..height` (0 = bottom) using the
/// min/max of the set samples; ranges under 1 are widened to 1.
fn line_levels(columns: &[Option<f64>], height: usize) -> Vec<Option<usize>> {
    let set: Vec<f64> = columns
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    if set.is_empty() {
        return vec![None; columns.len()];
    }
    let min = set.iter().copied().fold(f64::INFINITY, f64::min);
    let max = set.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = (max - min).max(1.0);
    let top = (height - 1) as f64;

    columns
        .iter()
        .map(|v| {
            let v = (*v)?;
            if !v.is_finite() {
                return None;
            }
            let normalized = ((v - min) / range).clamp(0.0, 1.0);
            Some((normalized * top).round() as usize)
        })
        .collect()
}

fn draw_segment(grid: &mut Grid, x: usize, cur: usize, next: usize) {
    use std::cmp::Ordering;
    match next.cmp(&cur) {
        Ordering::Equal => grid.set_level(x, cur, HORIZONTAL),
        Ordering::Greater => {
            grid.set_level(x, cur, LEFT_UP);
            for level in cur + 1..next {
                grid.set_level(x, level, VERTICAL);
            }
            grid.set_level(x, next, UP_RIGHT);
        }
        Ordering::Less => {
            grid.set_level(x, cur, LEFT_DOWN);
            for level in next + 1..cur {
                grid.set_level(x, level, VERTICAL);
            }
            grid.set_level(x, next, DOWN_RIGHT);
        }
    }
}
