use crate::foundation::core::Canvas;
use crate::foundation::error::FactReelResult;

/// Measured size of a single line of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    /// Pixel-box width (rounded up).
    pub fn width_px(self) -> i64 {
        self.width.max(0.0).ceil() as i64
    }

    /// Pixel-box height (rounded up).
    pub fn height_px(self) -> i64 {
        self.height.max(0.0).ceil() as i64
    }
}

/// Something that can measure a single unbroken line of text.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> FactReelResult<TextExtent>;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> FactReelResult<TextExtent>,
{
    fn measure(&mut self, text: &str) -> FactReelResult<TextExtent> {
        self(text)
    }
}

/// A wrapped line positioned on the canvas. `x`/`y` is the top-left of the line box.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i64,
    pub y: i64,
    pub extent: TextExtent,
}

/// Greedily pack whitespace-separated words into lines no wider than `max_width`.
///
/// A word that alone exceeds `max_width` occupies its own line unsplit. The last line is always
/// emitted, so blank input yields a single empty line.
pub fn wrap_words(
    text: &str,
    max_width: f32,
    measure: &mut impl TextMeasure,
) -> FactReelResult<Vec<String>> {
    let mut words = text.split_whitespace();
    let mut lines = Vec::new();
    let mut current = words.next().unwrap_or_default().to_owned();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate)?.width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    lines.push(current);
    Ok(lines)
}

/// Center `lines` as a block: each line horizontally on its own width, the block vertically.
///
/// Block height is the sum of line heights plus `gap` between consecutive lines. Overflowing
/// blocks get a negative start `y`, matching floor division of the remaining space.
pub fn layout_block(
    lines: &[String],
    canvas: Canvas,
    gap: u32,
    measure: &mut impl TextMeasure,
) -> FactReelResult<Vec<PlacedLine>> {
    let extents = lines
        .iter()
        .map(|l| measure.measure(l))
        .collect::<FactReelResult<Vec<_>>>()?;

    let gap = i64::from(gap);
    let total_height: i64 = extents.iter().map(|e| e.height_px()).sum::<i64>()
        + (extents.len().saturating_sub(1) as i64) * gap;

    let mut y = (i64::from(canvas.height) - total_height).div_euclid(2);
    let mut placed = Vec::with_capacity(lines.len());
    for (text, extent) in lines.iter().zip(extents) {
        let x = (i64::from(canvas.width) - extent.width_px()).div_euclid(2);
        placed.push(PlacedLine {
            text: text.clone(),
            x,
            y,
            extent,
        });
        y += extent.height_px() + gap;
    }
    Ok(placed)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
