use gfx_core::factory::CombinedError;
use piston_window::{Context, G2d, Glyphs, Transformed, clear, line, ellipse, rectangle, text};

use common::Point;
use plot::{Plot, Label, Align, Color, BLACK};
use view::{Frame, Viewport, ticks, tick_label};

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const GRID: Color = [0.88, 0.88, 0.88, 1.0];
const GREY: Color = [0.4, 0.4, 0.4, 1.0];

const TITLE_HEIGHT: f64 = 40.;
const CONSOLE_HEIGHT: f64 = 24.;
const LEFT_MARGIN: f64 = 72.;
const RIGHT_MARGIN: f64 = 24.;
const BOTTOM_MARGIN: f64 = 48.;

const TITLE_SIZE: u32 = 16;
const TICK_SIZE: u32 = 11;
const AXIS_SIZE: u32 = 14;
const LEGEND_SIZE: u32 = 12;
const CONSOLE_SIZE: u32 = 12;

const TICK_SPACING: f64 = 80.;

/// Plot area left for data inside a window of the given size.
pub fn plot_frame([width, height]: [f64; 2]) -> Frame {
    Frame {
        left: LEFT_MARGIN,
        top: TITLE_HEIGHT,
        width: (width - LEFT_MARGIN - RIGHT_MARGIN).max(1.),
        height: (height - TITLE_HEIGHT - BOTTOM_MARGIN - CONSOLE_HEIGHT).max(1.),
    }
}

/// Rough advance of `content` rendered at `size`, enough to center short labels.
pub fn text_width(content: &str, size: u32) -> f64 {
    content.chars().count() as f64 * size as f64 * 0.52
}

pub fn draw_plot(
    plot: &Plot,
    viewport: &Viewport,
    window: [f64; 2],
    info_line: &str,
    glyphs: &mut Glyphs,
    context: Context,
    g2d: &mut G2d,
)
    -> Result<(), CombinedError>
{
    let frame = viewport.frame;
    clear(WHITE, g2d);

    // grid
    let visible = viewport.visible();
    let (x_step, x_ticks) = ticks(visible.min.x, visible.max.x, intervals(frame.width));
    let (y_step, y_ticks) = ticks(visible.min.y, visible.max.y, intervals(frame.height));
    for &x in x_ticks.iter() {
        let [sx, _] = viewport.to_screen(Point { x, y: viewport.center.y, });
        line(GRID, 0.5, [sx, frame.top, sx, frame.bottom()], context.transform, g2d);
    }
    for &y in y_ticks.iter() {
        let [_, sy] = viewport.to_screen(Point { x: viewport.center.x, y, });
        line(GRID, 0.5, [frame.left, sy, frame.right(), sy], context.transform, g2d);
    }

    // segments with their ids
    for segment in plot.lines.segments.iter() {
        let [sx, sy] = viewport.to_screen(segment.src);
        let [dx, dy] = viewport.to_screen(segment.dst);
        line(plot.lines.color, plot.lines.width / 2., [sx, sy, dx, dy], context.transform, g2d);
    }
    for label in plot.lines.labels.iter() {
        draw_label(label, viewport, glyphs, &context, g2d)?;
    }

    // marker layers, later ones on top
    for layer in plot.layers.iter() {
        let r = layer.radius;
        for &point in layer.points.iter() {
            let [x, y] = viewport.to_screen(point);
            ellipse(layer.color, [x - r, y - r, r * 2., r * 2.], context.transform, g2d);
        }
        for label in layer.labels.iter() {
            draw_label(label, viewport, glyphs, &context, g2d)?;
        }
    }

    // cover whatever spilled out of the plot area
    let [width, height] = window;
    rectangle(WHITE, [0., 0., width, frame.top], context.transform, g2d);
    rectangle(WHITE, [0., frame.bottom(), width, height - frame.bottom()], context.transform, g2d);
    rectangle(WHITE, [0., 0., frame.left, height], context.transform, g2d);
    rectangle(WHITE, [frame.right(), 0., width - frame.right(), height], context.transform, g2d);

    // axes box, ticks and tick labels
    line(BLACK, 0.5, [frame.left, frame.top, frame.right(), frame.top], context.transform, g2d);
    line(BLACK, 0.5, [frame.left, frame.bottom(), frame.right(), frame.bottom()], context.transform, g2d);
    line(BLACK, 0.5, [frame.left, frame.top, frame.left, frame.bottom()], context.transform, g2d);
    line(BLACK, 0.5, [frame.right(), frame.top, frame.right(), frame.bottom()], context.transform, g2d);
    for &x in x_ticks.iter() {
        let [sx, _] = viewport.to_screen(Point { x, y: viewport.center.y, });
        line(BLACK, 0.5, [sx, frame.bottom(), sx, frame.bottom() + 4.], context.transform, g2d);
        let caption = tick_label(x, x_step);
        draw_text(&caption, [sx, frame.bottom() + 18.], Align::Center, BLACK, TICK_SIZE, glyphs, &context, g2d)?;
    }
    for &y in y_ticks.iter() {
        let [_, sy] = viewport.to_screen(Point { x: viewport.center.x, y, });
        line(BLACK, 0.5, [frame.left - 4., sy, frame.left, sy], context.transform, g2d);
        let caption = tick_label(y, y_step);
        let x = frame.left - 8. - text_width(&caption, TICK_SIZE);
        draw_text(&caption, [x, sy + TICK_SIZE as f64 / 2.], Align::Left, BLACK, TICK_SIZE, glyphs, &context, g2d)?;
    }

    // axis captions and title
    let center_x = frame.left + frame.width / 2.;
    draw_text(plot.x_label, [center_x, frame.bottom() + 38.], Align::Center, BLACK, AXIS_SIZE, glyphs, &context, g2d)?;
    draw_text(plot.y_label, [14., frame.top + frame.height / 2.], Align::Left, BLACK, AXIS_SIZE, glyphs, &context, g2d)?;
    draw_text(plot.title, [center_x, TITLE_HEIGHT - 14.], Align::Center, BLACK, TITLE_SIZE, glyphs, &context, g2d)?;

    draw_legend(plot, &frame, glyphs, &context, g2d)?;

    draw_text(info_line, [5., height - 7.], Align::Left, GREY, CONSOLE_SIZE, glyphs, &context, g2d)?;

    Ok(())
}

fn intervals(extent: f64) -> usize {
    ((extent / TICK_SPACING) as usize).max(2)
}

fn draw_legend(plot: &Plot, frame: &Frame, glyphs: &mut Glyphs, context: &Context, g2d: &mut G2d) -> Result<(), CombinedError> {
    let entries: Vec<_> = plot.legend().collect();
    if entries.is_empty() {
        return Ok(());
    }

    let row = LEGEND_SIZE as f64 + 8.;
    let text_w = entries.iter()
        .map(|&(name, _)| text_width(name, LEGEND_SIZE))
        .fold(0., f64::max);
    let width = text_w + 40.;
    let height = row * entries.len() as f64 + 8.;
    let left = frame.right() - width - 10.;
    let top = frame.top + 10.;

    rectangle(GRID, [left - 1., top - 1., width + 2., height + 2.], context.transform, g2d);
    rectangle(WHITE, [left, top, width, height], context.transform, g2d);
    for (index, &(name, color)) in entries.iter().enumerate() {
        let center_y = top + 4. + row * (index as f64 + 0.5);
        ellipse(color, [left + 10., center_y - 4., 8., 8.], context.transform, g2d);
        draw_text(name, [left + 28., center_y + LEGEND_SIZE as f64 / 2. - 1.], Align::Left, BLACK, LEGEND_SIZE, glyphs, context, g2d)?;
    }
    Ok(())
}

fn draw_label(label: &Label, viewport: &Viewport, glyphs: &mut Glyphs, context: &Context, g2d: &mut G2d) -> Result<(), CombinedError> {
    let [x, y] = viewport.to_screen(label.anchor);
    if !viewport.frame.contains([x, y]) {
        return Ok(());
    }
    let [dx, dy] = label.offset;
    draw_text(&label.text, [x + dx, y - dy], label.align, label.color, label.size, glyphs, context, g2d)
}

fn draw_text(
    content: &str,
    [x, y]: [f64; 2],
    align: Align,
    color: Color,
    size: u32,
    glyphs: &mut Glyphs,
    context: &Context,
    g2d: &mut G2d,
)
    -> Result<(), CombinedError>
{
    let x = match align {
        Align::Left => x,
        Align::Center => x - text_width(content, size) / 2.,
    };
    text::Text::new_color(color, size).draw(
        content,
        glyphs,
        &context.draw_state,
        context.transform.trans(x, y),
        g2d,
    )
}

#[cfg(test)]
mod tests {
    use super::{plot_frame, text_width};

    #[test]
    fn frame_inside_window() {
        let frame = plot_frame([800., 640.]);
        assert!(frame.left > 0. && frame.top > 0.);
        assert!(frame.right() < 800.);
        assert!(frame.bottom() < 640.);
    }

    #[test]
    fn tiny_window_keeps_positive_frame() {
        let frame = plot_frame([10., 10.]);
        assert!(frame.width > 0.);
        assert!(frame.height > 0.);
    }

    #[test]
    fn wider_text_is_longer() {
        assert_eq!(text_width("", 12), 0.);
        assert!(text_width("ID 10", 12) > text_width("ID 1", 12));
        assert!(text_width("ID 1", 16) > text_width("ID 1", 12));
    }
}
