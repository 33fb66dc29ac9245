use crate::io::error::Error;
use crate::model::types::{Color, Point};
use crate::ops::Viewport;
use crate::render::{DisplayList, DrawCommand, Glow, RadialGradient, Region, Stroke, TextStyle};
use nalgebra::Matrix3;
use std::io::Write;

/// Writes a recorded frame as a standalone SVG document sized to the viewport.
pub fn write_svg<W: Write>(
    writer: W,
    list: &DisplayList,
    viewport: &Viewport,
) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_header(viewport)?;

    for command in list.commands() {
        ctx.write_command(command)?;
    }

    ctx.write_footer()?;

    Ok(())
}

struct WriterContext<W> {
    writer: W,
    gradient_count: usize,
    open_groups: usize,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            gradient_count: 0,
            open_groups: 0,
        }
    }

    fn line(&mut self, text: &str) -> Result<(), Error> {
        let indent = "  ".repeat(self.open_groups + 1);
        writeln!(self.writer, "{}{}", indent, text).map_err(|e| Error::from_io(e, None))
    }

    fn write_header(&mut self, viewport: &Viewport) -> Result<(), Error> {
        writeln!(
            self.writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = viewport.width,
            h = viewport.height
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_footer(&mut self) -> Result<(), Error> {
        while self.open_groups > 0 {
            self.open_groups -= 1;
            self.line("</g>")?;
        }
        writeln!(self.writer, "</svg>").map_err(|e| Error::from_io(e, None))
    }

    fn write_command(&mut self, command: &DrawCommand) -> Result<(), Error> {
        match command {
            DrawCommand::RadialGradient { region, gradient } => {
                self.write_gradient_fill(region, gradient)
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
                glow,
            } => {
                let filter = glow.as_ref().map(glow_style).unwrap_or_default();
                self.line(&format!(
                    r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" {}{}/>"#,
                    center.x,
                    center.y,
                    radius,
                    paint("fill", color),
                    filter
                ))
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                stroke,
            } => self.line(&format!(
                r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" {}/>"#,
                center.x,
                center.y,
                radius,
                stroke_attributes(stroke)
            )),
            DrawCommand::Line { from, to, stroke } => self.line(&format!(
                r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attributes(stroke)
            )),
            DrawCommand::Text {
                anchor,
                text,
                style,
            } => self.write_text(anchor, text, style),
            DrawCommand::PushTransform(matrix) => {
                self.line(&format!(r#"<g transform="{}">"#, svg_matrix(matrix)))?;
                self.open_groups += 1;
                Ok(())
            }
            DrawCommand::PopTransform => {
                if self.open_groups > 0 {
                    self.open_groups -= 1;
                    self.line("</g>")?;
                }
                Ok(())
            }
        }
    }

    fn write_gradient_fill(
        &mut self,
        region: &Region,
        gradient: &RadialGradient,
    ) -> Result<(), Error> {
        self.gradient_count += 1;
        let id = format!("gradient-{}", self.gradient_count);

        self.line("<defs>")?;
        self.line(&format!(
            r#"  <radialGradient id="{}" gradientUnits="userSpaceOnUse" fx="{:.3}" fy="{:.3}" fr="{:.3}" cx="{:.3}" cy="{:.3}" r="{:.3}">"#,
            id,
            gradient.inner_center.x,
            gradient.inner_center.y,
            gradient.inner_radius,
            gradient.outer_center.x,
            gradient.outer_center.y,
            gradient.outer_radius
        ))?;
        for stop in &gradient.stops {
            self.line(&format!(
                r#"    <stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                stop.offset,
                stop.color.to_hex(),
                stop.color.a
            ))?;
        }
        self.line("  </radialGradient>")?;
        self.line("</defs>")?;

        match region {
            Region::Rect { origin, size } => self.line(&format!(
                r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="url(#{})"/>"#,
                origin.x, origin.y, size.x, size.y, id
            )),
            Region::Circle { center, radius } => self.line(&format!(
                r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="url(#{})"/>"#,
                center.x, center.y, radius, id
            )),
        }
    }

    fn write_text(&mut self, anchor: &Point, text: &str, style: &TextStyle) -> Result<(), Error> {
        self.line(&format!(
            r#"<text x="{:.3}" y="{:.3}" font-family="Inter, sans-serif" font-size="{}" font-weight="{}" text-anchor="middle" dominant-baseline="central" {}>{}</text>"#,
            anchor.x,
            anchor.y,
            style.size,
            style.weight,
            paint("fill", &style.color),
            escape(text)
        ))
    }
}

fn paint(attribute: &str, color: &Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{}="{}""#, attribute, color.to_hex())
    } else {
        format!(
            r#"{attr}="{}" {attr}-opacity="{}""#,
            color.to_hex(),
            color.a,
            attr = attribute
        )
    }
}

fn stroke_attributes(stroke: &Stroke) -> String {
    let mut attributes = format!(
        r#"{} stroke-width="{:.3}" stroke-linecap="{}""#,
        paint("stroke", &stroke.color),
        stroke.width,
        stroke.cap.name()
    );
    if let Some([dash, gap]) = stroke.dash {
        attributes.push_str(&format!(r#" stroke-dasharray="{} {}""#, dash, gap));
    }
    attributes
}

fn glow_style(glow: &Glow) -> String {
    format!(
        r#" style="filter: drop-shadow(0 0 {:.3}px {})""#,
        glow.blur,
        glow.color.to_hex()
    )
}

/// SVG `matrix(a b c d e f)` for a homogeneous 2D affine matrix.
fn svg_matrix(m: &Matrix3<f64>) -> String {
    format!(
        "matrix({:.6} {:.6} {:.6} {:.6} {:.6} {:.6})",
        m[(0, 0)],
        m[(1, 0)],
        m[(0, 1)],
        m[(1, 1)],
        m[(0, 2)],
        m[(1, 2)]
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LineCap, Surface};

    fn render(list: &DisplayList) -> String {
        let mut buffer = Vec::new();
        write_svg(&mut buffer, list, &Viewport::new(200.0, 100.0)).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn document_is_sized_to_viewport() {
        let svg = render(&DisplayList::new());

        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100""#
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn transforms_become_balanced_groups() {
        let mut list = DisplayList::new();
        list.push_transform(&Matrix3::new_translation(&nalgebra::Vector2::new(5.0, 7.0)));
        list.stroke_line(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            &Stroke::solid(2.0, Color::rgba(100, 116, 139, 0.7))
                .with_cap(LineCap::Round)
                .dashed(8.0, 8.0),
        );

        let svg = render(&list);

        assert!(svg.contains(
            r#"<g transform="matrix(1.000000 0.000000 0.000000 1.000000 5.000000 7.000000)">"#
        ));
        assert!(svg.contains(r##"stroke="#64748b" stroke-opacity="0.7""##));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-dasharray="8 8""#));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn text_is_escaped_and_centered() {
        let mut list = DisplayList::new();
        let style = TextStyle {
            size: 7.0,
            weight: 900,
            color: Color::WHITE,
        };
        list.fill_text(Point::new(1.0, 2.0), "<Cl>", &style);

        let svg = render(&list);

        assert!(svg.contains("&lt;Cl&gt;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
    }
}
