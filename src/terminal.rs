// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A plotters backend which draws into a grid of character cells and
//! presents it on any `io::Write`, one backend pixel per cell.

use plotters::style::RGBColor;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};

use std::io::Write;

const BLANK: char = ' ';

/// How a colour is rendered on the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Ink {
    /// fully transparent, leave the cell alone
    Skip,
    /// background, clear the cell
    Blank,
    Glyph(char),
    /// axes, ticks, borders
    Stroke,
}

pub struct TerminalBackend<'a, W: Write> {
    out: &'a mut W,
    size: (u32, u32),
    cells: Vec<char>,
    glyphs: Vec<((u8, u8, u8), char)>,
}

impl<'a, W: Write> TerminalBackend<'a, W> {
    /// create a surface of `size` (columns, rows) which presents to `out`
    pub fn new(out: &'a mut W, size: (u32, u32)) -> Self {
        let cells = (size.0 as usize)
            .checked_mul(size.1 as usize)
            .unwrap_or(0);
        Self {
            out,
            size,
            cells: vec![BLANK; cells],
            glyphs: Vec::new(),
        }
    }

    /// draw anything painted in `colour` with `glyph`
    pub fn glyph(mut self, colour: RGBColor, glyph: char) -> Self {
        self.glyphs.push(((colour.0, colour.1, colour.2), glyph));
        self
    }

    pub fn glyphs<I: IntoIterator<Item = (RGBColor, char)>>(self, glyphs: I) -> Self {
        glyphs
            .into_iter()
            .fold(self, |backend, (colour, glyph)| backend.glyph(colour, glyph))
    }

    /// the grid as text, one line per row with trailing blanks removed
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.cells.len() + self.size.1 as usize);
        for row in self.cells.chunks(self.size.0.max(1) as usize) {
            let line: String = row.iter().collect();
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }

    fn ink(&self, colour: BackendColor) -> Ink {
        if colour.alpha == 0.0 {
            return Ink::Skip;
        }
        if colour.rgb == (255, 255, 255) {
            return Ink::Blank;
        }
        self.glyphs
            .iter()
            .find(|(rgb, _)| *rgb == colour.rgb)
            .map(|(_, glyph)| Ink::Glyph(*glyph))
            .unwrap_or(Ink::Stroke)
    }

    fn index(&self, (x, y): BackendCoord) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.0 as i32 || y >= self.size.1 as i32 {
            None
        } else {
            Some(y as usize * self.size.0 as usize + x as usize)
                .filter(|idx| *idx < self.cells.len())
        }
    }

    fn put(&mut self, point: BackendCoord, chr: char) {
        if let Some(idx) = self.index(point) {
            self.cells[idx] = chr;
        }
    }

    /// draw an axis-aligned stroke, joining crossings with `+`
    fn stroke(&mut self, point: BackendCoord, chr: char) {
        if let Some(idx) = self.index(point) {
            let current = self.cells[idx];
            self.cells[idx] = match (current, chr) {
                ('-', '|') | ('|', '-') | ('+', _) => '+',
                _ => chr,
            };
        }
    }
}

impl<'a, W: Write> DrawingBackend for TerminalBackend<'a, W> {
    type ErrorType = std::io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<std::io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let text = self.render();
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(DrawingErrorKind::DrawingError)
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        colour: BackendColor,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        match self.ink(colour) {
            Ink::Skip => {}
            Ink::Blank => self.put(point, BLANK),
            Ink::Glyph(glyph) => self.put(point, glyph),
            Ink::Stroke => self.put(point, '.'),
        }
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        if self.ink(style.color()) != Ink::Stroke || (from.0 != to.0 && from.1 != to.1) {
            return plotters_backend::rasterizer::draw_line(self, from, to, style);
        }

        if from.0 == to.0 {
            for y in from.1.min(to.1)..=from.1.max(to.1) {
                self.stroke((from.0, y), '|');
            }
        } else {
            for x in from.0.min(to.0)..=from.0.max(to.0) {
                self.stroke((x, from.1), '-');
            }
        }
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<std::io::Error>> {
        let len = text.chars().count() as u32;
        match style.transform() {
            FontTransform::Rotate90 | FontTransform::Rotate270 => Ok((1, len)),
            _ => Ok((len, 1)),
        }
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<std::io::Error>> {
        let (width, height) = self.estimate_text_size(text, style)?;
        let (width, height) = (width as i32, height as i32);
        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            HPos::Left => 0,
            HPos::Right => -width,
            HPos::Center => -width / 2,
        };
        let dy = match anchor.v_pos {
            VPos::Top => 0,
            VPos::Center => -height / 2,
            VPos::Bottom => -height,
        };
        let (x, y) = (pos.0 + dx, pos.1 + dy);
        let vertical = height > width;
        for (offset, chr) in text.chars().enumerate() {
            let offset = offset as i32;
            if vertical {
                self.put((x, y + offset), chr);
            } else {
                self.put((x + offset, y), chr);
            }
        }
        Ok(())
    }
}
