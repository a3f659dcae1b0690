//! Path data interpretation.
//!
//! [SVG 1.1 § 8.3 Path data](https://www.w3.org/TR/SVG11/paths.html#PathData)

use kurbo::{Point, Vec2};
use serde::Serialize;

use super::lexer::{PathLexer, Token};
use crate::canvas::Canvas;
use crate::error::SvgError;

/// One primitive drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    /// Start a new sub-path.
    MoveTo {
        /// Target, or offset from the current point when relative.
        to: Point,
        /// Whether `to` is relative.
        relative: bool,
    },
    /// Straight line.
    LineTo {
        /// Target, or offset from the current point when relative.
        to: Point,
        /// Whether `to` is relative.
        relative: bool,
    },
    /// Cubic Bézier curve.
    CurveTo {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// End point.
        to: Point,
        /// Whether all three points are relative to the current point.
        relative: bool,
    },
    /// Close the current sub-path.
    ClosePath,
}

impl PathCommand {
    /// Issue the command on the canvas.
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match *self {
            Self::MoveTo { to, relative: false } => canvas.move_to(to.x, to.y),
            Self::MoveTo { to, relative: true } => canvas.rel_move_to(to.x, to.y),
            Self::LineTo { to, relative: false } => canvas.line_to(to.x, to.y),
            Self::LineTo { to, relative: true } => canvas.rel_line_to(to.x, to.y),
            Self::CurveTo {
                ctrl1,
                ctrl2,
                to,
                relative: false,
            } => canvas.curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Self::CurveTo {
                ctrl1,
                ctrl2,
                to,
                relative: true,
            } => canvas.rel_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Self::ClosePath => canvas.close_path(),
        }
    }

    /// The current point after this command, given the current point and
    /// the start of the current sub-path before it.
    #[must_use]
    pub fn end_point(&self, current: Point, subpath_start: Point) -> Point {
        match *self {
            Self::MoveTo { to, relative }
            | Self::LineTo { to, relative }
            | Self::CurveTo { to, relative, .. } => {
                if relative {
                    current + to.to_vec2()
                } else {
                    to
                }
            }
            Self::ClosePath => subpath_start,
        }
    }
}

/// The last curve read, as written in the data.
#[derive(Debug, Clone, Copy)]
struct CurveControls {
    ctrl2: Point,
    to: Point,
}

impl CurveControls {
    /// Offset from the end point back to the second control point, mirrored.
    fn reflection(self) -> Vec2 {
        self.to - self.ctrl2
    }
}

/// Streaming interpreter turning path data into [`PathCommand`]s.
///
/// # Supported commands
///
/// `M m L l h v V C c S s Z z`. Any other letter, `X` included, is an
/// [`SvgError::UnsupportedPathCommand`]; only the end of the data stops
/// the interpreter. Coordinates following a command
/// without a new letter repeat that command.
///
/// Known quirks: `V` draws to `(value, 0)`, `s` only reflects after a
/// lowercase `c` or `s`, and `S` only reflects after an uppercase `C` or `S`.
#[derive(Debug, Clone)]
pub struct PathInterpreter<'a> {
    lexer: PathLexer<'a>,
    letter: Option<char>,
    last_letter: Option<char>,
    last_curve: Option<CurveControls>,
}

impl<'a> PathInterpreter<'a> {
    /// Create an interpreter over the `d` attribute value.
    #[must_use]
    pub const fn new(data: &'a str) -> Self {
        Self {
            lexer: PathLexer::new(data),
            letter: None,
            last_letter: None,
            last_curve: None,
        }
    }

    /// Read the next command. `current` is the canvas current point, used
    /// by `S` reflection.
    ///
    /// Returns `Ok(None)` once the data is exhausted.
    ///
    /// # Errors
    ///
    /// [`SvgError::UnsupportedPathCommand`] for letters outside the supported
    /// set, [`SvgError::MalformedAttributeValue`] for missing coordinates or
    /// coordinates with no command to repeat.
    pub fn next_command(&mut self, current: Point) -> Result<Option<PathCommand>, SvgError> {
        let letter = match self.lexer.peek()? {
            Token::End => return Ok(None),
            Token::Letter(letter) => {
                let _ = self.lexer.next_token()?;
                letter
            }
            Token::Number(value) => match self.letter {
                Some(letter) if !matches!(letter, 'z' | 'Z') => letter,
                _ => {
                    return Err(SvgError::malformed(
                        value.to_string(),
                        "coordinates without a command",
                    ));
                }
            },
        };
        self.letter = Some(letter);

        let command = match letter {
            'M' | 'm' => PathCommand::MoveTo {
                to: self.point()?,
                relative: letter == 'm',
            },
            'L' | 'l' => PathCommand::LineTo {
                to: self.point()?,
                relative: letter == 'l',
            },
            'h' => PathCommand::LineTo {
                to: Point::new(self.number()?, 0.0),
                relative: true,
            },
            'v' => PathCommand::LineTo {
                to: Point::new(0.0, self.number()?),
                relative: true,
            },
            'V' => PathCommand::LineTo {
                to: Point::new(self.number()?, 0.0),
                relative: false,
            },
            'C' | 'c' => {
                let ctrl1 = self.point()?;
                self.curve(ctrl1, letter == 'c')?
            }
            's' => {
                let ctrl1 = match self.last_curve {
                    Some(last) if matches!(self.last_letter, Some('c' | 's')) => {
                        last.reflection().to_point()
                    }
                    _ => Point::ORIGIN,
                };
                self.curve(ctrl1, true)?
            }
            'S' => {
                let ctrl1 = match self.last_curve {
                    Some(last) if matches!(self.last_letter, Some('C' | 'S')) => {
                        current + last.reflection()
                    }
                    _ => current,
                };
                self.curve(ctrl1, false)?
            }
            'Z' | 'z' => PathCommand::ClosePath,
            other => return Err(SvgError::UnsupportedPathCommand(other)),
        };

        self.last_letter = Some(letter);
        Ok(Some(command))
    }

    /// Read the second control point and end point of a curve.
    fn curve(&mut self, ctrl1: Point, relative: bool) -> Result<PathCommand, SvgError> {
        let ctrl2 = self.point()?;
        let to = self.point()?;
        self.last_curve = Some(CurveControls { ctrl2, to });
        Ok(PathCommand::CurveTo {
            ctrl1,
            ctrl2,
            to,
            relative,
        })
    }

    fn number(&mut self) -> Result<f64, SvgError> {
        match self.lexer.next_token()? {
            Token::Number(value) => Ok(value),
            Token::Letter(letter) => Err(SvgError::malformed(
                letter.to_string(),
                "expected a coordinate",
            )),
            Token::End => Err(SvgError::malformed("", "path data ends inside a command")),
        }
    }

    fn point(&mut self) -> Result<Point, SvgError> {
        Ok(Point::new(self.number()?, self.number()?))
    }
}

/// Interpret path data into commands, starting from the origin.
///
/// # Errors
///
/// Any error of [`PathInterpreter::next_command`].
pub fn parse_path(data: &str) -> Result<Vec<PathCommand>, SvgError> {
    let mut interpreter = PathInterpreter::new(data);
    let mut commands = Vec::new();
    let mut current = Point::ORIGIN;
    let mut subpath_start = Point::ORIGIN;

    while let Some(command) = interpreter.next_command(current)? {
        current = command.end_point(current, subpath_start);
        if matches!(command, PathCommand::MoveTo { .. }) {
            subpath_start = current;
        }
        commands.push(command);
    }
    Ok(commands)
}

/// Interpret path data and issue each command on the canvas as it is read.
///
/// Commands before an error have already been issued.
///
/// # Errors
///
/// Any error of [`PathInterpreter::next_command`].
pub fn draw_path<C: Canvas + ?Sized>(canvas: &mut C, data: &str) -> Result<(), SvgError> {
    let mut interpreter = PathInterpreter::new(data);
    while let Some(command) = interpreter.next_command(canvas.current_point())? {
        command.apply(canvas);
    }
    Ok(())
}
