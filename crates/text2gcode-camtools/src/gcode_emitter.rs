//! G-code emission
//!
//! [`emit`] turns scaled outlines into an ordered list of pen-plotter motion
//! commands; [`GCodeProgram`] renders that list as program text.

use std::fmt;

use text2gcode_core::{GCodeConfig, MotionCommand, OutlineSet};

/// Emits motion commands for every polyline in order.
///
/// Each polyline is drawn as: rapid to its first point, pen down, one linear
/// move per remaining point, pen up. The pen is lifted once at program start
/// and stays lifted between polylines. Polylines without points are skipped;
/// an empty set yields only [`MotionCommand::ProgramEnd`].
pub fn emit(outlines: &OutlineSet, config: &GCodeConfig) -> Vec<MotionCommand> {
    let mut commands = Vec::with_capacity(outlines.point_count() + outlines.len() * 3 + 2);
    let mut lifted = false;

    for polyline in outlines {
        let Some((start, rest)) = polyline.points().split_first() else {
            continue;
        };

        if !lifted {
            commands.push(MotionCommand::PenZ { z: config.safe_z });
            lifted = true;
        }
        commands.push(MotionCommand::Rapid {
            x: start.x,
            y: start.y,
        });
        commands.push(MotionCommand::PenZ { z: config.cut_z });
        commands.extend(rest.iter().map(|p| MotionCommand::Linear {
            x: p.x,
            y: p.y,
            feed: config.feedrate,
        }));
        commands.push(MotionCommand::PenZ { z: config.safe_z });
    }

    commands.push(MotionCommand::ProgramEnd);
    commands
}

/// Owns a [`GCodeConfig`] and emits programs with it.
#[derive(Debug, Clone, Default)]
pub struct GCodeEmitter {
    config: GCodeConfig,
}

impl GCodeEmitter {
    pub fn new(config: GCodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GCodeConfig {
        &self.config
    }

    pub fn emit(&self, outlines: &OutlineSet) -> Vec<MotionCommand> {
        emit(outlines, &self.config)
    }

    /// Emits and wraps the commands in a renderable program.
    pub fn program(&self, outlines: &OutlineSet) -> GCodeProgram {
        GCodeProgram::new(self.emit(outlines), &self.config)
    }
}

/// Renderable G-code program.
#[derive(Debug, Clone, PartialEq)]
pub struct GCodeProgram {
    header: Vec<String>,
    commands: Vec<MotionCommand>,
    preamble: bool,
    annotate: bool,
    line_numbers: bool,
}

impl GCodeProgram {
    pub fn new(commands: Vec<MotionCommand>, config: &GCodeConfig) -> Self {
        Self {
            header: Vec::new(),
            commands,
            preamble: config.preamble,
            annotate: config.annotate,
            line_numbers: config.line_numbers,
        }
    }

    /// Adds a `; ` comment line to the program header. Line breaks in `line`
    /// are replaced with spaces.
    pub fn with_header_line(mut self, line: impl Into<String>) -> Self {
        let line: String = line.into();
        self.header.push(line.replace(['\r', '\n'], " "));
        self
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    /// Renders the program. `M2` is always the last line.
    pub fn to_gcode(&self) -> String {
        let mut gcode = String::new();

        for line in &self.header {
            gcode.push_str("; ");
            gcode.push_str(line);
            gcode.push('\n');
        }

        let mut body: Vec<(String, &str)> = Vec::with_capacity(self.commands.len() + 3);
        if self.preamble {
            body.push(("G21".to_string(), "Set units to millimeters"));
            body.push(("G90".to_string(), "Absolute positioning"));
        }
        body.extend(
            self.commands
                .iter()
                .filter(|c| **c != MotionCommand::ProgramEnd)
                .map(|c| (c.to_string(), c.describe())),
        );
        let end = MotionCommand::ProgramEnd;
        body.push((end.to_string(), end.describe()));

        let mut line_number = 10;
        for (code, comment) in body {
            if self.line_numbers {
                gcode.push_str(&format!("N{} ", line_number));
                line_number += 10;
            }
            gcode.push_str(&code);
            if self.annotate {
                gcode.push_str(" ; ");
                gcode.push_str(comment);
            }
            gcode.push('\n');
        }

        gcode
    }
}

impl fmt::Display for GCodeProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gcode())
    }
}
