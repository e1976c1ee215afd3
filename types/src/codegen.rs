//! Device instruction generation.
//!
//! Each equation becomes a pair of instructions bound to an output slot
//! (`Y0`..`Y9`). The device only has ten slots, so equations are emitted in
//! program chunks of at most [`SLOTS_PER_CHUNK`], each ending with the same
//! device-reset trailer. The trailer always clears all ten slots, whatever the
//! chunk's fill level.

use std::fmt;

use thiserror::Error;

use crate::color::{ColorMap, ColorToken};
use crate::equation::Equation;
use crate::normalize::normalize;

/// Output slots available on the device per program.
pub const SLOTS_PER_CHUNK: usize = 10;

/// Picture variable used to save and restore the drawn background.
const BACKING_PICTURE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slot index {0} is out of range (0-9)")]
pub struct SlotError(pub usize);

/// An output variable index within a program chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    pub const ALL: [Self; SLOTS_PER_CHUNK] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    pub fn try_new(index: usize) -> Result<Self, SlotError> {
        Self::ALL.get(index).copied().ok_or(SlotError(index))
    }

    /// Slot for an equation at `position` in the full equation set.
    #[must_use]
    pub fn for_position(position: usize) -> Self {
        Self::ALL[position % SLOTS_PER_CHUNK]
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}", self.0)
    }
}

/// One line of device code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `"piecewise(expr,constraint)"->Yn`
    Piecewise {
        expression: String,
        constraint: String,
        slot: Slot,
    },
    /// `GraphColor(Yn,color)`
    GraphColor { slot: Slot, color: ColorToken },
    DispGraph,
    RecallPic(u8),
    StorePic(u8),
    ClrDraw,
    DelVar(Slot),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Piecewise {
                expression,
                constraint,
                slot,
            } => write!(f, "\"piecewise({expression},{constraint})\"->{slot}"),
            Self::GraphColor { slot, color } => write!(f, "GraphColor({slot},{color})"),
            Self::DispGraph => f.write_str("DispGraph"),
            Self::RecallPic(pic) => write!(f, "RecallPic {pic}"),
            Self::StorePic(pic) => write!(f, "StorePic {pic}"),
            Self::ClrDraw => f.write_str("ClrDraw"),
            Self::DelVar(slot) => write!(f, "DelVar {slot}"),
        }
    }
}

/// The two instructions emitted for a single equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPair {
    pub assignment: Instruction,
    pub color_binding: Instruction,
}

impl InstructionPair {
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [self.assignment.to_string(), self.color_binding.to_string()]
    }
}

impl fmt::Display for InstructionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.assignment, self.color_binding)
    }
}

/// Render one equation into its slot assignment and color binding.
#[must_use]
pub fn render_equation(
    expression: &str,
    constraint: &str,
    color: &ColorToken,
    slot: Slot,
) -> InstructionPair {
    let (expression, constraint) = normalize(expression, constraint);
    InstructionPair {
        assignment: Instruction::Piecewise {
            expression,
            constraint,
            slot,
        },
        color_binding: Instruction::GraphColor {
            slot,
            color: color.clone(),
        },
    }
}

/// Device-reset instructions appended to every chunk.
pub fn trailer() -> impl Iterator<Item = Instruction> {
    [
        Instruction::DispGraph,
        Instruction::RecallPic(BACKING_PICTURE),
        Instruction::StorePic(BACKING_PICTURE),
        Instruction::ClrDraw,
    ]
    .into_iter()
    .chain(Slot::ALL.into_iter().map(Instruction::DelVar))
}

/// A rendered program unit covering up to ten consecutive equations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramChunk {
    number: usize,
    pairs: Vec<InstructionPair>,
}

impl ProgramChunk {
    /// 1-based chunk number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn equation_count(&self) -> usize {
        self.pairs.len()
    }

    /// Every instruction in emission order: equation pairs, then the trailer.
    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.assignment.clone(), pair.color_binding.clone()])
            .chain(trailer())
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.instructions().map(|ins| ins.to_string()).collect()
    }

    /// Program text with lines joined by `\n` and no trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a program chunk holds at most {SLOTS_PER_CHUNK} equations (got {0})")]
pub struct ChunkOverflowError(pub usize);

/// Render a single chunk from `(expression, constraint, color)` entries.
pub fn render_chunk<'a, I>(number: usize, entries: I) -> Result<ProgramChunk, ChunkOverflowError>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a ColorToken)>,
{
    let entries: Vec<_> = entries.into_iter().collect();
    if entries.len() > SLOTS_PER_CHUNK {
        return Err(ChunkOverflowError(entries.len()));
    }
    Ok(assemble_chunk(number, entries))
}

/// Bind entries to slots in order. Callers guarantee at most ten entries.
fn assemble_chunk<'a, I>(number: usize, entries: I) -> ProgramChunk
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a ColorToken)>,
{
    let pairs = entries
        .into_iter()
        .zip(Slot::ALL)
        .map(|((expression, constraint, color), slot)| {
            render_equation(expression, constraint, color, slot)
        })
        .collect();
    ProgramChunk { number, pairs }
}

/// Number of chunks needed for `equations` equations.
#[must_use]
pub fn chunk_count(equations: usize) -> usize {
    equations.div_ceil(SLOTS_PER_CHUNK)
}

/// Render the full equation set; unassigned colors use [`ColorToken::FALLBACK`].
#[must_use]
pub fn render_programs(equations: &[Equation], colors: &ColorMap) -> Vec<ProgramChunk> {
    equations
        .chunks(SLOTS_PER_CHUNK)
        .enumerate()
        .map(|(k, group)| {
            let base = k * SLOTS_PER_CHUNK;
            let resolved: Vec<ColorToken> = (base..base + group.len())
                .map(|index| colors.resolved(index))
                .collect();
            let entries = group
                .iter()
                .zip(&resolved)
                .map(|(equation, color)| (equation.expression(), equation.constraint(), color));
            assemble_chunk(k + 1, entries)
        })
        .collect()
}
