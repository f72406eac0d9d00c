//! Core puzzle engine for the liquid-sorting game.
//!
//! This module defines the puzzle's fundamental components:
//! - `Color`: Identifies a liquid type held in a tube.
//! - `Tube`: A capacity-bounded stack of colored units, with the pour
//!   legality checks and the greedy pour transfer.
//! - `Move`: A (source, destination) pour description in original tube order.
//! - `Board`: The full set of tubes; generates legal successor boards and
//!   decides whether the puzzle is solved.

use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::fmt;

/// Identifies a liquid color.
///
/// Colors carry no meaning beyond equality; the wrapped id is only used to
/// map to and from the single-letter text form.
///
/// # Examples
///
/// ```
/// use liquidsort_solver::engine::Color;
/// assert_eq!(Color(0).to_char(), 'A');
/// assert_eq!(Color::from_char('C'), Some(Color(2)));
/// assert_eq!(Color::from_char('!'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    /// Converts the color to its letter representation ('A' onward).
    ///
    /// Ids past 'Z' have no letter and render as '?'.
    pub fn to_char(&self) -> char {
        if self.0 < 26 {
            (b'A' + self.0) as char
        } else {
            '?'
        }
    }

    /// Parses a single uppercase letter into a color id ('A' = 0).
    pub fn from_char(c: char) -> Option<Color> {
        if c.is_ascii_uppercase() {
            Some(Color(c as u8 - b'A'))
        } else {
            None
        }
    }

    /// Returns the ANSI background color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self.0 % 6 {
            0 => "41",
            1 => "42",
            2 => "43",
            3 => "44",
            4 => "45",
            _ => "46",
        }
    }
}

/// A single tube: a stack of colored units bounded by a fixed capacity.
///
/// `contents` is ordered bottom-to-top. The length never exceeds the
/// capacity; `with_contents` rejects layouts that would violate this.
/// Tubes are plain values: the search branches by cloning them, so a pour
/// on one board never disturbs the tubes of another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tube {
    capacity: usize,
    contents: Vec<Color>,
}

impl Tube {
    /// Creates an empty tube with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Tube {
            capacity,
            contents: Vec::with_capacity(capacity),
        }
    }

    /// Creates a tube pre-filled with `contents` (bottom-to-top).
    ///
    /// # Errors
    /// Returns `Error::TubeOverflow` when `contents` holds more units than
    /// `capacity`; an overfull tube is rejected, never truncated.
    pub fn with_contents(capacity: usize, contents: Vec<Color>) -> Result<Self> {
        if contents.len() > capacity {
            return Err(Error::TubeOverflow {
                len: contents.len(),
                capacity,
            });
        }
        Ok(Tube { capacity, contents })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The units in this tube, bottom-to-top.
    pub fn contents(&self) -> &[Color] {
        &self.contents
    }

    /// Number of units currently held.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.contents.len() == self.capacity
    }

    /// The color at the top of the stack, or `None` if empty.
    pub fn top_color(&self) -> Option<Color> {
        self.contents.last().copied()
    }

    /// A tube is completed when it is empty, or full of a single color.
    /// Completed tubes take no further part in the puzzle.
    pub fn is_completed(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        if !self.is_full() {
            return false;
        }
        let color = self.contents[0];
        self.contents.iter().all(|&c| c == color)
    }

    /// Remaining room in the tube.
    pub fn free_space(&self) -> usize {
        self.capacity - self.contents.len()
    }

    /// Length of the maximal same-color run at the top of the stack.
    /// Zero for an empty tube.
    pub fn top_run_len(&self) -> usize {
        match self.top_color() {
            Some(top) => self
                .contents
                .iter()
                .rev()
                .take_while(|&&c| c == top)
                .count(),
            None => 0,
        }
    }

    /// Checks whether pouring from this tube into `target` is legal.
    ///
    /// Illegal when this tube is empty or `target` is full; otherwise legal
    /// iff `target` is empty or the top colors match. Self-pours never
    /// arise: callers iterate over distinct tube indices, and `pour_into`
    /// cannot alias its two tubes.
    pub fn can_pour_into(&self, target: &Tube) -> bool {
        if self.is_empty() || target.is_full() {
            return false;
        }
        target.is_empty() || target.top_color() == self.top_color()
    }

    /// Pours from this tube into `target`, moving as many units of the top
    /// color as the source run and the target's free space allow. The pour
    /// is greedy: it never moves fewer units by choice.
    ///
    /// Returns whether any units moved. An illegal pour is refused and
    /// leaves both tubes untouched.
    pub fn pour_into(&mut self, target: &mut Tube) -> bool {
        if !self.can_pour_into(target) {
            return false;
        }

        // A legal pour has a run of at least 1 and free space of at least 1.
        let amount = self.top_run_len().min(target.free_space());
        for _ in 0..amount {
            let unit = self.contents.pop().expect("run length bounds the pops");
            target.contents.push(unit);
        }
        amount > 0
    }
}

/// A pour description: source and destination tube indices, 0-based in the
/// original layout order. Indices stay meaningful across the whole search
/// because tube order is part of board identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// The full puzzle configuration: an ordered sequence of tubes.
///
/// `Board` is a pure value. Equality and hashing cover exactly the tube
/// sequence (capacities and contents, order-sensitive); search bookkeeping
/// lives on the solver's node type, so two boards reached along different
/// paths compare equal whenever their tubes match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tubes: Vec<Tube>,
}

impl Board {
    /// Creates a board from already-constructed tubes.
    pub fn new(tubes: Vec<Tube>) -> Self {
        Board { tubes }
    }

    /// Creates a board from an initial layout: one color sequence per tube
    /// (bottom-to-top) and a uniform capacity.
    ///
    /// # Errors
    /// Returns `Error::TubeOverflow` when any sequence exceeds `capacity`.
    pub fn from_layout(layout: &[Vec<Color>], capacity: usize) -> Result<Self> {
        let mut tubes = Vec::with_capacity(layout.len());
        for contents in layout {
            tubes.push(Tube::with_contents(capacity, contents.clone())?);
        }
        Ok(Board { tubes })
    }

    /// Creates a scrambled board with a fixed internal seed, so repeated
    /// calls produce the same layout. See `new_random_with_seed`.
    pub fn new_random(colors: u8, capacity: usize, extra_empty: usize) -> Self {
        Self::new_random_with_seed(colors, capacity, extra_empty, 991123)
    }

    /// Creates a scrambled board from a seed: exactly `capacity` units of
    /// each of `colors` colors, shuffled uniformly across the first
    /// `colors` tubes, followed by `extra_empty` empty tubes.
    ///
    /// The same seed always produces the same board, and every color count
    /// equals `capacity` by construction, so conservation holds from the
    /// start. `capacity` must be positive.
    pub fn new_random_with_seed(
        colors: u8,
        capacity: usize,
        extra_empty: usize,
        seed: u64,
    ) -> Self {
        let mut pool = Vec::with_capacity(colors as usize * capacity);
        for id in 0..colors {
            pool.extend(std::iter::repeat(Color(id)).take(capacity));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        pool.shuffle(&mut rng);

        let mut tubes = Vec::with_capacity(colors as usize + extra_empty);
        for chunk in pool.chunks(capacity) {
            tubes.push(Tube {
                capacity,
                contents: chunk.to_vec(),
            });
        }
        for _ in 0..extra_empty {
            tubes.push(Tube::new(capacity));
        }
        Board { tubes }
    }

    /// The tubes of this board, in original layout order.
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// The board is solved when every tube is empty or full-and-monochrome.
    pub fn is_solved(&self) -> bool {
        self.tubes.iter().all(Tube::is_completed)
    }

    /// Generates every legal successor board, paired with the pour that
    /// produces it.
    ///
    /// Ordered pairs `(i, j)` of distinct indices are visited ascending `i`
    /// then ascending `j`, so the output order is deterministic. A
    /// completed tube that still holds liquid is frozen: it is never a
    /// source nor a destination. Pours are performed on a cloned tube
    /// sequence, and only pours that actually transfer units emit a board.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        let mut next = Vec::new();

        for i in 0..self.tubes.len() {
            let source = &self.tubes[i];
            if source.is_completed() && !source.is_empty() {
                continue;
            }

            for j in 0..self.tubes.len() {
                if i == j {
                    continue;
                }
                let target = &self.tubes[j];
                if target.is_completed() && !target.is_empty() {
                    continue;
                }
                if !source.can_pour_into(target) {
                    continue;
                }

                let mut tubes = self.tubes.clone();
                let (src, dst) = pair_mut(&mut tubes, i, j);
                if src.pour_into(dst) {
                    next.push((Move { from: i, to: j }, Board { tubes }));
                }
            }
        }
        next
    }

    /// Replays a single move against this board, returning the resulting
    /// board, or `None` when the pour is illegal or transfers nothing.
    pub fn apply(&self, mv: Move) -> Option<Board> {
        if mv.from == mv.to || mv.from >= self.tubes.len() || mv.to >= self.tubes.len() {
            return None;
        }
        let mut tubes = self.tubes.clone();
        let (src, dst) = pair_mut(&mut tubes, mv.from, mv.to);
        if src.pour_into(dst) {
            Some(Board { tubes })
        } else {
            None
        }
    }

    /// Canonical byte encoding of the configuration, used as the solver's
    /// cost-table key.
    ///
    /// Each tube contributes its unit ids (1-based) padded with zeros up to
    /// its capacity, so boards of one search (same tube count, uniform
    /// capacity) encode to equal keys exactly when they are equal. Tube
    /// order is significant: permuting tubes changes the key.
    pub fn encode_key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.tubes.iter().map(Tube::capacity).sum());
        for tube in &self.tubes {
            for &Color(id) in tube.contents() {
                key.push(id + 1);
            }
            for _ in tube.len()..tube.capacity() {
                key.push(0);
            }
        }
        key
    }

    /// Total unit count per color across all tubes. Pouring conserves these
    /// totals, so any reachable board reports the same map as the initial
    /// one.
    pub fn color_counts(&self) -> HashMap<Color, usize> {
        let mut counts = HashMap::new();
        for tube in &self.tubes {
            for &color in tube.contents() {
                *counts.entry(color).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Borrows two distinct tubes mutably out of one slice.
fn pair_mut(tubes: &mut [Tube], a: usize, b: usize) -> (&mut Tube, &mut Tube) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = tubes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = tubes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl fmt::Display for Board {
    /// Renders one line per tube: the index, then each unit as an
    /// ANSI-colored letter cell bottom-to-top, empty slots as dots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tube) in self.tubes.iter().enumerate() {
            write!(f, "{:>2} |", i)?;
            for color in tube.contents() {
                write!(
                    f,
                    "\x1b[1;{}m {} \x1b[m",
                    color.to_ansi_color_code(),
                    color.to_char()
                )?;
            }
            for _ in tube.len()..tube.capacity() {
                write!(f, " . ")?;
            }
            write!(f, "|")?;
            if i + 1 < self.tubes.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
