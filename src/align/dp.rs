//! 打分矩阵 H 与回溯矩阵 T 的填充和回溯。
//!
//! 两个矩阵都按行优先展平为一维数组，`idx = i * cols + j`。

use super::alignment::{Alignment, AlignmentKind};
use super::scoring::ScoringMatrix;
use crate::util::dna::GAP;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Direction {
    #[default]
    Stop,
    Diagonal,
    Up,
    Left,
}

/// 填充方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FillMode {
    Local,
    Global,
    SemiGlobal,
    /// Local restricted to |i - j| <= band.
    Banded(usize),
}

impl FillMode {
    fn kind(self) -> AlignmentKind {
        match self {
            FillMode::Local | FillMode::Banded(_) => AlignmentKind::Local,
            FillMode::Global => AlignmentKind::Global,
            FillMode::SemiGlobal => AlignmentKind::SemiGlobal,
        }
    }

    fn floors_at_zero(self) -> bool {
        matches!(self, FillMode::Local | FillMode::Banded(_))
    }
}

/// DP 工作缓冲区，可跨调用复用
#[derive(Debug, Default)]
pub struct DpBuffer {
    h: Vec<i32>,
    t: Vec<Direction>,
    cols: usize,
}

impl DpBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, rows: usize, cols: usize) {
        let size = rows * cols;
        self.cols = cols;
        self.h.clear();
        self.h.resize(size, 0);
        self.t.clear();
        self.t.resize(size, Direction::Stop);
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// 按 `mode` 填充矩阵并回溯出比对
pub(crate) fn align_with_buf(
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringMatrix,
    mode: FillMode,
    buf: &mut DpBuffer,
) -> Alignment {
    let (end, score) = fill(s1, s2, scoring, mode, buf);
    if mode.floors_at_zero() && score == 0 {
        return Alignment::empty(mode.kind());
    }
    traceback(s1, s2, buf, end, score, mode.kind())
}

fn fill(
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringMatrix,
    mode: FillMode,
    buf: &mut DpBuffer,
) -> ((usize, usize), i32) {
    let m = s1.len();
    let n = s2.len();
    let gap = scoring.linear_gap_penalty();
    buf.reset(m + 1, n + 1);
    log::trace!("dp fill {:?}: {}x{} cells", mode, m + 1, n + 1);

    // boundaries; local modes keep the zeroed Stop cells from reset()
    match mode {
        FillMode::Global => {
            for i in 1..=m {
                let idx = buf.idx(i, 0);
                buf.h[idx] = gap * i as i32;
                buf.t[idx] = Direction::Up;
            }
            for j in 1..=n {
                let idx = buf.idx(0, j);
                buf.h[idx] = gap * j as i32;
                buf.t[idx] = Direction::Left;
            }
        }
        FillMode::SemiGlobal => {
            // row 0 stays 0/Stop: leading reference symbols are free
            for i in 1..=m {
                let idx = buf.idx(i, 0);
                buf.h[idx] = gap * i as i32;
                buf.t[idx] = Direction::Up;
            }
        }
        FillMode::Local | FillMode::Banded(_) => {}
    }

    let floor = mode.floors_at_zero();
    let mut best_score = 0i32;
    let mut best = (0usize, 0usize);

    for i in 1..=m {
        let (j_start, j_end) = match mode {
            FillMode::Banded(band) => (i.saturating_sub(band).max(1), (i + band).min(n)),
            _ => (1, n),
        };
        if j_start > j_end {
            continue;
        }

        for j in j_start..=j_end {
            let idx = buf.idx(i, j);
            let diag = buf.h[buf.idx(i - 1, j - 1)] + scoring.score(s1[i - 1], s2[j - 1]);
            let up = buf.h[buf.idx(i - 1, j)] + gap;
            let left = buf.h[idx - 1] + gap;

            let mut val = diag.max(up).max(left);
            if floor && val < 0 {
                val = 0;
            }
            let dir = if floor && val == 0 {
                Direction::Stop
            } else if val == diag {
                Direction::Diagonal
            } else if val == up {
                Direction::Up
            } else {
                Direction::Left
            };
            buf.h[idx] = val;
            buf.t[idx] = dir;

            if floor && val > best_score {
                best_score = val;
                best = (i, j);
            }
        }
    }

    match mode {
        FillMode::Local | FillMode::Banded(_) => (best, best_score),
        FillMode::Global => ((m, n), buf.h[buf.idx(m, n)]),
        FillMode::SemiGlobal => {
            // first maximum across the last row
            let mut best_j = 0usize;
            let mut best_val = buf.h[buf.idx(m, 0)];
            for j in 1..=n {
                let v = buf.h[buf.idx(m, j)];
                if v > best_val {
                    best_val = v;
                    best_j = j;
                }
            }
            ((m, best_j), best_val)
        }
    }
}

#[inline]
fn symbol(b: u8) -> u8 {
    if b.is_ascii() && b != GAP {
        b
    } else {
        b'N'
    }
}

fn traceback(
    s1: &[u8],
    s2: &[u8],
    buf: &DpBuffer,
    end: (usize, usize),
    score: i32,
    kind: AlignmentKind,
) -> Alignment {
    let mut aligned1: Vec<u8> = Vec::with_capacity(end.0 + end.1);
    let mut aligned2: Vec<u8> = Vec::with_capacity(end.0 + end.1);
    let (mut i, mut j) = end;

    while i > 0 || j > 0 {
        match buf.t[buf.idx(i, j)] {
            Direction::Stop => break,
            Direction::Diagonal => {
                aligned1.push(symbol(s1[i - 1]));
                aligned2.push(symbol(s2[j - 1]));
                i -= 1;
                j -= 1;
            }
            Direction::Up => {
                aligned1.push(symbol(s1[i - 1]));
                aligned2.push(GAP);
                i -= 1;
            }
            Direction::Left => {
                aligned1.push(GAP);
                aligned2.push(symbol(s2[j - 1]));
                j -= 1;
            }
        }
    }

    aligned1.reverse();
    aligned2.reverse();

    Alignment::new(
        ascii_string(aligned1),
        ascii_string(aligned2),
        score,
        (i, end.0),
        (j, end.1),
        kind,
    )
}

fn ascii_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}
