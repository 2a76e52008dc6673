//! Matching bracket search over a joined buffer.

use crate::compose::JoinedBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Partner and scan direction for a bracket character.
pub fn partner(c: char) -> Option<(char, Direction)> {
    match c {
        '(' => Some((')', Direction::Forward)),
        '[' => Some((']', Direction::Forward)),
        '{' => Some(('}', Direction::Forward)),
        ')' => Some(('(', Direction::Backward)),
        ']' => Some(('[', Direction::Backward)),
        '}' => Some(('{', Direction::Backward)),
        _ => None,
    }
}

/// Offset of the bracket paired with the one at `cursor`, honouring nesting.
///
/// Forward scans run to the end of the buffer. Backward scans stop at
/// `visible`, so partners that only exist in preread rows are not reported.
pub fn matching_bracket(buffer: &JoinedBuffer, cursor: usize, visible: usize) -> Option<usize> {
    let open = buffer.char_at(cursor);
    let (close, direction) = partner(open)?;
    let mut depth = 0usize;
    let mut step = |offset: usize| {
        let c = buffer.char_at(offset);
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return true;
            }
        }
        false
    };
    match direction {
        Direction::Forward => (cursor..buffer.len()).find(|&o| step(o)),
        Direction::Backward if cursor >= visible => (visible..=cursor).rev().find(|&o| step(o)),
        Direction::Backward => None,
    }
}
